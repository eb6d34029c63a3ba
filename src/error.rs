//! Typed errors and the HTTP error translator.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const BAD_REQUEST_MSG: &str = "Bad request";
pub const NOT_FOUND_MSG: &str = "Not found";
pub const PAGINATION_MSG: &str = "Page number must start from 1 not 0";
pub const INTERNAL_MSG: &str = "Internal server error";
pub const METHOD_NOT_ALLOWED_MSG: &str = "Method not allowed";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("seed load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Entity absent for a syntactically valid key. The message goes to the client as is.
    #[error("{0}")]
    NotFound(String),
    /// Malformed id, sort column, order, vote delta or body field.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A write referenced a topic, user or article that does not exist.
    #[error("missing reference: {0}")]
    Reference(String),
    #[error("{}", PAGINATION_MSG)]
    Pagination,
    #[error("{}", METHOD_NOT_ALLOWED_MSG)]
    MethodNotAllowed,
    #[error("invalid json body: {0}")]
    Json(#[from] JsonRejection),
    #[error("invalid path: {0}")]
    Path(#[from] PathRejection),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found() -> Self {
        AppError::NotFound(NOT_FOUND_MSG.into())
    }

    /// Status and client message for this error, in translator order:
    /// explicit variants first, then known SQLSTATE codes, then 500.
    pub fn status_and_msg(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(_)
            | AppError::Reference(_)
            | AppError::Json(_)
            | AppError::Path(_) => {
                (StatusCode::BAD_REQUEST, BAD_REQUEST_MSG.into())
            }
            AppError::Pagination => (StatusCode::NOT_FOUND, PAGINATION_MSG.into()),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MSG.into()),
            AppError::Db(e) => match e.as_database_error().and_then(|d| d.code()) {
                Some(code) => match classify_sql_state(&code) {
                    DbErrorClass::BadRequest => (StatusCode::BAD_REQUEST, BAD_REQUEST_MSG.into()),
                    DbErrorClass::Pagination => (StatusCode::NOT_FOUND, PAGINATION_MSG.into()),
                    DbErrorClass::Unhandled => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MSG.into()),
                },
                None => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MSG.into()),
            },
        }
    }
}

/// How a PostgreSQL SQLSTATE code surfaces to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorClass {
    BadRequest,
    Pagination,
    Unhandled,
}

pub fn classify_sql_state(code: &str) -> DbErrorClass {
    match code {
        // invalid_text_representation, foreign_key_violation, not_null_violation,
        // unique_violation, numeric_value_out_of_range
        "22P02" | "23503" | "23502" | "23505" | "22003" => DbErrorClass::BadRequest,
        // invalid_row_count_in_result_offset_clause
        "2201X" => DbErrorClass::Pagination,
        _ => DbErrorClass::Unhandled,
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub msg: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_msg();
        if status.is_server_error() {
            tracing::error!(error = %self, "unhandled error");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        (status, Json(ErrorBody { msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_states_map_to_client_classes() {
        assert_eq!(classify_sql_state("22P02"), DbErrorClass::BadRequest);
        assert_eq!(classify_sql_state("23503"), DbErrorClass::BadRequest);
        assert_eq!(classify_sql_state("23505"), DbErrorClass::BadRequest);
        assert_eq!(classify_sql_state("2201X"), DbErrorClass::Pagination);
        assert_eq!(classify_sql_state("42P01"), DbErrorClass::Unhandled);
    }

    #[test]
    fn explicit_variants_keep_their_status() {
        let (status, msg) = AppError::NotFound("No article found under article_id 9999".into()).status_and_msg();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "No article found under article_id 9999");

        let (status, msg) = AppError::BadRequest("sort_by".into()).status_and_msg();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, BAD_REQUEST_MSG);

        let (status, msg) = AppError::Reference("author".into()).status_and_msg();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, BAD_REQUEST_MSG);

        let (status, msg) = AppError::Pagination.status_and_msg();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, PAGINATION_MSG);

        let (status, msg) = AppError::MethodNotAllowed.status_and_msg();
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(msg, METHOD_NOT_ALLOWED_MSG);
    }

    #[test]
    fn unknown_database_errors_are_server_faults() {
        let (status, msg) = AppError::Db(sqlx::Error::PoolTimedOut).status_and_msg();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, INTERNAL_MSG);
    }
}
