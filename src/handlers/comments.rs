use crate::error::AppError;
use crate::models::VoteUpdate;
use crate::query::parse_id;
use crate::state::AppState;
use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// PATCH answers 201 with the bare comment.
pub async fn patch_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<VoteUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let comment_id = parse_id(&id_str)?;
    let Json(update) = payload?;
    let comment = state
        .store
        .increment_comment_votes(comment_id, update.inc_votes)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let comment_id = parse_id(&id_str)?;
    if !state.store.delete_comment(comment_id).await? {
        return Err(AppError::not_found());
    }
    tracing::info!(comment_id, "comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
