use crate::error::AppError;
use crate::response::ok;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
};

pub async fn get_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.store.list_users().await?;
    Ok(ok("users", users))
}

pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(username) = path?;
    let user = state
        .store
        .get_user(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user found under username {}", username)))?;
    Ok(ok("user", user))
}
