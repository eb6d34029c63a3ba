use crate::error::AppError;
use crate::models::NewTopic;
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};

pub async fn get_topics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let topics = state.store.list_topics().await?;
    Ok(ok("topics", topics))
}

pub async fn post_topic(
    State(state): State<AppState>,
    payload: Result<Json<NewTopic>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    body.validate()?;
    let topic = state.store.create_topic(&body).await?;
    tracing::info!(slug = %topic.slug, "topic created");
    Ok(created("topic", topic))
}
