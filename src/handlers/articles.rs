//! Article handlers, including the comment list and comment creation nested under an article.

use crate::error::AppError;
use crate::models::{NewArticle, NewComment, VoteUpdate};
use crate::query::{parse_id, ArticleListQuery, Window};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;

/// `{articles, total}`; `total` counts every article matching the topic filter.
pub async fn get_articles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let query = ArticleListQuery::from_params(&params)?;
    let page = state.store.list_articles(&query).await?;
    Ok((StatusCode::OK, Json(page)))
}

pub async fn post_article(
    State(state): State<AppState>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    body.validate()?;
    let article = state.store.create_article(&body).await?;
    tracing::info!(article_id = article.article_id, "article created");
    Ok(created("article", article))
}

pub async fn get_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let article_id = parse_id(&id_str)?;
    let article = state
        .store
        .get_article(article_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No article found under article_id {}", id_str)))?;
    Ok(ok("article", article))
}

/// PATCH answers 201 with the bare article row.
pub async fn patch_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<VoteUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let article_id = parse_id(&id_str)?;
    let Json(update) = payload?;
    let article = state
        .store
        .increment_article_votes(article_id, update.inc_votes)
        .await?
        .ok_or_else(AppError::not_found)?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn delete_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let article_id = parse_id(&id_str)?;
    if !state.store.delete_article(article_id).await? {
        return Err(AppError::not_found());
    }
    tracing::info!(article_id, "article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// An article with no comments and a missing article both answer 404 "Not found".
pub async fn get_article_comments(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let article_id = parse_id(&id_str)?;
    let window = Window::from_params(&params)?;
    let comments = state.store.list_comments(article_id, &window).await?;
    if comments.is_empty() {
        return Err(AppError::not_found());
    }
    Ok(ok("comments", comments))
}

pub async fn post_article_comment(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id_str) = path?;
    let article_id = parse_id(&id_str)?;
    let Json(body) = payload?;
    body.validate()?;
    let comment = state.store.create_comment(article_id, &body).await?;
    tracing::info!(article_id, comment_id = comment.comment_id, "comment created");
    Ok(created("comment", comment))
}
