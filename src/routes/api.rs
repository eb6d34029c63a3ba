//! The `/api` surface.

use crate::handlers::{
    delete_article, delete_comment, get_article, get_article_comments, get_articles, get_endpoints,
    get_topics, get_user, get_users, patch_article, patch_comment, post_article, post_article_comment,
    post_topic,
};
use crate::state::AppState;
use axum::{routing::get, routing::patch, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api", get(get_endpoints))
        .route("/api/topics", get(get_topics).post(post_topic))
        .route("/api/articles", get(get_articles).post(post_article))
        .route(
            "/api/articles/:article_id",
            get(get_article).patch(patch_article).delete(delete_article),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_article_comments).post(post_article_comment),
        )
        .route("/api/comments/:comment_id", patch(patch_comment).delete(delete_comment))
        .route("/api/users", get(get_users))
        .route("/api/users/:username", get(get_user))
        .with_state(state)
}
