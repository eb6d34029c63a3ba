//! `GET /api` endpoint map and the fallbacks for unknown paths and methods.

use crate::error::AppError;
use axum::{
    http::{Method, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

/// Static description of every endpoint this service answers.
pub fn endpoints() -> Value {
    json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!" }]
            }
        },
        "POST /api/topics": {
            "description": "adds a topic and serves it back",
            "body": { "slug": "string", "description": "string" },
            "exampleResponse": {
                "topic": { "slug": "football", "description": "Footie!" }
            }
        },
        "GET /api/articles": {
            "description": "serves a page of articles and the total matching the topic filter",
            "queries": ["topic", "sort_by", "order", "limit", "page"],
            "exampleResponse": {
                "articles": [{
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "created_at": "2018-05-30T15:59:13Z",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700",
                    "comment_count": 6
                }],
                "total": 1
            }
        },
        "POST /api/articles": {
            "description": "adds an article and serves it back with a comment_count of 0",
            "body": {
                "author": "string",
                "title": "string",
                "body": "string",
                "topic": "string",
                "article_img_url": "string (optional)"
            }
        },
        "GET /api/articles/:article_id": {
            "description": "serves one article with its comment_count"
        },
        "PATCH /api/articles/:article_id": {
            "description": "adds inc_votes to the article's votes and serves the updated article",
            "body": { "inc_votes": "integer" }
        },
        "DELETE /api/articles/:article_id": {
            "description": "deletes the article and its comments"
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves the article's comments, most recent first",
            "queries": ["limit", "page"]
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to the article and serves it back",
            "body": { "author": "string", "body": "string" }
        },
        "PATCH /api/comments/:comment_id": {
            "description": "adds inc_votes to the comment's votes and serves the updated comment",
            "body": { "inc_votes": "integer" }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes the comment"
        },
        "GET /api/users": {
            "description": "serves an array of all users"
        },
        "GET /api/users/:username": {
            "description": "serves one user"
        }
    })
}

pub async fn get_endpoints() -> impl IntoResponse {
    Json(json!({ "endpoints": endpoints() }))
}

pub async fn path_not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound("Path not found".into())
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    tracing::debug!(%method, path = %uri.path(), "method not allowed");
    AppError::MethodNotAllowed
}
