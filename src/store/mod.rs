//! Data access: the `NewsStore` seam, a PostgreSQL implementation and an in-memory one.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{Article, ArticleRow, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User};
use crate::query::{ArticleListQuery, Window};
use async_trait::async_trait;
use serde::Serialize;

/// One page of `GET /api/articles` plus the count of all articles matching the topic filter.
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,
    pub total: i64,
}

/// Every operation is a single round trip; mutations never read before they write.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_topics(&self) -> Result<Vec<Topic>, AppError>;

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, AppError>;

    async fn get_article(&self, article_id: i32) -> Result<Option<Article>, AppError>;

    async fn list_articles(&self, query: &ArticleListQuery) -> Result<ArticlePage, AppError>;

    /// Inserts, then re-reads by the generated id so the result carries `comment_count`.
    async fn create_article(&self, article: &NewArticle) -> Result<Article, AppError>;

    /// `None` when no article has this id.
    async fn increment_article_votes(&self, article_id: i32, delta: i32) -> Result<Option<ArticleRow>, AppError>;

    /// True when exactly one row was removed. Comments go with it.
    async fn delete_article(&self, article_id: i32) -> Result<bool, AppError>;

    async fn list_comments(&self, article_id: i32, window: &Window) -> Result<Vec<Comment>, AppError>;

    async fn create_comment(&self, article_id: i32, comment: &NewComment) -> Result<Comment, AppError>;

    async fn increment_comment_votes(&self, comment_id: i32, delta: i32) -> Result<Option<Comment>, AppError>;

    async fn delete_comment(&self, comment_id: i32) -> Result<bool, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError>;
}
