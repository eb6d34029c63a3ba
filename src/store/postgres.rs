//! `NewsStore` over a PostgreSQL pool.

use super::{ArticlePage, NewsStore};
use crate::error::AppError;
use crate::models::{Article, ArticleRow, Comment, NewArticle, NewComment, NewTopic, Topic, User};
use crate::query::{ArticleListQuery, Window};
use crate::sql::{
    count_articles, delete_by_id, increment_votes, insert_article, insert_comment, insert_topic,
    select_article_by_id, select_articles, select_comments_by_article, select_topics,
    select_user_by_username, select_users, QueryBuf, VotedTable,
};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_all<T>(&self, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional<T>(&self, q: &QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn fetch_one<T>(&self, q: &QueryBuf) -> Result<T, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        self.fetch_optional(q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn fetch_scalar<T>(&self, q: &QueryBuf) -> Result<T, AppError>
    where
        T: Send + Unpin,
        (T,): for<'r> FromRow<'r, PgRow>,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

#[async_trait]
impl NewsStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        self.fetch_all(&select_topics()).await
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, AppError> {
        self.fetch_one(&insert_topic(&topic.slug, &topic.description)).await
    }

    async fn get_article(&self, article_id: i32) -> Result<Option<Article>, AppError> {
        self.fetch_optional(&select_article_by_id(article_id)).await
    }

    async fn list_articles(&self, query: &ArticleListQuery) -> Result<ArticlePage, AppError> {
        let articles = self.fetch_all(&select_articles(query)).await?;
        let total = self.fetch_scalar::<i64>(&count_articles(query.topic.as_deref())).await?;
        Ok(ArticlePage { articles, total })
    }

    async fn create_article(&self, article: &NewArticle) -> Result<Article, AppError> {
        let q = insert_article(
            &article.author,
            &article.title,
            &article.body,
            &article.topic,
            article.img_url(),
        );
        let article_id = self.fetch_scalar::<i32>(&q).await?;
        self.fetch_one(&select_article_by_id(article_id)).await
    }

    async fn increment_article_votes(&self, article_id: i32, delta: i32) -> Result<Option<ArticleRow>, AppError> {
        self.fetch_optional(&increment_votes(VotedTable::Articles, article_id, delta))
            .await
    }

    async fn delete_article(&self, article_id: i32) -> Result<bool, AppError> {
        let n = self.execute(&delete_by_id(VotedTable::Articles, article_id)).await?;
        Ok(n == 1)
    }

    async fn list_comments(&self, article_id: i32, window: &Window) -> Result<Vec<Comment>, AppError> {
        self.fetch_all(&select_comments_by_article(article_id, window)).await
    }

    async fn create_comment(&self, article_id: i32, comment: &NewComment) -> Result<Comment, AppError> {
        self.fetch_one(&insert_comment(article_id, &comment.author, &comment.body))
            .await
    }

    async fn increment_comment_votes(&self, comment_id: i32, delta: i32) -> Result<Option<Comment>, AppError> {
        self.fetch_optional(&increment_votes(VotedTable::Comments, comment_id, delta))
            .await
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<bool, AppError> {
        let n = self.execute(&delete_by_id(VotedTable::Comments, comment_id)).await?;
        Ok(n == 1)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.fetch_all(&select_users()).await
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.fetch_optional(&select_user_by_username(username)).await
    }
}
