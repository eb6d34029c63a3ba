//! Seed data: load from JSON files and write to a fresh schema.

use crate::error::{AppError, ConfigError};
use crate::models::{Topic, User, DEFAULT_ARTICLE_IMG_URL};
use crate::schema::{drop_schema, ensure_schema};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SeedArticle {
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: i32,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

impl SeedArticle {
    pub fn img_url(&self) -> &str {
        self.article_img_url.as_deref().unwrap_or(DEFAULT_ARTICLE_IMG_URL)
    }
}

/// A comment row; `article_id` is the 1-based position of its article in the seed.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
    pub body: String,
    pub article_id: i32,
    pub author: String,
    #[serde(default)]
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub topics: Vec<Topic>,
    pub users: Vec<User>,
    pub articles: Vec<SeedArticle>,
    pub comments: Vec<SeedComment>,
}

impl SeedData {
    /// Reads `topics.json`, `users.json`, `articles.json` and `comments.json` from `dir`.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        Ok(SeedData {
            topics: read_json(&dir.join("topics.json")).await?,
            users: read_json(&dir.join("users.json")).await?,
            articles: read_json(&dir.join("articles.json")).await?,
            comments: read_json(&dir.join("comments.json")).await?,
        })
    }

    /// The bundled test fixture: 3 topics, 4 users, 13 articles, 18 comments.
    pub fn test_data() -> Result<Self, ConfigError> {
        Self::from_json_strs(
            include_str!("../data/test/topics.json"),
            include_str!("../data/test/users.json"),
            include_str!("../data/test/articles.json"),
            include_str!("../data/test/comments.json"),
        )
    }

    pub fn from_json_strs(topics: &str, users: &str, articles: &str, comments: &str) -> Result<Self, ConfigError> {
        let parse = |name: &str, e: serde_json::Error| ConfigError::Load(format!("{}: {}", name, e));
        Ok(SeedData {
            topics: serde_json::from_str(topics).map_err(|e| parse("topics", e))?,
            users: serde_json::from_str(users).map_err(|e| parse("users", e))?,
            articles: serde_json::from_str(articles).map_err(|e| parse("articles", e))?,
            comments: serde_json::from_str(comments).map_err(|e| parse("comments", e))?,
        })
    }
}

async fn read_json<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

/// Drop and recreate all tables, then insert `data` in order, in one transaction.
/// Generated ids therefore start at 1 and follow the seed order.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    drop_schema(&mut tx).await?;
    ensure_schema(&mut tx).await?;

    for t in &data.topics {
        sqlx::query("INSERT INTO topics (slug, description) VALUES ($1, $2)")
            .bind(&t.slug)
            .bind(&t.description)
            .execute(&mut *tx)
            .await?;
    }
    for u in &data.users {
        sqlx::query("INSERT INTO users (username, name, avatar_url) VALUES ($1, $2, $3)")
            .bind(&u.username)
            .bind(&u.name)
            .bind(&u.avatar_url)
            .execute(&mut *tx)
            .await?;
    }
    for a in &data.articles {
        sqlx::query(
            "INSERT INTO articles (title, topic, author, body, created_at, votes, article_img_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&a.title)
        .bind(&a.topic)
        .bind(&a.author)
        .bind(&a.body)
        .bind(a.created_at)
        .bind(a.votes)
        .bind(a.img_url())
        .execute(&mut *tx)
        .await?;
    }
    for c in &data.comments {
        sqlx::query(
            "INSERT INTO comments (body, article_id, author, votes, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&c.body)
        .bind(c.article_id)
        .bind(&c.author)
        .bind(c.votes)
        .bind(c.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(
        topics = data.topics.len(),
        users = data.users.len(),
        articles = data.articles.len(),
        comments = data.comments.len(),
        "seeded database"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_has_expected_shape() {
        let data = SeedData::test_data().unwrap();
        assert_eq!(data.topics.len(), 3);
        assert_eq!(data.users.len(), 4);
        assert_eq!(data.articles.len(), 13);
        assert_eq!(data.comments.len(), 18);
        assert_eq!(data.comments.iter().filter(|c| c.article_id == 1).count(), 11);
        assert_eq!(data.comments.iter().filter(|c| c.article_id == 2).count(), 0);
    }

    #[test]
    fn comments_reference_seeded_rows() {
        let data = SeedData::test_data().unwrap();
        let n = data.articles.len() as i32;
        for c in &data.comments {
            assert!((1..=n).contains(&c.article_id));
            assert!(data.users.iter().any(|u| u.username == c.author));
        }
        for a in &data.articles {
            assert!(data.topics.iter().any(|t| t.slug == a.topic));
            assert!(data.users.iter().any(|u| u.username == a.author));
        }
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = SeedData::from_json_strs("[]", "[]", "{", "[]").unwrap_err();
        assert!(matches!(err, ConfigError::Load(msg) if msg.starts_with("articles")));
    }
}
