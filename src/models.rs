//! Entity shapes as stored and as sent over the wire, plus request bodies.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARTICLE_IMG_URL: &str =
    "https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// A single article with its comment count, as returned by read, create and list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

/// A row of `GET /api/articles`: no body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i32,
}

impl From<Article> for ArticleSummary {
    fn from(a: Article) -> Self {
        ArticleSummary {
            article_id: a.article_id,
            title: a.title,
            topic: a.topic,
            author: a.author,
            created_at: a.created_at,
            votes: a.votes,
            article_img_url: a.article_img_url,
            comment_count: a.comment_count,
        }
    }
}

/// An article row without the derived comment count, as returned by a vote update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArticleRow {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub article_img_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i32,
    pub body: String,
    pub article_id: i32,
    pub author: String,
    pub votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTopic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub author: String,
    pub title: String,
    pub body: String,
    pub topic: String,
    #[serde(default)]
    pub article_img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VoteUpdate {
    pub inc_votes: i32,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl NewTopic {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("slug", &self.slug)?;
        require_non_empty("description", &self.description)
    }
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("author", &self.author)?;
        require_non_empty("title", &self.title)?;
        require_non_empty("body", &self.body)?;
        require_non_empty("topic", &self.topic)
    }

    /// Image url to store: the supplied one, or the default when absent or blank.
    pub fn img_url(&self) -> &str {
        match self.article_img_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_ARTICLE_IMG_URL,
        }
    }
}

impl NewComment {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("author", &self.author)?;
        require_non_empty("body", &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_article_defaults_image_url() {
        let a: NewArticle = serde_json::from_value(json!({
            "author": "rogersop",
            "title": "t",
            "body": "b",
            "topic": "cats"
        }))
        .unwrap();
        assert!(a.validate().is_ok());
        assert_eq!(a.img_url(), DEFAULT_ARTICLE_IMG_URL);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let c = NewComment { author: "lurker".into(), body: "   ".into() };
        assert!(matches!(c.validate(), Err(AppError::BadRequest(_))));
        let t = NewTopic { slug: "".into(), description: "d".into() };
        assert!(matches!(t.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn non_numeric_vote_delta_does_not_parse() {
        assert!(serde_json::from_value::<VoteUpdate>(json!({"inc_votes": "fffffff"})).is_err());
        assert!(serde_json::from_value::<VoteUpdate>(json!({})).is_err());
        assert_eq!(serde_json::from_value::<VoteUpdate>(json!({"inc_votes": -25})).unwrap().inc_votes, -25);
    }
}
