//! In-process `NewsStore`: same contract as the PostgreSQL store, including reference
//! checks, cascade delete and windowing. Used by the HTTP tests and for running without a database.

use super::{ArticlePage, NewsStore};
use crate::error::AppError;
use crate::models::{Article, ArticleRow, ArticleSummary, Comment, NewArticle, NewComment, NewTopic, Topic, User};
use crate::query::{ArticleListQuery, SortColumn, SortOrder, Window};
use crate::seed::SeedData;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<ArticleRow>,
    comments: Vec<Comment>,
    next_article_id: i32,
    next_comment_id: i32,
}

impl Tables {
    fn comment_count(&self, article_id: i32) -> i32 {
        self.comments.iter().filter(|c| c.article_id == article_id).count() as i32
    }

    fn with_count(&self, row: &ArticleRow) -> Article {
        Article {
            article_id: row.article_id,
            title: row.title.clone(),
            topic: row.topic.clone(),
            author: row.author.clone(),
            body: row.body.clone(),
            created_at: row.created_at,
            votes: row.votes,
            article_img_url: row.article_img_url.clone(),
            comment_count: self.comment_count(row.article_id),
        }
    }

    fn has_user(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }

    fn has_topic(&self, slug: &str) -> bool {
        self.topics.iter().any(|t| t.slug == slug)
    }

    fn has_article(&self, article_id: i32) -> bool {
        self.articles.iter().any(|a| a.article_id == article_id)
    }
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tables: Mutex::new(Tables {
                next_article_id: 1,
                next_comment_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Loads seed rows in order; ids are assigned from 1 as a fresh database would.
    pub fn from_seed(data: &SeedData) -> Self {
        let store = MemoryStore::new();
        {
            let mut t = store.lock();
            t.topics = data.topics.clone();
            t.users = data.users.clone();
            for a in &data.articles {
                let article_id = t.next_article_id;
                t.next_article_id += 1;
                t.articles.push(ArticleRow {
                    article_id,
                    title: a.title.clone(),
                    topic: a.topic.clone(),
                    author: a.author.clone(),
                    body: a.body.clone(),
                    created_at: a.created_at,
                    votes: a.votes,
                    article_img_url: a.img_url().to_string(),
                });
            }
            for c in &data.comments {
                let comment_id = t.next_comment_id;
                t.next_comment_id += 1;
                t.comments.push(Comment {
                    comment_id,
                    body: c.body.clone(),
                    article_id: c.article_id,
                    author: c.author.clone(),
                    votes: c.votes,
                    created_at: c.created_at,
                });
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means another test thread panicked mid-write.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn window_bounds(window: &Window) -> (usize, usize) {
    let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
    let take = usize::try_from(window.limit).unwrap_or(usize::MAX);
    (skip, take)
}

/// Text columns compare by bytes, matching the `COLLATE "C"` the SQL builder applies.
fn compare_articles(a: &ArticleRow, b: &ArticleRow, column: SortColumn) -> Ordering {
    let primary = match column {
        SortColumn::ArticleId => a.article_id.cmp(&b.article_id),
        SortColumn::Title => a.title.cmp(&b.title),
        SortColumn::Topic => a.topic.cmp(&b.topic),
        SortColumn::Author => a.author.cmp(&b.author),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Votes => a.votes.cmp(&b.votes),
    };
    primary.then(a.article_id.cmp(&b.article_id))
}

fn add_votes(votes: &mut i32, delta: i32) -> Result<i32, AppError> {
    *votes = votes
        .checked_add(delta)
        .ok_or_else(|| AppError::BadRequest("votes out of range".into()))?;
    Ok(*votes)
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        Ok(self.lock().topics.clone())
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, AppError> {
        let mut t = self.lock();
        if t.has_topic(&topic.slug) {
            return Err(AppError::BadRequest(format!("topic '{}' already exists", topic.slug)));
        }
        let row = Topic {
            slug: topic.slug.clone(),
            description: topic.description.clone(),
        };
        t.topics.push(row.clone());
        Ok(row)
    }

    async fn get_article(&self, article_id: i32) -> Result<Option<Article>, AppError> {
        let t = self.lock();
        Ok(t.articles
            .iter()
            .find(|a| a.article_id == article_id)
            .map(|a| t.with_count(a)))
    }

    async fn list_articles(&self, query: &ArticleListQuery) -> Result<ArticlePage, AppError> {
        let t = self.lock();
        let mut rows: Vec<&ArticleRow> = t
            .articles
            .iter()
            .filter(|a| query.topic.as_deref().map_or(true, |topic| a.topic == topic))
            .collect();
        let total = rows.len() as i64;
        rows.sort_by(|a, b| {
            let ord = compare_articles(a, b, query.sort_by);
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        let (skip, take) = window_bounds(&query.window);
        let articles = rows
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|a| ArticleSummary::from(t.with_count(a)))
            .collect();
        Ok(ArticlePage { articles, total })
    }

    async fn create_article(&self, article: &NewArticle) -> Result<Article, AppError> {
        let mut t = self.lock();
        if !t.has_user(&article.author) {
            return Err(AppError::Reference(format!("author '{}'", article.author)));
        }
        if !t.has_topic(&article.topic) {
            return Err(AppError::Reference(format!("topic '{}'", article.topic)));
        }
        let article_id = t.next_article_id;
        t.next_article_id += 1;
        let row = ArticleRow {
            article_id,
            title: article.title.clone(),
            topic: article.topic.clone(),
            author: article.author.clone(),
            body: article.body.clone(),
            created_at: Utc::now(),
            votes: 0,
            article_img_url: article.img_url().to_string(),
        };
        let created = t.with_count(&row);
        t.articles.push(row);
        Ok(created)
    }

    async fn increment_article_votes(&self, article_id: i32, delta: i32) -> Result<Option<ArticleRow>, AppError> {
        let mut t = self.lock();
        let Some(row) = t.articles.iter_mut().find(|a| a.article_id == article_id) else {
            return Ok(None);
        };
        add_votes(&mut row.votes, delta)?;
        Ok(Some(row.clone()))
    }

    async fn delete_article(&self, article_id: i32) -> Result<bool, AppError> {
        let mut t = self.lock();
        let before = t.articles.len();
        t.articles.retain(|a| a.article_id != article_id);
        if t.articles.len() == before {
            return Ok(false);
        }
        t.comments.retain(|c| c.article_id != article_id);
        Ok(true)
    }

    async fn list_comments(&self, article_id: i32, window: &Window) -> Result<Vec<Comment>, AppError> {
        let t = self.lock();
        let mut rows: Vec<&Comment> = t.comments.iter().filter(|c| c.article_id == article_id).collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.comment_id.cmp(&a.comment_id))
        });
        let (skip, take) = window_bounds(window);
        Ok(rows.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn create_comment(&self, article_id: i32, comment: &NewComment) -> Result<Comment, AppError> {
        let mut t = self.lock();
        if !t.has_article(article_id) {
            return Err(AppError::Reference(format!("article {}", article_id)));
        }
        if !t.has_user(&comment.author) {
            return Err(AppError::Reference(format!("author '{}'", comment.author)));
        }
        let comment_id = t.next_comment_id;
        t.next_comment_id += 1;
        let row = Comment {
            comment_id,
            body: comment.body.clone(),
            article_id,
            author: comment.author.clone(),
            votes: 0,
            created_at: Utc::now(),
        };
        t.comments.push(row.clone());
        Ok(row)
    }

    async fn increment_comment_votes(&self, comment_id: i32, delta: i32) -> Result<Option<Comment>, AppError> {
        let mut t = self.lock();
        let Some(row) = t.comments.iter_mut().find(|c| c.comment_id == comment_id) else {
            return Ok(None);
        };
        add_votes(&mut row.votes, delta)?;
        Ok(Some(row.clone()))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<bool, AppError> {
        let mut t = self.lock();
        let before = t.comments.len();
        t.comments.retain(|c| c.comment_id != comment_id);
        Ok(t.comments.len() != before)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock().users.clone())
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.username == username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::from_seed(&SeedData::test_data().unwrap())
    }

    #[tokio::test]
    async fn seeded_ids_start_at_one() {
        let s = store();
        let a = s.get_article(3).await.unwrap().unwrap();
        assert_eq!(a.title, "Eight pug gifs that remind me of mitch");
        assert_eq!(a.comment_count, 2);
    }

    #[tokio::test]
    async fn deleting_article_cascades_to_comments() {
        let s = store();
        assert!(s.delete_article(1).await.unwrap());
        assert!(s.list_comments(1, &Window::default()).await.unwrap().is_empty());
        assert!(!s.delete_article(1).await.unwrap());
    }

    #[tokio::test]
    async fn comment_on_missing_article_is_reference_error() {
        let s = store();
        let c = NewComment { author: "rogersop".into(), body: "hi".into() };
        assert!(matches!(s.create_comment(9999, &c).await, Err(AppError::Reference(_))));
    }

    #[tokio::test]
    async fn total_ignores_window() {
        let s = store();
        let q = ArticleListQuery {
            topic: Some("mitch".into()),
            window: Window { limit: 2, page: 3 },
            ..Default::default()
        };
        let page = s.list_articles(&q).await.unwrap();
        assert_eq!(page.articles.len(), 2);
        assert_eq!(page.total, 12);
    }

    #[tokio::test]
    async fn title_sort_puts_uppercase_before_lowercase() {
        let s = store();
        let new = NewArticle {
            author: "rogersop".into(),
            title: "aardvarks".into(),
            body: "b".into(),
            topic: "cats".into(),
            article_img_url: None,
        };
        s.create_article(&new).await.unwrap();
        let q = ArticleListQuery {
            sort_by: SortColumn::Title,
            order: SortOrder::Asc,
            window: Window { limit: 100, page: 1 },
            ..Default::default()
        };
        let titles: Vec<String> = s
            .list_articles(&q)
            .await
            .unwrap()
            .articles
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles.last().map(String::as_str), Some("aardvarks"));
        assert!(titles[0].as_bytes()[0].is_ascii_uppercase());
    }
}
