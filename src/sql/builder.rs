//! Builds parameterized SELECT, INSERT, UPDATE and DELETE statements for the news tables.

use crate::query::{ArticleListQuery, Window};
use crate::sql::SqlParam;

/// Article columns plus the comment count aggregated over a left join on comments.
const ARTICLE_WITH_COUNT: &str = "articles.article_id, articles.title, articles.topic, articles.author, \
     articles.body, articles.created_at, articles.votes, articles.article_img_url, \
     COUNT(comments.comment_id)::INT AS comment_count";

const ARTICLE_SUMMARY_WITH_COUNT: &str = "articles.article_id, articles.title, articles.topic, articles.author, \
     articles.created_at, articles.votes, articles.article_img_url, \
     COUNT(comments.comment_id)::INT AS comment_count";

const ARTICLE_COLUMNS: &str = "article_id, title, topic, author, body, created_at, votes, article_img_url";

const COMMENT_COLUMNS: &str = "comment_id, body, article_id, author, votes, created_at";

const ARTICLES_JOIN_COMMENTS: &str =
    "articles LEFT JOIN comments ON comments.article_id = articles.article_id";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v.into());
        n
    }
}

/// Tables whose rows carry a vote count and an integer primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotedTable {
    Articles,
    Comments,
}

impl VotedTable {
    pub fn table(self) -> &'static str {
        match self {
            VotedTable::Articles => "articles",
            VotedTable::Comments => "comments",
        }
    }

    pub fn pk(self) -> &'static str {
        match self {
            VotedTable::Articles => "article_id",
            VotedTable::Comments => "comment_id",
        }
    }

    fn columns(self) -> &'static str {
        match self {
            VotedTable::Articles => ARTICLE_COLUMNS,
            VotedTable::Comments => COMMENT_COLUMNS,
        }
    }
}

fn limit_offset(q: &mut QueryBuf, window: &Window) -> String {
    let limit = q.push_param(window.limit);
    let offset = q.push_param(window.offset());
    format!(" LIMIT ${} OFFSET ${}", limit, offset)
}

/// Windowed article list: optional topic filter, whitelisted sort column and order.
/// Ties on the sort column fall back to article_id in the same direction.
pub fn select_articles(query: &ArticleListQuery) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match &query.topic {
        Some(topic) => format!(" WHERE articles.topic = ${}", q.push_param(topic.as_str())),
        None => String::new(),
    };
    let order = query.order.keyword();
    let collate = if query.sort_by.is_text() { " COLLATE \"C\"" } else { "" };
    let order_clause = format!(
        " ORDER BY articles.{}{} {}, articles.article_id {}",
        query.sort_by.column(),
        collate,
        order,
        order
    );
    let window = limit_offset(&mut q, &query.window);
    q.sql = format!(
        "SELECT {} FROM {}{} GROUP BY articles.article_id{}{}",
        ARTICLE_SUMMARY_WITH_COUNT, ARTICLES_JOIN_COMMENTS, where_clause, order_clause, window
    );
    q
}

/// Number of articles matching the topic filter, ignoring the window.
pub fn count_articles(topic: Option<&str>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = match topic {
        Some(topic) => format!(" WHERE topic = ${}", q.push_param(topic)),
        None => String::new(),
    };
    q.sql = format!("SELECT COUNT(*)::BIGINT FROM articles{}", where_clause);
    q
}

pub fn select_article_by_id(article_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id = q.push_param(article_id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE articles.article_id = ${} GROUP BY articles.article_id",
        ARTICLE_WITH_COUNT, ARTICLES_JOIN_COMMENTS, id
    );
    q
}

/// Comments on one article, newest first, windowed.
pub fn select_comments_by_article(article_id: i32, window: &Window) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id = q.push_param(article_id);
    let window = limit_offset(&mut q, window);
    q.sql = format!(
        "SELECT {} FROM comments WHERE article_id = ${} ORDER BY created_at DESC, comment_id DESC{}",
        COMMENT_COLUMNS, id, window
    );
    q
}

pub fn select_topics() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT slug, description FROM topics".into();
    q
}

pub fn select_users() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = "SELECT username, name, avatar_url FROM users".into();
    q
}

pub fn select_user_by_username(username: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(username);
    q.sql = format!("SELECT username, name, avatar_url FROM users WHERE username = ${}", name);
    q
}

pub fn insert_topic(slug: &str, description: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let slug = q.push_param(slug);
    let description = q.push_param(description);
    q.sql = format!(
        "INSERT INTO topics (slug, description) VALUES (${}, ${}) RETURNING slug, description",
        slug, description
    );
    q
}

/// INSERT an article; returns only the generated id so the caller can re-read it with its comment count.
pub fn insert_article(author: &str, title: &str, body: &str, topic: &str, img_url: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders: Vec<String> = [author, title, body, topic, img_url]
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO articles (author, title, body, topic, article_img_url) VALUES ({}) RETURNING article_id",
        placeholders.join(", ")
    );
    q
}

pub fn insert_comment(article_id: i32, author: &str, body: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id = q.push_param(article_id);
    let author = q.push_param(author);
    let body = q.push_param(body);
    q.sql = format!(
        "INSERT INTO comments (article_id, author, body) VALUES (${}, ${}, ${}) RETURNING {}",
        id, author, body, COMMENT_COLUMNS
    );
    q
}

/// Single-statement `votes = votes + delta`; no row returned when the id is absent.
pub fn increment_votes(table: VotedTable, id: i32, delta: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let delta = q.push_param(delta);
    let id = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET votes = votes + ${} WHERE {} = ${} RETURNING {}",
        table.table(),
        delta,
        table.pk(),
        id,
        table.columns()
    );
    q
}

/// DELETE by id. The caller checks rows_affected.
pub fn delete_by_id(table: VotedTable, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id = q.push_param(id);
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", table.table(), table.pk(), id);
    q
}
