//! DDL for the news tables. Creation order follows foreign-key dependencies.

use crate::error::AppError;
use sqlx::PgConnection;

const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS topics (
        slug VARCHAR PRIMARY KEY,
        description VARCHAR NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username VARCHAR PRIMARY KEY,
        name VARCHAR NOT NULL,
        avatar_url VARCHAR NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        article_id SERIAL PRIMARY KEY,
        title VARCHAR NOT NULL,
        topic VARCHAR NOT NULL REFERENCES topics(slug),
        author VARCHAR NOT NULL REFERENCES users(username),
        body VARCHAR NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        votes INT NOT NULL DEFAULT 0,
        article_img_url VARCHAR NOT NULL
            DEFAULT 'https://images.pexels.com/photos/97050/pexels-photo-97050.jpeg?w=700&h=700'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        comment_id SERIAL PRIMARY KEY,
        body VARCHAR NOT NULL,
        article_id INT NOT NULL REFERENCES articles(article_id) ON DELETE CASCADE,
        author VARCHAR NOT NULL REFERENCES users(username),
        votes INT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS comments",
    "DROP TABLE IF EXISTS articles",
    "DROP TABLE IF EXISTS users",
    "DROP TABLE IF EXISTS topics",
];

/// Create any missing tables. Existing tables are left as they are.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), AppError> {
    for ddl in CREATE_TABLES {
        tracing::debug!(sql = %ddl.trim(), "ddl");
        sqlx::query(ddl).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Drop every news table, dependents first.
pub async fn drop_schema(conn: &mut PgConnection) -> Result<(), AppError> {
    for ddl in DROP_TABLES {
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(ddl).execute(&mut *conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_cascade_with_articles() {
        let comments = CREATE_TABLES[3];
        assert!(comments.contains("REFERENCES articles(article_id) ON DELETE CASCADE"));
    }

    #[test]
    fn drop_order_reverses_create_order() {
        let created: Vec<&str> = ["topics", "users", "articles", "comments"].into();
        let dropped: Vec<&str> = DROP_TABLES
            .iter()
            .map(|d| d.trim_start_matches("DROP TABLE IF EXISTS "))
            .collect();
        let mut reversed = created.clone();
        reversed.reverse();
        assert_eq!(dropped, reversed);
    }
}
