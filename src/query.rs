//! Typed list parameters parsed from the query string: sort column, order and window.

use crate::error::AppError;
use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// Columns `GET /api/articles` may sort by. Free-text columns are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    ArticleId,
    Title,
    Topic,
    Author,
    #[default]
    CreatedAt,
    Votes,
}

impl SortColumn {
    pub fn column(self) -> &'static str {
        match self {
            SortColumn::ArticleId => "article_id",
            SortColumn::Title => "title",
            SortColumn::Topic => "topic",
            SortColumn::Author => "author",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
        }
    }

    /// Text columns order by byte value (`COLLATE "C"`) so every store agrees.
    pub fn is_text(self) -> bool {
        matches!(self, SortColumn::Title | SortColumn::Topic | SortColumn::Author)
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "article_id" => SortColumn::ArticleId,
            "title" => SortColumn::Title,
            "topic" => SortColumn::Topic,
            "author" => SortColumn::Author,
            "created_at" => SortColumn::CreatedAt,
            "votes" => SortColumn::Votes,
            other => return Err(AppError::BadRequest(format!("cannot sort by '{}'", other))),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(AppError::BadRequest(format!("invalid order '{}'", s)))
        }
    }
}

/// Offset/limit window over an ordered result. `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub page: i64,
}

impl Default for Window {
    fn default() -> Self {
        Window {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Window {
    /// Reads `limit` and `page`. Non-integers and negative limits are bad requests;
    /// a page below 1 is the pagination error.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let limit = match params.get("limit") {
            Some(v) => parse_int("limit", v)?,
            None => DEFAULT_LIMIT,
        };
        if limit < 0 {
            return Err(AppError::BadRequest("limit must not be negative".into()));
        }
        let page = match params.get("page") {
            Some(v) => parse_int("page", v)?,
            None => DEFAULT_PAGE,
        };
        if page < 1 {
            return Err(AppError::Pagination);
        }
        (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| AppError::BadRequest("page out of range".into()))?;
        Ok(Window { limit, page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{} must be an integer", key)))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    pub sort_by: SortColumn,
    pub order: SortOrder,
    pub topic: Option<String>,
    pub window: Window,
}

impl ArticleListQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let sort_by = match params.get("sort_by") {
            Some(v) => v.parse()?,
            None => SortColumn::default(),
        };
        let order = match params.get("order") {
            Some(v) => v.parse()?,
            None => SortOrder::default(),
        };
        let topic = params.get("topic").filter(|t| !t.is_empty()).cloned();
        Ok(ArticleListQuery {
            sort_by,
            order,
            topic,
            window: Window::from_params(params)?,
        })
    }
}

/// Parses a path id into the storage integer type (`INT`). Anything that does not fit is a bad request.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let q = ArticleListQuery::from_params(&HashMap::new()).unwrap();
        assert_eq!(q.sort_by, SortColumn::CreatedAt);
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.topic, None);
        assert_eq!(q.window, Window { limit: 10, page: 1 });
        assert_eq!(q.window.offset(), 0);
    }

    #[test]
    fn sort_whitelist_rejects_free_text_columns() {
        for col in ["body", "article_img_url", "votes; DROP TABLE articles"] {
            let err = ArticleListQuery::from_params(&params(&[("sort_by", col)])).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{col}");
        }
        let q = ArticleListQuery::from_params(&params(&[("sort_by", "votes"), ("order", "ASC")])).unwrap();
        assert_eq!(q.sort_by, SortColumn::Votes);
        assert_eq!(q.order, SortOrder::Asc);
    }

    #[test]
    fn invalid_order_is_bad_request() {
        let err = ArticleListQuery::from_params(&params(&[("order", "sideways")])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn window_offset_follows_page() {
        let w = Window::from_params(&params(&[("limit", "4"), ("page", "3")])).unwrap();
        assert_eq!(w.offset(), 8);
    }

    #[test]
    fn page_zero_is_pagination_error() {
        assert!(matches!(Window::from_params(&params(&[("page", "0")])), Err(AppError::Pagination)));
        assert!(matches!(Window::from_params(&params(&[("page", "-2")])), Err(AppError::Pagination)));
    }

    #[test]
    fn non_integer_window_values_are_bad_requests() {
        assert!(matches!(Window::from_params(&params(&[("limit", "ten")])), Err(AppError::BadRequest(_))));
        assert!(matches!(Window::from_params(&params(&[("page", "1.5")])), Err(AppError::BadRequest(_))));
        assert!(matches!(Window::from_params(&params(&[("limit", "-1")])), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn ids_must_fit_storage_integer() {
        assert_eq!(parse_id("3").unwrap(), 3);
        assert!(parse_id("not-an-id").is_err());
        assert!(parse_id("99999999999").is_err());
    }
}
