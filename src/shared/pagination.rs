//! Pagination Helpers
//!
//! Every list endpoint shares the same offset/limit/count shape:
//! `{ items, page, limit, total, pages }`.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Common query parameters for paginated listings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<String>,
}

impl PageQuery {
    /// Effective page number (1-based, clamped to >= 1).
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Effective page size, clamped to 1..=100.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// SQL offset for the effective page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Trimmed search term, if any non-empty one was given.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Sort direction as SQL keyword. Anything but "desc" is ascending.
    pub fn sort_dir(&self) -> &'static str {
        match self.order_dir.as_deref() {
            Some("desc") | Some("DESC") => "DESC",
            _ => "ASC",
        }
    }

    /// Sort column, restricted to an allow-list. Falls back to the first
    /// entry so a crafted `order_by` can never reach the query string.
    pub fn sort_column<'a>(&self, allowed: &[&'a str]) -> &'a str {
        let requested = self.order_by.as_deref().unwrap_or("");
        allowed
            .iter()
            .find(|c| **c == requested)
            .copied()
            .unwrap_or(allowed[0])
    }
}

/// A single page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    /// Build a page from items plus the total row count.
    pub fn new(items: Vec<T>, query: &PageQuery, total: i64) -> Self {
        let limit = query.limit();
        Self {
            items,
            page: query.page(),
            limit,
            total,
            pages: total_pages(total, limit),
        }
    }

    /// Map items into another representation keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            pages: self.pages,
        }
    }
}

/// `ceil(total / limit)`, zero pages for an empty result set.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

/// Escape LIKE wildcards in a user-supplied search term and wrap it for a
/// substring match.
pub fn like_pattern(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_offset_arithmetic() {
        let q = PageQuery {
            page: Some(3),
            limit: Some(25),
            ..Default::default()
        };
        assert_eq!(q.offset(), 50);
    }

    #[test]
    fn test_limit_clamped() {
        let q = PageQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(q.limit(), 100);

        let q = PageQuery {
            page: Some(0),
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }

    #[test]
    fn test_page_metadata() {
        let q = PageQuery {
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        let page = Page::new(vec![1, 2, 3], &q, 23);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 23);
        assert_eq!(page.pages, 3);
    }

    #[test]
    fn test_search_term_trims_and_filters_empty() {
        let q = PageQuery {
            search: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(q.search_term(), None);

        let q = PageQuery {
            search: Some(" liceo ".into()),
            ..Default::default()
        };
        assert_eq!(q.search_term(), Some("liceo"));
    }

    #[test]
    fn test_sort_column_rejects_unknown() {
        let q = PageQuery {
            order_by: Some("password_hash".into()),
            ..Default::default()
        };
        assert_eq!(q.sort_column(&["full_name", "rut", "id"]), "full_name");

        let q = PageQuery {
            order_by: Some("rut".into()),
            ..Default::default()
        };
        assert_eq!(q.sort_column(&["full_name", "rut", "id"]), "rut");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
