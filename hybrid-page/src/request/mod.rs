//! Reading paging state from the current request.
//!
//! The engine never looks at a request directly. It asks a [`Resolver`],
//! passed explicitly to each pagination call, for the page, the previous
//! page, the cursor, the query string and the path.

mod parsing;

pub use parsing::{DecodeError, parse_page_number, parse_query, url_decode};

use crate::cursor::Cursor;

/// Source of the request-derived inputs of a pagination call.
///
/// Every method has a default describing a request that carries nothing,
/// so implementations override only what their request exposes.
pub trait Resolver {
    /// The requested page, or 1 when absent or not a positive integer.
    fn current_page(&self, _page_name: &str) -> u64 {
        1
    }

    /// The page the client came from, when present and valid.
    fn prev_page(&self, _prev_page_name: &str) -> Option<u64> {
        None
    }

    /// The cursor the client sent. Malformed tokens resolve to `None`.
    fn current_cursor(&self, _cursor_name: &str) -> Option<Cursor> {
        None
    }

    /// All query parameters of the request, in arrival order.
    fn query_string(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// The request path, or `None` to use the configured path.
    fn current_path(&self) -> Option<String> {
        None
    }
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn current_page(&self, page_name: &str) -> u64 {
        (**self).current_page(page_name)
    }

    fn prev_page(&self, prev_page_name: &str) -> Option<u64> {
        (**self).prev_page(prev_page_name)
    }

    fn current_cursor(&self, cursor_name: &str) -> Option<Cursor> {
        (**self).current_cursor(cursor_name)
    }

    fn query_string(&self) -> Vec<(String, String)> {
        (**self).query_string()
    }

    fn current_path(&self) -> Option<String> {
        (**self).current_path()
    }
}

/// No request in scope: page 1, no previous page, no cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRequest;

impl Resolver for NoRequest {}

/// A resolver over a raw request target such as
/// `/users?page=3&prev=1&cursor=eyJpZCI6...`.
///
/// An absolute URL works too; everything before the query becomes the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTarget {
    path: String,
    query: Vec<(String, String)>,
}

impl RequestTarget {
    /// Parse a request target. Any `#fragment` is ignored.
    pub fn parse(target: &str) -> Self {
        let target = target.split_once('#').map_or(target, |(before, _)| before);
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        Self {
            path: path.to_string(),
            query: parse_query(query),
        }
    }

    /// The path, without query string.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of a query parameter.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a query parameter, in arrival order.
    pub fn query_all(&self, name: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

impl Resolver for RequestTarget {
    fn current_page(&self, page_name: &str) -> u64 {
        self.query(page_name).and_then(parse_page_number).unwrap_or(1)
    }

    fn prev_page(&self, prev_page_name: &str) -> Option<u64> {
        self.query(prev_page_name).and_then(parse_page_number)
    }

    fn current_cursor(&self, cursor_name: &str) -> Option<Cursor> {
        self.query(cursor_name).and_then(Cursor::from_encoded)
    }

    fn query_string(&self) -> Vec<(String, String)> {
        self.query.clone()
    }

    fn current_path(&self) -> Option<String> {
        (!self.path.is_empty()).then(|| self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_request_defaults() {
        assert_eq!(NoRequest.current_page("page"), 1);
        assert_eq!(NoRequest.prev_page("prev"), None);
        assert_eq!(NoRequest.current_cursor("cursor"), None);
        assert!(NoRequest.query_string().is_empty());
        assert_eq!(NoRequest.current_path(), None);
    }

    #[test]
    fn test_request_target() {
        let cursor = Cursor::forward().int("id", 20);
        let target = RequestTarget::parse(&format!(
            "/users?page=3&prev=2&cursor={}&sort=name#top",
            cursor.encode()
        ));

        assert_eq!(target.path(), "/users");
        assert_eq!(target.current_page("page"), 3);
        assert_eq!(target.prev_page("prev"), Some(2));
        assert_eq!(target.current_cursor("cursor"), Some(cursor));
        assert_eq!(target.query("sort"), Some("name"));
        assert_eq!(target.current_path().as_deref(), Some("/users"));
        assert_eq!(target.query_string().len(), 4);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let target = RequestTarget::parse("/users?page=zero&prev=0&cursor=%%%");
        assert_eq!(target.current_page("page"), 1);
        assert_eq!(target.prev_page("prev"), None);
        assert_eq!(target.current_cursor("cursor"), None);
    }

    #[test]
    fn test_custom_names() {
        let target = RequestTarget::parse("https://example.com/posts?p=4&from=5");
        assert_eq!(target.current_page("p"), 4);
        assert_eq!(target.prev_page("from"), Some(5));
        assert_eq!(target.current_page("page"), 1);
        assert_eq!(target.path(), "https://example.com/posts");
    }

    #[test]
    fn test_repeated_parameters() {
        let target = RequestTarget::parse("/search?tag=rust&tag=wasm&page=2&page=9");
        assert_eq!(target.query_all("tag"), ["rust", "wasm"]);
        assert_eq!(target.current_page("page"), 2);
    }

    #[test]
    fn test_resolver_by_reference() {
        fn page_of(resolver: &impl Resolver) -> u64 {
            resolver.current_page("page")
        }
        let target = RequestTarget::parse("?page=7");
        assert_eq!(page_of(&&target), 7);
        assert_eq!(target.current_path(), None);
    }
}
