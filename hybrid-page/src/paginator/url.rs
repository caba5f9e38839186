//! URL generation for a paginator.
//!
//! Every URL carries the target page, the current page as the previous page
//! and, when one applies, the cursor to anchor on. Extra query parameters come
//! first, in the order they were added; the paging parameters overwrite a
//! same-named extra in place.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::HybridPaginator;
use crate::cursor::Cursor;
use crate::request::Resolver;

/// Characters percent-encoded in a query component: everything but the RFC
/// 3986 unreserved set.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

impl<T> HybridPaginator<T> {
    /// URL of `page`, anchored on `cursor` if one is given.
    ///
    /// Pages below 1 are clamped to 1.
    pub fn url(&self, page: u64, cursor: Option<&Cursor>) -> String {
        let page = page.max(1);
        let mut parameters = self.query.clone();
        set_parameter(&mut parameters, &self.options.page_name, page.to_string());
        set_parameter(
            &mut parameters,
            &self.options.prev_page_name,
            self.current_page.to_string(),
        );
        match cursor {
            Some(cursor) => set_parameter(&mut parameters, &self.options.cursor_name, cursor.encode()),
            None => parameters.retain(|(key, _)| *key != self.options.cursor_name),
        }

        let path = self.path();
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut url = format!("{path}{separator}{}", build_query(&parameters));
        if let Some(fragment) = self.fragment().filter(|fragment| !fragment.is_empty()) {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }

    /// URL of the page before this one, or `None` on the first page.
    pub fn previous_page_url(&self) -> Option<String> {
        if self.current_page <= 1 {
            return None;
        }
        Some(self.url(self.current_page - 1, self.previous_cursor().as_ref()))
    }

    /// URL of the page after this one, or `None` when there is none.
    pub fn next_page_url(&self) -> Option<String> {
        let cursor = self.next_cursor()?;
        if !self.has_more_pages() {
            return None;
        }
        let next = self.current_page.checked_add(1)?;
        Some(self.url(next, Some(&cursor)))
    }

    /// URLs of every page in `start..=end`.
    ///
    /// Pages before the current one anchor on the previous cursor and the
    /// rest on the next cursor; the planner turns the distance into an
    /// offset. The current page's own entry therefore reads forward past
    /// its last item: it locates the page only approximately.
    pub fn get_url_range(&self, start: u64, end: u64) -> Vec<(u64, String)> {
        let previous = self.previous_cursor();
        let next = self.next_cursor();
        (start..=end)
            .map(|page| {
                let cursor = if page < self.current_page {
                    previous.as_ref()
                } else {
                    next.as_ref()
                };
                (page, self.url(page, cursor))
            })
            .collect()
    }

    /// Append `#fragment` to every URL.
    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.options.fragment = Some(fragment.into());
        self
    }

    /// Carry an extra query parameter into every URL.
    ///
    /// The page parameter itself is never carried.
    #[must_use]
    pub fn appends(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_query(key.into(), value.into());
        self
    }

    /// Carry several extra query parameters into every URL.
    #[must_use]
    pub fn appends_all<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.add_query(key.into(), value.into());
        }
        self
    }

    /// Carry the current request's query string into every URL.
    #[must_use]
    pub fn with_query_string<R: Resolver + ?Sized>(self, resolver: &R) -> Self {
        self.appends_all(resolver.query_string())
    }

    /// Replace the base path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.options.path = super::normalize_path(&path.into());
        self
    }

    fn add_query(&mut self, key: String, value: String) {
        if key != self.options.page_name {
            set_parameter(&mut self.query, &key, value);
        }
    }
}

/// Replace `key` in place, or append it.
fn set_parameter(parameters: &mut Vec<(String, String)>, key: &str, value: String) {
    match parameters.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, slot)) => *slot = value,
        None => parameters.push((key.to_string(), value)),
    }
}

fn build_query(parameters: &[(String, String)]) -> String {
    parameters
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
