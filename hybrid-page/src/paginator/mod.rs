//! The paginator: one fetched page plus everything needed to link around it.
//!
//! A [`HybridPaginator`] is built once from the rows a fetch returned
//! ([`PageParts`]) and is read-only afterwards, apart from consuming builders
//! that adjust URL generation. Construction does all the work that can fail:
//! the page size is validated and the ordering parameters of the first and
//! last items are extracted, so the cursor and URL accessors never error.

mod url;

use crate::cursor::{Cursor, IntoCursor};
use crate::error::Error;
use crate::extract::{PageItem, extract_parameters};
use crate::options::PaginatorOptions;
use crate::value::Value;

/// The raw material of a page, as produced by a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageParts<T> {
    /// Fetched rows in read order, possibly one more than `per_page`.
    pub rows: Vec<T>,
    /// Keys the rows are ordered by.
    pub ordering_keys: Vec<String>,
    /// Total matching rows, when known.
    pub total: Option<u64>,
    /// Items per page.
    pub per_page: usize,
    /// Requested page (1-based).
    pub current_page: u64,
    /// Page the client came from.
    pub prev_page: Option<u64>,
    /// Cursor the rows were fetched with.
    pub cursor: Option<Cursor>,
}

impl<T> PageParts<T> {
    /// Rows for page 1 with no cursor, total or ordering keys.
    pub const fn new(rows: Vec<T>, per_page: usize) -> Self {
        Self {
            rows,
            ordering_keys: Vec::new(),
            total: None,
            per_page,
            current_page: 1,
            prev_page: None,
            cursor: None,
        }
    }

    /// Set the ordering keys.
    #[must_use]
    pub fn ordering_keys(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ordering_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the total.
    #[must_use]
    pub const fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the current and previous page.
    #[must_use]
    pub const fn page(mut self, current_page: u64, prev_page: Option<u64>) -> Self {
        self.current_page = current_page;
        self.prev_page = prev_page;
        self
    }

    /// Set the cursor the rows were fetched with.
    #[must_use]
    pub fn cursor(mut self, cursor: impl IntoCursor) -> Self {
        self.cursor = cursor.into_cursor();
        self
    }
}

/// A page of items that knows how to link to the pages around it.
///
/// # Example
///
/// ```
/// # use hybrid_page::{HybridPaginator, PageParts, PaginatorOptions};
/// # use serde_json::json;
/// let rows = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
/// let parts = PageParts::new(rows, 2).ordering_keys(["id"]).total(3);
///
/// let page = HybridPaginator::new(parts, PaginatorOptions::default().path("/users")).unwrap();
///
/// assert_eq!(page.count(), 2);
/// assert_eq!(page.last_page(), Some(2));
/// assert!(page.next_page_url().unwrap().starts_with("/users?page=2&prev=1&cursor="));
/// ```
#[derive(Debug, Clone)]
pub struct HybridPaginator<T> {
    items: Vec<T>,
    per_page: usize,
    current_page: u64,
    prev_page: Option<u64>,
    total: Option<u64>,
    last_page: Option<u64>,
    has_more: bool,
    cursor: Option<Cursor>,
    ordering_keys: Vec<String>,
    first_parameters: Option<Vec<(String, Value)>>,
    last_parameters: Option<Vec<(String, Value)>>,
    query: Vec<(String, String)>,
    options: PaginatorOptions,
}

impl<T: PageItem> HybridPaginator<T> {
    /// Finalize a fetched page.
    ///
    /// Drops the peek row, restores display order for backward pages and
    /// reads the boundary parameters off the first and last items. Fails
    /// when those parameters would not fit in a cursor token.
    pub fn new(parts: PageParts<T>, mut options: PaginatorOptions) -> Result<Self, Error> {
        let PageParts {
            rows: mut items,
            ordering_keys,
            total,
            per_page,
            current_page,
            prev_page,
            cursor,
        } = parts;

        if per_page == 0 {
            return Err(Error::InvalidPerPage { per_page });
        }

        let current_page = current_page.max(1);
        let prev_page = prev_page.filter(|&prev| prev >= 1);
        let last_page = total.map(|total| total.div_ceil(per_page as u64).max(1));

        let has_more = items.len() > per_page;
        items.truncate(per_page);
        if prev_page.is_some_and(|prev| current_page < prev) {
            items.reverse();
        }

        let first_parameters = items
            .first()
            .map(|item| extract_parameters(item, &ordering_keys))
            .transpose()?;
        let last_parameters = items
            .last()
            .map(|item| extract_parameters(item, &ordering_keys))
            .transpose()?;

        if let Some(parameters) = &first_parameters {
            Cursor::new(parameters.clone(), false).validate()?;
        }
        if let Some(parameters) = &last_parameters {
            Cursor::new(parameters.clone(), true).validate()?;
        }

        options.path = normalize_path(&options.path);

        Ok(Self {
            items,
            per_page,
            current_page,
            prev_page,
            total,
            last_page,
            has_more,
            cursor,
            ordering_keys,
            first_parameters,
            last_parameters,
            query: Vec::new(),
            options,
        })
    }
}

impl<T> HybridPaginator<T> {
    /// Items on this page, in display order.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Take the items out of the paginator.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of items on this page.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this page has items.
    #[inline]
    pub fn is_not_empty(&self) -> bool {
        !self.items.is_empty()
    }

    /// Items per page.
    #[inline]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// The current page (1-based).
    #[inline]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// The page the client came from.
    #[inline]
    pub const fn prev_page(&self) -> Option<u64> {
        self.prev_page
    }

    /// Total matching rows, when known.
    #[inline]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// `max(ceil(total / per_page), 1)`, when the total is known.
    #[inline]
    pub const fn last_page(&self) -> Option<u64> {
        self.last_page
    }

    /// Whether the fetch returned a row past this page.
    #[inline]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// The cursor this page was fetched with.
    #[inline]
    pub const fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Keys the items are ordered by.
    #[inline]
    pub fn ordering_keys(&self) -> &[String] {
        &self.ordering_keys
    }

    /// The options in effect.
    #[inline]
    pub const fn options(&self) -> &PaginatorOptions {
        &self.options
    }

    /// Base path of generated URLs.
    #[inline]
    pub fn path(&self) -> &str {
        &self.options.path
    }

    /// Query parameter carrying the page number.
    #[inline]
    pub fn page_name(&self) -> &str {
        &self.options.page_name
    }

    /// Query parameter carrying the previous page.
    #[inline]
    pub fn prev_page_name(&self) -> &str {
        &self.options.prev_page_name
    }

    /// Query parameter carrying the cursor.
    #[inline]
    pub fn cursor_name(&self) -> &str {
        &self.options.cursor_name
    }

    /// Fragment appended to URLs.
    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.options.fragment.as_deref()
    }

    /// Extra query parameters carried into every URL.
    #[inline]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// 1-based position of the first item across the whole result set.
    pub fn first_item(&self) -> Option<u64> {
        if self.items.is_empty() {
            return None;
        }
        let skipped = (self.current_page - 1).saturating_mul(self.per_page as u64);
        Some(skipped.saturating_add(1))
    }

    /// 1-based position of the last item across the whole result set.
    pub fn last_item(&self) -> Option<u64> {
        self.first_item()
            .map(|first| first.saturating_add(self.items.len() as u64 - 1))
    }

    /// Whether more pages follow this one.
    ///
    /// Uses the last page when the total is known. Otherwise a page reached
    /// by a backward cursor always has pages after it, and any other page
    /// relies on the peek row.
    pub const fn has_more_pages(&self) -> bool {
        match self.last_page {
            Some(last_page) => self.current_page < last_page,
            None => match &self.cursor {
                Some(cursor) if cursor.points_to_previous_items() => true,
                _ => self.has_more,
            },
        }
    }

    /// Whether this is the first page.
    #[inline]
    pub const fn on_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// Whether this is the last page.
    #[inline]
    pub const fn on_last_page(&self) -> bool {
        !self.has_more_pages()
    }

    /// Whether there is more than one page to show.
    #[inline]
    pub const fn has_pages(&self) -> bool {
        self.current_page != 1 || self.has_more_pages()
    }

    /// Cursor reading the items before this page, from its first item.
    pub fn previous_cursor(&self) -> Option<Cursor> {
        if self.on_first_page() {
            return None;
        }
        let parameters = self.first_parameters.as_ref()?;
        Some(Cursor::new(parameters.clone(), false))
    }

    /// Cursor reading the items after this page, from its last item.
    ///
    /// A page reached by a backward cursor always has items after it, so
    /// the cursor is kept even when no more pages are counted.
    pub fn next_cursor(&self) -> Option<Cursor> {
        let forward = self
            .cursor
            .as_ref()
            .is_none_or(Cursor::points_to_next_items);
        if forward && !self.has_more_pages() {
            return None;
        }
        let parameters = self.last_parameters.as_ref()?;
        Some(Cursor::new(parameters.clone(), true))
    }

    /// Transform every item, keeping the page and its boundary cursors.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> HybridPaginator<U> {
        HybridPaginator {
            items: self.items.into_iter().map(f).collect(),
            per_page: self.per_page,
            current_page: self.current_page,
            prev_page: self.prev_page,
            total: self.total,
            last_page: self.last_page,
            has_more: self.has_more,
            cursor: self.cursor,
            ordering_keys: self.ordering_keys,
            first_parameters: self.first_parameters,
            last_parameters: self.last_parameters,
            query: self.query,
            options: self.options,
        }
    }

    /// Number of numbered links on each side of the current page.
    #[must_use]
    pub const fn on_each_side(mut self, count: u64) -> Self {
        self.options.on_each_side = count;
        self
    }
}

impl<T> IntoIterator for HybridPaginator<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a HybridPaginator<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Trailing slashes are dropped, except for the root path.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_CURSOR_FIELDS;
    use crate::cursor::CursorError;
    use serde_json::{Value as Json, json};

    fn rows(ids: impl IntoIterator<Item = i64>) -> Vec<Json> {
        ids.into_iter().map(|id| json!({"id": id})).collect()
    }

    fn ids(page: &HybridPaginator<Json>) -> Vec<i64> {
        page.iter().filter_map(|row| row["id"].as_i64()).collect()
    }

    fn paginate(parts: PageParts<Json>) -> HybridPaginator<Json> {
        HybridPaginator::new(parts.ordering_keys(["id"]), PaginatorOptions::default()).unwrap()
    }

    #[test]
    fn test_peek_row_is_dropped() {
        let page = paginate(PageParts::new(rows(1..=11), 10));
        assert_eq!(page.count(), 10);
        assert!(page.has_more());
        assert_eq!(ids(&page).last(), Some(&10));

        let page = paginate(PageParts::new(rows(1..=10), 10));
        assert!(!page.has_more());
    }

    #[test]
    fn test_backward_page_is_reversed() {
        let parts = PageParts::new(rows((1..=10).rev()), 10)
            .page(1, Some(2))
            .cursor(Cursor::backward().int("id", 11));
        let page = paginate(parts);
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_forward_page_keeps_order() {
        let parts = PageParts::new(rows(11..=20), 10).page(2, Some(1));
        assert_eq!(ids(&paginate(parts)), (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_last_page() {
        let page = |total| paginate(PageParts::new(rows(1..=1), 10).total(total));
        assert_eq!(page(0).last_page(), Some(1));
        assert_eq!(page(10).last_page(), Some(1));
        assert_eq!(page(11).last_page(), Some(2));
        assert_eq!(page(95).last_page(), Some(10));
        assert_eq!(paginate(PageParts::new(rows(1..=1), 10)).last_page(), None);
    }

    #[test]
    fn test_pages_are_normalized() {
        let page = paginate(PageParts::new(rows(1..=2), 10).page(0, Some(0)));
        assert_eq!(page.current_page(), 1);
        assert_eq!(page.prev_page(), None);
    }

    #[test]
    fn test_zero_per_page_is_rejected() {
        let err = HybridPaginator::new(PageParts::new(rows(1..=2), 0), PaginatorOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPerPage { per_page: 0 }));
    }

    #[test]
    fn test_first_and_last_item() {
        let page = paginate(PageParts::new(rows(21..=25), 10).page(3, Some(2)).total(25));
        assert_eq!(page.first_item(), Some(21));
        assert_eq!(page.last_item(), Some(25));

        let empty = paginate(PageParts::new(Vec::new(), 10).page(3, None));
        assert_eq!(empty.first_item(), None);
        assert_eq!(empty.last_item(), None);
    }

    #[test]
    fn test_page_flags() {
        let page = paginate(PageParts::new(rows(1..=10), 10).total(30));
        assert!(page.on_first_page());
        assert!(!page.on_last_page());
        assert!(page.has_pages());

        let single = paginate(PageParts::new(rows(1..=3), 10).total(3));
        assert!(single.on_last_page());
        assert!(!single.has_pages());
    }

    #[test]
    fn test_has_more_pages_without_total() {
        let page = paginate(PageParts::new(rows(1..=11), 10));
        assert!(page.has_more_pages());
        let page = paginate(PageParts::new(rows(1..=4), 10));
        assert!(!page.has_more_pages());
    }

    #[test]
    fn test_backward_arrival_without_total_has_more_pages() {
        let parts = PageParts::new(rows((1..=10).rev()), 10)
            .page(1, Some(2))
            .cursor(Cursor::backward().int("id", 11));
        let page = paginate(parts);

        assert!(!page.has_more());
        assert!(page.has_more_pages());
        assert!(!page.on_last_page());
        assert!(page.next_cursor().is_some());
    }

    #[test]
    fn test_boundary_cursors() {
        let page = paginate(PageParts::new(rows(11..=21), 10).page(2, Some(1)).total(30));

        let previous = page.previous_cursor().unwrap();
        assert!(previous.points_to_previous_items());
        assert_eq!(previous.parameter("id"), Some(&Value::Int(11)));

        let next = page.next_cursor().unwrap();
        assert!(next.points_to_next_items());
        assert_eq!(next.parameter("id"), Some(&Value::Int(20)));
    }

    #[test]
    fn test_no_previous_cursor_on_first_page() {
        let page = paginate(PageParts::new(rows(1..=10), 10).total(30));
        assert!(page.previous_cursor().is_none());
        assert!(page.next_cursor().is_some());
    }

    #[test]
    fn test_no_next_cursor_on_last_forward_page() {
        let parts = PageParts::new(rows(21..=30), 10)
            .page(3, Some(2))
            .total(30)
            .cursor(Cursor::forward().int("id", 20));
        assert!(paginate(parts).next_cursor().is_none());
    }

    #[test]
    fn test_backward_cursor_keeps_next_cursor() {
        let parts = PageParts::new(rows((21..=30).rev()), 10)
            .page(3, Some(4))
            .total(30)
            .cursor(Cursor::backward().int("id", 31));
        let page = paginate(parts);
        assert!(!page.has_more_pages());
        assert_eq!(page.next_cursor().unwrap().parameter("id"), Some(&Value::Int(30)));
    }

    #[test]
    fn test_empty_page_has_no_cursors() {
        let page = paginate(PageParts::new(Vec::new(), 10).page(2, Some(1)).total(30));
        assert!(page.previous_cursor().is_none());
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_map_keeps_cursors() {
        let page = paginate(PageParts::new(rows(11..=21), 10).page(2, Some(1)).total(30));
        let next = page.next_cursor();
        let mapped = page.map(|row| row["id"].as_i64().unwrap_or_default() * 100);

        assert_eq!(mapped.items().first(), Some(&1100));
        assert_eq!(mapped.next_cursor(), next);
        assert!(mapped.previous_cursor().is_some());
    }

    #[test]
    fn test_unsupported_items_fail_construction() {
        let err = HybridPaginator::new(
            PageParts::new(vec![json!("scalar")], 10).ordering_keys(["id"]),
            PaginatorOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedItemShape { .. }));
    }

    #[test]
    fn test_oversized_boundary_values_fail_construction() {
        let rows = vec![json!({"id": 1, "title": "t".repeat(3100)})];
        let err = HybridPaginator::new(
            PageParts::new(rows, 10).ordering_keys(["title", "id"]),
            PaginatorOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Cursor(CursorError::TooLarge)));

        let keys: Vec<String> = (0..=MAX_CURSOR_FIELDS).map(|i| format!("k{i}")).collect();
        let err = HybridPaginator::new(
            PageParts::new(rows_of(&keys), 10).ordering_keys(keys.clone()),
            PaginatorOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Cursor(CursorError::TooManyFields)));
    }

    fn rows_of(keys: &[String]) -> Vec<Json> {
        let object = keys.iter().map(|key| (key.clone(), json!(1))).collect();
        vec![Json::Object(object)]
    }

    #[test]
    fn test_last_representable_page() {
        let page = paginate(PageParts::new(rows(1..=11), 10).page(u64::MAX, None));
        assert!(page.has_more_pages());
        assert!(page.next_cursor().is_some());
        assert_eq!(page.next_page_url(), None);
        assert!(page.previous_page_url().is_some());
        assert!(!page.link_collection().is_empty());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/users/"), "/users");
        assert_eq!(normalize_path("https://example.com/users//"), "https://example.com/users");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_iteration() {
        let page = paginate(PageParts::new(rows(1..=3), 10));
        assert_eq!((&page).into_iter().count(), 3);
        assert!(page.is_not_empty());
        assert_eq!(page.into_iter().count(), 3);
    }
}
