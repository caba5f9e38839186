//! The contract between the engine and whatever actually stores the rows.

use crate::cursor::Cursor;

/// Parameters of one row fetch.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    /// Anchor position. `None` reads from the start of the ordering.
    ///
    /// A forward cursor selects rows strictly after it; a backward cursor
    /// selects rows strictly before it, read in reverse sort order.
    pub cursor: Option<&'a Cursor>,
    /// Rows to skip after the cursor filter is applied.
    pub offset: u64,
    /// Maximum rows to return.
    pub limit: usize,
    /// Columns the caller wants back. `["*"]` means all.
    pub columns: &'a [String],
}

/// Rows returned by a fetch, along with the ordering they were read in.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// At most `limit` rows, in read order.
    pub rows: Vec<T>,
    /// Names of the keys the query is ordered by, in sort order.
    pub ordering_keys: Vec<String>,
}

impl<T> Fetched<T> {
    /// Bundle rows with their ordering keys.
    pub fn new(rows: Vec<T>, ordering_keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            rows,
            ordering_keys: ordering_keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// A query executor the engine can page through.
///
/// Calls are synchronous and are never retried by the engine: any retry
/// policy belongs to the implementation.
pub trait DataSource {
    /// One result row.
    type Item;
    /// Failure of a count or fetch, handed back to the caller unmodified.
    type Error;

    /// Total number of rows matching the query.
    fn count(&mut self) -> Result<u64, Self::Error>;

    /// Fetch rows anchored on the request's cursor, with no extra offset.
    ///
    /// Defaults to [`DataSource::fetch_by_cursor_with_offset`], whose
    /// `offset` is zero in this case.
    fn fetch_by_cursor(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<Fetched<Self::Item>, Self::Error> {
        self.fetch_by_cursor_with_offset(request)
    }

    /// Fetch rows anchored on the request's cursor, skipping `offset` rows.
    fn fetch_by_cursor_with_offset(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<Fetched<Self::Item>, Self::Error>;
}

impl<S: DataSource + ?Sized> DataSource for &mut S {
    type Item = S::Item;
    type Error = S::Error;

    fn count(&mut self) -> Result<u64, Self::Error> {
        (**self).count()
    }

    fn fetch_by_cursor(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<Fetched<Self::Item>, Self::Error> {
        (**self).fetch_by_cursor(request)
    }

    fn fetch_by_cursor_with_offset(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<Fetched<Self::Item>, Self::Error> {
        (**self).fetch_by_cursor_with_offset(request)
    }
}
