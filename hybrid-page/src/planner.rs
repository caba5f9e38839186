//! Choosing how to fetch a page.
//!
//! A page is read in one of two ways:
//!
//! - **Cursor**: rows directly after (or before) the cursor. Used when the
//!   requested page is adjacent to the one the cursor came from.
//! - **Cursor with offset**: the same anchor, skipping the pages in between.
//!   Used for numbered jumps such as 1 → 4, where the offset is
//!   `(|page - prev| - 1) * per_page`.
//!
//! Without a cursor the anchor is the start of the ordering and the offset
//! is absolute, `(page - 1) * per_page`.
//!
//! Every plan asks for one row more than a page holds; the extra row only
//! tells the paginator whether more pages follow.

use crate::cursor::Cursor;
use crate::source::{DataSource, FetchRequest, Fetched};

/// Which data source operation a plan calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Strategy {
    /// Read directly from the anchor.
    Cursor,
    /// Skip `offset` rows past the anchor first.
    CursorWithOffset {
        /// Rows to skip
        offset: u64,
    },
}

/// A single fetch, fully determined by the page request.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use = "a plan does nothing until executed"]
pub struct FetchPlan<'a> {
    cursor: Option<&'a Cursor>,
    strategy: Strategy,
    limit: usize,
}

impl<'a> FetchPlan<'a> {
    /// Plan the fetch for `page`, arriving from `prev_page` with `cursor`.
    ///
    /// Pages are 1-based; callers normalize them before planning.
    pub fn new(page: u64, prev_page: Option<u64>, cursor: Option<&'a Cursor>, per_page: usize) -> Self {
        let per_page_rows = per_page as u64;
        let offset = match (cursor, prev_page) {
            (Some(_), Some(prev)) if prev != page => {
                (page.abs_diff(prev) - 1).saturating_mul(per_page_rows)
            },
            (Some(_), _) => 0,
            (None, _) => page.saturating_sub(1).saturating_mul(per_page_rows),
        };
        let strategy = if offset == 0 {
            Strategy::Cursor
        } else {
            Strategy::CursorWithOffset { offset }
        };
        let plan = Self {
            cursor,
            strategy,
            limit: per_page.saturating_add(1),
        };
        tracing::debug!(
            page,
            prev_page,
            anchored = plan.is_anchored(),
            offset = plan.offset(),
            limit = plan.limit,
            "planned page fetch"
        );
        plan
    }

    /// The operation this plan calls.
    #[inline]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Rows skipped past the anchor.
    #[inline]
    pub const fn offset(&self) -> u64 {
        match self.strategy {
            Strategy::Cursor => 0,
            Strategy::CursorWithOffset { offset } => offset,
        }
    }

    /// Rows requested: one page plus one.
    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// The anchor, if any.
    #[inline]
    pub const fn cursor(&self) -> Option<&'a Cursor> {
        self.cursor
    }

    /// Whether the fetch starts from a cursor rather than the beginning.
    #[inline]
    pub const fn is_anchored(&self) -> bool {
        self.cursor.is_some()
    }

    /// Run the plan against `source`.
    pub fn execute<S>(&self, source: &mut S, columns: &[String]) -> Result<Fetched<S::Item>, S::Error>
    where
        S: DataSource + ?Sized,
    {
        let request = FetchRequest {
            cursor: self.cursor,
            offset: self.offset(),
            limit: self.limit,
            columns,
        };
        match self.strategy {
            Strategy::Cursor => source.fetch_by_cursor(&request),
            Strategy::CursorWithOffset { .. } => source.fetch_by_cursor_with_offset(&request),
        }
    }
}
