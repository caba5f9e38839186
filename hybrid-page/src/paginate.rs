//! The pagination call: from a data source and a request to a finished page.

use crate::cursor::{Cursor, IntoCursor};
use crate::error::{Error, PaginateError};
use crate::extract::PageItem;
use crate::options::PaginatorOptions;
use crate::paginator::{HybridPaginator, PageParts};
use crate::planner::FetchPlan;
use crate::request::Resolver;
use crate::source::DataSource;

/// How many items a page holds.
#[derive(Debug, Clone, Copy, Default)]
pub enum PerPage {
    /// The configured `per_page` option.
    #[default]
    Default,
    /// A fixed size.
    Fixed(usize),
    /// Computed from the total row count.
    FromTotal(fn(u64) -> usize),
}

impl PerPage {
    /// The page size for a result set of `total` rows.
    pub fn resolve(self, total: u64, default: usize) -> usize {
        match self {
            Self::Default => default,
            Self::Fixed(per_page) => per_page,
            Self::FromTotal(per_page) => per_page(total),
        }
    }
}

/// Arguments of one pagination call.
///
/// Anything left unset is resolved from the request, or from the options.
///
/// ```
/// # use hybrid_page::{PaginateArgs, PerPage};
/// let fixed = PaginateArgs::new()
///     .per_page(20)
///     .columns(["id", "name"])
///     .page(2);
///
/// let scaled = PaginateArgs::new()
///     .page_size(PerPage::FromTotal(|total| if total > 1000 { 50 } else { 20 }));
/// # let _ = (fixed, scaled);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaginateArgs {
    per_page: PerPage,
    columns: Vec<String>,
    page: Option<u64>,
    prev_page: Option<u64>,
    cursor: Option<Option<Cursor>>,
    total: Option<u64>,
    options: PaginatorOptions,
}

impl PaginateArgs {
    /// Arguments that resolve everything from the request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed page size.
    #[must_use]
    pub const fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = PerPage::Fixed(per_page);
        self
    }

    /// Choose how the page size is determined.
    #[must_use]
    pub const fn page_size(mut self, per_page: PerPage) -> Self {
        self.per_page = per_page;
        self
    }

    /// Columns to fetch. Defaults to `*`.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// The page to show. 0 resolves from the request.
    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// The page the client came from. 0 resolves from the request.
    #[must_use]
    pub const fn prev_page(mut self, prev_page: u64) -> Self {
        self.prev_page = Some(prev_page);
        self
    }

    /// The cursor to anchor on, instead of the request's.
    ///
    /// A malformed token means no cursor; the request is not consulted.
    #[must_use]
    pub fn cursor(mut self, cursor: impl IntoCursor) -> Self {
        self.cursor = Some(cursor.into_cursor());
        self
    }

    /// A known total, which skips the count query.
    #[must_use]
    pub const fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Paginator options.
    #[must_use]
    pub fn options(mut self, options: PaginatorOptions) -> Self {
        self.options = options;
        self
    }
}

/// Hybrid pagination over any [`DataSource`].
pub trait HybridPaginate: DataSource {
    /// Fetch one page and build its paginator.
    ///
    /// Resolves page, previous page and cursor, counts the rows unless a
    /// total was given, plans a single fetch and runs it. A cursor whose
    /// keys do not match the source's ordering is dropped and the fetch
    /// re-planned without it.
    fn hybrid_paginate<R>(
        &mut self,
        args: PaginateArgs,
        resolver: &R,
    ) -> Result<HybridPaginator<Self::Item>, PaginateError<Self::Error>>
    where
        R: Resolver + ?Sized,
        Self::Item: PageItem;
}

impl<S: DataSource + ?Sized> HybridPaginate for S {
    fn hybrid_paginate<R>(
        &mut self,
        args: PaginateArgs,
        resolver: &R,
    ) -> Result<HybridPaginator<S::Item>, PaginateError<S::Error>>
    where
        R: Resolver + ?Sized,
        S::Item: PageItem,
    {
        let PaginateArgs {
            per_page,
            columns,
            page,
            prev_page,
            cursor,
            total,
            mut options,
        } = args;

        let page = page
            .filter(|&page| page >= 1)
            .unwrap_or_else(|| resolver.current_page(&options.page_name).max(1));
        let prev_page = prev_page
            .filter(|&prev| prev >= 1)
            .or_else(|| resolver.prev_page(&options.prev_page_name))
            .filter(|&prev| prev >= 1);
        let mut cursor = cursor.unwrap_or_else(|| resolver.current_cursor(&options.cursor_name));

        let total = match total {
            Some(total) => total,
            None => self.count().map_err(PaginateError::Source)?,
        };
        let per_page = per_page.resolve(total, options.per_page);
        if per_page == 0 {
            return Err(Error::InvalidPerPage { per_page }.into());
        }

        let columns = if columns.is_empty() {
            vec!["*".to_string()]
        } else {
            columns
        };

        let mut fetched = FetchPlan::new(page, prev_page, cursor.as_ref(), per_page)
            .execute(self, &columns)
            .map_err(PaginateError::Source)?;

        let mismatched = cursor
            .as_ref()
            .is_some_and(|cursor| !cursor.matches_keys(&fetched.ordering_keys));
        if mismatched {
            tracing::warn!(
                ordering_keys = ?fetched.ordering_keys,
                "cursor keys do not match the query ordering, ignoring cursor"
            );
            cursor = None;
            fetched = FetchPlan::new(page, prev_page, None, per_page)
                .execute(self, &columns)
                .map_err(PaginateError::Source)?;
        }

        if let Some(path) = resolver.current_path() {
            options.path = path;
        }

        let parts = PageParts {
            rows: fetched.rows,
            ordering_keys: fetched.ordering_keys,
            total: Some(total),
            per_page,
            current_page: page,
            prev_page,
            cursor,
        };
        Ok(HybridPaginator::new(parts, options)?)
    }
}
