// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder methods return Self
#![allow(clippy::must_use_candidate)] // Accessors don't need must_use
#![allow(clippy::cast_possible_truncation)] // Page sizes are usize, page numbers u64
#![allow(clippy::double_must_use)] // Functions returning must_use types can have their own docs

//! # hybrid-page - Numbered pages over cursor-anchored fetches
//!
//! Offset pagination gives users page numbers but drifts when rows are
//! inserted or deleted between requests. Cursor pagination is stable but only
//! moves one page at a time. `hybrid-page` does both: every page is fetched
//! relative to a cursor taken from the page the client came from, and jumps
//! between distant page numbers skip the pages in between with an offset
//! applied *after* the cursor filter.
//!
//! Generated URLs carry three parameters: the target `page`, the `prev` page
//! the client is on, and the `cursor` to anchor on.
//!
//! ## Quick Start
//!
//! ```
//! # use hybrid_page::prelude::*;
//! # use serde_json::json;
//! let rows = (1..=45).map(|id| json!({"id": id, "name": format!("user {id}")}));
//! let mut users = MemorySource::new(rows, vec![SortField::new("id", SortDir::Asc)]).unwrap();
//!
//! // First request: nothing in the query string.
//! let first = users
//!     .hybrid_paginate(PaginateArgs::new().per_page(10), &RequestTarget::parse("/users"))
//!     .unwrap();
//! assert_eq!(first.last_page(), Some(5));
//!
//! // The client follows the link to page 4, a jump of three pages.
//! let link = first.get_url_range(4, 4).remove(0).1;
//! let fourth = users
//!     .hybrid_paginate(PaginateArgs::new().per_page(10), &RequestTarget::parse(&link))
//!     .unwrap();
//!
//! assert_eq!(fourth.current_page(), 4);
//! assert_eq!(fourth.items()[0]["id"], 31);
//! ```
//!
//! ## Data sources
//!
//! Anything implementing [`DataSource`] can be paginated: it counts rows and
//! fetches up to `limit` rows strictly after (or before) a [`Cursor`],
//! skipping `offset` rows first. [`MemorySource`] is an in-memory
//! implementation.
//!
//! ## Items
//!
//! Cursors are built from the ordering keys of the first and last items of a
//! page. Items expose those keys through [`PageItem`], which is implemented
//! for JSON objects and string-keyed maps.

mod constants;
mod cursor;
mod error;
mod extract;
mod memory;
mod options;
mod paginate;
mod paginator;
mod planner;
mod render;
mod request;
mod response;
mod source;
mod value;
mod window;

pub use constants::{
    CURSOR_DIRECTION_KEY, DEFAULT_CURSOR_NAME, DEFAULT_NEXT_LABEL, DEFAULT_ON_EACH_SIDE,
    DEFAULT_PAGE_NAME, DEFAULT_PATH, DEFAULT_PER_PAGE, DEFAULT_PREV_PAGE_NAME,
    DEFAULT_PREVIOUS_LABEL, ELLIPSIS, MAX_CURSOR_FIELDS, MAX_CURSOR_SIZE, MAX_URL_DECODED_LEN,
};
pub use cursor::{Cursor, CursorError, IntoCursor};
pub use error::{Error, PaginateError};
pub use extract::{Fields, PageItem, Raw, cursor_for_item, extract_parameters};
pub use memory::MemorySource;
pub use options::PaginatorOptions;
pub use paginate::{HybridPaginate, PaginateArgs, PerPage};
pub use paginator::{HybridPaginator, PageParts};
pub use planner::{FetchPlan, Strategy};
pub use render::{Renderer, View};
pub use request::{
    DecodeError, NoRequest, RequestTarget, Resolver, parse_page_number, parse_query, url_decode,
};
pub use source::{DataSource, FetchRequest, Fetched};
pub use value::{SortDir, SortField, Value};
pub use window::{Element, Link, UrlRange, UrlWindow, Window};

/// Prelude module for convenient imports.
///
/// ```
/// use hybrid_page::prelude::*;
/// let cursor = Cursor::forward().int("id", 42);
/// assert!(cursor.points_to_next_items());
/// ```
pub mod prelude {
    pub use crate::{
        Cursor, CursorError, DataSource, Element, Error, FetchPlan, FetchRequest, Fetched, Fields,
        HybridPaginate, HybridPaginator, IntoCursor, Link, MemorySource, NoRequest, PageItem,
        PageParts, PaginateArgs, PaginateError, PaginatorOptions, PerPage, Raw, Renderer,
        RequestTarget, Resolver, SortDir, SortField, Strategy, Value, View,
    };
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
