//! Centralized constants for the hybrid-page crate.
//!
//! All limits, defaults, and reserved names are defined here for easy tuning
//! and consistent behavior across the engine.

// ============================================================================
// CURSOR LIMITS
// ============================================================================

/// Maximum allowed encoded cursor size in bytes (4KB).
pub const MAX_CURSOR_SIZE: usize = 4 * 1024;

/// Maximum number of ordering parameters carried by one cursor.
pub const MAX_CURSOR_FIELDS: usize = 16;

/// Reserved JSON member holding the cursor direction inside a token.
pub const CURSOR_DIRECTION_KEY: &str = "_pointsToNextItems";

// ============================================================================
// REQUEST LIMITS
// ============================================================================

/// Maximum URL-decoded length of a single query key or value (64KB).
pub const MAX_URL_DECODED_LEN: usize = 64 * 1024;

// ============================================================================
// PAGINATOR DEFAULTS
// ============================================================================

/// Default query string variable holding the requested page.
pub const DEFAULT_PAGE_NAME: &str = "page";

/// Default query string variable holding the page the cursor was captured on.
pub const DEFAULT_PREV_PAGE_NAME: &str = "prev";

/// Default query string variable holding the encoded cursor.
pub const DEFAULT_CURSOR_NAME: &str = "cursor";

/// Default base path for generated URLs.
pub const DEFAULT_PATH: &str = "/";

/// Default number of numbered links on each side of the current page.
pub const DEFAULT_ON_EACH_SIDE: u64 = 3;

/// Default page size when the caller does not resolve one.
pub const DEFAULT_PER_PAGE: usize = 15;

/// Label of the leading "previous" link.
pub const DEFAULT_PREVIOUS_LABEL: &str = "Previous";

/// Label of the trailing "next" link.
pub const DEFAULT_NEXT_LABEL: &str = "Next";

/// Label of a collapsed gap in the link window.
pub const ELLIPSIS: &str = "...";

