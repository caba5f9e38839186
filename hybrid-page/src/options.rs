//! Paginator configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CURSOR_NAME, DEFAULT_NEXT_LABEL, DEFAULT_ON_EACH_SIDE, DEFAULT_PAGE_NAME, DEFAULT_PATH,
    DEFAULT_PER_PAGE, DEFAULT_PREV_PAGE_NAME, DEFAULT_PREVIOUS_LABEL,
};
use crate::error::Error;

/// Names, labels and sizes a paginator works with.
///
/// Every field has a default, so a configuration file only lists what it
/// changes:
///
/// ```
/// # use hybrid_page::PaginatorOptions;
/// let options = PaginatorOptions::from_toml_str(r#"
///     path = "/users"
///     page_name = "p"
///     per_page = 25
/// "#).unwrap();
///
/// assert_eq!(options.page_name, "p");
/// assert_eq!(options.cursor_name, "cursor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorOptions {
    /// Base path for generated URLs, used when the request has none.
    pub path: String,
    /// Query parameter carrying the page number.
    pub page_name: String,
    /// Query parameter carrying the page the client came from.
    pub prev_page_name: String,
    /// Query parameter carrying the cursor token.
    pub cursor_name: String,
    /// Numbered links shown on each side of the current page.
    pub on_each_side: u64,
    /// Page size used when the caller does not pick one.
    pub per_page: usize,
    /// Fragment appended to every URL.
    pub fragment: Option<String>,
    /// Label of the "previous" link.
    pub previous_label: String,
    /// Label of the "next" link.
    pub next_label: String,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
            page_name: DEFAULT_PAGE_NAME.to_string(),
            prev_page_name: DEFAULT_PREV_PAGE_NAME.to_string(),
            cursor_name: DEFAULT_CURSOR_NAME.to_string(),
            on_each_side: DEFAULT_ON_EACH_SIDE,
            per_page: DEFAULT_PER_PAGE,
            fragment: None,
            previous_label: DEFAULT_PREVIOUS_LABEL.to_string(),
            next_label: DEFAULT_NEXT_LABEL.to_string(),
        }
    }
}

impl PaginatorOptions {
    /// Parse options from TOML, filling in defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        let options: Self = toml::from_str(source)?;
        if options.per_page == 0 {
            return Err(Error::InvalidPerPage { per_page: 0 });
        }
        Ok(options)
    }

    /// Set the base path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the page, previous page and cursor parameter names.
    #[must_use]
    pub fn names(
        mut self,
        page_name: impl Into<String>,
        prev_page_name: impl Into<String>,
        cursor_name: impl Into<String>,
    ) -> Self {
        self.page_name = page_name.into();
        self.prev_page_name = prev_page_name.into();
        self.cursor_name = cursor_name.into();
        self
    }

    /// Set the default page size.
    #[must_use]
    pub const fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }
}
