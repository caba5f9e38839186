//! Error types for pagination.

use crate::cursor::CursorError;

/// Errors raised by the engine itself.
///
/// These are caller configuration errors: there is no safe fallback, so they
/// abort the current pagination computation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A boundary item exposes neither keyed nor attribute access.
    #[error(
        "only keyed and attribute items can be cursor paginated (ordering key '{key}')"
    )]
    UnsupportedItemShape {
        /// The ordering key being extracted
        key: String,
    },

    /// The resolved page size is zero.
    #[error("per page must be at least 1 (got {per_page})")]
    InvalidPerPage {
        /// The rejected page size
        per_page: usize,
    },

    /// A boundary item yields a cursor too large to be decoded again.
    #[error("boundary item cannot be carried in a cursor: {0}")]
    Cursor(#[from] CursorError),

    /// Paginator options could not be parsed.
    #[error("invalid paginator options: {0}")]
    Options(#[from] toml::de::Error),
}

impl Error {
    /// Create an error for an item that cannot be read.
    #[inline]
    #[must_use]
    pub fn unsupported_item(key: &str) -> Self {
        Self::UnsupportedItemShape {
            key: key.to_string(),
        }
    }

    /// Returns `true` if this error comes from caller configuration rather
    /// than from the rows being paginated.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedItemShape { .. } | Self::InvalidPerPage { .. } | Self::Options(_)
        )
    }
}

/// Failure of a full pagination call.
///
/// Data source failures are carried unmodified; the engine never retries.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PaginateError<E> {
    /// The data source failed to count or fetch.
    #[error(transparent)]
    Source(E),

    /// The engine rejected its input.
    #[error(transparent)]
    Paginator(#[from] Error),
}

impl<E> PaginateError<E> {
    /// Returns `true` if the data source failed.
    #[inline]
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }

    /// The data source error, if that is what failed.
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Source(err) => Some(err),
            Self::Paginator(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct SourceDown;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidPerPage { per_page: 0 }.to_string(),
            "per page must be at least 1 (got 0)"
        );
        assert!(Error::unsupported_item("id").to_string().contains("'id'"));
        assert!(Error::unsupported_item("id").is_config_error());
        assert!(!Error::from(CursorError::TooLarge).is_config_error());
    }

    #[test]
    fn test_source_error_is_transparent() {
        let err: PaginateError<SourceDown> = PaginateError::Source(SourceDown);
        assert_eq!(err.to_string(), "connection reset");
        assert!(err.is_source_error());
        assert!(err.into_source().is_some());
    }

    #[test]
    fn test_engine_error_converts() {
        let err: PaginateError<SourceDown> = Error::InvalidPerPage { per_page: 0 }.into();
        assert!(!err.is_source_error());
        assert!(err.into_source().is_none());
    }
}
