//! Cursor encoding/decoding for hybrid pagination.

mod encoding;

use encoding::{decode_token, encode_token};

use crate::constants::{MAX_CURSOR_FIELDS, MAX_CURSOR_SIZE};
use crate::value::Value;

/// A position along the active sort order, plus the direction to read in.
///
/// Cursors are derived from a boundary item of the previous fetch (first item
/// for a backward cursor, last item for a forward one) and travel to the
/// client as an opaque token.
///
/// # Security Note
///
/// Tokens are base64 JSON, **not encrypted**. Clients can read them, so only
/// ordering keys belong in a cursor.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
#[must_use = "cursor must be encoded with .encode() or handed to a data source"]
pub struct Cursor {
    parameters: Vec<(String, Value)>,
    is_next: bool,
}

impl Cursor {
    /// Create a cursor from ordered parameters and a direction.
    pub const fn new(parameters: Vec<(String, Value)>, is_next: bool) -> Self {
        Self {
            parameters,
            is_next,
        }
    }

    /// An empty cursor that reads forward.
    pub const fn forward() -> Self {
        Self::new(Vec::new(), true)
    }

    /// An empty cursor that reads backward.
    pub const fn backward() -> Self {
        Self::new(Vec::new(), false)
    }

    /// Add a parameter value to the cursor.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Add an integer parameter.
    pub fn int(self, name: impl Into<String>, value: i64) -> Self {
        self.field(name, Value::Int(value))
    }

    /// Add a string parameter.
    pub fn string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, Value::String(value.into()))
    }

    /// Ordered parameters of this cursor.
    #[inline]
    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    /// Look up one parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Parameter names, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|(key, _)| key.as_str())
    }

    /// Whether this cursor's keys are exactly `ordering_keys`, in order.
    ///
    /// Empty ordering key names are ignored, matching extraction.
    pub fn matches_keys(&self, ordering_keys: &[String]) -> bool {
        self.keys()
            .eq(ordering_keys.iter().map(String::as_str).filter(|k| !k.is_empty()))
    }

    /// Whether fetching with this cursor reads the items after it.
    #[inline]
    pub const fn points_to_next_items(&self) -> bool {
        self.is_next
    }

    /// Whether fetching with this cursor reads the items before it.
    #[inline]
    pub const fn points_to_previous_items(&self) -> bool {
        !self.is_next
    }

    /// Encode the cursor into an opaque, URL-safe token.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_token(&self.parameters, self.is_next)
    }

    /// Check that this cursor's token is within the limits [`Cursor::decode`]
    /// accepts, so it survives a trip through a URL.
    pub fn validate(&self) -> Result<(), CursorError> {
        if self.encode().len() > MAX_CURSOR_SIZE {
            return Err(CursorError::TooLarge);
        }
        if self.parameters.len() > MAX_CURSOR_FIELDS {
            return Err(CursorError::TooManyFields);
        }
        Ok(())
    }

    /// Decode a token.
    ///
    /// Empty or whitespace-only input is "no cursor" and yields `Ok(None)`;
    /// any other input that does not parse is an error.
    pub fn decode(token: &str) -> Result<Option<Self>, CursorError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        let (parameters, is_next) = decode_token(token)?;
        Ok(Some(Self::new(parameters, is_next)))
    }

    /// Decode a token, treating malformed input as "no cursor".
    ///
    /// The decode error is logged at `warn` and otherwise discarded.
    pub fn from_encoded(token: &str) -> Option<Self> {
        match Self::decode(token) {
            Ok(cursor) => cursor,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed cursor");
                None
            },
        }
    }
}

/// Errors that can occur when decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CursorError {
    /// The base64 encoding is invalid.
    #[error("invalid base64 encoding in cursor")]
    InvalidBase64,
    /// The payload is not a JSON object.
    #[error("invalid cursor format (expected JSON object)")]
    InvalidFormat,
    /// The payload carries no boolean direction member.
    #[error("cursor has no direction")]
    MissingDirection,
    /// A parameter is not a primitive value.
    #[error("cursor parameter '{key}' is not a primitive value")]
    UnsupportedValue {
        /// The offending parameter name
        key: String,
    },
    /// The token exceeds the maximum allowed size.
    #[error("cursor exceeds maximum size ({}KB limit)", MAX_CURSOR_SIZE / 1024)]
    TooLarge,
    /// The payload has too many parameters.
    #[error("cursor has too many fields (max {MAX_CURSOR_FIELDS})")]
    TooManyFields,
}

impl CursorError {
    /// Returns `true` if this is an encoding/format error.
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64
                | Self::InvalidFormat
                | Self::MissingDirection
                | Self::UnsupportedValue { .. }
        )
    }

    /// Returns `true` if this is a size/limit error.
    #[inline]
    #[must_use]
    pub const fn is_limit_error(&self) -> bool {
        matches!(self, Self::TooLarge | Self::TooManyFields)
    }
}

/// Trait for types that can be converted into an optional cursor.
///
/// Malformed or empty input converts to `None`, so request values can be
/// passed straight through.
///
/// ```
/// # use hybrid_page::{Cursor, IntoCursor};
/// let token = Cursor::forward().int("id", 42).encode();
/// assert!(token.as_str().into_cursor().is_some());
/// assert!("".into_cursor().is_none());
/// assert!("%%%".into_cursor().is_none());
/// ```
pub trait IntoCursor {
    /// Convert into an optional cursor.
    fn into_cursor(self) -> Option<Cursor>;
}

impl IntoCursor for Cursor {
    fn into_cursor(self) -> Option<Cursor> {
        Some(self)
    }
}

impl IntoCursor for &Cursor {
    fn into_cursor(self) -> Option<Cursor> {
        Some(self.clone())
    }
}

impl IntoCursor for &str {
    fn into_cursor(self) -> Option<Cursor> {
        Cursor::from_encoded(self)
    }
}

impl IntoCursor for String {
    fn into_cursor(self) -> Option<Cursor> {
        self.as_str().into_cursor()
    }
}

impl IntoCursor for &String {
    fn into_cursor(self) -> Option<Cursor> {
        self.as_str().into_cursor()
    }
}

impl<T: IntoCursor> IntoCursor for Option<T> {
    fn into_cursor(self) -> Option<Cursor> {
        self.and_then(IntoCursor::into_cursor)
    }
}
