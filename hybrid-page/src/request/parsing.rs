//! Query string decoding.

use percent_encoding::percent_decode;

use crate::constants::MAX_URL_DECODED_LEN;

/// Error returned when URL decoding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Decoded output would exceed maximum length.
    #[error("url decoded output exceeds maximum length ({}KB limit)", MAX_URL_DECODED_LEN / 1024)]
    TooLong,
}

/// Decode one query component: `%XX` escapes and `+` as space.
///
/// Malformed escapes are kept as written and invalid UTF-8 is replaced.
///
/// # Errors
///
/// Returns [`DecodeError::TooLong`] if the decoded output would exceed 64 KiB.
pub fn url_decode(s: &str) -> Result<String, DecodeError> {
    let spaced = s.replace('+', " ");
    let decoded = percent_decode(spaced.as_bytes()).decode_utf8_lossy();
    if decoded.len() > MAX_URL_DECODED_LEN {
        return Err(DecodeError::TooLong);
    }
    Ok(decoded.into_owned())
}

/// Split a raw query string into decoded pairs, in arrival order.
///
/// A key without `=` gets an empty value. Pairs that fail to decode are
/// dropped and logged.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut dropped = 0u32;

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match (url_decode(key), url_decode(value)) {
            (Ok(key), Ok(value)) => pairs.push((key, value)),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!(dropped, "dropped undecodable query parameters");
    }
    pairs
}

/// Parse a page number, accepting only integers of at least 1.
pub fn parse_page_number(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|&page| page >= 1)
}
