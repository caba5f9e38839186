//! Token encoding for cursors.
//!
//! A token is the URL-safe, unpadded base64 form of a JSON object whose
//! members are the ordering parameters (in sort order) followed by the
//! reserved direction member.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::CursorError;
use crate::constants::{CURSOR_DIRECTION_KEY, MAX_CURSOR_FIELDS, MAX_CURSOR_SIZE};
use crate::value::Value;

/// Serialize ordered parameters and a direction flag into a token.
pub(super) fn encode_token(parameters: &[(String, Value)], is_next: bool) -> String {
    let mut object = serde_json::Map::with_capacity(parameters.len() + 1);
    for (name, value) in parameters {
        object.insert(name.clone(), value.to_json());
    }
    object.insert(
        CURSOR_DIRECTION_KEY.to_string(),
        serde_json::Value::Bool(is_next),
    );

    let json = serde_json::Value::Object(object).to_string();
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

/// Parse a non-empty token back into ordered parameters and a direction flag.
///
/// Accepts the standard base64 alphabet and trailing padding as well, since
/// some clients re-encode tokens on the way back.
pub(super) fn decode_token(token: &str) -> Result<(Vec<(String, Value)>, bool), CursorError> {
    if token.len() > MAX_CURSOR_SIZE {
        return Err(CursorError::TooLarge);
    }

    let normalized: String = token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|_| CursorError::InvalidBase64)?;

    let json: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| CursorError::InvalidFormat)?;
    let serde_json::Value::Object(object) = json else {
        return Err(CursorError::InvalidFormat);
    };

    let is_next = object
        .get(CURSOR_DIRECTION_KEY)
        .and_then(serde_json::Value::as_bool)
        .ok_or(CursorError::MissingDirection)?;

    let mut parameters = Vec::with_capacity(object.len().saturating_sub(1));
    for (name, raw) in &object {
        if name == CURSOR_DIRECTION_KEY {
            continue;
        }
        if parameters.len() == MAX_CURSOR_FIELDS {
            return Err(CursorError::TooManyFields);
        }
        let value = Value::from_json(raw).ok_or_else(|| CursorError::UnsupportedValue {
            key: name.clone(),
        })?;
        parameters.push((name.clone(), value));
    }

    Ok((parameters, is_next))
}
