//! Wire representation of a page.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::paginator::HybridPaginator;

/// Serializes as the standard paginator object:
///
/// ```json
/// {
///   "current_page": 2,
///   "data": [...],
///   "first_page_url": "/users?page=1&prev=2",
///   "from": 11,
///   "last_page": 5,
///   "last_page_url": "/users?page=5&prev=2",
///   "links": [{"url": "...", "label": "Previous", "active": false}, ...],
///   "next_page_url": "/users?page=3&prev=2&cursor=...",
///   "path": "/users",
///   "per_page": 10,
///   "prev_page_url": "/users?page=1&prev=2&cursor=...",
///   "to": 20,
///   "total": 50
/// }
/// ```
///
/// With an unknown total, `last_page` and `total` are `null` and the last
/// page URL points at the current page.
impl<T: Serialize> Serialize for HybridPaginator<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let last_page = self.last_page().unwrap_or_else(|| self.current_page());

        let mut state = serializer.serialize_struct("HybridPaginator", 13)?;
        state.serialize_field("current_page", &self.current_page())?;
        state.serialize_field("data", self.items())?;
        state.serialize_field("first_page_url", &self.url(1, None))?;
        state.serialize_field("from", &self.first_item())?;
        state.serialize_field("last_page", &self.last_page())?;
        state.serialize_field("last_page_url", &self.url(last_page, None))?;
        state.serialize_field("links", &self.link_collection())?;
        state.serialize_field("next_page_url", &self.next_page_url())?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("per_page", &self.per_page())?;
        state.serialize_field("prev_page_url", &self.previous_page_url())?;
        state.serialize_field("to", &self.last_item())?;
        state.serialize_field("total", &self.total())?;
        state.end()
    }
}

impl<T: Serialize> HybridPaginator<T> {
    /// The page as a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The page as an indented JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The page as a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
