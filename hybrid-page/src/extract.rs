//! Parameter extraction: reading ordering-key values off a result item.
//!
//! Items come in a small, closed set of shapes. Each key is resolved by
//! trying, in order:
//!
//! 1. a pivot (join) record named by the key's qualifier (`"role_user.created_at"`),
//! 2. keyed access, by full key and then by the part after the last `.`,
//! 3. attribute access, by full key and then by the part after the last `.`.
//!
//! An item offering neither keyed nor attribute access cannot be paginated.
//!
//! ```
//! use hybrid_page::{Fields, PageItem, Raw, extract_parameters};
//!
//! struct Post {
//!     id: i64,
//!     title: String,
//! }
//!
//! impl Fields for Post {
//!     fn field(&self, name: &str) -> Option<Raw<'_>> {
//!         match name {
//!             "id" => Some(Raw::from(self.id)),
//!             "title" => Some(Raw::from(self.title.as_str())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl PageItem for Post {
//!     fn attributes(&self) -> Option<&dyn Fields> {
//!         Some(self)
//!     }
//! }
//!
//! let post = Post { id: 7, title: "hello".into() };
//! let params = extract_parameters(&post, &["posts.id".to_string()]).unwrap();
//! assert_eq!(params[0].1, 7i64.into());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::Error;
use crate::value::Value;

/// One field as an item hands it over, before normalization.
#[non_exhaustive]
pub enum Raw<'a> {
    /// Already a primitive.
    Scalar(Value),
    /// An object with a textual representation (dates, ids, decimals).
    Text(&'a dyn fmt::Display),
}

impl Raw<'_> {
    /// Normalize into a primitive: textual objects become their text.
    pub fn into_value(self) -> Value {
        match self {
            Self::Scalar(value) => value,
            Self::Text(text) => Value::String(text.to_string()),
        }
    }

    const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Value::Null))
    }
}

impl fmt::Debug for Raw<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(&text.to_string()).finish(),
        }
    }
}

macro_rules! raw_from_scalar {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Raw<'_> {
            fn from(value: $ty) -> Self {
                Self::Scalar(value.into())
            }
        }
    )*};
}

raw_from_scalar!(Value, i64, i32, u32, f64, bool, String, &str);

/// Named lookup into a record.
pub trait Fields {
    /// The field called `name`, if the record has one.
    fn field(&self, name: &str) -> Option<Raw<'_>>;
}

/// A result item that ordering parameters can be read from.
///
/// Implement whichever capabilities the item has; the defaults report none.
pub trait PageItem {
    /// An attached join record whose table (or alias) is `table`.
    fn pivot(&self, _table: &str) -> Option<&dyn Fields> {
        None
    }

    /// Keyed access, as for maps and rows.
    fn keyed(&self) -> Option<&dyn Fields> {
        None
    }

    /// Named attribute access, as for models.
    fn attributes(&self) -> Option<&dyn Fields> {
        None
    }
}

/// Read every ordering key off `item`, in order.
///
/// Empty key names are skipped. A key the item does not have resolves to
/// [`Value::Null`].
pub fn extract_parameters<I>(item: &I, ordering_keys: &[String]) -> Result<Vec<(String, Value)>, Error>
where
    I: PageItem + ?Sized,
{
    ordering_keys
        .iter()
        .filter(|key| !key.is_empty())
        .map(|key| extract_one(item, key).map(|value| (key.clone(), value)))
        .collect()
}

/// Build the cursor positioned at `item`.
///
/// Fails when the item's ordering values do not fit in a cursor token.
pub fn cursor_for_item<I>(item: &I, ordering_keys: &[String], is_next: bool) -> Result<Cursor, Error>
where
    I: PageItem + ?Sized,
{
    let cursor = Cursor::new(extract_parameters(item, ordering_keys)?, is_next);
    cursor.validate()?;
    Ok(cursor)
}

fn extract_one<I: PageItem + ?Sized>(item: &I, key: &str) -> Result<Value, Error> {
    if let Some((table, column)) = key.rsplit_once('.')
        && let Some(raw) = item
            .pivot(table)
            .and_then(|pivot| pivot.field(column))
            .filter(|raw| !raw.is_null())
    {
        return Ok(raw.into_value());
    }

    let fields = item
        .keyed()
        .or_else(|| item.attributes())
        .ok_or_else(|| Error::unsupported_item(key))?;

    Ok(lookup(fields, key))
}

fn lookup(fields: &dyn Fields, key: &str) -> Value {
    fields
        .field(key)
        .filter(|raw| !raw.is_null())
        .or_else(|| {
            key.rsplit_once('.')
                .and_then(|(_, column)| fields.field(column))
        })
        .map_or(Value::Null, Raw::into_value)
}

// ============================================================================
// STANDARD ITEM SHAPES
// ============================================================================

fn json_field(json: &serde_json::Value) -> Raw<'_> {
    Value::from_json(json).map_or(Raw::Text(json), Raw::Scalar)
}

impl Fields for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Raw<'_>> {
        self.get(name).map(json_field)
    }
}

impl PageItem for serde_json::Map<String, serde_json::Value> {
    fn keyed(&self) -> Option<&dyn Fields> {
        Some(self)
    }
}

impl PageItem for serde_json::Value {
    fn keyed(&self) -> Option<&dyn Fields> {
        self.as_object().map(|object| object as &dyn Fields)
    }
}

impl<V: Clone + Into<Value>, S: std::hash::BuildHasher> Fields for HashMap<String, V, S> {
    fn field(&self, name: &str) -> Option<Raw<'_>> {
        self.get(name).map(|v| Raw::Scalar(v.clone().into()))
    }
}

impl<V: Clone + Into<Value>, S: std::hash::BuildHasher> PageItem for HashMap<String, V, S> {
    fn keyed(&self) -> Option<&dyn Fields> {
        Some(self)
    }
}

impl<V: Clone + Into<Value>> Fields for BTreeMap<String, V> {
    fn field(&self, name: &str) -> Option<Raw<'_>> {
        self.get(name).map(|v| Raw::Scalar(v.clone().into()))
    }
}

impl<V: Clone + Into<Value>> PageItem for BTreeMap<String, V> {
    fn keyed(&self) -> Option<&dyn Fields> {
        Some(self)
    }
}

macro_rules! forward_page_item {
    ($($ptr:ty),*) => {$(
        impl<T: PageItem + ?Sized> PageItem for $ptr {
            fn pivot(&self, table: &str) -> Option<&dyn Fields> {
                (**self).pivot(table)
            }

            fn keyed(&self) -> Option<&dyn Fields> {
                (**self).keyed()
            }

            fn attributes(&self) -> Option<&dyn Fields> {
                (**self).attributes()
            }
        }
    )*};
}

forward_page_item!(&T, Box<T>, Rc<T>, Arc<T>);
