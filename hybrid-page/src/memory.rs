//! An in-memory [`DataSource`] over a sorted vector.
//!
//! Useful for tests, fixtures and small datasets. Rows are kept in sort order
//! together with their extracted ordering values, so fetching never touches
//! the extractor again.

use std::cmp::Ordering;

use crate::cursor::Cursor;
use crate::error::Error;
use crate::extract::{PageItem, extract_parameters};
use crate::source::{DataSource, FetchRequest, Fetched};
use crate::value::{SortField, Value};

/// A sorted, mutable, in-memory result set.
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    order: Vec<SortField>,
    keys: Vec<String>,
    rows: Vec<(Vec<Value>, T)>,
}

impl<T: PageItem + Clone> MemorySource<T> {
    /// Build a source over `rows`, ordered by `order`.
    pub fn new(rows: impl IntoIterator<Item = T>, order: Vec<SortField>) -> Result<Self, Error> {
        let keys = order.iter().map(|sort| sort.field.clone()).collect();
        let mut source = Self {
            order,
            keys,
            rows: Vec::new(),
        };
        for row in rows {
            source.insert(row)?;
        }
        Ok(source)
    }

    /// Insert a row at its sorted position, after any equal rows.
    pub fn insert(&mut self, row: T) -> Result<(), Error> {
        let values: Vec<Value> = extract_parameters(&row, &self.keys)?
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        let at = self
            .rows
            .partition_point(|(existing, _)| self.compare(existing, &values) != Ordering::Greater);
        self.rows.insert(at, (values, row));
        Ok(())
    }

    /// Remove every row matching `predicate`, returning how many were removed.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|(_, row)| !predicate(row));
        before - self.rows.len()
    }

    /// Number of rows held.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are held.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The active sort order.
    pub fn order(&self) -> &[SortField] {
        &self.order
    }

    fn compare(&self, a: &[Value], b: &[Value]) -> Ordering {
        self.order
            .iter()
            .zip(a.iter().zip(b))
            .map(|(sort, (x, y))| sort.dir.apply(x.sort_cmp(y)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Cursor values in sort order, or `None` when the cursor lacks a key.
    fn anchor(&self, cursor: &Cursor) -> Option<Vec<Value>> {
        self.order
            .iter()
            .map(|sort| cursor.parameter(&sort.field).cloned())
            .collect()
    }
}

impl<T: PageItem + Clone> DataSource for MemorySource<T> {
    type Item = T;
    type Error = Error;

    fn count(&mut self) -> Result<u64, Self::Error> {
        Ok(self.rows.len() as u64)
    }

    fn fetch_by_cursor_with_offset(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<Fetched<T>, Self::Error> {
        let skip = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let anchor = request
            .cursor
            .and_then(|cursor| self.anchor(cursor).map(|values| (values, cursor.points_to_next_items())));

        let rows: Vec<T> = match anchor {
            None => self
                .rows
                .iter()
                .skip(skip)
                .take(request.limit)
                .map(|(_, row)| row.clone())
                .collect(),
            Some((values, true)) => self
                .rows
                .iter()
                .filter(|(existing, _)| self.compare(existing, &values) == Ordering::Greater)
                .skip(skip)
                .take(request.limit)
                .map(|(_, row)| row.clone())
                .collect(),
            Some((values, false)) => self
                .rows
                .iter()
                .rev()
                .filter(|(existing, _)| self.compare(existing, &values) == Ordering::Less)
                .skip(skip)
                .take(request.limit)
                .map(|(_, row)| row.clone())
                .collect(),
        };

        Ok(Fetched {
            rows,
            ordering_keys: self.keys.clone(),
        })
    }
}
