//! In-memory source.

use std::fmt;
use std::future::{Future, ready};

use crate::boundary::{CoercionError, compare_records};
use crate::record::Record;

use super::{AsyncSource, Source, Window};

/// A `Vec`-backed source.
///
/// Applies the window's boundaries through their DNF filter (the same shape
/// a SQL engine receives), sorts stably in the window's ordering and
/// truncates to the limit.
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    items: Vec<T>,
}

impl<T> MemorySource<T> {
    /// Wrap a collection. Insertion order is irrelevant.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// The stored items.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Add an item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the source holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for MemorySource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> FromIterator<T> for MemorySource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Record + Clone> Source for MemorySource<T> {
    type Item = T;
    type Error = MemoryError;

    fn fetch(&self, window: &Window) -> Result<Vec<T>, MemoryError> {
        let filter = window.filter_expr();

        let mut selected = Vec::new();
        for item in &self.items {
            if let Some(filter) = &filter
                && !filter.evaluate(item)?
            {
                continue;
            }
            selected.push(item);
        }

        selected.sort_by(|a, b| compare_records(*a, *b, window.ordering()));
        if let Some(limit) = window.max_items() {
            selected.truncate(limit);
        }

        Ok(selected.into_iter().cloned().collect())
    }
}

impl<T: Record + Clone> AsyncSource for MemorySource<T> {
    type Item = T;
    type Error = MemoryError;

    fn fetch(&self, window: &Window) -> impl Future<Output = Result<Vec<T>, MemoryError>> {
        ready(Source::fetch(self, window))
    }
}

/// Errors raised by [`MemorySource`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemoryError {
    /// A cursor value could not be compared with a stored field.
    Coercion(CoercionError),
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coercion(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MemoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Coercion(e) => Some(e),
        }
    }
}

impl From<CoercionError> for MemoryError {
    fn from(e: CoercionError) -> Self {
        Self::Coercion(e)
    }
}
