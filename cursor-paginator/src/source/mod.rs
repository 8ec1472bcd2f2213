//! The storage collaborator contract.
//!
//! A paginator never touches storage itself. For every page it hands the
//! source one [`Window`]: the order to return items in, the keyset boundaries
//! they must satisfy and a row limit. The source executes it as a single
//! bounded read.

mod memory;

use std::future::Future;

use crate::boundary::{Boundary, CoercionError, FilterExpr};
use crate::error::SourceError;
use crate::ordering::OrderingSpec;
use crate::record::Record;

pub use memory::{MemoryError, MemorySource};

/// One bounded read: filter by `bounds`, sort by `ordering`, keep `limit` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    ordering: OrderingSpec,
    bounds: Vec<Boundary>,
    limit: Option<usize>,
}

impl Window {
    /// An unbounded, unlimited read in `ordering`.
    #[must_use]
    pub const fn new(ordering: OrderingSpec) -> Self {
        Self {
            ordering,
            bounds: Vec::new(),
            limit: None,
        }
    }

    /// Add a boundary the items must satisfy.
    #[must_use]
    pub fn bound(mut self, boundary: Boundary) -> Self {
        self.bounds.push(boundary);
        self
    }

    /// Limit the number of items returned.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order the items must be returned in, NULL placement included.
    #[inline]
    #[must_use]
    pub const fn ordering(&self) -> &OrderingSpec {
        &self.ordering
    }

    /// Boundaries the items must satisfy (all of them).
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> &[Boundary] {
        &self.bounds
    }

    /// Maximum number of items to return.
    #[inline]
    #[must_use]
    pub const fn max_items(&self) -> Option<usize> {
        self.limit
    }

    /// The boundaries as one DNF filter, for sources without row comparison.
    ///
    /// `None` when the window is unbounded.
    #[must_use]
    pub fn filter_expr(&self) -> Option<FilterExpr> {
        if self.bounds.is_empty() {
            return None;
        }
        Some(FilterExpr::all(
            self.bounds.iter().map(Boundary::to_filter_expr).collect(),
        ))
    }

    /// Whether `record` satisfies every boundary, by native tuple comparison.
    pub fn contains(&self, record: &dyn Record) -> Result<bool, CoercionError> {
        for boundary in &self.bounds {
            if !boundary.matches(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A synchronous storage engine.
pub trait Source {
    /// The items the source yields.
    type Item;
    /// The source's failure type.
    type Error: Into<SourceError>;

    /// Execute one bounded read.
    fn fetch(&self, window: &Window) -> Result<Vec<Self::Item>, Self::Error>;
}

impl<S: Source + ?Sized> Source for &S {
    type Item = S::Item;
    type Error = S::Error;

    fn fetch(&self, window: &Window) -> Result<Vec<Self::Item>, Self::Error> {
        (**self).fetch(window)
    }
}

/// A storage engine whose read can be awaited.
pub trait AsyncSource {
    /// The items the source yields.
    type Item;
    /// The source's failure type.
    type Error: Into<SourceError>;

    /// Execute one bounded read.
    fn fetch(&self, window: &Window) -> impl Future<Output = Result<Vec<Self::Item>, Self::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Position;

    fn ordering() -> OrderingSpec {
        OrderingSpec::parse(&["id"]).unwrap()
    }

    #[test]
    fn test_unbounded_window() {
        let window = Window::new(ordering());
        assert!(window.bounds().is_empty());
        assert_eq!(window.max_items(), None);
        assert_eq!(window.filter_expr(), None);
    }

    #[test]
    fn test_bounded_window_filter() {
        let after = Boundary::after(&ordering(), Position::new(vec![Some("1".into())]));
        let before = Boundary::before(&ordering(), Position::new(vec![Some("9".into())]));
        let window = Window::new(ordering())
            .bound(after.clone())
            .bound(before.clone())
            .limit(3);

        assert_eq!(window.max_items(), Some(3));
        assert_eq!(
            window.filter_expr(),
            Some(FilterExpr::all(vec![
                after.to_filter_expr(),
                before.to_filter_expr()
            ]))
        );
    }
}
