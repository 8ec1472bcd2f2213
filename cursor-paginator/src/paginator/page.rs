//! Page results.

use std::ops::Deref;

use crate::cursor::Cursor;

/// One page of items in canonical order.
///
/// Dereferences to a slice, so `len`, indexing, `first`, `last` and
/// iteration work directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    has_next: bool,
    has_previous: bool,
}

impl<T> Page<T> {
    pub(crate) const fn new(items: Vec<T>, has_next: bool, has_previous: bool) -> Self {
        Self {
            items,
            has_next,
            has_previous,
        }
    }

    /// The page's items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether items exist after the last item of this page.
    #[inline]
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether items exist before the first item of this page.
    #[inline]
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    /// Take ownership of the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Transform every item, keeping the flags.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Page information for paginated responses.
///
/// ```ignore
/// let page = paginator.page(PageRequest::new().first(20))?;
/// let info = paginator.page_info(&page)?;
///
/// json!({
///     "data": page.items(),
///     "page_info": info,
/// })
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next: bool,
    /// Whether there are items before this page.
    pub has_previous: bool,
    /// Cursor of the first item; pass as `before` to go back.
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item; pass as `after` to go forward.
    pub end_cursor: Option<Cursor>,
}

impl PageInfo {
    /// Flags from a page, no cursors.
    #[must_use]
    pub const fn new(has_next: bool, has_previous: bool) -> Self {
        Self {
            has_next,
            has_previous,
            start_cursor: None,
            end_cursor: None,
        }
    }

    /// Set the start cursor.
    #[must_use]
    pub fn with_start_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.start_cursor = cursor;
        self
    }

    /// Set the end cursor.
    #[must_use]
    pub fn with_end_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.end_cursor = cursor;
        self
    }
}
