//! The paginator.
//!
//! Pages are requested with a size (`first` or `last`) and optional
//! `after`/`before` cursors:
//!
//! - `first = n`: the n items following `after` (or from the start).
//! - `last = n`: the n items preceding `before` (or up to the end).
//!
//! Backward pages are fetched in the reversed ordering, so the source
//! returns the items nearest the cursor first, and are flipped back into
//! canonical order before being returned.

mod page;

use log::debug;

use crate::boundary::Boundary;
use crate::config::PaginatorConfig;
use crate::cursor::{Cursor, CursorCodec, Position};
use crate::error::Error;
use crate::ordering::OrderingSpec;
use crate::record::Record;
use crate::source::{AsyncSource, Source, Window};

pub use page::{Page, PageInfo};

/// Arguments of one page request.
///
/// ```
/// use cursor_paginator::PageRequest;
///
/// let request = PageRequest::new().first(10).after("opaque-token");
/// assert_eq!(request.first, Some(10));
/// assert_eq!(request.after.as_ref().map(|c| c.as_str()), Some("opaque-token"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRequest {
    /// Page size, reading forward.
    pub first: Option<usize>,
    /// Page size, reading backward.
    pub last: Option<usize>,
    /// Only items strictly after this cursor.
    pub after: Option<Cursor>,
    /// Only items strictly before this cursor.
    pub before: Option<Cursor>,
}

impl PageRequest {
    /// An empty request: the whole collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `n` items forward.
    #[must_use]
    pub const fn first(mut self, n: usize) -> Self {
        self.first = Some(n);
        self
    }

    /// Read `n` items backward.
    #[must_use]
    pub const fn last(mut self, n: usize) -> Self {
        self.last = Some(n);
        self
    }

    /// Start after `cursor`.
    #[must_use]
    pub fn after(mut self, cursor: impl Into<Cursor>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// End before `cursor`.
    #[must_use]
    pub fn before(mut self, cursor: impl Into<Cursor>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading {
    Forward,
    Backward,
}

/// What a request resolves to before anything is fetched.
#[derive(Debug)]
struct Plan {
    window: Window,
    reading: Reading,
    page_size: Option<usize>,
    after: bool,
    before: bool,
}

impl Plan {
    /// Trim, restore canonical order and compute the flags.
    fn finish<T>(self, mut items: Vec<T>) -> Page<T> {
        let fetched = items.len();
        let Some(page_size) = self.page_size else {
            debug!("fetched {fetched} items (unbounded)");
            return Page::new(items, false, false);
        };

        let has_more = fetched > page_size;
        items.truncate(page_size);
        debug!(
            "fetched {fetched} items ({:?}, page size {page_size}, {} bounds)",
            self.reading,
            self.window.bounds().len()
        );

        match self.reading {
            Reading::Forward => Page::new(items, has_more, self.after),
            Reading::Backward => {
                items.reverse();
                Page::new(items, self.before, has_more)
            },
        }
    }
}

/// Cursor-based paginator over one source in one fixed ordering.
///
/// Holds only immutable state; `page` takes `&self`, so a paginator can serve
/// concurrent callers when its source allows it.
#[derive(Debug, Clone)]
pub struct Paginator<S> {
    source: S,
    ordering: OrderingSpec,
    codec: CursorCodec,
    config: PaginatorConfig,
}

impl<S> Paginator<S> {
    /// Create a paginator with default limits.
    pub fn new(source: S, ordering: OrderingSpec) -> Self {
        let codec = CursorCodec::new(&ordering);
        Self {
            source,
            ordering,
            codec,
            config: PaginatorConfig::default(),
        }
    }

    /// Create a paginator from textual ordering keys such as `"-created"`.
    pub fn try_new<K: AsRef<str>>(source: S, ordering: &[K]) -> Result<Self, Error> {
        Ok(Self::new(source, OrderingSpec::parse(ordering)?))
    }

    /// Replace the limits.
    #[must_use]
    pub fn with_config(mut self, config: PaginatorConfig) -> Self {
        self.codec = CursorCodec::new(&self.ordering).with_max_len(config.max_cursor_len);
        self.config = config;
        self
    }

    /// The canonical ordering.
    #[inline]
    #[must_use]
    pub const fn ordering(&self) -> &OrderingSpec {
        &self.ordering
    }

    /// The active limits.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// The underlying source.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The position of `item` under this paginator's ordering.
    #[must_use]
    pub fn position<T: Record>(&self, item: &T) -> Position {
        Position::from_record(item, &self.ordering)
    }

    /// The cursor pointing at `item`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCursor`] with
    /// [`CursorError::TooLarge`](crate::CursorError::TooLarge) when the item's
    /// key values do not fit in `max_cursor_len`; such a cursor would be
    /// rejected when passed back.
    pub fn cursor<T: Record>(&self, item: &T) -> Result<Cursor, Error> {
        self.codec
            .encode(&self.position(item))
            .map_err(Error::InvalidCursor)
    }

    /// Decode a cursor minted by a paginator with the same ordering.
    pub fn decode_cursor(&self, cursor: &str) -> Result<Position, Error> {
        self.codec.decode(cursor).map_err(|e| {
            debug!("rejected cursor: {e}");
            Error::InvalidCursor(e)
        })
    }

    /// Flags and boundary cursors of `page`.
    ///
    /// Fails like [`Paginator::cursor`] for the first or last item.
    pub fn page_info<T: Record>(&self, page: &Page<T>) -> Result<PageInfo, Error> {
        let start = page.first().map(|item| self.cursor(item)).transpose()?;
        let end = page.last().map(|item| self.cursor(item)).transpose()?;
        Ok(PageInfo::new(page.has_next(), page.has_previous())
            .with_start_cursor(start)
            .with_end_cursor(end))
    }

    fn plan(&self, request: &PageRequest) -> Result<Plan, Error> {
        if request.first.is_some() && request.last.is_some() {
            return Err(Error::InvalidArgument(
                "`first` and `last` cannot be combined",
            ));
        }

        let (reading, page_size) = match (request.first, request.last) {
            (_, Some(last)) => (Reading::Backward, Some(self.config.clamp_page_size(last))),
            (first, None) => (
                Reading::Forward,
                first.map(|n| self.config.clamp_page_size(n)),
            ),
        };

        let ordering = match reading {
            Reading::Forward => self.ordering.clone(),
            Reading::Backward => self.ordering.reversed(),
        };
        let mut window = Window::new(ordering);

        // Boundaries are expressed against the canonical ordering
        if let Some(after) = &request.after {
            let position = self.decode_cursor(after.as_str())?;
            window = window.bound(Boundary::after(&self.ordering, position));
        }
        if let Some(before) = &request.before {
            let position = self.decode_cursor(before.as_str())?;
            window = window.bound(Boundary::before(&self.ordering, position));
        }
        if let Some(size) = page_size {
            // One extra row tells whether another page exists
            window = window.limit(size.saturating_add(1));
        }

        Ok(Plan {
            window,
            reading,
            page_size,
            after: request.after.is_some(),
            before: request.before.is_some(),
        })
    }
}

impl<S: Source> Paginator<S> {
    /// Fetch one page.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] when both `first` and `last` are set.
    /// - [`Error::InvalidCursor`] when `after` or `before` cannot be decoded.
    /// - [`Error::Source`] when the fetch fails.
    pub fn page(&self, request: PageRequest) -> Result<Page<S::Item>, Error> {
        let plan = self.plan(&request)?;
        let items = Source::fetch(&self.source, &plan.window)
            .map_err(|e| Error::Source(e.into()))?;
        Ok(plan.finish(items))
    }
}

impl<S: AsyncSource> Paginator<S> {
    /// Fetch one page from an async source.
    ///
    /// Same rules as [`Paginator::page`]; awaits exactly one fetch.
    pub async fn page_async(
        &self,
        request: PageRequest,
    ) -> Result<Page<<S as AsyncSource>::Item>, Error> {
        let plan = self.plan(&request)?;
        let items = AsyncSource::fetch(&self.source, &plan.window)
            .await
            .map_err(|e| Error::Source(e.into()))?;
        Ok(plan.finish(items))
    }
}
