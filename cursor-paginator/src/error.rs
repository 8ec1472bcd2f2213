//! Paginator error type.

use std::fmt;

use crate::cursor::CursorError;
use crate::ordering::OrderingError;

/// Boxed error returned by a storage source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`Paginator`](crate::Paginator) operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The ordering is empty or malformed. Raised at construction.
    InvalidOrdering(OrderingError),
    /// A cursor could not be decoded, or an item's key values are too long
    /// to fit in one.
    InvalidCursor(CursorError),
    /// The request combines arguments that cannot be used together.
    InvalidArgument(&'static str),
    /// The source failed to fetch the page.
    Source(SourceError),
}

impl Error {
    /// Wrap a source failure.
    pub fn from_source(err: impl Into<SourceError>) -> Self {
        Self::Source(err.into())
    }

    /// Returns `true` when the caller's input is at fault and the request
    /// should be rejected rather than retried.
    ///
    /// Includes `InvalidCursor` and `InvalidArgument`.
    #[inline]
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCursor(_) | Self::InvalidArgument(_))
    }

    /// Returns `true` if the source failed.
    #[inline]
    #[must_use]
    pub const fn is_source_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrdering(e) => write!(f, "invalid ordering: {e}"),
            Self::InvalidCursor(e) => write!(f, "invalid cursor: {e}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Source(e) => write!(f, "source error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidOrdering(e) => Some(e),
            Self::InvalidCursor(e) => Some(e),
            Self::InvalidArgument(_) => None,
            Self::Source(e) => Some(e.as_ref()),
        }
    }
}

impl From<OrderingError> for Error {
    fn from(e: OrderingError) -> Self {
        Self::InvalidOrdering(e)
    }
}

impl From<CursorError> for Error {
    fn from(e: CursorError) -> Self {
        Self::InvalidCursor(e)
    }
}
