//! Positions and their opaque cursor encoding.
//!
//! A [`Position`] is the tuple of ordering-key values taken from one item. The
//! [`CursorCodec`] turns it into an opaque, URL-safe [`Cursor`] and back.
//!
//! # Format
//!
//! The cursor is URL-safe base64 (no padding) of
//!
//! ```text
//! 1:<ordering fingerprint, 8 hex digits>|<element>|<element>|...
//! ```
//!
//! The leading version tag lets future layouts reject old cursors instead of
//! misreading them, and the fingerprint binds a cursor to the ordering it was
//! minted under.
//!
//! # Security Note
//!
//! Cursors are encoded, **not encrypted**: clients can read the key values.
//! Do not order by fields whose values must stay private.

mod encoding;

use std::fmt;

use crate::ordering::OrderingSpec;
use crate::record::{Record, resolve};

use encoding::{DELIMITER, base64_decode, base64_encode, join_elements, split_elements};

/// Default maximum accepted cursor length in bytes (4KB).
/// Oversized tokens are rejected before any decoding work.
pub const DEFAULT_MAX_CURSOR_LEN: usize = 4 * 1024;

const VERSION: &str = "1";

/// One item's values for each ordering key, as text. `None` is NULL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position(Vec<Option<String>>);

impl Position {
    /// Wrap raw elements.
    #[must_use]
    pub const fn new(elements: Vec<Option<String>>) -> Self {
        Self(elements)
    }

    /// Read an item's position under `ordering`.
    ///
    /// Each key's path is walked hop by hop; a NULL or absent hop makes the
    /// element NULL.
    #[must_use]
    pub fn from_record(record: &dyn Record, ordering: &OrderingSpec) -> Self {
        Self(
            ordering
                .keys()
                .iter()
                .map(|key| resolve(record, key.path()).render())
                .collect(),
        )
    }

    /// The elements, one per ordering key.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[Option<String>] {
        &self.0
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap the elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Option<String>> {
        self.0
    }
}

/// An opaque pagination token.
///
/// Treat it as a black box: hand it out, take it back, never parse it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cursor(String);

impl Cursor {
    /// The token text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap the token text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Cursor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Cursor {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&String> for Cursor {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<Cursor> for String {
    fn from(c: Cursor) -> Self {
        c.0
    }
}

/// Encodes and decodes cursors for one ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorCodec {
    fingerprint: u32,
    elements: usize,
    max_len: usize,
}

impl CursorCodec {
    /// Create a codec bound to `ordering`.
    #[must_use]
    pub fn new(ordering: &OrderingSpec) -> Self {
        Self {
            fingerprint: ordering.fingerprint(),
            elements: ordering.len(),
            max_len: DEFAULT_MAX_CURSOR_LEN,
        }
    }

    /// Set the maximum accepted token length in bytes.
    #[must_use]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Encode a position into a cursor.
    ///
    /// Fails with [`CursorError::TooLarge`] when the token would be longer
    /// than [`decode`](Self::decode) accepts, so every cursor this codec
    /// hands out decodes back to the same position.
    pub fn encode(&self, position: &Position) -> Result<Cursor, CursorError> {
        let payload = format!(
            "{VERSION}:{:08x}{DELIMITER}{}",
            self.fingerprint,
            join_elements(position.elements())
        );
        let token = base64_encode(&payload);
        if token.len() > self.max_len {
            return Err(CursorError::TooLarge);
        }
        Ok(Cursor(token))
    }

    /// Decode an untrusted cursor string.
    ///
    /// Element values are not type-checked here; a value that does not fit
    /// its field is reported by the source when the boundary is applied.
    pub fn decode(&self, cursor: &str) -> Result<Position, CursorError> {
        // Check size before decoding to bound the work done on hostile input
        if cursor.len() > self.max_len {
            return Err(CursorError::TooLarge);
        }

        let payload = base64_decode(cursor)?;
        let (header, body) = payload
            .split_once(DELIMITER)
            .ok_or(CursorError::InvalidFormat)?;
        let (version, fingerprint) = header.split_once(':').ok_or(CursorError::InvalidFormat)?;

        if version != VERSION {
            return Err(CursorError::UnsupportedVersion);
        }
        if fingerprint.len() != 8 {
            return Err(CursorError::InvalidFormat);
        }
        let fingerprint =
            u32::from_str_radix(fingerprint, 16).map_err(|_| CursorError::InvalidFormat)?;
        if fingerprint != self.fingerprint {
            return Err(CursorError::OrderingMismatch);
        }

        let elements = split_elements(body)?;
        if elements.len() != self.elements {
            return Err(CursorError::FieldCount {
                expected: self.elements,
                found: elements.len(),
            });
        }

        Ok(Position(elements))
    }
}

/// Errors that can occur when encoding or decoding a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CursorError {
    /// The cursor exceeds the maximum allowed size, or an item's key values
    /// would produce one that does.
    TooLarge,
    /// The base64 encoding is invalid.
    InvalidBase64,
    /// The decoded bytes are not UTF-8.
    InvalidUtf8,
    /// The payload layout is invalid.
    InvalidFormat,
    /// The payload carries an unknown version tag.
    UnsupportedVersion,
    /// The cursor was minted under a different ordering.
    OrderingMismatch,
    /// The payload has the wrong number of elements.
    FieldCount {
        /// Elements the ordering requires.
        expected: usize,
        /// Elements found in the cursor.
        found: usize,
    },
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge => write!(f, "cursor exceeds maximum size"),
            Self::InvalidBase64 => write!(f, "invalid base64 encoding in cursor"),
            Self::InvalidUtf8 => write!(f, "cursor payload is not valid UTF-8"),
            Self::InvalidFormat => write!(f, "invalid cursor format"),
            Self::UnsupportedVersion => write!(f, "unsupported cursor version"),
            Self::OrderingMismatch => write!(f, "cursor belongs to a different ordering"),
            Self::FieldCount { expected, found } => {
                write!(f, "cursor has {found} fields, expected {expected}")
            },
        }
    }
}

impl std::error::Error for CursorError {}

impl CursorError {
    /// Returns `true` if this is an encoding/layout error.
    ///
    /// Includes `InvalidBase64`, `InvalidUtf8`, `InvalidFormat` and `FieldCount`.
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64 | Self::InvalidUtf8 | Self::InvalidFormat | Self::FieldCount { .. }
        )
    }

    /// Returns `true` if the cursor is well-formed but not usable here.
    ///
    /// Includes `UnsupportedVersion` and `OrderingMismatch`.
    #[inline]
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::UnsupportedVersion | Self::OrderingMismatch)
    }
}
