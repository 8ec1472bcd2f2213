//! Ordering keys and the ordering specification a paginator is built on.
//!
//! An ordering is written the way most query APIs accept it: a list of field
//! paths where a leading `-` means descending.
//!
//! ```
//! use cursor_paginator::{Direction, OrderingSpec};
//!
//! let ordering = OrderingSpec::parse(&["-created", "author.name", "id"]).unwrap();
//! assert_eq!(ordering.keys()[0].direction(), Direction::Desc);
//! assert_eq!(ordering.to_string(), "-created,author.name,id");
//!
//! // Backward pages are fetched in the exact reverse order.
//! assert_eq!(
//!     ordering.reversed().to_string(),
//!     "created nulls first,-author.name nulls first,-id nulls first"
//! );
//! ```

mod path;

use std::fmt;
use std::str::FromStr;

pub use path::{FieldPath, is_valid_identifier};

/// Sort direction of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Smallest value first.
    Asc,
    /// Largest value first.
    Desc,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Where NULL values are placed relative to non-NULL values of one key.
///
/// The placement is independent of [`Direction`]: a parsed ordering always
/// puts NULLs last, and only a [reversed](OrderingSpec::reversed) ordering puts
/// them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NullsOrder {
    /// NULL precedes every value.
    First,
    /// NULL follows every value.
    Last,
}

impl NullsOrder {
    /// The opposite placement.
    #[inline]
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::First => Self::Last,
            Self::Last => Self::First,
        }
    }
}

/// One ordering key: a field path, a direction and a NULL placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderingKey {
    path: FieldPath,
    direction: Direction,
    nulls: NullsOrder,
}

impl OrderingKey {
    /// Create a key with NULLs last.
    pub const fn new(path: FieldPath, direction: Direction) -> Self {
        Self {
            path,
            direction,
            nulls: NullsOrder::Last,
        }
    }

    /// Parse a specifier such as `"name"`, `"-created"` or `"author.name"`.
    pub fn parse(spec: &str) -> Result<Self, OrderingError> {
        let spec = spec.trim();
        let (path, direction) = match spec.strip_prefix('-') {
            Some(stripped) => (stripped, Direction::Desc),
            None => (spec, Direction::Asc),
        };
        Ok(Self::new(path.parse()?, direction))
    }

    /// The field path.
    #[inline]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The sort direction.
    #[inline]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The NULL placement.
    #[inline]
    pub const fn nulls(&self) -> NullsOrder {
        self.nulls
    }

    /// The same key sorted the opposite way, NULL placement included.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            path: self.path.clone(),
            direction: self.direction.reversed(),
            nulls: self.nulls.reversed(),
        }
    }
}

impl fmt::Display for OrderingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == Direction::Desc {
            f.write_str("-")?;
        }
        write!(f, "{}", self.path)?;
        if self.nulls == NullsOrder::First {
            f.write_str(" nulls first")?;
        }
        Ok(())
    }
}

/// A non-empty, ordered list of [`OrderingKey`]s.
///
/// The first key is the primary sort; later keys break ties. Callers should
/// end the list with a key whose values are unique across the collection,
/// otherwise items that tie on every key can be skipped at page boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderingSpec {
    keys: Vec<OrderingKey>,
}

impl OrderingSpec {
    /// Build from already constructed keys.
    pub fn new(keys: Vec<OrderingKey>) -> Result<Self, OrderingError> {
        if keys.is_empty() {
            return Err(OrderingError::Empty);
        }
        Ok(Self { keys })
    }

    /// Parse a list of key specifiers.
    ///
    /// Fails with [`OrderingError::Empty`] for an empty list and
    /// [`OrderingError::InvalidPath`] for a malformed field path.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self, OrderingError> {
        let keys = specs
            .iter()
            .map(|spec| OrderingKey::parse(spec.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keys)
    }

    /// The keys, primary first.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[OrderingKey] {
        &self.keys
    }

    /// Number of keys (always at least one).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false`; an ordering has at least one key.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The exact reverse ordering: every direction and NULL placement flipped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            keys: self.keys.iter().map(OrderingKey::reversed).collect(),
        }
    }

    /// CRC-32 of the canonical text form.
    ///
    /// Cursors embed it so that a cursor minted under one ordering is rejected
    /// by a paginator built with another.
    #[must_use]
    pub fn fingerprint(&self) -> u32 {
        crc32fast::hash(self.to_string().as_bytes())
    }
}

impl fmt::Display for OrderingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Parses a comma separated list such as `"-created,id"`.
impl FromStr for OrderingSpec {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let specs: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        Self::parse(&specs)
    }
}

/// Errors raised while building an ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderingError {
    /// No ordering keys were given.
    Empty,
    /// A key's field path is empty or contains a malformed segment.
    InvalidPath(String),
}

impl fmt::Display for OrderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "ordering must contain at least one key"),
            Self::InvalidPath(path) => write!(
                f,
                "invalid ordering field '{path}': segments must start with a letter/underscore \
                 and contain only ASCII alphanumeric/underscore"
            ),
        }
    }
}

impl std::error::Error for OrderingError {}
