//! Scalar values read from records, their text rendering and natural ordering.

use std::cmp::Ordering;

/// A scalar field value as seen by the paginator.
///
/// Cursors carry values as text, so every variant has a canonical text form
/// (see [`Value::render`]) and can be compared against cursor text by reading
/// the text back as the same type (see [`Value::cmp_text`]).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// Absent value (SQL `NULL`).
    Null,
    /// Boolean, rendered as `1` / `0`.
    Bool(bool),
    /// Signed integer, rendered in decimal.
    Int(i64),
    /// Floating point number, rendered with Rust's shortest round-trip form.
    Float(f64),
    /// Text, rendered verbatim.
    Text(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text form used inside cursors. `None` for NULL.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }

    /// Natural ordering between two values of compatible types.
    ///
    /// Integers and floats compare numerically with each other. Returns `None`
    /// when either side is NULL or the types are unrelated.
    #[must_use]
    pub fn natural_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::Int(a), Self::Float(b)) => Some((*a as f64).total_cmp(b)),
            (Self::Float(a), Self::Int(b)) => Some(a.total_cmp(&(*b as f64))),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Compare this value with cursor text, reading the text as this value's type.
    ///
    /// Returns `None` when this value is NULL or the text cannot be read as
    /// the same type (e.g. `"abc"` against an integer field).
    #[must_use]
    pub fn cmp_text(&self, text: &str) -> Option<Ordering> {
        match self {
            Self::Null => None,
            Self::Bool(a) => parse_bool(text).map(|b| a.cmp(&b)),
            Self::Int(a) => match text.parse::<i64>() {
                Ok(b) => Some(a.cmp(&b)),
                // Integer column compared against a fractional cursor value
                Err(_) => text.parse::<f64>().ok().map(|b| (*a as f64).total_cmp(&b)),
            },
            Self::Float(a) => text.parse::<f64>().ok().map(|b| a.total_cmp(&b)),
            Self::Text(a) => Some(a.as_str().cmp(text)),
        }
    }

    /// Total ordering used when sorting in memory: natural ordering where it
    /// exists, otherwise by type rank (bool < number < text). NULLs tie.
    pub(crate) fn sort_cmp(&self, other: &Self) -> Ordering {
        self.natural_cmp(other)
            .unwrap_or_else(|| self.type_rank().cmp(&other.type_rank()))
    }

    const fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

/// Boolean cursor text: `1` / `0`, or `true` / `false`.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
