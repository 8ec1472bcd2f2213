//! Field paths: one or more attribute names traversing related records.

use std::fmt;
use std::str::FromStr;

use super::OrderingError;

/// Maximum length for a single path segment (`PostgreSQL` identifier limit is 63).
const MAX_SEGMENT_LENGTH: usize = 63;

/// Check that a path segment is a plain identifier.
///
/// A valid segment:
/// - Starts with a letter (a-z, A-Z) or underscore
/// - Contains only letters, digits (0-9), and underscores
/// - Is not empty and not longer than 63 characters
///
/// Segments end up as column references in rendered SQL, so anything else is
/// rejected when the ordering is built.
///
/// ```
/// use cursor_paginator::is_valid_identifier;
///
/// assert!(is_valid_identifier("created_at"));
/// assert!(is_valid_identifier("_private"));
///
/// assert!(!is_valid_identifier(""));
/// assert!(!is_valid_identifier("1st"));
/// assert!(!is_valid_identifier("name; DROP"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_SEGMENT_LENGTH {
        return false;
    }

    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A dotted path such as `author.name`.
///
/// Segments may be separated by `.` or `->`; the canonical form uses `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The attribute names, outermost first.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path traverses at least one relation.
    #[inline]
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl FromStr for FieldPath {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s
            .split("->")
            .flat_map(|part| part.split('.'))
            .map(str::to_string)
            .collect();

        if segments.iter().all(|segment| is_valid_identifier(segment)) {
            Ok(Self { segments })
        } else {
            Err(OrderingError::InvalidPath(s.to_string()))
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
