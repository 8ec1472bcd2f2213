//! Field access on paginated items.

use crate::ordering::FieldPath;
use crate::value::Value;

/// What a record yields for one attribute name.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Field<'a> {
    /// A scalar value (possibly [`Value::Null`]).
    Value(Value),
    /// A related record, traversed by the next path segment.
    Related(&'a dyn Record),
}

/// An item that can be paginated.
///
/// Implementations map attribute names to scalar values or related records.
/// Returning `None` means the attribute is absent, which the paginator treats
/// exactly like NULL.
///
/// # Example
///
/// ```
/// use cursor_paginator::{Field, Record, Value};
///
/// struct Author {
///     name: String,
/// }
///
/// struct Post {
///     id: i64,
///     author: Option<Author>,
/// }
///
/// impl Record for Author {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         match name {
///             "name" => Some(Field::Value(Value::from(&self.name))),
///             _ => None,
///         }
///     }
/// }
///
/// impl Record for Post {
///     fn field(&self, name: &str) -> Option<Field<'_>> {
///         match name {
///             "id" => Some(Field::Value(self.id.into())),
///             "author" => self.author.as_ref().map(|a| Field::Related(a as &dyn Record)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Look up one attribute by name.
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

impl std::fmt::Debug for dyn Record + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Record")
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        (**self).field(name)
    }
}

/// Walk `path` through `record`, one segment per hop.
///
/// An absent attribute, a NULL related record, a scalar in the middle of the
/// path or a relation at its end all resolve to [`Value::Null`]; no further
/// hops are attempted once NULL is reached.
pub fn resolve(record: &dyn Record, path: &FieldPath) -> Value {
    let mut current = record;
    let mut segments = path.segments().iter().peekable();

    while let Some(segment) = segments.next() {
        let is_last = segments.peek().is_none();
        match current.field(segment) {
            Some(Field::Related(next)) if !is_last => current = next,
            Some(Field::Value(value)) if is_last => return value,
            _ => return Value::Null,
        }
    }

    Value::Null
}
