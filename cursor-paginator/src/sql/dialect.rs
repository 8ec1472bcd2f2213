//! SQL dialect implementations for Postgres, `SQLite` and `MySQL`.
//!
//! Each dialect handles the placeholder syntax and the NULL placement
//! clause of its database.

use crate::ordering::{Direction, NullsOrder};

/// SQL dialect trait for database-specific syntax.
pub trait Dialect: Clone + Copy {
    /// Format a parameter placeholder (e.g., `$1` for Postgres, `?1` for `SQLite`).
    fn param(&self, idx: usize) -> String;

    /// Format one ORDER BY term with explicit NULL placement.
    ///
    /// The default emits the standard `NULLS FIRST` / `NULLS LAST` clause.
    fn order_term(&self, column: &str, direction: Direction, nulls: NullsOrder) -> String {
        format!("{column} {} {}", dir_sql(direction), nulls_sql(nulls))
    }
}

const fn dir_sql(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    }
}

const fn nulls_sql(nulls: NullsOrder) -> &'static str {
    match nulls {
        NullsOrder::First => "NULLS FIRST",
        NullsOrder::Last => "NULLS LAST",
    }
}

/// Postgres dialect.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Postgres;

impl Dialect for Postgres {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("${idx}")
    }
}

/// `SQLite` dialect. `NULLS FIRST` / `NULLS LAST` need `SQLite` 3.30 or later.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct Sqlite;

impl Dialect for Sqlite {
    #[inline]
    fn param(&self, idx: usize) -> String {
        format!("?{idx}")
    }
}

/// `MySQL` dialect.
///
/// `MySQL` has no `NULLS FIRST` / `NULLS LAST`; placement is forced with a
/// leading `column IS NULL` sort term.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct MySql;

impl Dialect for MySql {
    #[inline]
    fn param(&self, _idx: usize) -> String {
        "?".to_string()
    }

    fn order_term(&self, column: &str, direction: Direction, nulls: NullsOrder) -> String {
        let nulls = match nulls {
            NullsOrder::First => " DESC",
            NullsOrder::Last => "",
        };
        format!("{column} IS NULL{nulls}, {column} {}", dir_sql(direction))
    }
}
