//! SQL rendering of pagination windows.
//!
//! [`SqlQuery`] turns a [`Window`] into one parameterized `SELECT` whose
//! `WHERE` clause is the boundaries' DNF and whose `ORDER BY` carries the
//! window's NULL placement:
//!
//! ```
//! use cursor_paginator::sql;
//! use cursor_paginator::{Boundary, OrderingSpec, Position, Window};
//!
//! let ordering = OrderingSpec::parse(&["-created", "id"]).unwrap();
//! let position = Position::new(vec![Some("2024-01-15".into()), Some("42".into())]);
//! let window = Window::new(ordering.clone())
//!     .bound(Boundary::after(&ordering, position))
//!     .limit(21);
//!
//! let query = sql::postgres("posts").window(&window).build();
//! assert_eq!(
//!     query.sql,
//!     "SELECT * FROM posts \
//!      WHERE ((created < $1 OR created IS NULL) OR (created = $2 AND (id > $3 OR id IS NULL))) \
//!      ORDER BY created DESC NULLS LAST, id ASC NULLS LAST LIMIT 21"
//! );
//! assert_eq!(query.params, ["2024-01-15", "2024-01-15", "42"]);
//! ```
//!
//! Cursor values are bound as text parameters. Databases with dynamic typing
//! (`SQLite`) or implicit casts compare them against typed columns directly;
//! elsewhere cast in a view or pick text-comparable key columns. Boolean keys
//! are bound as `1` / `0`, which `SQLite` and `MySQL` store and Postgres accepts
//! as boolean input.

mod dialect;

use log::trace;

use crate::boundary::{CompoundFilter, Filter, FilterExpr, LogicalOp, Operator};
use crate::ordering::{OrderingKey, is_valid_identifier};
use crate::source::Window;

pub use dialect::{Dialect, MySql, Postgres, Sqlite};

/// Query result with SQL string and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "QueryResult must be used to execute the query"]
pub struct QueryResult {
    /// The SQL text with dialect placeholders.
    pub sql: String,
    /// Parameter values in placeholder order.
    pub params: Vec<String>,
}

/// Whether `name` is an identifier or a dotted `alias.column` reference.
fn is_valid_column_ref(name: &str) -> bool {
    name.split('.').all(is_valid_identifier)
}

/// Panics if `name` is not a valid column reference.
fn assert_valid_column_ref(name: &str, context: &str) {
    assert!(
        is_valid_column_ref(name),
        "Invalid SQL {context} name '{name}': each dot-separated part must start with \
         letter/underscore, contain only ASCII alphanumeric/underscore, and be 1-63 chars"
    );
}

#[derive(Debug, Clone)]
struct Join {
    table: String,
    alias: String,
    left: String,
    right: String,
}

/// SQL query builder for one paginated read.
#[derive(Debug, Clone)]
pub struct SqlQuery<D: Dialect> {
    dialect: D,
    table: String,
    fields: Vec<String>,
    joins: Vec<Join>,
    filters: Vec<FilterExpr>,
    sorts: Vec<OrderingKey>,
    limit: Option<usize>,
}

impl<D: Dialect> SqlQuery<D> {
    /// Create a query against `table`.
    ///
    /// # Panics
    ///
    /// Panics if the table name is not a valid SQL identifier.
    pub fn new(dialect: D, table: impl Into<String>) -> Self {
        let table = table.into();
        assert_valid_column_ref(&table, "table");
        Self {
            dialect,
            table,
            fields: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
            limit: None,
        }
    }

    /// Set the columns to SELECT. Defaults to `*`.
    ///
    /// # Panics
    ///
    /// Panics if any field is not a valid column reference.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        for field in fields {
            assert_valid_column_ref(field, "field");
        }
        self.fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// `LEFT JOIN table AS alias ON alias.right = left`.
    ///
    /// Nested ordering paths such as `author.name` render as `author.name`,
    /// so join each relation under the alias its first segment names.
    ///
    /// # Panics
    ///
    /// Panics if any name is not a valid identifier or column reference.
    pub fn left_join(mut self, table: &str, alias: &str, left: &str, right: &str) -> Self {
        assert_valid_column_ref(table, "join table");
        assert_valid_column_ref(alias, "join alias");
        assert_valid_column_ref(left, "join column");
        assert_valid_column_ref(right, "join column");
        self.joins.push(Join {
            table: table.to_string(),
            alias: alias.to_string(),
            left: left.to_string(),
            right: right.to_string(),
        });
        self
    }

    /// Add a filter; all filters are combined with `AND`.
    pub fn filter(mut self, expr: impl Into<FilterExpr>) -> Self {
        self.filters.push(expr.into());
        self
    }

    /// Apply a pagination window: its boundaries, ordering and limit.
    pub fn window(mut self, window: &Window) -> Self {
        if let Some(expr) = window.filter_expr() {
            self.filters.push(expr);
        }
        self.sorts = window.ordering().keys().to_vec();
        self.limit = window.max_items();
        self
    }

    /// Build the SQL and its parameters.
    pub fn build(&self) -> QueryResult {
        let mut params = Vec::new();

        let select = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut sql = format!("SELECT {select} FROM {}", self.table);

        for join in &self.joins {
            sql.push_str(&format!(
                " LEFT JOIN {} AS {alias} ON {alias}.{} = {}",
                join.table,
                join.right,
                join.left,
                alias = join.alias,
            ));
        }

        if !self.filters.is_empty() {
            let conditions: Vec<String> = self
                .filters
                .iter()
                .map(|expr| build_filter_expr(&self.dialect, expr, &mut params))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if !self.sorts.is_empty() {
            let terms: Vec<String> = self
                .sorts
                .iter()
                .map(|key| {
                    self.dialect
                        .order_term(&key.path().to_string(), key.direction(), key.nulls())
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        trace!("built query: {sql}");
        QueryResult { sql, params }
    }
}

/// Build a query for Postgres.
///
/// Convenience function that creates a `SqlQuery` with Postgres dialect.
#[must_use]
pub fn postgres(table: &str) -> SqlQuery<Postgres> {
    SqlQuery::new(Postgres, table)
}

/// Build a query for `SQLite`.
///
/// Convenience function that creates a `SqlQuery` with `SQLite` dialect.
#[must_use]
pub fn sqlite(table: &str) -> SqlQuery<Sqlite> {
    SqlQuery::new(Sqlite, table)
}

/// Build a query for `MySQL`.
///
/// Convenience function that creates a `SqlQuery` with `MySQL` dialect.
#[must_use]
pub fn mysql(table: &str) -> SqlQuery<MySql> {
    SqlQuery::new(MySql, table)
}

fn build_filter_expr<D: Dialect>(dialect: &D, expr: &FilterExpr, params: &mut Vec<String>) -> String {
    match expr {
        FilterExpr::Simple(filter) => build_condition(dialect, filter, params),
        FilterExpr::Compound(compound) => build_compound_filter(dialect, compound, params),
        FilterExpr::Never => "1=0".to_string(),
    }
}

fn build_compound_filter<D: Dialect>(
    dialect: &D,
    compound: &CompoundFilter,
    params: &mut Vec<String>,
) -> String {
    let conditions: Vec<String> = compound
        .filters
        .iter()
        .map(|expr| build_filter_expr(dialect, expr, params))
        .collect();

    let (joiner, empty) = match compound.op {
        LogicalOp::And => (" AND ", "1=1"),
        LogicalOp::Or => (" OR ", "1=0"),
    };

    match conditions.as_slice() {
        [] => empty.to_string(),
        [only] => only.clone(),
        _ => format!("({})", conditions.join(joiner)),
    }
}

fn build_condition<D: Dialect>(dialect: &D, filter: &Filter, params: &mut Vec<String>) -> String {
    let column = filter.field.to_string();

    let Some(value) = &filter.value else {
        return match filter.op {
            Operator::Eq => format!("{column} IS NULL"),
            Operator::Ne => format!("{column} IS NOT NULL"),
            // Ordering against NULL never holds
            Operator::Gt | Operator::Lt => "1=0".to_string(),
        };
    };

    let op = match filter.op {
        Operator::Eq => "=",
        Operator::Ne => "!=",
        Operator::Gt => ">",
        Operator::Lt => "<",
    };
    params.push(value.clone());
    format!("{column} {op} {}", dialect.param(params.len()))
}
