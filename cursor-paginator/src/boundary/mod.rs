//! Canonical ordering over items and keyset boundary predicates.
//!
//! Items are compared key by key. Two non-NULL values compare naturally,
//! inverted for a descending key. A NULL compares greater than any value when
//! the key puts NULLs last (every parsed ordering does, whatever the
//! direction) and smaller when it puts them first (reversed orderings). Two
//! NULLs tie and the next key decides.
//!
//! A [`Boundary`] selects the items strictly after or strictly before a
//! [`Position`] in that order. It offers two equivalent realizations:
//!
//! - [`Boundary::matches`] evaluates the tuple comparison directly, for
//!   engines with native row comparison;
//! - [`Boundary::to_filter_expr`] expands it into disjunctive normal form over
//!   single-column predicates, for engines that only filter column by column.

mod filter;

use std::cmp::Ordering;

use crate::cursor::Position;
use crate::ordering::{Direction, NullsOrder, OrderingKey, OrderingSpec};
use crate::record::{Record, resolve};
use crate::value::Value;

pub use filter::{CoercionError, CompoundFilter, Filter, FilterExpr, LogicalOp, Operator};

/// Which side of a position a boundary selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Items strictly after the position.
    After,
    /// Items strictly before the position.
    Before,
}

/// Where NULL falls against a non-NULL value under `nulls`.
const fn null_vs_value(nulls: NullsOrder) -> Ordering {
    match nulls {
        NullsOrder::Last => Ordering::Greater,
        NullsOrder::First => Ordering::Less,
    }
}

const fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Compare two values under one key.
#[must_use]
pub fn compare_values(a: &Value, b: &Value, key: &OrderingKey) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => null_vs_value(key.nulls()),
        (false, true) => null_vs_value(key.nulls()).reverse(),
        (false, false) => directed(a.sort_cmp(b), key.direction()),
    }
}

/// Compare two items in the order `ordering` defines.
#[must_use]
pub fn compare_records(a: &dyn Record, b: &dyn Record, ordering: &OrderingSpec) -> Ordering {
    for key in ordering.keys() {
        let ord = compare_values(&resolve(a, key.path()), &resolve(b, key.path()), key);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// The set of items strictly after or strictly before a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    keys: Vec<OrderingKey>,
    position: Position,
    side: Side,
}

impl Boundary {
    /// Create a boundary on `side` of `position` under `ordering`.
    ///
    /// The position should have one element per key; extra elements are
    /// ignored and missing ones leave the trailing keys unconstrained.
    #[must_use]
    pub fn new(ordering: &OrderingSpec, position: Position, side: Side) -> Self {
        Self {
            keys: ordering.keys().to_vec(),
            position,
            side,
        }
    }

    /// Items strictly after `position`.
    #[must_use]
    pub fn after(ordering: &OrderingSpec, position: Position) -> Self {
        Self::new(ordering, position, Side::After)
    }

    /// Items strictly before `position`.
    #[must_use]
    pub fn before(ordering: &OrderingSpec, position: Position) -> Self {
        Self::new(ordering, position, Side::Before)
    }

    /// The ordering keys the boundary is expressed in.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[OrderingKey] {
        &self.keys
    }

    /// The boundary position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Which side of the position is selected.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    fn pairs(&self) -> impl Iterator<Item = (&OrderingKey, &Option<String>)> {
        self.keys.iter().zip(self.position.elements())
    }

    /// Native tuple comparison: does `record` fall on the selected side?
    pub fn matches(&self, record: &dyn Record) -> Result<bool, CoercionError> {
        for (key, element) in self.pairs() {
            let actual = resolve(record, key.path());
            let ord = match (actual.is_null(), element) {
                (true, None) => Ordering::Equal,
                (true, Some(_)) => null_vs_value(key.nulls()),
                (false, None) => null_vs_value(key.nulls()).reverse(),
                (false, Some(text)) => {
                    let ord = actual.cmp_text(text).ok_or_else(|| CoercionError {
                        field: key.path().to_string(),
                        value: text.clone(),
                    })?;
                    directed(ord, key.direction())
                },
            };

            if ord != Ordering::Equal {
                return Ok(match self.side {
                    Side::After => ord == Ordering::Greater,
                    Side::Before => ord == Ordering::Less,
                });
            }
        }

        // Equal on every key: the position itself is never included
        Ok(false)
    }

    /// Expand into disjunctive normal form.
    ///
    /// For keys `k1..kn` with cursor values `v1..vn`:
    ///
    /// ```text
    /// OR over i of: (k1 == v1 AND ... AND k(i-1) == v(i-1)) AND boundary_i
    /// ```
    ///
    /// Prefix equality is NULL-aware (`IS NULL` for a NULL value). For a
    /// non-NULL `vi`, `boundary_i` is `ki > vi` or `ki < vi` depending on side
    /// and direction, widened with `ki IS NULL` when NULL itself lies on the
    /// selected side. For a NULL `vi`, `boundary_i` is `ki IS NOT NULL` when
    /// values lie on the selected side of NULL, and the disjunct is dropped
    /// otherwise. With every disjunct dropped the result is
    /// [`FilterExpr::Never`].
    ///
    /// With `ORDER BY created DESC, id ASC` (NULLs last) and cursor
    /// `('2024-01-15', 42)`, the after-boundary is:
    ///
    /// ```text
    /// (created < '2024-01-15' OR created IS NULL)
    /// OR (created = '2024-01-15' AND (id > 42 OR id IS NULL))
    /// ```
    #[must_use]
    pub fn to_filter_expr(&self) -> FilterExpr {
        let after = self.side == Side::After;
        let mut disjuncts = Vec::new();
        let mut prefix: Vec<FilterExpr> = Vec::new();

        for (key, element) in self.pairs() {
            let field = key.path().clone();
            // NULL compares greater than values under NULLS LAST
            let null_is_greater = key.nulls() == NullsOrder::Last;

            let boundary = match element {
                Some(value) => {
                    let op = match (after, key.direction()) {
                        (true, Direction::Asc) | (false, Direction::Desc) => Operator::Gt,
                        (true, Direction::Desc) | (false, Direction::Asc) => Operator::Lt,
                    };
                    let compare = Filter {
                        field: field.clone(),
                        op,
                        value: Some(value.clone()),
                    };
                    if after == null_is_greater {
                        Some(FilterExpr::any(vec![
                            compare.into(),
                            Filter::is_null(field.clone()).into(),
                        ]))
                    } else {
                        Some(compare.into())
                    }
                },
                None if after != null_is_greater => Some(Filter::is_not_null(field.clone()).into()),
                None => None,
            };

            if let Some(boundary) = boundary {
                let mut conjuncts = prefix.clone();
                conjuncts.push(boundary);
                disjuncts.push(FilterExpr::all(conjuncts));
            }

            prefix.push(Filter::eq(field, element.clone()).into());
        }

        FilterExpr::any(disjuncts)
    }
}
