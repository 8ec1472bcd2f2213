//! Storage-neutral filter expressions.
//!
//! These are the predicate shapes a source must support to apply a keyset
//! boundary without native row comparison: equality, strict inequality,
//! `IS NULL` / `IS NOT NULL`, combined with `AND` / `OR`.

use std::cmp::Ordering;
use std::fmt;

use crate::ordering::FieldPath;
use crate::record::{Record, resolve};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equal: `=` (`IS NULL` with a NULL operand)
    Eq,
    /// Not equal: `!=` (`IS NOT NULL` with a NULL operand)
    Ne,
    /// Greater than: `>`
    Gt,
    /// Less than: `<`
    Lt,
}

/// Logical operators for compound filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// All conditions must match: `AND`
    And,
    /// At least one condition must match: `OR`
    Or,
}

/// A single field comparison against cursor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field the comparison reads.
    pub field: FieldPath,
    /// Comparison operator.
    pub op: Operator,
    /// Cursor text to compare with; `None` is NULL.
    pub value: Option<String>,
}

impl Filter {
    /// `field IS NULL` when `value` is `None`, `field = value` otherwise.
    pub const fn eq(field: FieldPath, value: Option<String>) -> Self {
        Self {
            field,
            op: Operator::Eq,
            value,
        }
    }

    /// `field IS NULL`.
    pub const fn is_null(field: FieldPath) -> Self {
        Self::eq(field, None)
    }

    /// `field IS NOT NULL`.
    pub const fn is_not_null(field: FieldPath) -> Self {
        Self {
            field,
            op: Operator::Ne,
            value: None,
        }
    }

    /// Evaluate against a record with SQL semantics: any ordering comparison
    /// involving NULL is false.
    pub fn evaluate(&self, record: &dyn Record) -> Result<bool, CoercionError> {
        let actual = resolve(record, &self.field);

        let Some(text) = &self.value else {
            return Ok(match self.op {
                Operator::Eq => actual.is_null(),
                Operator::Ne => !actual.is_null(),
                Operator::Gt | Operator::Lt => false,
            });
        };

        if actual.is_null() {
            return Ok(false);
        }

        let ordering = actual.cmp_text(text).ok_or_else(|| CoercionError {
            field: self.field.to_string(),
            value: text.clone(),
        })?;

        Ok(match self.op {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Lt => ordering == Ordering::Less,
        })
    }
}

/// A compound filter combining multiple expressions with a logical operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundFilter {
    /// How the sub-expressions combine.
    pub op: LogicalOp,
    /// The sub-expressions.
    pub filters: Vec<FilterExpr>,
}

/// A filter expression that can be simple, compound, or unsatisfiable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterExpr {
    /// A simple field comparison.
    Simple(Filter),
    /// A compound filter with logical operator.
    Compound(CompoundFilter),
    /// Matches nothing.
    Never,
}

impl FilterExpr {
    /// Conjunction. A single expression is returned as is.
    #[must_use]
    pub fn all(mut filters: Vec<Self>) -> Self {
        if filters.len() == 1
            && let Some(only) = filters.pop()
        {
            return only;
        }
        Self::Compound(CompoundFilter {
            op: LogicalOp::And,
            filters,
        })
    }

    /// Disjunction. A single expression is returned as is; none is [`FilterExpr::Never`].
    #[must_use]
    pub fn any(mut filters: Vec<Self>) -> Self {
        match filters.len() {
            0 => Self::Never,
            1 => filters.pop().unwrap_or(Self::Never),
            _ => Self::Compound(CompoundFilter {
                op: LogicalOp::Or,
                filters,
            }),
        }
    }

    /// Evaluate against a record.
    ///
    /// Fails only when cursor text cannot be read as the type of the field it
    /// is compared with.
    pub fn evaluate(&self, record: &dyn Record) -> Result<bool, CoercionError> {
        match self {
            Self::Simple(filter) => filter.evaluate(record),
            Self::Compound(compound) => {
                for filter in &compound.filters {
                    let matched = filter.evaluate(record)?;
                    match compound.op {
                        LogicalOp::And if !matched => return Ok(false),
                        LogicalOp::Or if matched => return Ok(true),
                        _ => {},
                    }
                }
                Ok(compound.op == LogicalOp::And)
            },
            Self::Never => Ok(false),
        }
    }
}

impl From<Filter> for FilterExpr {
    fn from(filter: Filter) -> Self {
        Self::Simple(filter)
    }
}

/// Cursor text that cannot be read as the type of the field it is compared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    /// The field being compared.
    pub field: String,
    /// The offending cursor text.
    pub value: String,
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cursor value {:?} is not comparable with field '{}'",
            self.value, self.field
        )
    }
}

impl std::error::Error for CoercionError {}
