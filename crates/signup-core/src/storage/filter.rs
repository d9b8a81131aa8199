//! Single-field query filters.
//!
//! Both backends evaluate filters in process with [`Filter::matches`], so
//! query results are identical regardless of where records live.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::error::{Result, SignupError};
use crate::storage::types::Document;

/// Maximum number of values accepted by `in`, `not-in` and `array-contains-any`.
pub const MAX_DISJUNCTION_VALUES: usize = 10;

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    ArrayContains,
    ArrayContainsAny,
    In,
    NotIn,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "==",
            FilterOp::NotEq => "!=",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::ArrayContains => "array-contains",
            FilterOp::ArrayContainsAny => "array-contains-any",
            FilterOp::In => "in",
            FilterOp::NotIn => "not-in",
        }
    }

    /// Operators whose query value is a list of candidates.
    fn takes_list(&self) -> bool {
        matches!(
            self,
            FilterOp::ArrayContainsAny | FilterOp::In | FilterOp::NotIn
        )
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = SignupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "==" => Ok(FilterOp::Eq),
            "!=" => Ok(FilterOp::NotEq),
            "<" => Ok(FilterOp::Lt),
            "<=" => Ok(FilterOp::Le),
            ">" => Ok(FilterOp::Gt),
            ">=" => Ok(FilterOp::Ge),
            "array-contains" => Ok(FilterOp::ArrayContains),
            "array-contains-any" => Ok(FilterOp::ArrayContainsAny),
            "in" => Ok(FilterOp::In),
            "not-in" => Ok(FilterOp::NotIn),
            other => Err(SignupError::Validation(format!(
                "Unsupported query operator: {}",
                other
            ))),
        }
    }
}

/// A `field <op> value` predicate over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// Build a filter, rejecting shapes the backends cannot evaluate.
    pub fn new(field: impl Into<String>, op: FilterOp, value: Value) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(SignupError::Validation(
                "Query field is required".to_string(),
            ));
        }

        if op.takes_list() {
            let values = value.as_array().ok_or_else(|| {
                SignupError::Validation(format!("Operator '{}' requires an array value", op))
            })?;
            if values.is_empty() || values.len() > MAX_DISJUNCTION_VALUES {
                return Err(SignupError::Validation(format!(
                    "Operator '{}' accepts 1 to {} values (got {})",
                    op,
                    MAX_DISJUNCTION_VALUES,
                    values.len()
                )));
            }
        }

        Ok(Self { field, op, value })
    }

    /// Evaluate the predicate against a document.
    ///
    /// A document without the field never matches, `!=` and `not-in` included.
    pub fn matches(&self, doc: &Document) -> bool {
        let Some(actual) = doc.get(&self.field) else {
            return false;
        };

        match self.op {
            FilterOp::Eq => values_equal(actual, &self.value),
            FilterOp::NotEq => !values_equal(actual, &self.value),
            FilterOp::Lt => compare(actual, &self.value) == Some(Ordering::Less),
            FilterOp::Le => matches!(
                compare(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Gt => compare(actual, &self.value) == Some(Ordering::Greater),
            FilterOp::Ge => matches!(
                compare(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::ArrayContains => actual
                .as_array()
                .is_some_and(|items| items.iter().any(|item| values_equal(item, &self.value))),
            FilterOp::ArrayContainsAny => match (actual.as_array(), self.value.as_array()) {
                (Some(items), Some(candidates)) => items
                    .iter()
                    .any(|item| candidates.iter().any(|c| values_equal(item, c))),
                _ => false,
            },
            FilterOp::In => self
                .value
                .as_array()
                .is_some_and(|candidates| candidates.iter().any(|c| values_equal(actual, c))),
            FilterOp::NotIn => self
                .value
                .as_array()
                .is_some_and(|candidates| !candidates.iter().any(|c| values_equal(actual, c))),
        }
    }
}

/// JSON equality, except that numbers compare by value (`1 == 1.0`).
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        _ => a == b,
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Integers compare exactly; floats fall back to `f64`.
fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    match (as_integer(x), as_integer(y)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
    }
}

/// Order two values of the same kind; mixed kinds are incomparable.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
