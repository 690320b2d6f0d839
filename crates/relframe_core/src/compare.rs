//! Comparison semantics for text values.
//!
//! Values are stored as text and interpreted lazily. Equality is always exact
//! text equality. Ordering comparisons are numeric when both sides parse as
//! numbers, and lexical otherwise.

use std::cmp::Ordering;

use relframe_error::{RelError, Result};
use relframe_parser::condition::ComparisonOperator;

/// Compare two text values using `op`.
pub fn compare_text(op: ComparisonOperator, left: &str, right: &str) -> bool {
    match op {
        ComparisonOperator::Eq => left == right,
        ComparisonOperator::NotEq => left != right,
        ComparisonOperator::Lt => ordering(left, right).is_some_and(Ordering::is_lt),
        ComparisonOperator::LtEq => ordering(left, right).is_some_and(Ordering::is_le),
        ComparisonOperator::Gt => ordering(left, right).is_some_and(Ordering::is_gt),
        ComparisonOperator::GtEq => ordering(left, right).is_some_and(Ordering::is_ge),
    }
}

fn ordering(left: &str, right: &str) -> Option<Ordering> {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r),
        _ => Some(left.cmp(right)),
    }
}

/// Total order used when sorting rows by a column.
///
/// Numeric values order before text and compare numerically with each other.
/// Text compares lexically.
pub fn sort_order(left: &str, right: &str) -> Ordering {
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.total_cmp(&r),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.cmp(right),
    }
}

/// A predicate used by `select`.
///
/// Receives the operands after column names have been replaced with the
/// current row's values.
pub trait SelectPredicate {
    fn evaluate(&self, operands: &[&str]) -> Result<bool>;
}

impl SelectPredicate for ComparisonOperator {
    fn evaluate(&self, operands: &[&str]) -> Result<bool> {
        match operands {
            [left, right] => Ok(compare_text(*self, left, right)),
            _ => Err(RelError::invalid_argument(format!(
                "Comparison '{self}' expects 2 operands, got {}",
                operands.len()
            ))),
        }
    }
}

impl<F> SelectPredicate for F
where
    F: Fn(&[&str]) -> bool,
{
    fn evaluate(&self, operands: &[&str]) -> Result<bool> {
        Ok(self(operands))
    }
}
