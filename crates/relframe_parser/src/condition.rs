//! Three-token conditions of the form `<column> <op> <column-or-literal>`.
//!
//! Tokens are separated by whitespace. There's no quoting, nesting or boolean
//! composition.

use std::fmt;
use std::str::FromStr;

use relframe_error::{RelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl FromStr for ComparisonOperator {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "==" | "=" => Self::Eq,
            "!=" | "<>" => Self::NotEq,
            "<" => Self::Lt,
            "<=" => Self::LtEq,
            ">" => Self::Gt,
            ">=" => Self::GtEq,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::LtEq => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtEq => write!(f, ">="),
        }
    }
}

/// A condition split into its three tokens.
///
/// The operator is kept as written so that callers which ignore it (antijoin)
/// don't reject conditions they never evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCondition<'a> {
    pub left: &'a str,
    pub op: &'a str,
    pub right: &'a str,
}

impl<'a> RawCondition<'a> {
    /// Split a condition into exactly three whitespace separated tokens.
    ///
    /// The returned error carries only the reason; callers wrap it into the
    /// error kind appropriate for them.
    pub fn split(s: &'a str) -> std::result::Result<Self, String> {
        let toks: Vec<_> = s.split_whitespace().collect();
        match toks.as_slice() {
            [left, op, right] => Ok(RawCondition {
                left: *left,
                op: *op,
                right: *right,
            }),
            _ => Err(format!("expected 3 tokens, found {}", toks.len())),
        }
    }

    pub fn operator(&self) -> std::result::Result<ComparisonOperator, String> {
        self.op
            .parse()
            .map_err(|_| format!("unsupported comparison operator '{}'", self.op))
    }
}

/// A join condition comparing a column of the left relation with a column of
/// the right relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCondition {
    pub left: String,
    pub op: ComparisonOperator,
    pub right: String,
}

impl JoinCondition {
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = |reason: String| RelError::MalformedCondition {
            condition: s.to_string(),
            reason,
        };

        let raw = RawCondition::split(s).map_err(malformed)?;
        let op = raw.operator().map_err(malformed)?;

        Ok(JoinCondition {
            left: raw.left.to_string(),
            op,
            right: raw.right.to_string(),
        })
    }

    /// Returns true if `column` is one of the two columns this condition
    /// compares.
    pub fn references(&self, column: &str) -> bool {
        self.left == column || self.right == column
    }
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
