//! Errors shared by every relframe crate.

use std::error::Error as StdError;

pub type Result<T, E = RelError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum RelError {
    /// A referenced column does not exist in the schema.
    #[error("Unknown column '{column}', expected one of: {}", .available.join(", "))]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    /// An operation would produce a schema with a duplicated column name.
    #[error("Column '{0}' already exists")]
    ColumnConflict(String),

    /// Two relations were required to share a schema, but don't.
    #[error("Relations are not union compatible: [{}] vs [{}]", .left.join(", "), .right.join(", "))]
    SchemaMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    #[error("Malformed query '{query}': {reason}")]
    MalformedQuery { query: String, reason: String },

    #[error("Malformed condition '{condition}': {reason}")]
    MalformedCondition { condition: String, reason: String },

    /// A value could not be interpreted as the numeric type an operation
    /// required.
    #[error("Failed to parse '{value}' as {expected}")]
    ParseError {
        value: String,
        expected: &'static str,
    },

    #[error("Expression error: {0}")]
    EvalError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{msg}: {source}")]
    External {
        msg: String,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl RelError {
    pub fn unknown_column<S, I>(column: impl Into<String>, available: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        RelError::UnknownColumn {
            column: column.into(),
            available: available
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
        }
    }

    pub fn parse_error(value: impl Into<String>, expected: &'static str) -> Self {
        RelError::ParseError {
            value: value.into(),
            expected,
        }
    }

    pub fn eval(msg: impl Into<String>) -> Self {
        RelError::EvalError(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        RelError::InvalidArgument(msg.into())
    }
}

/// Attach a message to errors coming from other libraries.
pub trait ResultExt<T, E> {
    fn context(self, msg: &'static str) -> Result<T>;

    fn context_fn<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| RelError::External {
            msg: msg.to_string(),
            source: Box::new(e),
        })
    }

    fn context_fn<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| RelError::External {
            msg: f(),
            source: Box::new(e),
        })
    }
}
