use std::fmt;

use relframe_error::{RelError, Result};

/// Value produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ScalarValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
        }
    }

    /// Convert to an integer, truncating floats and parsing text.
    pub fn to_int(&self) -> Result<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Float(v) => {
                if v.is_finite() {
                    Ok(v.trunc() as i64)
                } else {
                    Err(RelError::eval(format!("Cannot convert {v} to int")))
                }
            }
            Self::Str(s) => parse_int(s),
        }
    }

    /// Convert to a float, parsing text.
    pub fn to_float(&self) -> Result<f64> {
        match self {
            Self::Int(v) => Ok(*v as f64),
            Self::Float(v) => Ok(*v),
            Self::Str(s) => parse_float(s),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{}", format_float(*v)),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Parse text as an integer, surrounding whitespace allowed.
pub fn parse_int(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| RelError::parse_error(s, "an integer"))
}

/// Parse text as a float, surrounding whitespace allowed.
pub fn parse_float(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| RelError::parse_error(s, "a number"))
}

/// Format a float so that it always reads as a float.
///
/// Whole numbers keep a trailing `.0` (`20.0`), everything else uses the
/// shortest representation that round trips (`2021.33`).
pub fn format_float(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let s = v.to_string();
    if s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{s}.0")
    }
}
