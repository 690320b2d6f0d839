use relframe_error::{RelError, Result};

use super::scalar::ScalarValue;

/// Functions callable from an `extend` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarFunction {
    Int,
    Float,
    Str,
    Len,
    Upper,
    Lower,
    Round,
    Abs,
}

impl ScalarFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "int" => Self::Int,
            "float" => Self::Float,
            "str" => Self::Str,
            "len" => Self::Len,
            "upper" => Self::Upper,
            "lower" => Self::Lower,
            "round" => Self::Round,
            "abs" => Self::Abs,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Len => "len",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Round => "round",
            Self::Abs => "abs",
        }
    }

    /// Check the number of arguments at bind time.
    pub fn check_num_args(&self, num: usize) -> Result<()> {
        let ok = match self {
            Self::Round => num == 1 || num == 2,
            _ => num == 1,
        };
        if ok {
            Ok(())
        } else {
            Err(RelError::eval(format!(
                "Function '{}' does not accept {num} argument(s)",
                self.name()
            )))
        }
    }

    pub fn execute(&self, args: Vec<ScalarValue>) -> Result<ScalarValue> {
        let mut args = args.into_iter();
        let first = args
            .next()
            .ok_or_else(|| RelError::eval(format!("Missing argument to '{}'", self.name())))?;

        match self {
            Self::Int => Ok(ScalarValue::Int(first.to_int()?)),
            Self::Float => Ok(ScalarValue::Float(first.to_float()?)),
            Self::Str => Ok(ScalarValue::Str(first.to_string())),
            Self::Len => match first {
                ScalarValue::Str(s) => Ok(ScalarValue::Int(s.chars().count() as i64)),
                other => Err(self.type_error(&other)),
            },
            Self::Upper => match first {
                ScalarValue::Str(s) => Ok(ScalarValue::Str(s.to_uppercase())),
                other => Err(self.type_error(&other)),
            },
            Self::Lower => match first {
                ScalarValue::Str(s) => Ok(ScalarValue::Str(s.to_lowercase())),
                other => Err(self.type_error(&other)),
            },
            Self::Abs => match first {
                ScalarValue::Int(v) => v
                    .checked_abs()
                    .map(ScalarValue::Int)
                    .ok_or_else(|| RelError::eval("Integer overflow in 'abs'")),
                ScalarValue::Float(v) => Ok(ScalarValue::Float(v.abs())),
                other => Err(self.type_error(&other)),
            },
            Self::Round => {
                if let ScalarValue::Str(_) = first {
                    return Err(self.type_error(&first));
                }
                match args.next() {
                    // Single argument rounds to the nearest integer, ties to
                    // even.
                    None => match first {
                        ScalarValue::Float(v) => {
                            let rounded = ScalarValue::Float(v.round_ties_even()).to_int()?;
                            Ok(ScalarValue::Int(rounded))
                        }
                        other => Ok(other),
                    },
                    Some(digits) => {
                        let digits = match digits {
                            ScalarValue::Int(d) => d,
                            other => return Err(self.type_error(&other)),
                        };
                        let v = first.to_float()?;
                        Ok(ScalarValue::Float(round_to(v, digits)))
                    }
                }
            }
        }
    }

    fn type_error(&self, arg: &ScalarValue) -> RelError {
        RelError::eval(format!(
            "Function '{}' does not accept a {} argument",
            self.name(),
            arg.type_name()
        ))
    }
}

/// Round to a number of decimal digits. Exact ties round to even.
pub fn round_to(v: f64, digits: i64) -> f64 {
    let digits = digits.clamp(-15, 15) as i32;
    let factor = 10f64.powi(digits);
    (v * factor).round_ties_even() / factor
}
