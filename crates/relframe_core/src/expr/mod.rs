//! Sandboxed evaluation of `extend` expressions.
//!
//! Expressions are parsed once, bound against a schema (resolving column
//! names to positions and function names to builtins) and then evaluated for
//! each row. Nothing outside the grammar can be executed.

pub mod functions;
pub mod scalar;

use functions::ScalarFunction;
use relframe_error::{RelError, Result};
use relframe_parser::ast::{BinaryOperator, Expr, Literal, UnaryOperator};
use scalar::ScalarValue;

use crate::row::Row;
use crate::schema::Schema;

/// An expression with all identifiers resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpr {
    /// Reference to a column by position. Evaluates to the column's text.
    Column(usize),
    Literal(ScalarValue),
    Unary {
        op: UnaryOperator,
        expr: Box<BoundExpr>,
    },
    Binary {
        left: Box<BoundExpr>,
        op: BinaryOperator,
        right: Box<BoundExpr>,
    },
    Function {
        function: ScalarFunction,
        args: Vec<BoundExpr>,
    },
}

impl BoundExpr {
    /// Parse and bind an expression string.
    pub fn parse_and_bind(expr: &str, schema: &Schema) -> Result<Self> {
        let ast = relframe_parser::parse_expr(expr)?;
        Self::bind(&ast, schema)
    }

    pub fn bind(expr: &Expr, schema: &Schema) -> Result<Self> {
        Ok(match expr {
            Expr::Ident(ident) => match schema.position(ident.as_str()) {
                Some(idx) => BoundExpr::Column(idx),
                None => {
                    return Err(RelError::eval(format!(
                        "Unknown identifier '{ident}', expected one of: {}",
                        schema.columns().join(", ")
                    )));
                }
            },
            Expr::Literal(Literal::Number(n)) => BoundExpr::Literal(bind_number(n)?),
            Expr::Literal(Literal::String(s)) => BoundExpr::Literal(ScalarValue::Str(s.clone())),
            Expr::UnaryExpr { op, expr } => BoundExpr::Unary {
                op: *op,
                expr: Box::new(Self::bind(expr, schema)?),
            },
            Expr::BinaryExpr { left, op, right } => BoundExpr::Binary {
                left: Box::new(Self::bind(left, schema)?),
                op: *op,
                right: Box::new(Self::bind(right, schema)?),
            },
            Expr::Function { name, args } => {
                let function = ScalarFunction::from_name(name.as_str())
                    .ok_or_else(|| RelError::eval(format!("Unknown function '{name}'")))?;
                function.check_num_args(args.len())?;
                let args = args
                    .iter()
                    .map(|arg| Self::bind(arg, schema))
                    .collect::<Result<Vec<_>>>()?;
                BoundExpr::Function { function, args }
            }
            Expr::Nested(expr) => Self::bind(expr, schema)?,
        })
    }

    /// Evaluate this expression for a single row.
    pub fn eval(&self, row: &Row) -> Result<ScalarValue> {
        match self {
            Self::Column(idx) => Ok(ScalarValue::Str(row.value(*idx).to_string())),
            Self::Literal(v) => Ok(v.clone()),
            Self::Unary { op, expr } => eval_unary(*op, expr.eval(row)?),
            Self::Binary { left, op, right } => eval_binary(left.eval(row)?, *op, right.eval(row)?),
            Self::Function { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.eval(row))
                    .collect::<Result<Vec<_>>>()?;
                function.execute(args)
            }
        }
    }
}

fn bind_number(n: &str) -> Result<ScalarValue> {
    if n.contains('.') {
        n.parse::<f64>()
            .map(ScalarValue::Float)
            .map_err(|_| RelError::eval(format!("Invalid float literal '{n}'")))
    } else {
        n.parse::<i64>()
            .map(ScalarValue::Int)
            .map_err(|_| RelError::eval(format!("Integer literal '{n}' out of range")))
    }
}

fn eval_unary(op: UnaryOperator, v: ScalarValue) -> Result<ScalarValue> {
    match (op, v) {
        (UnaryOperator::Plus, v @ (ScalarValue::Int(_) | ScalarValue::Float(_))) => Ok(v),
        (UnaryOperator::Minus, ScalarValue::Int(v)) => v
            .checked_neg()
            .map(ScalarValue::Int)
            .ok_or_else(|| RelError::eval("Integer overflow")),
        (UnaryOperator::Minus, ScalarValue::Float(v)) => Ok(ScalarValue::Float(-v)),
        (_, v) => Err(RelError::eval(format!(
            "Bad operand type for unary operator: {}",
            v.type_name()
        ))),
    }
}

fn eval_binary(left: ScalarValue, op: BinaryOperator, right: ScalarValue) -> Result<ScalarValue> {
    use ScalarValue::*;

    let type_error = |l: &ScalarValue, r: &ScalarValue| {
        RelError::eval(format!(
            "Unsupported operand types for {op}: {} and {}",
            l.type_name(),
            r.type_name()
        ))
    };
    let overflow = || RelError::eval(format!("Integer overflow in {op}"));
    let div_zero = || RelError::eval("Division by zero");

    match (left, right) {
        (Str(l), Str(r)) if op == BinaryOperator::Plus => Ok(Str(l + &r)),
        (l @ Str(_), r) | (l, r @ Str(_)) => Err(type_error(&l, &r)),
        (Int(l), Int(r)) => match op {
            BinaryOperator::Plus => l.checked_add(r).map(Int).ok_or_else(overflow),
            BinaryOperator::Minus => l.checked_sub(r).map(Int).ok_or_else(overflow),
            BinaryOperator::Multiply => l.checked_mul(r).map(Int).ok_or_else(overflow),
            BinaryOperator::Divide => {
                if r == 0 {
                    return Err(div_zero());
                }
                Ok(Float(l as f64 / r as f64))
            }
            BinaryOperator::IntDiv => {
                if r == 0 {
                    return Err(div_zero());
                }
                let q = l.checked_div(r).ok_or_else(overflow)?;
                // Floor toward negative infinity.
                if l % r != 0 && ((l < 0) != (r < 0)) {
                    Ok(Int(q - 1))
                } else {
                    Ok(Int(q))
                }
            }
            BinaryOperator::Modulo => {
                if r == 0 {
                    return Err(div_zero());
                }
                let m = l.checked_rem(r).ok_or_else(overflow)?;
                // Result takes the sign of the divisor.
                if m != 0 && ((m < 0) != (r < 0)) {
                    Ok(Int(m + r))
                } else {
                    Ok(Int(m))
                }
            }
        },
        (l, r) => {
            let l = l.to_float()?;
            let r = r.to_float()?;
            match op {
                BinaryOperator::Plus => Ok(Float(l + r)),
                BinaryOperator::Minus => Ok(Float(l - r)),
                BinaryOperator::Multiply => Ok(Float(l * r)),
                BinaryOperator::Divide => {
                    if r == 0.0 {
                        return Err(div_zero());
                    }
                    Ok(Float(l / r))
                }
                BinaryOperator::IntDiv => {
                    if r == 0.0 {
                        return Err(div_zero());
                    }
                    Ok(Float((l / r).floor()))
                }
                BinaryOperator::Modulo => {
                    if r == 0.0 {
                        return Err(div_zero());
                    }
                    Ok(Float(l - r * (l / r).floor()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_with(expr: &str, columns: &[&str], values: &[&str]) -> Result<ScalarValue> {
        let schema = Schema::try_new(columns.iter().copied())?;
        let row: Row = values.iter().copied().collect();
        BoundExpr::parse_and_bind(expr, &schema)?.eval(&row)
    }

    fn eval(expr: &str) -> Result<ScalarValue> {
        eval_with(expr, &[], &[])
    }

    #[test]
    fn years_since_graduation() {
        let v = eval_with("2023 - int(GradYear)", &["SId", "GradYear"], &["1", "2021"]).unwrap();
        assert_eq!(ScalarValue::Int(2), v);
    }

    #[test]
    fn column_reference_is_text() {
        let v = eval_with("SName", &["SName"], &["joe"]).unwrap();
        assert_eq!(ScalarValue::Str("joe".to_string()), v);
        let v = eval_with("SName + '-' + str(SId)", &["SId", "SName"], &["1", "joe"]).unwrap();
        assert_eq!("joe-1", v.to_string());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(ScalarValue::Int(7), eval("1 + 2 * 3").unwrap());
        assert_eq!(ScalarValue::Int(9), eval("(1 + 2) * 3").unwrap());
        assert_eq!(ScalarValue::Float(2.5), eval("5 / 2").unwrap());
        assert_eq!(ScalarValue::Float(2.0), eval("4 / 2").unwrap());
        assert_eq!(ScalarValue::Int(-3), eval("-7 // 3").unwrap());
        assert_eq!(ScalarValue::Int(2), eval("-7 % 3").unwrap());
        assert_eq!(ScalarValue::Float(3.5), eval("1.5 + 2").unwrap());
        assert_eq!(ScalarValue::Int(-4), eval("-(2 + 2)").unwrap());
    }

    #[test]
    fn stringified_results() {
        assert_eq!("2.0", eval("4 / 2").unwrap().to_string());
        assert_eq!("3", eval("int(3.9)").unwrap().to_string());
        assert_eq!("2021.5", eval("float('2021.5')").unwrap().to_string());
    }

    #[test]
    fn unknown_identifier() {
        let err = eval_with("Age + 1", &["SId"], &["1"]).unwrap_err();
        assert!(matches!(err, RelError::EvalError(_)));
    }

    #[test]
    fn unknown_function() {
        assert!(matches!(eval("exec('rm')"), Err(RelError::EvalError(_))));
        assert!(matches!(eval("int(1, 2)"), Err(RelError::EvalError(_))));
    }

    #[test]
    fn type_errors() {
        assert!(matches!(eval("'a' + 1"), Err(RelError::EvalError(_))));
        assert!(matches!(eval("'a' * 'b'"), Err(RelError::EvalError(_))));
        assert!(matches!(eval("-'a'"), Err(RelError::EvalError(_))));
        assert!(matches!(eval("1 / 0"), Err(RelError::EvalError(_))));
        assert!(matches!(eval("1 % 0"), Err(RelError::EvalError(_))));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(eval("int('x')"), Err(RelError::ParseError { .. })));
        assert!(matches!(eval("1 +"), Err(RelError::EvalError(_))));
    }

    #[test]
    fn round_from_expression() {
        assert_eq!(ScalarValue::Int(2), eval("round(2.5)").unwrap());
        assert!(matches!(eval("round(float('nan'))"), Err(RelError::EvalError(_))));
    }

    #[test]
    fn deeply_nested_expression_errors() {
        let schema = Schema::try_new(["a"]).unwrap();
        let expr = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = BoundExpr::parse_and_bind(&expr, &schema).unwrap_err();
        assert!(matches!(err, RelError::EvalError(_)), "{err}");

        let expr = format!("{}1", "-".repeat(10_000));
        assert!(BoundExpr::parse_and_bind(&expr, &schema).is_err());
    }

    #[test]
    fn overflow() {
        assert!(eval("9223372036854775807 + 1").is_err());
        assert!(eval("99999999999999999999").is_err());
    }
}
