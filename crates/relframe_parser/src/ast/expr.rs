use std::fmt;

use relframe_error::{RelError, Result};

use super::{AstParseable, Ident};
use crate::parser::Parser;
use crate::tokens::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Plus, e.g. `+9`
    Plus,
    /// Minus, e.g. `-9`
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Plus, e.g. `a + b`
    Plus,
    /// Minus, e.g. `a - b`
    Minus,
    /// Multiply, e.g. `a * b`
    Multiply,
    /// Divide, e.g. `a / b`
    Divide,
    /// Integer division, e.g. `a // b`
    IntDiv,
    /// Modulo, e.g. `a % b`
    Modulo,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Multiply => write!(f, "*"),
            Self::Divide => write!(f, "/"),
            Self::IntDiv => write!(f, "//"),
            Self::Modulo => write!(f, "%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    /// Unparsed number literal.
    Number(String),
    /// Quoted string literal.
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Column identifier.
    Ident(Ident),
    /// An expression literal,
    Literal(Literal),
    /// A unary expression.
    UnaryExpr { op: UnaryOperator, expr: Box<Expr> },
    /// A binary expression.
    BinaryExpr {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// A function call.
    ///
    /// `int(GradYear)`
    Function { name: Ident, args: Vec<Expr> },
    /// Parenthesized expression.
    Nested(Box<Expr>),
}

impl AstParseable for Expr {
    fn parse(parser: &mut Parser) -> Result<Self> {
        Self::parse_subexpr(parser, 0)
    }
}

// Precedences, ordered low to high.
const PREC_ADD_SUB: u8 = 80;
const PREC_MUL_DIV_MOD: u8 = 90;
const PREC_UNARY: u8 = 100;

impl Expr {
    fn parse_subexpr(parser: &mut Parser, precedence: u8) -> Result<Self> {
        parser.enter_nested()?;
        let mut expr = Expr::parse_prefix(parser)?;

        // Every infix operator in this loop wraps the expression so far,
        // deepening the tree by one.
        let mut nested = 1;
        loop {
            let next_precedence = Self::get_infix_precedence(parser);
            if precedence >= next_precedence {
                break;
            }

            parser.enter_nested()?;
            nested += 1;
            expr = Self::parse_infix(parser, expr, next_precedence)?;
        }

        for _ in 0..nested {
            parser.exit_nested();
        }

        Ok(expr)
    }

    fn parse_prefix(parser: &mut Parser) -> Result<Self> {
        let tok = match parser.next() {
            Some(tok) => tok.token.clone(),
            None => {
                return Err(RelError::eval(
                    "Expected prefix expression, found end of expression",
                ));
            }
        };

        let expr = match tok {
            Token::Word(w) => {
                if parser.consume_token(&Token::LeftParen) {
                    Expr::Function {
                        name: Ident::from_string(w),
                        args: Self::parse_function_args(parser)?,
                    }
                } else {
                    Expr::Ident(Ident::from_string(w))
                }
            }
            Token::Number(s) => Expr::Literal(Literal::Number(s)),
            Token::QuotedString(s) => Expr::Literal(Literal::String(s)),
            Token::LeftParen => {
                let inner = Self::parse_subexpr(parser, 0)?;
                parser.expect_token(&Token::RightParen)?;
                Expr::Nested(Box::new(inner))
            }
            Token::Minus => Expr::UnaryExpr {
                op: UnaryOperator::Minus,
                expr: Box::new(Self::parse_subexpr(parser, PREC_UNARY)?),
            },
            Token::Plus => Expr::UnaryExpr {
                op: UnaryOperator::Plus,
                expr: Box::new(Self::parse_subexpr(parser, PREC_UNARY)?),
            },
            other => {
                return Err(RelError::eval(format!(
                    "Unexpected token '{other:?}'. Expected expression."
                )));
            }
        };

        Ok(expr)
    }

    /// Parse function arguments, assuming the opening paren has already been
    /// consumed.
    fn parse_function_args(parser: &mut Parser) -> Result<Vec<Expr>> {
        let mut args = Vec::new();
        if parser.consume_token(&Token::RightParen) {
            return Ok(args);
        }

        loop {
            args.push(Self::parse_subexpr(parser, 0)?);
            if parser.consume_token(&Token::Comma) {
                continue;
            }
            parser.expect_token(&Token::RightParen)?;
            return Ok(args);
        }
    }

    fn parse_infix(parser: &mut Parser, prefix: Expr, precedence: u8) -> Result<Self> {
        let tok = match parser.next() {
            Some(tok) => &tok.token,
            None => {
                return Err(RelError::eval(
                    "Expected infix expression, found end of expression",
                ));
            }
        };

        let op = match tok {
            Token::Plus => BinaryOperator::Plus,
            Token::Minus => BinaryOperator::Minus,
            Token::Mul => BinaryOperator::Multiply,
            Token::Div => BinaryOperator::Divide,
            Token::IntDiv => BinaryOperator::IntDiv,
            Token::Mod => BinaryOperator::Modulo,
            other => {
                return Err(RelError::eval(format!(
                    "Unable to parse token {other:?} as an expression"
                )));
            }
        };

        Ok(Expr::BinaryExpr {
            left: Box::new(prefix),
            op,
            right: Box::new(Expr::parse_subexpr(parser, precedence)?),
        })
    }

    /// Get the relative precedence of the next operator.
    ///
    /// Zero is returned for anything that doesn't continue an expression,
    /// which ends the current subexpression.
    fn get_infix_precedence(parser: &Parser) -> u8 {
        let tok = match parser.peek() {
            Some(tok) => &tok.token,
            None => return 0,
        };

        match tok {
            Token::Plus | Token::Minus => PREC_ADD_SUB,
            Token::Mul | Token::Div | Token::IntDiv | Token::Mod => PREC_MUL_DIV_MOD,
            _ => 0,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(ident) => write!(f, "{ident}"),
            Self::Literal(Literal::Number(n)) => write!(f, "{n}"),
            Self::Literal(Literal::String(s)) => write!(f, "'{s}'"),
            Self::UnaryExpr { op, expr } => match op {
                UnaryOperator::Plus => write!(f, "+{expr}"),
                UnaryOperator::Minus => write!(f, "-{expr}"),
            },
            Self::BinaryExpr { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Function { name, args } => {
                write!(f, "{name}(")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Self::Nested(expr) => write!(f, "({expr})"),
        }
    }
}
