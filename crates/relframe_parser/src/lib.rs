//! Parsers for the two small languages understood by the relation engine:
//! row-scoped `extend` expressions and three-token comparison conditions.
pub mod ast;
pub mod condition;
pub mod parser;
pub mod tokens;

use ast::{AstParseable, Expr};
use relframe_error::Result;

/// Parse a complete `extend` expression.
///
/// Trailing tokens after a valid expression are an error.
pub fn parse_expr(s: &str) -> Result<Expr> {
    let toks = tokens::Tokenizer::new(s).tokenize()?;
    let mut parser = parser::Parser::with_tokens(toks);
    let expr = Expr::parse(&mut parser)?;
    parser.expect_end()?;
    Ok(expr)
}
