use relframe_error::{RelError, Result};

use crate::tokens::{Token, TokenWithLocation};

/// Max nesting of subexpressions, bounding recursion during parsing and in
/// everything walking the resulting AST.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug)]
pub struct Parser {
    toks: Vec<TokenWithLocation>,
    /// Index of token we should process next.
    idx: usize,
    /// Current subexpression nesting.
    depth: usize,
}

impl Parser {
    pub fn with_tokens(toks: Vec<TokenWithLocation>) -> Self {
        Parser {
            toks,
            idx: 0,
            depth: 0,
        }
    }

    /// Enter a nested subexpression, erroring if nested too deeply.
    ///
    /// Each successful call must be paired with `exit_nested`.
    pub fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(RelError::eval("Expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Get the next token, advancing the parser.
    pub fn next(&mut self) -> Option<&TokenWithLocation> {
        let tok = self.toks.get(self.idx)?;
        self.idx += 1;
        Some(tok)
    }

    /// Look at the next token without advancing.
    pub fn peek(&self) -> Option<&TokenWithLocation> {
        self.toks.get(self.idx)
    }

    /// Consume the next token if it's equal to `token`.
    pub fn consume_token(&mut self, token: &Token) -> bool {
        match self.peek() {
            Some(tok) if &tok.token == token => {
                self.idx += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume the next token, erroring if it's not equal to `token`.
    pub fn expect_token(&mut self, token: &Token) -> Result<()> {
        if self.consume_token(token) {
            return Ok(());
        }
        match self.peek() {
            Some(tok) => Err(RelError::eval(format!(
                "Expected {token:?}, found {:?} at offset {}",
                tok.token, tok.offset
            ))),
            None => Err(RelError::eval(format!(
                "Expected {token:?}, found end of expression"
            ))),
        }
    }

    /// Error if there are any tokens left to process.
    pub fn expect_end(&self) -> Result<()> {
        match self.peek() {
            Some(tok) => Err(RelError::eval(format!(
                "Unexpected trailing token {:?} at offset {}",
                tok.token, tok.offset
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Tokenizer;

    #[test]
    fn consume_and_expect() {
        let toks = Tokenizer::new("( a )").tokenize().unwrap();
        let mut parser = Parser::with_tokens(toks);

        assert!(parser.consume_token(&Token::LeftParen));
        assert!(!parser.consume_token(&Token::LeftParen));
        assert_eq!(Token::Word("a".to_string()), parser.next().unwrap().token);
        assert!(parser.expect_end().is_err());
        parser.expect_token(&Token::RightParen).unwrap();
        parser.expect_end().unwrap();
        assert!(parser.expect_token(&Token::Comma).is_err());
    }

    #[test]
    fn nesting_limit() {
        let mut parser = Parser::with_tokens(Vec::new());
        for _ in 0..MAX_NESTING_DEPTH {
            parser.enter_nested().unwrap();
        }
        assert!(parser.enter_nested().is_err());

        parser.exit_nested();
        parser.enter_nested().unwrap();
    }
}
