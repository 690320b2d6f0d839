use relframe_error::{RelError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An identifier, either a column reference or a function name.
    Word(String),
    /// Unparsed number literal.
    Number(String),
    /// String literal, single or double quoted.
    QuotedString(String),
    LeftParen,
    RightParen,
    Comma,
    Plus,
    Minus,
    Mul,
    Div,
    IntDiv,
    Mod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithLocation {
    pub token: Token,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}

#[derive(Debug)]
pub struct Tokenizer<'a> {
    src: &'a str,
    /// Byte offset of the next character to read.
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Tokenizer { src, pos: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithLocation>> {
        let mut toks = Vec::new();
        while let Some(tok) = self.next_token()? {
            toks.push(tok);
        }
        Ok(toks)
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn next_token(&mut self) -> Result<Option<TokenWithLocation>> {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.next_char();
        }

        let offset = self.pos;
        let c = match self.next_char() {
            Some(c) => c,
            None => return Ok(None),
        };

        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            ',' => Token::Comma,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Mul,
            '%' => Token::Mod,
            '/' => {
                if self.peek_char() == Some('/') {
                    self.next_char();
                    Token::IntDiv
                } else {
                    Token::Div
                }
            }
            '\'' | '"' => Token::QuotedString(self.take_quoted(c, offset)?),
            c if c.is_ascii_digit() || c == '.' => {
                let s = self.take_while(offset, |c| c.is_ascii_digit() || c == '.');
                if s == "." || s.matches('.').count() > 1 {
                    return Err(RelError::eval(format!(
                        "Invalid number literal '{s}' at offset {offset}"
                    )));
                }
                Token::Number(s.to_string())
            }
            c if c.is_alphabetic() || c == '_' => {
                let s = self.take_while(offset, |c| c.is_alphanumeric() || c == '_');
                Token::Word(s.to_string())
            }
            other => {
                return Err(RelError::eval(format!(
                    "Unexpected character '{other}' at offset {offset}"
                )));
            }
        };

        Ok(Some(TokenWithLocation { token, offset }))
    }

    /// Consume characters matching `pred`, returning the slice starting at
    /// `start` (which must already have been consumed).
    fn take_while(&mut self, start: usize, pred: impl Fn(char) -> bool) -> &'a str {
        while self.peek_char().is_some_and(&pred) {
            self.next_char();
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn take_quoted(&mut self, quote: char, start: usize) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.next_char() {
                Some(c) if c == quote => return Ok(s),
                Some(c) => s.push(c),
                None => {
                    return Err(RelError::eval(format!(
                        "Unterminated string literal starting at offset {start}"
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<Token> {
        Tokenizer::new(s)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(
            vec![
                Token::Number("2023".to_string()),
                Token::Minus,
                Token::Word("int".to_string()),
                Token::LeftParen,
                Token::Word("GradYear".to_string()),
                Token::RightParen,
            ],
            tokens("2023 - int(GradYear)")
        );
    }

    #[test]
    fn int_div_and_strings() {
        assert_eq!(
            vec![
                Token::Word("a".to_string()),
                Token::IntDiv,
                Token::Number("2.5".to_string()),
                Token::Plus,
                Token::QuotedString("x y".to_string()),
                Token::Plus,
                Token::QuotedString("it's".to_string()),
            ],
            tokens("a//2.5 + 'x y' + \"it's\"")
        );
    }

    #[test]
    fn offsets() {
        let toks = Tokenizer::new("  a +b").tokenize().unwrap();
        let offsets: Vec<_> = toks.iter().map(|t| t.offset).collect();
        assert_eq!(vec![2, 4, 5], offsets);
    }

    #[test]
    fn unterminated_string() {
        let err = Tokenizer::new("'abc").tokenize().unwrap_err();
        assert!(matches!(err, RelError::EvalError(_)));
    }

    #[test]
    fn rejects_unknown_characters() {
        assert!(Tokenizer::new("a ; b").tokenize().is_err());
        assert!(Tokenizer::new("1.2.3").tokenize().is_err());
    }
}
