//! Query text form.
//!
//! ```text
//! path    := segment*
//! segment := '.' key | '[' signed-int ']'
//! key     := plain | '"' escaped '"'
//! ```
//!
//! The first key may omit its dot. Plain keys run until `.`, `[`, `]`, `"`
//! or whitespace.

use crate::error::QueryError;
use crate::selector::Selector;

pub(crate) struct QueryParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> QueryParser<'a> {
    pub(crate) fn parse(input: &'a str) -> Result<Vec<Selector>, QueryError> {
        let mut parser = Self {
            input: input.trim(),
            pos: 0,
        };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<Vec<Selector>, QueryError> {
        let mut selectors = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    selectors.push(Selector::Key(self.parse_key()?));
                }
                '[' => selectors.push(Selector::Index(self.parse_index()?)),
                _ if selectors.is_empty() => selectors.push(Selector::Key(self.parse_key()?)),
                c => return Err(self.error(format!("unexpected '{c}'"))),
            }
        }
        Ok(selectors)
    }

    fn parse_key(&mut self) -> Result<String, QueryError> {
        if self.peek() == Some('"') {
            return self.parse_quoted();
        }
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '.' | '[' | ']' | '"') || c.is_whitespace() {
                break;
            }
            self.advance();
        }
        if self.pos == start {
            return Err(self.error("expected key"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_quoted(&mut self) -> Result<String, QueryError> {
        let open = self.pos;
        self.advance();
        let mut key = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(QueryError::Syntax {
                        position: open,
                        message: "unterminated quoted key".to_string(),
                    })
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some(c @ ('"' | '\\')) => {
                            key.push(c);
                            self.advance();
                        }
                        _ => key.push('\\'),
                    }
                }
                Some(c) => {
                    key.push(c);
                    self.advance();
                }
            }
        }
        if key.is_empty() {
            return Err(QueryError::Syntax {
                position: open,
                message: "empty key".to_string(),
            });
        }
        Ok(key)
    }

    fn parse_index(&mut self) -> Result<isize, QueryError> {
        self.expect('[')?;
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        let digits = &self.input[start..self.pos];
        let index = digits.parse::<isize>().map_err(|_| QueryError::Syntax {
            position: start,
            message: format!("invalid index '{digits}'"),
        })?;
        self.expect(']')?;
        Ok(index)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), QueryError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    fn error(&self, message: impl Into<String>) -> QueryError {
        QueryError::Syntax {
            position: self.pos,
            message: message.into(),
        }
    }
}
