//! Bracket and quote tracking over literal text.

use crate::error::ParseError;

/// Tracks nesting while text is fed one character at a time.
///
/// A quote preceded by an odd number of backslashes is escaped and does not
/// toggle the quoted state.
#[derive(Debug, Default)]
pub(crate) struct Scanner {
    stack: Vec<char>,
    quoted: bool,
    backslashes: usize,
}

impl Scanner {
    /// Feed `c` found at byte `pos` of `text`.
    ///
    /// Returns true when `c` is structural at depth zero: an opening bracket
    /// that starts a top-level group, a closing bracket that ends one, or any
    /// other unquoted character outside every group.
    pub(crate) fn step(&mut self, text: &str, pos: usize, c: char) -> Result<bool, ParseError> {
        let escaped = self.backslashes % 2 == 1;
        self.backslashes = if c == '\\' { self.backslashes + 1 } else { 0 };
        if c == '"' && !escaped {
            self.quoted = !self.quoted;
            return Ok(false);
        }
        if self.quoted {
            return Ok(false);
        }
        match c {
            '{' | '[' => {
                let top = self.stack.is_empty();
                self.stack.push(c);
                Ok(top)
            }
            '}' | ']' => {
                let open = if c == '}' { '{' } else { '[' };
                if self.stack.pop() != Some(open) {
                    return Err(ParseError::Unbalanced {
                        position: pos,
                        text: text.to_string(),
                    });
                }
                Ok(self.stack.is_empty())
            }
            _ => Ok(self.stack.is_empty()),
        }
    }

    pub(crate) fn finish(self, text: &str) -> Result<(), ParseError> {
        if self.quoted {
            return Err(ParseError::UnterminatedString(text.to_string()));
        }
        if !self.stack.is_empty() {
            return Err(ParseError::Unbalanced {
                position: text.len(),
                text: text.to_string(),
            });
        }
        Ok(())
    }
}

/// Check that every bracket is matched and every quote closed.
pub(crate) fn check_balanced(text: &str) -> Result<(), ParseError> {
    let mut scanner = Scanner::default();
    for (pos, c) in text.char_indices() {
        scanner.step(text, pos, c)?;
    }
    scanner.finish(text)
}

/// Split on `sep` where it occurs outside quotes and brackets.
pub(crate) fn split_top_level(text: &str, sep: char) -> Result<Vec<&str>, ParseError> {
    let mut scanner = Scanner::default();
    let mut parts = Vec::new();
    let mut start = 0;
    for (pos, c) in text.char_indices() {
        if scanner.step(text, pos, c)? && c == sep {
            parts.push(&text[start..pos]);
            start = pos + c.len_utf8();
        }
    }
    scanner.finish(text)?;
    parts.push(&text[start..]);
    Ok(parts)
}

/// Byte offset of the first `needle` outside quotes and brackets.
pub(crate) fn find_top_level(text: &str, needle: char) -> Result<Option<usize>, ParseError> {
    let mut scanner = Scanner::default();
    for (pos, c) in text.char_indices() {
        if scanner.step(text, pos, c)? && c == needle {
            return Ok(Some(pos));
        }
    }
    Ok(None)
}

/// Byte offset of the bracket closing the one that opens `text`.
pub(crate) fn matching_close(text: &str) -> Result<usize, ParseError> {
    let mut scanner = Scanner::default();
    for (pos, c) in text.char_indices() {
        if scanner.step(text, pos, c)? && pos > 0 && matches!(c, '}' | ']') {
            return Ok(pos);
        }
    }
    Err(ParseError::Unbalanced {
        position: text.len(),
        text: text.to_string(),
    })
}
