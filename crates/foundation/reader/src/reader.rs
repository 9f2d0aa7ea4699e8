use std::num::IntErrorKind;

use crate::error::ReaderError;


/// Separates the arguments of a command.
pub const ARGUMENT_SEPARATOR: char = ' ';
/// Escapes the next character inside a quoted string.
pub const ESCAPE: char = '\\';


/// Returns whether a character is in `[0-9a-zA-Z]` or is `_`, `-`, `.`, or `+`,
/// which are the characters allowed to be in unquoted strings.
#[inline]
pub fn allowed_unquoted(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

/// Returns whether a character may be part of a numeric run, `[-0-9.]`.
#[inline]
pub fn allowed_number(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '.')
}

/// Either `"` or `'` may start a quoted string, which must then be closed by the same quote.
#[inline]
pub fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}


/// A borrowed line of text and a read position within it.
///
/// The reader is `Copy`, so a checkpoint is simply a copy of the reader (or of
/// [`cursor`](Self::cursor)), and backtracking is [`set_cursor`](Self::set_cursor).
/// The cursor always lies on a char boundary in `0..=string.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringReader<'a> {
    string: &'a str,
    cursor: usize,
}

impl<'a> StringReader<'a> {
    #[inline]
    pub fn new(string: &'a str) -> Self {
        Self { string, cursor: 0 }
    }

    /// A reader over `string` which starts at `cursor` (clamped to a valid position).
    #[inline]
    pub fn at(string: &'a str, cursor: usize) -> Self {
        let mut reader = Self::new(string);
        reader.set_cursor(cursor);
        reader
    }

    #[inline]
    pub fn string(&self) -> &'a str {
        self.string
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, most often back to a checkpoint. Positions past the end are clamped
    /// to the end, and positions inside a multibyte character are moved to its start.
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.string.len());
        while !self.string.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    #[inline]
    pub fn total_length(&self) -> usize {
        self.string.len()
    }

    #[inline]
    pub fn remaining_length(&self) -> usize {
        self.string.len() - self.cursor
    }

    /// The text before the cursor.
    #[inline]
    pub fn get_read(&self) -> &'a str {
        &self.string[..self.cursor]
    }

    /// The text from the cursor onwards.
    #[inline]
    pub fn get_remaining(&self) -> &'a str {
        &self.string[self.cursor..]
    }

    #[inline]
    pub fn can_read(&self) -> bool {
        self.can_read_length(1)
    }

    #[inline]
    pub fn can_read_length(&self, length: usize) -> bool {
        self.cursor + length <= self.string.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.get_remaining().chars().next()
    }

    /// Look `offset` characters past the cursor.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.get_remaining().chars().nth(offset)
    }

    pub fn read(&mut self) -> Result<char, ReaderError> {
        let ch = self.peek().ok_or(ReaderError::OutOfBounds { position: self.cursor })?;
        self.cursor += ch.len_utf8();
        Ok(ch)
    }

    /// Advance past one character, if there is one.
    #[inline]
    pub fn skip(&mut self) {
        if let Some(ch) = self.peek() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn skip_whitespace(&mut self) -> &'a str {
        self.read_while(char::is_whitespace)
    }

    /// Consume the maximal run of characters satisfying `predicate`; the run may be empty.
    pub fn read_while<P: FnMut(char) -> bool>(&mut self, mut predicate: P) -> &'a str {
        let start = self.cursor;
        let remaining = self.get_remaining();
        let run_len = remaining
            .find(|ch: char| !predicate(ch))
            .unwrap_or(remaining.len());
        self.cursor += run_len;
        &self.string[start..self.cursor]
    }

    /// Consume characters up to (not including) the first one satisfying `predicate`.
    pub fn read_until<P: FnMut(char) -> bool>(&mut self, mut predicate: P) -> &'a str {
        self.read_while(|ch| !predicate(ch))
    }

    /// Consume everything up to the end of the line.
    pub fn read_remaining(&mut self) -> &'a str {
        let remaining = self.get_remaining();
        self.cursor = self.string.len();
        remaining
    }

    /// Skip over `expected`, or fail without moving.
    pub fn expect(&mut self, expected: char) -> Result<(), ReaderError> {
        if self.peek() == Some(expected) {
            self.skip();
            Ok(())
        } else {
            Err(ReaderError::ExpectedSymbol {
                position: self.cursor,
                expected,
                found:    self.peek(),
            })
        }
    }

    // ================================
    //      Numbers
    // ================================

    /// Reads the maximal run of `[-0-9.]` as an integer. An integer which is syntactically valid
    /// but does not fit in an `i64` saturates, so that bound checks can report it properly.
    ///
    /// On failure, the cursor is left at the start of the run.
    pub fn read_int(&mut self) -> Result<i64, ReaderError> {
        let start = self.cursor;
        let number = self.read_while(allowed_number);

        if number.is_empty() {
            return Err(ReaderError::ExpectedInt { start });
        }

        let invalid = |reader: &mut Self| {
            reader.cursor = start;
            ReaderError::InvalidInt {
                start,
                end:    start + number.len(),
                number: number.to_owned(),
            }
        };

        if number.contains('.') {
            return Err(invalid(self));
        }

        match number.parse::<i64>() {
            Ok(value) => Ok(value),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(invalid(self)),
            },
        }
    }

    /// Reads the maximal run of `[-0-9.]` as a float.
    ///
    /// On failure, the cursor is left at the start of the run.
    pub fn read_float(&mut self) -> Result<f64, ReaderError> {
        let start = self.cursor;
        let number = self.read_while(allowed_number);

        if number.is_empty() {
            return Err(ReaderError::ExpectedFloat { start });
        }

        number.parse::<f64>().map_err(|_parse_err| {
            self.cursor = start;
            ReaderError::InvalidFloat {
                start,
                end:    start + number.len(),
                number: number.to_owned(),
            }
        })
    }

    // ================================
    //      Strings
    // ================================

    /// Consume the maximal run of [`allowed_unquoted`] characters. The run may be empty.
    pub fn read_unquoted_string(&mut self) -> &'a str {
        self.read_while(allowed_unquoted)
    }

    /// Read a string surrounded by `"` or `'`, in which the opening quote and the backslash
    /// may be escaped with a backslash.
    pub fn read_quoted_string(&mut self) -> Result<String, ReaderError> {
        let start = self.cursor;
        match self.peek() {
            Some(quote) if is_quote(quote) => {
                self.skip();
                self.read_string_until(quote, start)
            }
            found => Err(ReaderError::ExpectedStartOfQuote { start, found }),
        }
    }

    /// The cursor should be just past the opening quote, which started at `start`.
    fn read_string_until(&mut self, terminator: char, start: usize) -> Result<String, ReaderError> {
        let mut result = String::new();
        let mut escaped = false;

        while let Some(ch) = self.peek() {
            self.skip();

            if escaped {
                if ch == terminator || ch == ESCAPE {
                    result.push(ch);
                    escaped = false;
                } else {
                    let escape_start = self.cursor - ch.len_utf8() - ESCAPE.len_utf8();
                    let escape_end = self.cursor;
                    self.cursor = escape_start;
                    return Err(ReaderError::InvalidEscape {
                        start:     escape_start,
                        end:       escape_end,
                        character: ch,
                    });
                }
            } else if ch == ESCAPE {
                escaped = true;
            } else if ch == terminator {
                return Ok(result);
            } else {
                result.push(ch);
            }
        }

        Err(ReaderError::ExpectedEndOfQuote { start, end: self.cursor })
    }

    /// Read a quoted string if the next character is a quote, and an unquoted string otherwise.
    pub fn read_string(&mut self) -> Result<String, ReaderError> {
        match self.peek() {
            Some(ch) if is_quote(ch) => self.read_quoted_string(),
            _ => Ok(self.read_unquoted_string().to_owned()),
        }
    }

    /// On failure, the cursor is left at the start of the value.
    pub fn read_boolean(&mut self) -> Result<bool, ReaderError> {
        let start = self.cursor;
        let value = self.read_string()?;

        match value.as_str() {
            "true"  => Ok(true),
            "false" => Ok(false),
            ""      => Err(ReaderError::ExpectedBool { start }),
            _ => {
                let end = self.cursor;
                self.cursor = start;
                Err(ReaderError::InvalidBool { start, end, value })
            }
        }
    }
}
