use std::ops::Range;

use thiserror::Error;

use crate::issue::Diagnose;


/// Failures of the primitive reads of a [`StringReader`](crate::StringReader).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("An integer was expected but nothing was found")]
    ExpectedInt { start: usize },
    #[error("Invalid integer '{number}'")]
    InvalidInt {
        start:  usize,
        end:    usize,
        number: String,
    },
    #[error("A float was expected but nothing was found")]
    ExpectedFloat { start: usize },
    #[error("Invalid float '{number}'")]
    InvalidFloat {
        start:  usize,
        end:    usize,
        number: String,
    },
    #[error("Expected a quote to start a string, got {}", describe(*found))]
    ExpectedStartOfQuote {
        start: usize,
        found: Option<char>,
    },
    #[error("Unclosed quoted string")]
    ExpectedEndOfQuote { start: usize, end: usize },
    #[error("Invalid escape sequence '\\{character}' in quoted string")]
    InvalidEscape {
        start:     usize,
        end:       usize,
        character: char,
    },
    #[error("A boolean was expected but nothing was found")]
    ExpectedBool { start: usize },
    #[error("Invalid boolean, expected 'true' or 'false', got '{value}'")]
    InvalidBool {
        start: usize,
        end:   usize,
        value: String,
    },
    #[error("Expected '{expected}', got {}", describe(*found))]
    ExpectedSymbol {
        position: usize,
        expected: char,
        found:    Option<char>,
    },
    #[error("Unexpected end of input")]
    OutOfBounds { position: usize },
}

fn describe(found: Option<char>) -> String {
    match found {
        Some(ch) => format!("'{ch}'"),
        None     => "end of input".to_owned(),
    }
}

impl Diagnose for ReaderError {
    fn category(&self) -> &'static str {
        match self {
            Self::ExpectedInt { .. }          => "parsing.int.expected",
            Self::InvalidInt { .. }           => "parsing.int.invalid",
            Self::ExpectedFloat { .. }        => "parsing.float.expected",
            Self::InvalidFloat { .. }         => "parsing.float.invalid",
            Self::ExpectedStartOfQuote { .. } => "parsing.quote.expected.start",
            Self::ExpectedEndOfQuote { .. }   => "parsing.quote.expected.end",
            Self::InvalidEscape { .. }        => "parsing.quote.escape",
            Self::ExpectedBool { .. }         => "parsing.bool.expected",
            Self::InvalidBool { .. }          => "parsing.bool.invalid",
            Self::ExpectedSymbol { .. }       => "parsing.expected",
            Self::OutOfBounds { .. }          => "parsing.out_of_bounds",
        }
    }

    fn span(&self) -> Range<usize> {
        match self {
            Self::ExpectedInt { start }
            | Self::ExpectedFloat { start }
            | Self::ExpectedBool { start } => *start..*start,
            Self::InvalidInt { start, end, .. }
            | Self::InvalidFloat { start, end, .. }
            | Self::ExpectedEndOfQuote { start, end }
            | Self::InvalidEscape { start, end, .. }
            | Self::InvalidBool { start, end, .. } => *start..*end,
            Self::ExpectedStartOfQuote { start: position, found }
            | Self::ExpectedSymbol { position, found, .. } => {
                *position..*position + found.map_or(0, char::len_utf8)
            }
            Self::OutOfBounds { position } => *position..*position,
        }
    }
}
