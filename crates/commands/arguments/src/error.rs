use std::ops::Range;

use thiserror::Error;

use mcfunction_datatypes::IdentifierParseError;
use mcfunction_nbt::NbtError;
use mcfunction_reader::{Diagnose, ReaderError, ResumeHint};

use crate::plugins::BlockError;


/// A failure of an argument parser, located in the line being parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error(transparent)]
    Reader(#[from] ReaderError),
    #[error(transparent)]
    Nbt(#[from] NbtError),
    #[error(transparent)]
    Block(#[from] BlockError),

    #[error("Incorrect argument, expected '{expected}'")]
    IncorrectLiteral {
        expected: String,
        span:     Range<usize>,
    },

    #[error("Integer must not be less than {min}, found {found}")]
    IntegerTooLow { min: i64, found: i64, span: Range<usize> },
    #[error("Integer must not be more than {max}, found {found}")]
    IntegerTooHigh { max: i64, found: i64, span: Range<usize> },
    #[error("Long must not be less than {min}, found {found}")]
    LongTooLow { min: i64, found: i64, span: Range<usize> },
    #[error("Long must not be more than {max}, found {found}")]
    LongTooHigh { max: i64, found: i64, span: Range<usize> },
    #[error("Float must not be less than {min}, found {found}")]
    FloatTooLow { min: f64, found: f64, span: Range<usize> },
    #[error("Float must not be more than {max}, found {found}")]
    FloatTooHigh { max: f64, found: f64, span: Range<usize> },
    #[error("Double must not be less than {min}, found {found}")]
    DoubleTooLow { min: f64, found: f64, span: Range<usize> },
    #[error("Double must not be more than {max}, found {found}")]
    DoubleTooHigh { max: f64, found: f64, span: Range<usize> },

    #[error("Expected a string")]
    ExpectedString { position: usize },

    #[error("Invalid swizzle, expected a combination of 'x', 'y' and 'z'")]
    ExpectedSwizzle { position: usize },
    #[error("Invalid swizzle, unexpected character '{found}'")]
    UnexpectedSwizzleCharacter { found: char, span: Range<usize> },
    #[error("Invalid swizzle, axis '{axis}' is repeated")]
    RepeatedSwizzleAxis { axis: char, span: Range<usize> },

    #[error("Invalid operation '{found}'")]
    InvalidOperation { found: String, span: Range<usize> },
    #[error("Expected an objective name")]
    ExpectedObjective { position: usize },
    #[error("Objective name '{objective}' is too long, at most {max} characters are allowed")]
    ObjectiveTooLong {
        objective: String,
        max:       usize,
        span:      Range<usize>,
    },
    #[error("Unknown display slot '{slot}'")]
    UnknownSlot { slot: String, span: Range<usize> },
    #[error("Unknown color '{color}'")]
    UnknownColor { color: String, span: Range<usize> },

    #[error("Cannot mix world and local coordinates (everything must either use ^ or not)")]
    MixedCoordinates { span: Range<usize> },
    #[error("Incomplete position, expected 3 coordinates")]
    IncompletePosition { span: Range<usize> },
    #[error("Block positions must be whole numbers, found '{found}'")]
    FloatBlockPosition { found: String, span: Range<usize> },
    #[error("That position is outside the world")]
    OutOfWorld { span: Range<usize> },

    #[error("Invalid resource location: {reason}")]
    InvalidIdentifier {
        reason: IdentifierParseError,
        span:   Range<usize>,
    },
    #[error("Invalid JSON text component: {reason}")]
    InvalidComponent { reason: String, span: Range<usize> },
}

impl Diagnose for ArgumentError {
    fn category(&self) -> &'static str {
        match self {
            Self::Reader(err)                        => err.category(),
            Self::Nbt(err)                           => err.category(),
            Self::Block(err)                         => err.category(),
            Self::IncorrectLiteral { .. }            => "argument.literal.incorrect",
            Self::IntegerTooLow { .. }               => "argument.integer.low",
            Self::IntegerTooHigh { .. }              => "argument.integer.big",
            Self::LongTooLow { .. }                  => "argument.long.low",
            Self::LongTooHigh { .. }                 => "argument.long.big",
            Self::FloatTooLow { .. }                 => "argument.float.low",
            Self::FloatTooHigh { .. }                => "argument.float.big",
            Self::DoubleTooLow { .. }                => "argument.double.low",
            Self::DoubleTooHigh { .. }               => "argument.double.big",
            Self::ExpectedString { .. }              => "argument.string.expected",
            Self::ExpectedSwizzle { .. }             => "argument.swizzle.expected",
            Self::UnexpectedSwizzleCharacter { .. }  => "argument.swizzle.unexpected",
            Self::RepeatedSwizzleAxis { .. }         => "argument.swizzle.repeat",
            Self::InvalidOperation { .. }            => "arguments.operation.invalid",
            Self::ExpectedObjective { .. }           => "arguments.objective.expected",
            Self::ObjectiveTooLong { .. }            => "arguments.objective.toolong",
            Self::UnknownSlot { .. }                 => "argument.slot.unknown",
            Self::UnknownColor { .. }                => "argument.color.unknown",
            Self::MixedCoordinates { .. }            => "argument.pos.mixed",
            Self::IncompletePosition { .. }          => "argument.pos.incomplete",
            Self::FloatBlockPosition { .. }          => "argument.block_pos.float",
            Self::OutOfWorld { .. }                  => "argument.block_pos.outofworld",
            Self::InvalidIdentifier { .. }           => "argument.id.invalid",
            Self::InvalidComponent { .. }            => "argument.component.invalidjson",
        }
    }

    fn span(&self) -> Range<usize> {
        match self {
            Self::Reader(err) => err.span(),
            Self::Nbt(err)    => err.span(),
            Self::Block(err)  => err.span(),
            Self::ExpectedString { position }
            | Self::ExpectedSwizzle { position }
            | Self::ExpectedObjective { position } => *position..*position,
            Self::IncorrectLiteral { span, .. }
            | Self::IntegerTooLow { span, .. }
            | Self::IntegerTooHigh { span, .. }
            | Self::LongTooLow { span, .. }
            | Self::LongTooHigh { span, .. }
            | Self::FloatTooLow { span, .. }
            | Self::FloatTooHigh { span, .. }
            | Self::DoubleTooLow { span, .. }
            | Self::DoubleTooHigh { span, .. }
            | Self::UnexpectedSwizzleCharacter { span, .. }
            | Self::RepeatedSwizzleAxis { span, .. }
            | Self::InvalidOperation { span, .. }
            | Self::ObjectiveTooLong { span, .. }
            | Self::UnknownSlot { span, .. }
            | Self::UnknownColor { span, .. }
            | Self::MixedCoordinates { span }
            | Self::IncompletePosition { span }
            | Self::FloatBlockPosition { span, .. }
            | Self::OutOfWorld { span }
            | Self::InvalidIdentifier { span, .. }
            | Self::InvalidComponent { span, .. } => span.clone(),
        }
    }

    fn resume_hint(&self) -> Option<&ResumeHint> {
        match self {
            Self::Nbt(err)   => err.resume_hint(),
            Self::Block(err) => err.resume_hint(),
            _                => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use mcfunction_reader::Issue;

    use super::*;


    #[test]
    fn bound_messages() {
        let err = ArgumentError::IntegerTooLow { min: -10, found: -999_999_999_999, span: 0..13 };
        let issue = Issue::from_error(&err);

        assert_eq!(issue.category, "argument.integer.low");
        assert_eq!(issue.span(), 0..13);
        assert!(issue.message.contains("-10"));
    }

    #[test]
    fn zero_width_spans() {
        let err = ArgumentError::ExpectedSwizzle { position: 4 };
        assert_eq!(err.span(), 4..4);
        assert!(err.resume_hint().is_none());
    }
}
