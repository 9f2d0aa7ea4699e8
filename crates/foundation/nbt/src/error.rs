use std::ops::Range;

use thiserror::Error;

use mcfunction_reader::{Diagnose, ReaderError, ResumeHint};

use crate::{settings::DepthLimit, tag::NbtType};


/// A failure to parse SNBT, located in the string being read, together with where in the
/// value the parser had gotten to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct NbtError {
    pub kind: NbtErrorKind,
    pub span: Range<usize>,
    pub hint: ResumeHint,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NbtErrorKind {
    #[error("Expected a compound tag starting with '{{'")]
    ExpectedCompound,
    #[error("Expected key")]
    ExpectedKey,
    #[error("Expected value")]
    ExpectedValue,
    #[error("Expected {expected}, got {}", describe(*found))]
    UnexpectedCharacter {
        expected: &'static str,
        found:    Option<char>,
    },
    #[error("Can't insert {} into list of {}", found.name(), list.name())]
    MixedList {
        list:  NbtType,
        found: NbtType,
    },
    #[error("Can't insert {} into {}", found.name(), array.name())]
    MixedArray {
        array: NbtType,
        found: NbtType,
    },
    #[error("Invalid array type '{0}'")]
    InvalidArrayType(char),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Unexpected trailing data after the compound tag")]
    Trailing,
    #[error("exceeded depth limit {} for nested compound and list tags", limit.0)]
    ExceededDepthLimit { limit: DepthLimit },
    #[error(transparent)]
    Reader(ReaderError),
}

fn describe(found: Option<char>) -> String {
    match found {
        Some(ch) => format!("'{ch}'"),
        None     => "end of input".to_owned(),
    }
}

impl NbtError {
    #[inline]
    pub(crate) fn new(kind: NbtErrorKind, span: Range<usize>, hint: ResumeHint) -> Self {
        Self { kind, span, hint }
    }

    pub(crate) fn reader(error: ReaderError, hint: ResumeHint) -> Self {
        let span = error.span();
        Self::new(NbtErrorKind::Reader(error), span, hint)
    }
}

impl Diagnose for NbtError {
    fn category(&self) -> &'static str {
        match &self.kind {
            NbtErrorKind::ExpectedCompound           => "argument.nbt.expected.compound",
            NbtErrorKind::ExpectedKey                => "argument.nbt.expected.key",
            NbtErrorKind::ExpectedValue              => "argument.nbt.expected.value",
            NbtErrorKind::UnexpectedCharacter { .. } => "argument.nbt.badchar",
            NbtErrorKind::MixedList { .. }           => "argument.nbt.list.mixed",
            NbtErrorKind::MixedArray { .. }          => "argument.nbt.array.mixed",
            NbtErrorKind::InvalidArrayType(_)        => "argument.nbt.array.invalid",
            NbtErrorKind::InvalidNumber(_)           => "argument.nbt.invalid",
            NbtErrorKind::Trailing                   => "argument.nbt.trailing",
            NbtErrorKind::ExceededDepthLimit { .. }  => "argument.nbt.depth",
            NbtErrorKind::Reader(err)                => err.category(),
        }
    }

    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn resume_hint(&self) -> Option<&ResumeHint> {
        Some(&self.hint)
    }
}
