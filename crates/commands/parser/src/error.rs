use std::ops::Range;

use thiserror::Error;

use mcfunction_reader::{Diagnose, Severity};


/// A line which doesn't follow the shape of the command tree, independent of how any
/// single argument is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("No nodes which matched '{remaining}' found")]
    NoSuccess { remaining: String, span: Range<usize> },
    #[error("The node has no children but there are more characters following it")]
    NoChildren { span: Range<usize> },
    #[error("Expected whitespace: got '{found}'")]
    MissingArgumentSeparator { found: String, span: Range<usize> },
    #[error("The command '{command}' is not a command which can be run")]
    IncompleteCommand { command: String, span: Range<usize> },
    #[error("Unexpected trailing argument separator ' '")]
    UnexpectedTrailingSeparator { span: Range<usize> },
}

impl Diagnose for WalkError {
    fn category(&self) -> &'static str {
        match self {
            Self::NoSuccess { .. }                   => "command.parsing.matchless",
            Self::NoChildren { .. }                  => "command.parsing.childless",
            Self::MissingArgumentSeparator { .. }    => "command.parsing.whitespace",
            Self::IncompleteCommand { .. }           => "command.parsing.incomplete",
            Self::UnexpectedTrailingSeparator { .. } => "command.parsing.trailing",
        }
    }

    fn span(&self) -> Range<usize> {
        match self {
            Self::NoSuccess { span, .. }
            | Self::NoChildren { span }
            | Self::MissingArgumentSeparator { span, .. }
            | Self::IncompleteCommand { span, .. }
            | Self::UnexpectedTrailingSeparator { span } => span.clone(),
        }
    }

    fn severity(&self) -> Severity {
        match self {
            Self::IncompleteCommand { .. }
            | Self::UnexpectedTrailingSeparator { .. } => Severity::Warning,
            Self::NoSuccess { .. }
            | Self::NoChildren { .. }
            | Self::MissingArgumentSeparator { .. } => Severity::Error,
        }
    }
}
