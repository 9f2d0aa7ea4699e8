//! The primitive text-scanning cursor used by every command and argument parser,
//! together with the diagnostics and completions which parsers produce.
//!
//! All offsets are UTF-8 byte offsets into the line being parsed, and a [`StringReader`]
//! only ever moves by whole characters.

mod error;
mod issue;
mod reader;
mod suggestion;


pub use self::{
    error::ReaderError,
    issue::{ContainerPosition, Diagnose, Issue, ResumeHint, Severity},
    reader::{
        ARGUMENT_SEPARATOR, ESCAPE, StringReader,
        allowed_number, allowed_unquoted, is_quote,
    },
    suggestion::{Suggestion, SuggestionKind},
};
