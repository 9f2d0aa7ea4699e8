//! Parses lines of `mcfunction` commands by walking the command tree, producing the spans of
//! the nodes matched and at most one [`Issue`](mcfunction_reader::Issue) per line, and
//! suggests completions at a cursor offset.
//!
//! The command tree, the argument parsers and the registries they consult are loaded once;
//! a [`CommandParser`] may then be shared freely between threads.

mod command_parser;
mod datapack;
mod error;
mod options;
mod result;
mod rules;
mod walker;


pub use mcfunction_arguments::{ActorKind, CommandContext};

pub use self::{
    command_parser::CommandParser,
    datapack::{DATAPACKS_DIRECTORY, datapack_root},
    error::WalkError,
    options::ParseOptions,
    result::{LineResult, MatchedSpan, ParseResult},
    rules::{ContextPatch, ContextRules},
};
