//! Parsers for each argument type of the command tree, the context they share within a line,
//! and the registries of blocks and NBT structure they check arguments against.
//!
//! Every parser reads from a [`StringReader`](mcfunction_reader::StringReader) positioned at the
//! start of its argument, and suggests completions for a partially written argument.

mod context;
mod error;
mod parser;
mod plugins;
mod registries;
mod registry;


pub use self::{
    context::{ActorKind, CommandContext},
    error::ArgumentError,
    parser::{ArgumentOptions, ArgumentParser, LiteralParser},
    plugins::*,
    registries::{BlockRegistry, BlockStates, JsonBlockRegistry, Registries, RegistryError},
    registry::ParserRegistry,
};
