//! The command tree which drives parsing, in the format of the `commands.json` report
//! produced by Minecraft's data generator.
//!
//! The tree is loaded once and only read afterwards. Redirects are kept as paths from the
//! root and resolved each time they are followed.

mod error;
mod node;
mod path;


pub use self::{
    error::GrammarError,
    node::{CommandNode, NodeKind, NodeProperties},
    path::{EXECUTE_RUN, NodePath},
};
