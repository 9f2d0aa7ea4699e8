use thiserror::Error;

use crate::{node::NodeKind, path::NodePath};


/// Problems with a command tree, found when it is loaded.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("invalid command tree JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("the top of a command tree must be a root node, found a {0:?} node")]
    NotRoot(NodeKind),
    #[error("a root node may only be the top of a command tree, found one at '{path}'")]
    NestedRoot { path: NodePath },
    #[error("argument node '{path}' has no parser")]
    MissingParser { path: NodePath },
    #[error("{kind:?} node '{path}' should not have a parser")]
    UnexpectedParser { path: NodePath, kind: NodeKind },
    #[error("node '{path}' redirects to '{redirect}', which does not exist")]
    UnresolvedRedirect { path: NodePath, redirect: NodePath },
}
