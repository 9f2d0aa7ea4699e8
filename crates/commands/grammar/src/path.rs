use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};


/// `execute ... run` has neither children nor a redirect in the command tree;
/// whatever follows it is a whole new command, parsed from the root.
pub const EXECUTE_RUN: [&str; 2] = ["execute", "run"];


/// The names of the nodes leading from the root of a command tree to some node.
/// The root itself has an empty path.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct NodePath(Vec<String>);

impl NodePath {
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path of the child called `name` of the node at this path.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(name.to_owned());
        Self(segments)
    }

    #[inline]
    pub fn is_execute_run(&self) -> bool {
        self.0 == EXECUTE_RUN
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn child_paths() {
        let execute = NodePath::root().child("execute");
        let run = execute.child("run");

        assert!(NodePath::root().is_root());
        assert_eq!(execute.segments(), ["execute"]);
        assert!(run.is_execute_run());
        assert!(!execute.is_execute_run());
        assert_eq!(run.to_string(), "execute run");
        assert_eq!(run.last(), Some("run"));
    }

    #[test]
    fn serde_transparent() {
        let path: NodePath = serde_json::from_str(r#"["execute", "run"]"#).unwrap();
        assert_eq!(path, EXECUTE_RUN.into_iter().collect());
    }
}
