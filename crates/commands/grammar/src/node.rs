use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::GrammarError, path::NodePath};


#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Literal,
    Argument,
}

/// A node of a command tree, as found in the `commands.json` report of the game.
///
/// Children keep the order of the JSON document, which is the order they are tried in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommandNode {
    #[serde(rename = "type")]
    pub kind:       NodeKind,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children:   IndexMap<String, CommandNode>,
    /// The id of the argument parser of an argument node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser:     Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub executable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect:   Option<NodePath>,
}

impl CommandNode {
    /// Load and validate a command tree.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let root: Self = serde_json::from_str(json)
            .inspect_err(|err| log::warn!("Error parsing command tree: {err}"))?;
        root.validate()?;
        Ok(root)
    }

    pub fn from_value(value: Value) -> Result<Self, GrammarError> {
        let root: Self = serde_json::from_value(value)
            .inspect_err(|err| log::warn!("Error parsing command tree: {err}"))?;
        root.validate()?;
        Ok(root)
    }

    /// Check that `self` is a well-formed root: argument nodes, and only argument nodes,
    /// have a parser, and every redirect names an existing node.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.kind != NodeKind::Root {
            return Err(GrammarError::NotRoot(self.kind));
        }
        if self.parser.is_some() {
            return Err(GrammarError::UnexpectedParser { path: NodePath::root(), kind: self.kind });
        }
        self.validate_children(self, &NodePath::root())
    }

    fn validate_children(&self, root: &Self, path: &NodePath) -> Result<(), GrammarError> {
        for (name, child) in &self.children {
            let child_path = path.child(name);

            match (child.kind, &child.parser) {
                (NodeKind::Root, _) => {
                    return Err(GrammarError::NestedRoot { path: child_path });
                }
                (NodeKind::Argument, None) => {
                    return Err(GrammarError::MissingParser { path: child_path });
                }
                (NodeKind::Literal, Some(_)) => {
                    return Err(GrammarError::UnexpectedParser {
                        path: child_path,
                        kind: child.kind,
                    });
                }
                _ => {}
            }

            if let Some(redirect) = &child.redirect {
                if root.node_at_exact(redirect.segments()).is_none() {
                    return Err(GrammarError::UnresolvedRedirect {
                        path:     child_path,
                        redirect: redirect.clone(),
                    });
                }
            }

            child.validate_children(root, &child_path)?;
        }
        Ok(())
    }

    #[inline]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.get(name)
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn literal_children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children_of_kind(NodeKind::Literal)
    }

    pub fn argument_children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children_of_kind(NodeKind::Argument)
    }

    fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = (&str, &Self)> {
        self.children
            .iter()
            .filter(move |(_, child)| child.kind == kind)
            .map(|(name, child)| (name.as_str(), child))
    }

    /// The properties of this node, which is called `name` in its parent.
    #[inline]
    pub fn properties<'a>(&'a self, name: &'a str) -> NodeProperties<'a> {
        NodeProperties::new(name, &self.properties)
    }

    /// Follow `path` through children only.
    pub fn node_at_exact<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        path.iter().try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Follow `path` from `self`, which should be the root. When a segment is not a child
    /// of the current node, the segment is looked for among the children of the node's
    /// redirect target instead.
    pub fn node_at<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        path.iter().try_fold(self, |node, segment| {
            let segment = segment.as_ref();
            node.child(segment).or_else(|| {
                let redirect = node.redirect.as_ref()?;
                self.node_at_exact(redirect.segments())?.child(segment)
            })
        })
    }

    /// Where parsing continues after `node`, reached through `path`, has been matched:
    /// `node` itself if it has children, else its redirect target, else the root
    /// if `node` is `execute run`.
    ///
    /// Returns the node whose children should be tried, along with its path.
    pub fn continuation<'a>(
        &'a self,
        node: &'a Self,
        path: &NodePath,
    ) -> Option<(&'a Self, NodePath)> {
        if node.has_children() {
            return Some((node, path.clone()));
        }

        if let Some(redirect) = &node.redirect {
            let target = self.node_at_exact(redirect.segments());
            if target.is_none() {
                log::warn!("Node '{path}' redirects to missing node '{redirect}'");
            }
            return target.map(|target| (target, redirect.clone()));
        }

        if path.is_execute_run() {
            return Some((self, NodePath::root()));
        }

        None
    }
}

/// Read-only access to the `properties` of a node, such as the bounds of a number or
/// the type of a string.
///
/// Properties are only checked when a parser reads them; a property of the wrong
/// JSON type is treated as missing.
#[derive(Debug, Clone, Copy)]
pub struct NodeProperties<'a> {
    name:       &'a str,
    properties: Option<&'a Map<String, Value>>,
}

impl<'a> NodeProperties<'a> {
    #[inline]
    pub fn new(name: &'a str, properties: &'a Map<String, Value>) -> Self {
        Self { name, properties: Some(properties) }
    }

    /// Properties of a node without any.
    #[inline]
    pub fn empty(name: &'a str) -> Self {
        Self { name, properties: None }
    }

    /// The name of the node in its parent; for a literal, the keyword itself.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.properties?.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        let value = self.get(key)?;
        let number = value.as_f64();
        if number.is_none() {
            self.wrong_type(key, "number", value);
        }
        number
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        // Bounds written as `1.0` still count as integers. The cast saturates.
        let number = value.as_i64().or_else(|| value.as_f64().map(|float| float as i64));
        if number.is_none() {
            self.wrong_type(key, "number", value);
        }
        number
    }

    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        let value = self.get(key)?;
        let string = value.as_str();
        if string.is_none() {
            self.wrong_type(key, "string", value);
        }
        string
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.get(key)?;
        let boolean = value.as_bool();
        if boolean.is_none() {
            self.wrong_type(key, "boolean", value);
        }
        boolean
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &Value) {
        log::debug!(
            "Ignoring property '{key}' of node '{}': expected a {expected}, found {found}",
            self.name,
        );
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::path::EXECUTE_RUN;
    use super::*;


    fn tree() -> CommandNode {
        CommandNode::from_value(json!({
            "type": "root",
            "children": {
                "say": {
                    "type": "literal",
                    "children": {
                        "message": {
                            "type": "argument",
                            "parser": "brigadier:string",
                            "properties": { "type": "greedy" },
                            "executable": true
                        }
                    }
                },
                "execute": {
                    "type": "literal",
                    "children": {
                        "as": {
                            "type": "literal",
                            "children": {
                                "targets": {
                                    "type": "argument",
                                    "parser": "minecraft:game_profile",
                                    "redirect": ["execute"]
                                }
                            }
                        },
                        "run": { "type": "literal" }
                    }
                },
                "tp": {
                    "type": "literal",
                    "redirect": ["teleport"]
                },
                "teleport": {
                    "type": "literal",
                    "children": {
                        "x": {
                            "type": "argument",
                            "parser": "brigadier:integer",
                            "properties": { "min": -10, "max": 10.0, "label": 3 },
                            "executable": true
                        }
                    }
                }
            }
        })).unwrap()
    }

    #[test]
    fn children_keep_document_order() {
        let tree = tree();
        let names: Vec<_> = tree.literal_children().map(|(name, _)| name).collect();
        assert_eq!(names, ["say", "execute", "tp", "teleport"]);
        assert_eq!(tree.argument_children().count(), 0);
    }

    #[test]
    fn redirect_paths() {
        let tree = tree();
        let bound = tree.node_at(&["execute", "as", "targets", "as"]).unwrap();
        assert_eq!(bound.kind, NodeKind::Literal);
        assert!(tree.node_at_exact(&["execute", "as", "targets", "as"]).is_none());
        assert!(tree.node_at(&["tp", "x"]).unwrap().executable);
    }

    #[test]
    fn continuations() {
        let tree = tree();

        let say = tree.child("say").unwrap();
        let (next, path) = tree.continuation(say, &NodePath::root().child("say")).unwrap();
        assert!(next.child("message").is_some());
        assert_eq!(path.segments(), ["say"]);

        let tp = tree.child("tp").unwrap();
        let (next, path) = tree.continuation(tp, &NodePath::root().child("tp")).unwrap();
        assert!(next.child("x").is_some());
        assert_eq!(path.segments(), ["teleport"]);

        let run_path: NodePath = EXECUTE_RUN.into_iter().collect();
        let run = tree.node_at(run_path.segments()).unwrap();
        let (next, path) = tree.continuation(run, &run_path).unwrap();
        assert_eq!(next.kind, NodeKind::Root);
        assert!(path.is_root());

        let message_path: NodePath = ["say", "message"].into_iter().collect();
        let message = tree.node_at(message_path.segments()).unwrap();
        assert!(tree.continuation(message, &message_path).is_none());
    }

    #[test]
    fn properties() {
        let tree = tree();
        let x = tree.node_at(&["teleport", "x"]).unwrap();
        let properties = x.properties("x");

        assert_eq!(properties.name(), "x");
        assert_eq!(properties.get_i64("min"), Some(-10));
        assert_eq!(properties.get_i64("max"), Some(10));
        assert_eq!(properties.get_f64("min"), Some(-10.0));
        assert_eq!(properties.get_str("label"), None);
        assert_eq!(properties.get_bool("missing"), None);
        assert_eq!(NodeProperties::empty("x").get("min"), None);
    }

    #[test]
    fn invalid_trees() {
        let missing_parser = CommandNode::from_value(json!({
            "type": "root",
            "children": { "x": { "type": "argument" } }
        }));
        assert!(matches!(missing_parser, Err(GrammarError::MissingParser { .. })));

        let literal_parser = CommandNode::from_value(json!({
            "type": "root",
            "children": { "x": { "type": "literal", "parser": "brigadier:bool" } }
        }));
        assert!(matches!(literal_parser, Err(GrammarError::UnexpectedParser { .. })));

        let bad_redirect = CommandNode::from_value(json!({
            "type": "root",
            "children": { "x": { "type": "literal", "redirect": ["nowhere"] } }
        }));
        assert!(matches!(bad_redirect, Err(GrammarError::UnresolvedRedirect { .. })));

        let not_root = CommandNode::from_value(json!({ "type": "literal" }));
        assert!(matches!(not_root, Err(GrammarError::NotRoot(NodeKind::Literal))));

        assert!(matches!(CommandNode::from_json("{"), Err(GrammarError::Json(_))));
    }
}
