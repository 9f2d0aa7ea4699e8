use std::collections::HashMap;
use std::fmt::Debug;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{snbt::LIST_ITEM_SEGMENT, tag::NbtType};


/// What kind of object an NBT compound argument belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NbtTargetKind {
    Block,
    Entity,
    Item,
    Storage,
}

/// The object whose NBT is being written, such as the block entity of `minecraft:chest`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct NbtTarget {
    pub kind: NbtTargetKind,
    #[serde(default)]
    pub id:   Option<String>,
}

impl NbtTarget {
    #[inline]
    pub fn new(kind: NbtTargetKind, id: Option<String>) -> Self {
        Self { kind, id }
    }
}

/// The expected shape of an NBT value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind:        NbtType,
    /// Known keys of a compound, in the order they should be suggested.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub children:    IndexMap<String, SchemaNode>,
    /// The shape of the elements of a list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item:        Option<Box<SchemaNode>>,
    /// Values to suggest instead of the defaults for the node's type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl SchemaNode {
    /// Follow `path` from this node, where [`LIST_ITEM_SEGMENT`] steps into a list's elements.
    pub fn descend<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        path.iter().try_fold(self, |node, segment| {
            let segment = segment.as_ref();
            if segment == LIST_ITEM_SEGMENT {
                node.item.as_deref()
            } else {
                node.children.get(segment)
            }
        })
    }
}

/// Read-only lookup of the NBT structure expected for blocks, entities, items, and storage.
pub trait NbtSchema: Debug + Send + Sync {
    /// The root compound expected for `target`.
    fn root(&self, target: &NbtTarget) -> Option<&SchemaNode>;

    fn node(&self, target: &NbtTarget, path: &[String]) -> Option<&SchemaNode> {
        self.root(target)?.descend(path)
    }
}

/// An [`NbtSchema`] loaded from a single JSON document of the form
/// `{ "block": { "<id>": node, "none": node }, "entity": {...}, "item": {...}, "storage": {...} }`.
///
/// A target without an id, or whose id is unknown, uses the `"none"` entry of its kind.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct JsonNbtSchema {
    #[serde(default)]
    block:   HashMap<String, SchemaNode>,
    #[serde(default)]
    entity:  HashMap<String, SchemaNode>,
    #[serde(default)]
    item:    HashMap<String, SchemaNode>,
    #[serde(default)]
    storage: HashMap<String, SchemaNode>,
}

impl JsonNbtSchema {
    const FALLBACK_ID: &'static str = "none";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
            .inspect_err(|err| log::warn!("Error parsing NBT schema: {err}"))
    }

    fn roots(&self, kind: NbtTargetKind) -> &HashMap<String, SchemaNode> {
        match kind {
            NbtTargetKind::Block   => &self.block,
            NbtTargetKind::Entity  => &self.entity,
            NbtTargetKind::Item    => &self.item,
            NbtTargetKind::Storage => &self.storage,
        }
    }
}

impl NbtSchema for JsonNbtSchema {
    fn root(&self, target: &NbtTarget) -> Option<&SchemaNode> {
        let roots = self.roots(target.kind);
        target.id
            .as_deref()
            .and_then(|id| roots.get(id))
            .or_else(|| roots.get(Self::FALLBACK_ID))
    }
}
