use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mcfunction_nbt::NbtTarget;


/// What kind of object is running a command, as far as can be told statically.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Entity,
    Player,
    #[default]
    Any,
}

/// Environment facts threaded through the parse of a line.
///
/// Cloning is cheap, and every setter copies the data only if it is shared, so an argument
/// parser may freely take a copy, modify it, and hand it back for the nodes after it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandContext(Arc<ContextData>);

#[derive(Debug, Default, Clone, PartialEq)]
struct ContextData {
    file:          Option<String>,
    datapack_root: Option<PathBuf>,
    actor:         ActorKind,
    nbt_target:    Option<NbtTarget>,
    extra:         Map<String, Value>,
}

impl CommandContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// An identifier of the file being parsed, such as its path or URI.
    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.0.file.as_deref()
    }

    #[inline]
    pub fn datapack_root(&self) -> Option<&Path> {
        self.0.datapack_root.as_deref()
    }

    #[inline]
    pub fn actor(&self) -> ActorKind {
        self.0.actor
    }

    /// The object whose NBT later arguments would be writing, if known.
    #[inline]
    pub fn nbt_target(&self) -> Option<&NbtTarget> {
        self.0.nbt_target.as_ref()
    }

    #[inline]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.0.extra
    }

    #[inline]
    pub fn get_extra(&self, key: &str) -> Option<&Value> {
        self.0.extra.get(key)
    }

    #[inline]
    fn data_mut(&mut self) -> &mut ContextData {
        Arc::make_mut(&mut self.0)
    }

    pub fn set_file(&mut self, file: Option<String>) {
        self.data_mut().file = file;
    }

    pub fn set_datapack_root(&mut self, datapack_root: Option<PathBuf>) {
        self.data_mut().datapack_root = datapack_root;
    }

    pub fn set_actor(&mut self, actor: ActorKind) {
        self.data_mut().actor = actor;
    }

    pub fn set_nbt_target(&mut self, nbt_target: Option<NbtTarget>) {
        self.data_mut().nbt_target = nbt_target;
    }

    pub fn insert_extra(&mut self, key: String, value: Value) -> Option<Value> {
        self.data_mut().extra.insert(key, value)
    }

    #[must_use]
    pub fn with_file(mut self, file: String) -> Self {
        self.set_file(Some(file));
        self
    }

    #[must_use]
    pub fn with_datapack_root(mut self, datapack_root: PathBuf) -> Self {
        self.set_datapack_root(Some(datapack_root));
        self
    }

    #[must_use]
    pub fn with_actor(mut self, actor: ActorKind) -> Self {
        self.set_actor(actor);
        self
    }

    #[must_use]
    pub fn with_nbt_target(mut self, nbt_target: NbtTarget) -> Self {
        self.set_nbt_target(Some(nbt_target));
        self
    }

    /// Whether `self` and `other` are the same allocation, rather than merely equal.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
