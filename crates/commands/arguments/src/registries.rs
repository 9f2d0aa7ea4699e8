use std::fmt::Debug;
use std::fs;
use std::io::Error as IoError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mcfunction_nbt::{JsonNbtSchema, NbtSchema};


/// The properties of a block, and the values each may take, in the order they are suggested.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockStates {
    #[serde(default)]
    pub states: IndexMap<String, Vec<String>>,
}

/// Read-only lookup of the blocks which exist and their state properties.
pub trait BlockRegistry: Debug + Send + Sync {
    /// The states of the block with the given full id, such as `minecraft:stone`,
    /// or `None` if there is no such block.
    fn block(&self, id: &str) -> Option<&BlockStates>;

    /// Every block id, in the order they should be suggested.
    fn ids(&self) -> Vec<&str>;

    /// A registry without data can't tell whether a block exists, so block
    /// arguments are then only checked for syntax.
    fn is_empty(&self) -> bool;
}

/// A [`BlockRegistry`] loaded from a JSON document of the form
/// `{ "minecraft:oak_stairs": { "states": { "facing": ["north", ...], ... } }, ... }`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct JsonBlockRegistry {
    blocks: IndexMap<String, BlockStates>,
}

impl JsonBlockRegistry {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
            .inspect_err(|err| log::warn!("Error parsing block states: {err}"))
    }
}

impl BlockRegistry for JsonBlockRegistry {
    fn block(&self, id: &str) -> Option<&BlockStates> {
        self.blocks.get(id)
    }

    fn ids(&self) -> Vec<&str> {
        self.blocks.keys().map(String::as_str).collect()
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("could not read registry file '{}': {source}", path.display())]
    Io {
        path:   PathBuf,
        source: IoError,
    },
    #[error("invalid registry file '{}': {source}", path.display())]
    Json {
        path:   PathBuf,
        source: serde_json::Error,
    },
}

/// The data tables consulted by argument parsers, loaded once and shared by every parse.
#[derive(Debug, Clone)]
pub struct Registries {
    pub blocks: Arc<dyn BlockRegistry>,
    pub nbt:    Arc<dyn NbtSchema>,
}

impl Registries {
    pub fn new(blocks: Arc<dyn BlockRegistry>, nbt: Arc<dyn NbtSchema>) -> Self {
        Self { blocks, nbt }
    }

    /// Registries with no data, with which only syntax can be checked.
    pub fn empty() -> Self {
        Self::new(
            Arc::new(JsonBlockRegistry::default()),
            Arc::new(JsonNbtSchema::default()),
        )
    }

    /// Load the JSON registries at the given paths; a missing path leaves that registry empty.
    pub fn from_files(
        blocks: Option<&Path>,
        nbt:    Option<&Path>,
    ) -> Result<Self, RegistryError> {
        let block_registry = match blocks {
            Some(path) => {
                let json = read_file(path)?;
                JsonBlockRegistry::from_json(&json).map_err(|source| RegistryError::Json {
                    path: path.to_owned(),
                    source,
                })?
            }
            None => JsonBlockRegistry::default(),
        };

        let nbt_schema = match nbt {
            Some(path) => {
                let json = read_file(path)?;
                JsonNbtSchema::from_json(&json).map_err(|source| RegistryError::Json {
                    path: path.to_owned(),
                    source,
                })?
            }
            None => JsonNbtSchema::default(),
        };

        log::debug!(
            "Loaded registries: {} blocks, NBT schema {}",
            block_registry.blocks.len(),
            if nbt.is_some() { "present" } else { "absent" },
        );

        Ok(Self::new(Arc::new(block_registry), Arc::new(nbt_schema)))
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::empty()
    }
}

fn read_file(path: &Path) -> Result<String, RegistryError> {
    fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_owned(),
        source,
    })
}
