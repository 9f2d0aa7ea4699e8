//! The SNBT micro-grammar used inside command arguments, parsed over the same
//! [`StringReader`](mcfunction_reader::StringReader) as the rest of a command,
//! and the schema contract used to suggest keys and values inside NBT compounds.

mod error;
mod schema;
mod settings;
mod snbt;
mod suggest;
mod tag;


pub use self::{
    error::{NbtError, NbtErrorKind},
    schema::{JsonNbtSchema, NbtSchema, NbtTarget, NbtTargetKind, SchemaNode},
    settings::DepthLimit,
    snbt::{parse_compound, parse_full_compound, parse_value, LIST_ITEM_SEGMENT},
    suggest::{suggest_compound, tag_suggestions},
    tag::{NbtCompound, NbtTag, NbtType},
};
