//! Small utilities without functionality specific to command parsing,
//! for small Rust-specific tasks.

// Exports a small macro
mod declare_and_pub_use;
mod inspect_none;
mod prefix_filter;


pub use self::{
    inspect_none::InspectNone,
    prefix_filter::{MAX_SUGGESTIONS, PrefixFilter, filter_prefixed},
};
