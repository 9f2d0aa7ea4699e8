use std::sync::Arc;

use mcfunction_grammar::NodeProperties;
use mcfunction_nbt::{DepthLimit, NbtSchema, parse_compound, suggest_compound};
use mcfunction_reader::{StringReader, Suggestion};

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:nbt_compound_tag`, an SNBT compound such as `{Age: 1, Tags: ["a"]}`.
///
/// Keys and values are suggested from the schema entry of the context's NBT target.
#[derive(Debug, Clone)]
pub struct NbtCompoundParser {
    schema:      Arc<dyn NbtSchema>,
    depth_limit: DepthLimit,
}

impl NbtCompoundParser {
    pub fn new(schema: Arc<dyn NbtSchema>, depth_limit: DepthLimit) -> Self {
        Self { schema, depth_limit }
    }
}

impl ArgumentParser for NbtCompoundParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        parse_compound(reader, self.depth_limit)?;
        Ok(None)
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        context:     &CommandContext,
    ) -> Vec<Suggestion> {
        suggest_compound(prefix, context.nbt_target(), &*self.schema, self.depth_limit)
    }
}
