use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    parser::{ArgumentOptions, ArgumentParser, LiteralParser},
    plugins::{
        BlockParser, BlockPosParser, BoolParser, ColorParser, ComponentParser, DoubleParser,
        FloatParser, GameProfileParser, IntegerParser, LongParser, NbtCompoundParser,
        ObjectiveParser, OperationParser, ResourceLocationParser, ScoreboardSlotParser,
        StringParser, SwizzleParser, Vec3Parser,
    },
    registries::Registries,
};


/// Maps the `parser` ids of argument nodes, such as `brigadier:integer`, to their parsers.
///
/// Built once, then shared read-only by every parse.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    literal: Arc<dyn ArgumentParser>,
    parsers: HashMap<String, Arc<dyn ArgumentParser>>,
}

impl ParserRegistry {
    /// A registry which only knows how to match literals.
    pub fn new() -> Self {
        Self {
            literal: Arc::new(LiteralParser),
            parsers: HashMap::new(),
        }
    }

    /// Every argument type with a built-in parser, reading blocks and NBT with `registries`.
    pub fn with_defaults(registries: Arc<Registries>, options: ArgumentOptions) -> Self {
        let mut registry = Self::new();

        registry.register("brigadier:bool",    Arc::new(BoolParser));
        registry.register("brigadier:integer", Arc::new(IntegerParser));
        registry.register("brigadier:long",    Arc::new(LongParser));
        registry.register("brigadier:float",   Arc::new(FloatParser));
        registry.register("brigadier:double",  Arc::new(DoubleParser));
        registry.register("brigadier:string",  Arc::new(StringParser));

        registry.register("minecraft:swizzle",         Arc::new(SwizzleParser));
        registry.register("minecraft:operation",       Arc::new(OperationParser));
        registry.register("minecraft:objective",       Arc::new(ObjectiveParser));
        registry.register("minecraft:scoreboard_slot", Arc::new(ScoreboardSlotParser));
        registry.register("minecraft:color",           Arc::new(ColorParser));
        registry.register("minecraft:block_pos",       Arc::new(BlockPosParser::default()));
        registry.register("minecraft:vec3",            Arc::new(Vec3Parser));
        registry.register("minecraft:game_profile",    Arc::new(GameProfileParser));
        registry.register("minecraft:component",       Arc::new(ComponentParser));

        let block_state = Arc::new(BlockParser::state(Arc::clone(&registries), options));
        registry.register("minecraft:block_state", block_state.clone());
        registry.register("minecraft:block", block_state);
        registry.register(
            "minecraft:block_predicate",
            Arc::new(BlockParser::predicate(Arc::clone(&registries), options)),
        );

        let nbt = Arc::new(NbtCompoundParser::new(Arc::clone(&registries.nbt), options.depth_limit));
        registry.register("minecraft:nbt_compound_tag", nbt.clone());
        registry.register("minecraft:nbt", nbt);

        let resource_location = Arc::new(ResourceLocationParser::new(options.identifiers));
        registry.register("minecraft:resource_location", resource_location.clone());
        registry.register("minecraft:function", resource_location);

        registry
    }

    /// Add or replace the parser for `id`.
    pub fn register<S: Into<String>>(&mut self, id: S, parser: Arc<dyn ArgumentParser>) {
        let id = id.into();
        if self.parsers.insert(id.clone(), parser).is_some() {
            log::debug!("Replaced the argument parser for '{id}'");
        }
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&Arc<dyn ArgumentParser>> {
        self.parsers.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.parsers.contains_key(id)
    }

    /// The parser which matches literal nodes.
    #[inline]
    pub fn literal(&self) -> &Arc<dyn ArgumentParser> {
        &self.literal
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults(Arc::new(Registries::empty()), ArgumentOptions::default())
    }
}


#[cfg(test)]
mod tests {
    use mcfunction_grammar::NodeProperties;
    use mcfunction_reader::StringReader;

    use crate::context::CommandContext;
    use super::*;


    #[test]
    fn default_parsers() {
        let registry = ParserRegistry::default();

        for id in [
            "brigadier:bool", "brigadier:integer", "brigadier:long", "brigadier:float",
            "brigadier:double", "brigadier:string", "minecraft:swizzle", "minecraft:operation",
            "minecraft:objective", "minecraft:scoreboard_slot", "minecraft:color",
            "minecraft:block_pos", "minecraft:vec3", "minecraft:block_state",
            "minecraft:block_predicate", "minecraft:nbt_compound_tag",
            "minecraft:resource_location", "minecraft:game_profile", "minecraft:component",
        ] {
            assert!(registry.contains(id), "missing parser for {id}");
        }
        assert!(!registry.contains("minecraft:entity"), "entity selectors are not parsed");
    }

    #[test]
    fn replace_parser() {
        let mut registry = ParserRegistry::new();
        assert!(registry.get("brigadier:bool").is_none());

        registry.register("brigadier:bool", Arc::new(IntegerParser));
        let parser = registry.get("brigadier:bool").unwrap();

        let mut reader = StringReader::new("12");
        let properties = NodeProperties::empty("value");
        assert!(parser.parse(&mut reader, &properties, &CommandContext::new()).is_ok());
    }
}
