use mcfunction_grammar::NodeProperties;
use mcfunction_reader::StringReader;

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:game_profile`, a player name, which may be quoted.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameProfileParser;

impl ArgumentParser for GameProfileParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        if reader.read_string()?.is_empty() {
            return Err(ArgumentError::ExpectedString { position: start });
        }
        Ok(None)
    }
}
