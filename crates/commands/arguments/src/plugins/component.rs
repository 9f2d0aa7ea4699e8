use mcfunction_grammar::NodeProperties;
use mcfunction_reader::StringReader;
use serde_json::Value;

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:component`, a JSON text component taking up the rest of the line.
///
/// Only the JSON syntax is checked, not the structure of the component.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentParser;

impl ArgumentParser for ComponentParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let json = reader.read_remaining();

        serde_json::from_str::<Value>(json)
            .map(|_| None)
            .map_err(|err| ArgumentError::InvalidComponent {
                reason: err.to_string(),
                span:   start..reader.cursor(),
            })
    }
}
