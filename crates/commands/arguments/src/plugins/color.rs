use mcfunction_datatypes::Color;
use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{StringReader, Suggestion, SuggestionKind};

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:color`
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorParser;

impl ArgumentParser for ColorParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let color = reader.read_unquoted_string();

        match Color::try_from(color) {
            Ok(_)  => Ok(None),
            Err(_) => Err(ArgumentError::UnknownColor {
                color: color.to_owned(),
                span:  start..reader.cursor(),
            }),
        }
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        Color::names()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Suggestion::new(name, 0, SuggestionKind::Enum))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use mcfunction_reader::Diagnose;

    use super::*;


    #[test]
    fn colors() {
        let properties = NodeProperties::empty("color");
        let context = CommandContext::new();

        let mut reader = StringReader::new("dark_purple");
        assert!(ColorParser.parse(&mut reader, &properties, &context).is_ok());

        let mut reader = StringReader::new("purple");
        let err = ColorParser.parse(&mut reader, &properties, &context).unwrap_err();
        assert_eq!(err.category(), "argument.color.unknown");
        assert_eq!(err.span(), 0..6);

        let suggestions = ColorParser.suggestions("dark_g", &properties, &context);
        let texts: Vec<_> = suggestions.iter().map(|suggestion| suggestion.text.as_str()).collect();
        assert_eq!(texts, ["dark_green", "dark_gray"]);
    }
}
