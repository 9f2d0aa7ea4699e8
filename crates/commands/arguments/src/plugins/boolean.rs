use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{StringReader, Suggestion, SuggestionKind};

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `brigadier:bool`
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolParser;

impl ArgumentParser for BoolParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        reader.read_boolean()?;
        Ok(None)
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        ["true", "false"]
            .into_iter()
            .filter(|value| value.starts_with(prefix))
            .map(|value| Suggestion::new(value, 0, SuggestionKind::Value))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use mcfunction_reader::Diagnose;

    use super::*;


    #[test]
    fn booleans() {
        let properties = NodeProperties::empty("value");
        let context = CommandContext::new();

        let mut reader = StringReader::new("false");
        assert!(BoolParser.parse(&mut reader, &properties, &context).is_ok());
        assert_eq!(reader.cursor(), 5);

        let mut reader = StringReader::new("yes");
        let err = BoolParser.parse(&mut reader, &properties, &context).unwrap_err();
        assert_eq!(err.category(), "parsing.bool.invalid");
        assert_eq!(err.span(), 0..3);

        let suggestions = BoolParser.suggestions("t", &properties, &context);
        assert_eq!(suggestions, [Suggestion::new("true", 0, SuggestionKind::Value)]);
    }
}
