use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{StringReader, is_quote};

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// The `type` property of a `brigadier:string` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringType {
    /// A single unquoted word.
    Word,
    /// A word, or a quoted string which may contain spaces.
    Phrase,
    /// The rest of the line.
    Greedy,
}

impl StringType {
    fn from_properties(properties: &NodeProperties<'_>) -> Self {
        match properties.get_str("type") {
            Some("word")   => Self::Word,
            Some("greedy") => Self::Greedy,
            Some("phrase") => Self::Phrase,
            other => {
                log::debug!(
                    "Unknown string type {other:?} of node '{}', reading a phrase",
                    properties.name(),
                );
                Self::Phrase
            }
        }
    }
}

/// `brigadier:string`
#[derive(Debug, Default, Clone, Copy)]
pub struct StringParser;

impl ArgumentParser for StringParser {
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();

        match StringType::from_properties(properties) {
            StringType::Greedy => {
                reader.read_remaining();
            }
            StringType::Word => {
                if reader.read_unquoted_string().is_empty() {
                    return Err(ArgumentError::ExpectedString { position: start });
                }
            }
            StringType::Phrase => {
                let quoted = reader.peek().is_some_and(is_quote);
                if reader.read_string()?.is_empty() && !quoted {
                    return Err(ArgumentError::ExpectedString { position: start });
                }
            }
        }

        Ok(None)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use mcfunction_reader::Diagnose;

    use super::*;


    fn parse(string_type: &str, input: &str) -> Result<usize, ArgumentError> {
        let properties = json!({ "type": string_type });
        let properties = NodeProperties::new("text", properties.as_object().unwrap());
        let mut reader = StringReader::new(input);
        StringParser
            .parse(&mut reader, &properties, &CommandContext::new())
            .map(|_| reader.cursor())
    }

    #[test]
    fn words() {
        assert_eq!(parse("word", "hello world").unwrap(), 5);
        let err = parse("word", "\"quoted\"").unwrap_err();
        assert_eq!(err.category(), "argument.string.expected");
        assert_eq!(err.span(), 0..0);
    }

    #[test]
    fn phrases() {
        assert_eq!(parse("phrase", "\"hello world\" after").unwrap(), 13);
        assert_eq!(parse("phrase", "''").unwrap(), 2);
        assert_eq!(parse("phrase", "plain words").unwrap(), 5);

        let err = parse("phrase", "\"unclosed").unwrap_err();
        assert_eq!(err.category(), "parsing.quote.expected.end");
    }

    #[test]
    fn greedy() {
        assert_eq!(parse("greedy", "anything at all, even \"this").unwrap(), 27);
    }
}
