use mcfunction_datatypes::{Swizzle, SwizzleError};
use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{StringReader, Suggestion, SuggestionKind};
use mcfunction_util::filter_prefixed;

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:swizzle`, a set of axes such as `xz`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwizzleParser;

impl ArgumentParser for SwizzleParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let swizzle = reader.read_unquoted_string();

        match Swizzle::parse(swizzle) {
            Ok(_) => Ok(None),
            Err(SwizzleError::Empty) => Err(ArgumentError::ExpectedSwizzle { position: start }),
            Err(SwizzleError::Unexpected { index, ch }) => {
                Err(ArgumentError::UnexpectedSwizzleCharacter {
                    found: ch,
                    span:  start + index..start + index + ch.len_utf8(),
                })
            }
            Err(SwizzleError::Repeated { index, axis }) => {
                Err(ArgumentError::RepeatedSwizzleAxis {
                    axis: axis.as_char(),
                    span: start + index..start + index + 1,
                })
            }
        }
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        filter_prefixed(Swizzle::spellings(), prefix)
            .into_iter()
            .map(|spelling| Suggestion::new(spelling, 0, SuggestionKind::Enum))
            .collect()
    }
}
