use mcfunction_datatypes::{IdentifierParseOptions, NamespacedIdentifier};
use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{ARGUMENT_SEPARATOR, StringReader};

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:resource_location`, a namespaced id such as `minecraft:stone` or `foo:bar/baz`.
/// An id without a namespace is in the default namespace.
#[derive(Debug, Clone, Copy)]
pub struct ResourceLocationParser {
    options: IdentifierParseOptions,
}

impl ResourceLocationParser {
    pub fn new(options: IdentifierParseOptions) -> Self {
        Self { options }
    }
}

impl Default for ResourceLocationParser {
    fn default() -> Self {
        Self::new(IdentifierParseOptions::command())
    }
}

impl ArgumentParser for ResourceLocationParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        // Invalid characters are reported by the identifier parser, rather than
        // ending the argument early
        let id = reader.read_until(|ch| ch == ARGUMENT_SEPARATOR);

        NamespacedIdentifier::parse_string(id, self.options)
            .map(|_| None)
            .map_err(|reason| ArgumentError::InvalidIdentifier {
                reason,
                span: start..reader.cursor(),
            })
    }
}
