use std::fmt::Debug;

use mcfunction_datatypes::IdentifierParseOptions;
use mcfunction_grammar::NodeProperties;
use mcfunction_nbt::DepthLimit;
use mcfunction_reader::{StringReader, Suggestion, SuggestionKind};

use crate::{context::CommandContext, error::ArgumentError};


/// Parses the text of one argument type, such as `brigadier:integer`.
///
/// Parsers are shared between every parse of every line, and must not keep state
/// between calls.
pub trait ArgumentParser: Debug + Send + Sync {
    /// Read an argument starting at the reader's cursor, leaving the cursor just past it.
    ///
    /// On success, a parser which learned something for the nodes after it returns a
    /// modified copy of `context`; `None` means the context is unchanged. On failure the
    /// cursor may be anywhere; the caller restores it.
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError>;

    /// Completions for `prefix`, the text of this argument written so far. Anchors are
    /// relative to the start of `prefix`.
    fn suggestions(
        &self,
        prefix:     &str,
        properties: &NodeProperties<'_>,
        context:    &CommandContext,
    ) -> Vec<Suggestion> {
        let _ = (prefix, properties, context);
        Vec::new()
    }
}

/// Settings shared by the argument parsers which read nested or namespaced values.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentOptions {
    pub depth_limit: DepthLimit,
    pub identifiers: IdentifierParseOptions,
}

impl Default for ArgumentOptions {
    fn default() -> Self {
        Self {
            depth_limit: DepthLimit::default(),
            identifiers: IdentifierParseOptions::command(),
        }
    }
}

// ================================
//      Literals
// ================================

/// Matches the keyword of a literal node, which is the node's name, case-sensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralParser;

impl ArgumentParser for LiteralParser {
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let keyword = properties.name();
        let start = reader.cursor();

        for expected in keyword.chars() {
            match reader.peek() {
                Some(ch) if ch == expected => reader.skip(),
                // The span includes the mismatching character
                Some(ch) => {
                    return Err(ArgumentError::IncorrectLiteral {
                        expected: keyword.to_owned(),
                        span:     start..reader.cursor() + ch.len_utf8(),
                    });
                }
                None => {
                    return Err(ArgumentError::IncorrectLiteral {
                        expected: keyword.to_owned(),
                        span:     start..reader.total_length(),
                    });
                }
            }
        }

        Ok(None)
    }

    fn suggestions(
        &self,
        prefix:     &str,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Vec<Suggestion> {
        let keyword = properties.name();
        if keyword.starts_with(prefix) {
            vec![Suggestion::new(keyword, 0, SuggestionKind::Keyword)]
        } else {
            Vec::new()
        }
    }
}
