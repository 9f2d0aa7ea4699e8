use std::ops::Range;
use std::sync::Arc;

use thiserror::Error;

use mcfunction_datatypes::NamespacedIdentifier;
use mcfunction_grammar::NodeProperties;
use mcfunction_nbt::{NbtTarget, NbtTargetKind, parse_compound, suggest_compound};
use mcfunction_reader::{
    ARGUMENT_SEPARATOR, ContainerPosition, Diagnose, ResumeHint,
    StringReader, Suggestion, SuggestionKind,
};
use mcfunction_util::MAX_SUGGESTIONS;

use crate::{
    context::CommandContext,
    error::ArgumentError,
    parser::{ArgumentOptions, ArgumentParser},
    registries::{BlockStates, Registries},
};


const TAG_START:        char = '#';
const PROPERTIES_OPEN:  char = '[';
const PROPERTIES_CLOSE: char = ']';
const PROPERTY_VALUE:   char = '=';
const PROPERTY_SEP:     char = ',';
const NBT_OPEN:         char = '{';


/// A block argument which doesn't match the registered blocks, or whose state
/// properties are malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct BlockError {
    pub kind: BlockErrorKind,
    pub span: Range<usize>,
    pub hint: ResumeHint,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockErrorKind {
    #[error("Tags aren't allowed here, only actual blocks")]
    TagDisallowed,
    #[error("Unknown block type '{0}'")]
    UnknownBlock(String),
    #[error("Block {block} does not have property '{property}'")]
    UnknownProperty { block: String, property: String },
    #[error("Property '{property}' can only be set once for block {block}")]
    DuplicateProperty { block: String, property: String },
    #[error("Block {block} does not accept '{value}' for {property} property")]
    InvalidValue {
        block:    String,
        property: String,
        value:    String,
    },
    #[error("Expected value for property '{property}' on block {block}")]
    MissingValue { block: String, property: String },
    #[error("Expected closing ] for block state properties")]
    UnclosedProperties,
}

impl BlockError {
    fn new(kind: BlockErrorKind, span: Range<usize>, hint: ResumeHint) -> Self {
        Self { kind, span, hint }
    }
}

impl Diagnose for BlockError {
    fn category(&self) -> &'static str {
        match self.kind {
            BlockErrorKind::TagDisallowed            => "argument.block.tag.disallowed",
            BlockErrorKind::UnknownBlock(_)          => "argument.block.id.invalid",
            BlockErrorKind::UnknownProperty { .. }   => "argument.block.property.unknown",
            BlockErrorKind::DuplicateProperty { .. } => "argument.block.property.duplicate",
            BlockErrorKind::InvalidValue { .. }      => "argument.block.property.invalid",
            BlockErrorKind::MissingValue { .. }      => "argument.block.property.novalue",
            BlockErrorKind::UnclosedProperties       => "argument.block.property.unclosed",
        }
    }

    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn resume_hint(&self) -> Option<&ResumeHint> {
        Some(&self.hint)
    }
}

// ================================
//      Parser
// ================================

/// `minecraft:block_state` and `minecraft:block_predicate`: a block id, optional state
/// properties like `[facing=north]`, and an optional NBT compound. Predicates may name
/// a block tag such as `#minecraft:logs` instead of a block.
///
/// The nodes after a block argument see its block as the context's NBT target.
#[derive(Debug, Clone)]
pub struct BlockParser {
    predicate:  bool,
    registries: Arc<Registries>,
    options:    ArgumentOptions,
}

impl BlockParser {
    pub fn state(registries: Arc<Registries>, options: ArgumentOptions) -> Self {
        Self { predicate: false, registries, options }
    }

    pub fn predicate(registries: Arc<Registries>, options: ArgumentOptions) -> Self {
        Self { predicate: true, registries, options }
    }

    /// Returns the full id of the block read, or `None` for a tag.
    fn read_block(&self, reader: &mut StringReader<'_>) -> Result<Option<String>, ArgumentError> {
        let start = reader.cursor();

        let is_tag = reader.peek() == Some(TAG_START);
        if is_tag {
            if !self.predicate {
                let span = start..start + TAG_START.len_utf8();
                return Err(BlockError::new(
                    BlockErrorKind::TagDisallowed,
                    span,
                    ResumeHint::default(),
                ).into());
            }
            reader.skip();
        }

        let id = self.read_id(reader)?;

        let blocks = &self.registries.blocks;
        let states = if is_tag || blocks.is_empty() {
            None
        } else {
            let states = blocks.block(&id).ok_or_else(|| {
                let hint = ResumeHint {
                    anchor:   start,
                    partial:  reader.string()[start..reader.cursor()].to_owned(),
                    position: Some(ContainerPosition::Identifier),
                    ..ResumeHint::default()
                };
                BlockError::new(BlockErrorKind::UnknownBlock(id.clone()), start..reader.cursor(), hint)
            })?;
            Some(states)
        };

        if reader.peek() == Some(PROPERTIES_OPEN) {
            read_properties(reader, &id, states)?;
        }

        if reader.peek() == Some(NBT_OPEN) {
            parse_compound(reader, self.options.depth_limit)?;
        }

        Ok((!is_tag).then_some(id))
    }

    fn read_id(&self, reader: &mut StringReader<'_>) -> Result<String, ArgumentError> {
        let start = reader.cursor();
        let id = reader.read_until(ends_id);

        NamespacedIdentifier::parse_string(id, self.options.identifiers)
            .map(|id| id.to_string())
            .map_err(|reason| ArgumentError::InvalidIdentifier {
                reason,
                span: start..reader.cursor(),
            })
    }

    fn full_id(&self, id: &str) -> Option<String> {
        NamespacedIdentifier::parse_string(id, self.options.identifiers)
            .ok()
            .map(|id| id.to_string())
    }

    // ================================
    //      Suggestions
    // ================================

    /// Block ids starting with `partial`, with or without the default namespace, followed
    /// by the brackets which may come next if `partial` is already a whole block id.
    fn id_suggestions(&self, partial: &str) -> Vec<Suggestion> {
        let with_namespace = match self.options.identifiers.default_namespace {
            Some(namespace) if !partial.contains(':') => Some(format!("{namespace}:{partial}")),
            _ => None,
        };

        let mut suggestions: Vec<_> = self.registries.blocks
            .ids()
            .into_iter()
            .filter(|id| {
                id.starts_with(partial)
                    || with_namespace.as_deref().is_some_and(|full| id.starts_with(full))
            })
            .take(MAX_SUGGESTIONS)
            .map(|id| Suggestion::new(id, 0, SuggestionKind::Value))
            .collect();

        let exact = self.full_id(partial).and_then(|id| self.registries.blocks.block(&id));
        if let Some(states) = exact {
            if !states.states.is_empty() {
                let open = PROPERTIES_OPEN.to_string();
                suggestions.push(Suggestion::new(open, partial.len(), SuggestionKind::Text));
            }
            let open = NBT_OPEN.to_string();
            suggestions.push(Suggestion::new(open, partial.len(), SuggestionKind::Text));
        }

        suggestions
    }

    fn hint_suggestions(&self, hint: &ResumeHint) -> Vec<Suggestion> {
        let states = hint.path
            .first()
            .and_then(|id| self.registries.blocks.block(id));
        let mut suggestions = Vec::new();

        match (hint.position, states) {
            (Some(ContainerPosition::Key), Some(states)) => {
                suggestions.extend(
                    states.states
                        .keys()
                        .filter(|property| {
                            property.starts_with(&hint.partial)
                                && !hint.existing_keys.contains(property)
                        })
                        .map(|property| {
                            Suggestion::new(property.as_str(), hint.anchor, SuggestionKind::Property)
                        }),
                );
            }
            (Some(ContainerPosition::Value), Some(states)) => {
                let values = hint.path
                    .get(1)
                    .and_then(|property| states.states.get(property))
                    .into_iter()
                    .flatten();
                suggestions.extend(
                    values
                        .filter(|value| value.starts_with(&hint.partial))
                        .map(|value| Suggestion::new(value.as_str(), hint.anchor, SuggestionKind::Value)),
                );
            }
            _ => {}
        }

        for completion in &hint.completions {
            if completion.starts_with(&hint.partial) {
                let suggestion = Suggestion::new(completion.as_str(), hint.anchor, SuggestionKind::Text);
                if !suggestions.contains(&suggestion) {
                    suggestions.push(suggestion);
                }
            }
        }

        suggestions
    }

    fn nbt_suggestions(&self, prefix: &str, context: &CommandContext) -> Vec<Suggestion> {
        let Some(nbt_start) = prefix.find(NBT_OPEN) else {
            return Vec::new();
        };

        let id = &prefix[..prefix.find(ends_id).unwrap_or(nbt_start)];
        let target = match id.strip_prefix(TAG_START) {
            Some(_) => Some(NbtTarget::new(NbtTargetKind::Block, None)),
            None    => self.full_id(id).map(|id| NbtTarget::new(NbtTargetKind::Block, Some(id))),
        };

        suggest_compound(
            &prefix[nbt_start..],
            target.as_ref().or(context.nbt_target()),
            &*self.registries.nbt,
            self.options.depth_limit,
        )
        .into_iter()
        .map(|suggestion| suggestion.shifted(nbt_start))
        .collect()
    }
}

impl ArgumentParser for BlockParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        context:     &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let id = self.read_block(reader)?;
        let target = NbtTarget::new(NbtTargetKind::Block, id);
        Ok(Some(context.clone().with_nbt_target(target)))
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        context:     &CommandContext,
    ) -> Vec<Suggestion> {
        // Still writing the id
        if !prefix.contains(ends_id) {
            return if prefix.starts_with(TAG_START) {
                Vec::new()
            } else {
                self.id_suggestions(prefix)
            };
        }

        let mut reader = StringReader::new(prefix);
        match self.read_block(&mut reader) {
            Ok(_) if reader.can_read() => Vec::new(),
            Ok(_) => {
                // Only an NBT compound may follow the closing bracket of the properties
                if prefix.ends_with(PROPERTIES_CLOSE) {
                    let open = NBT_OPEN.to_string();
                    vec![Suggestion::new(open, prefix.len(), SuggestionKind::Text)]
                } else {
                    Vec::new()
                }
            }
            Err(ArgumentError::Block(err)) => self.hint_suggestions(&err.hint),
            Err(ArgumentError::Nbt(_)) => self.nbt_suggestions(prefix, context),
            Err(_) => Vec::new(),
        }
    }
}

fn ends_id(ch: char) -> bool {
    matches!(ch, PROPERTIES_OPEN | NBT_OPEN | ARGUMENT_SEPARATOR)
}

/// Reads `[property=value,...]`, checking the properties against `states` if the block is known.
fn read_properties(
    reader: &mut StringReader<'_>,
    block:  &str,
    states: Option<&BlockStates>,
) -> Result<(), ArgumentError> {
    reader.skip();
    reader.skip_whitespace();
    if reader.peek() == Some(PROPERTIES_CLOSE) {
        reader.skip();
        return Ok(());
    }

    let mut seen: Vec<String> = Vec::new();

    loop {
        reader.skip_whitespace();
        let key_start = reader.cursor();
        let key = reader.read_string()?;
        let key_end = reader.cursor();

        let key_hint = |completions: Vec<String>| ResumeHint {
            anchor:        key_start,
            partial:       key.clone(),
            path:          vec![block.to_owned()],
            existing_keys: seen.clone(),
            position:      Some(ContainerPosition::Key),
            completions,
        };

        if key.is_empty() && !reader.can_read() {
            return Err(BlockError::new(
                BlockErrorKind::UnclosedProperties,
                key_start..key_start,
                key_hint(Vec::new()),
            ).into());
        }

        let values = match states {
            Some(states) => {
                let values = states.states.get(&key).ok_or_else(|| {
                    BlockError::new(
                        BlockErrorKind::UnknownProperty {
                            block:    block.to_owned(),
                            property: key.clone(),
                        },
                        key_start..key_end.max(key_start + found_len(reader)),
                        key_hint(Vec::new()),
                    )
                })?;
                Some(values)
            }
            None => None,
        };

        if seen.contains(&key) {
            return Err(BlockError::new(
                BlockErrorKind::DuplicateProperty {
                    block:    block.to_owned(),
                    property: key,
                },
                key_start..key_end,
                ResumeHint::default(),
            ).into());
        }

        reader.skip_whitespace();
        if reader.peek() != Some(PROPERTY_VALUE) {
            // At the end of a known key, offer the `=` which must follow it
            let completions = if !reader.can_read() && key_end == reader.cursor() {
                vec![format!("{key}{PROPERTY_VALUE}")]
            } else {
                Vec::new()
            };
            let hint = key_hint(completions);
            return Err(BlockError::new(
                BlockErrorKind::MissingValue {
                    block:    block.to_owned(),
                    property: key,
                },
                key_start..reader.cursor(),
                hint,
            ).into());
        }
        reader.skip();
        reader.skip_whitespace();

        let value_start = reader.cursor();
        let value = reader.read_string()?;
        let value_end = reader.cursor();

        let value_hint = |completions: Vec<String>| ResumeHint {
            anchor:        value_start,
            partial:       value.clone(),
            path:          vec![block.to_owned(), key.clone()],
            existing_keys: seen.clone(),
            position:      Some(ContainerPosition::Value),
            completions,
        };

        if value.is_empty() {
            return Err(BlockError::new(
                BlockErrorKind::MissingValue {
                    block:    block.to_owned(),
                    property: key.clone(),
                },
                key_start..value_end,
                value_hint(Vec::new()),
            ).into());
        }

        if values.is_some_and(|values| !values.contains(&value)) {
            return Err(BlockError::new(
                BlockErrorKind::InvalidValue {
                    block:    block.to_owned(),
                    property: key.clone(),
                    value:    value.clone(),
                },
                value_start..value_end,
                value_hint(Vec::new()),
            ).into());
        }

        reader.skip_whitespace();
        match reader.peek() {
            Some(PROPERTY_SEP) => {
                reader.skip();
                seen.push(key);
            }
            Some(PROPERTIES_CLOSE) => {
                reader.skip();
                return Ok(());
            }
            found => {
                let position = reader.cursor();
                let hint = if found.is_none() && value_end == position {
                    value_hint(vec![
                        format!("{value}{PROPERTY_SEP}"),
                        format!("{value}{PROPERTIES_CLOSE}"),
                    ])
                } else {
                    ResumeHint {
                        anchor:      position,
                        completions: vec![PROPERTY_SEP.to_string(), PROPERTIES_CLOSE.to_string()],
                        ..ResumeHint::default()
                    }
                };
                return Err(BlockError::new(
                    BlockErrorKind::UnclosedProperties,
                    position..position + found.map_or(0, char::len_utf8),
                    hint,
                ).into());
            }
        }
    }
}

fn found_len(reader: &StringReader<'_>) -> usize {
    reader.peek().map_or(0, char::len_utf8)
}
