use mcfunction_reader::{
    ContainerPosition, StringReader, Suggestion, SuggestionKind,
    allowed_unquoted, is_quote,
};
use mcfunction_util::MAX_SUGGESTIONS;

use crate::{
    schema::{NbtSchema, NbtTarget, SchemaNode},
    settings::DepthLimit,
    snbt::parse_compound,
    tag::NbtType,
};


/// Example values suggested for a tag of the given type.
pub fn tag_suggestions(tag_type: NbtType) -> &'static [&'static str] {
    match tag_type {
        NbtType::Byte      => &["-128b", "0b", "1b", "127b"],
        NbtType::Short     => &["-32768s", "0s", "1s", "32767s"],
        NbtType::Int       => &["-2147483648", "0", "1", "2147483647"],
        NbtType::Long      => &["0l", "1l"],
        NbtType::Float     => &["0f", "1f"],
        NbtType::Double    => &["0d", "1d"],
        NbtType::String    => &["\"\""],
        NbtType::List      => &["["],
        NbtType::Compound  => &["{"],
        NbtType::ByteArray => &["[B;"],
        NbtType::IntArray  => &["[I;"],
        NbtType::LongArray => &["[L;"],
    }
}

/// Suggestions for a partially written compound tag, `text`, which belongs to `target`.
///
/// Anchors are relative to `text`. A complete compound gets no suggestions.
pub fn suggest_compound(
    text:        &str,
    target:      Option<&NbtTarget>,
    schema:      &dyn NbtSchema,
    depth_limit: DepthLimit,
) -> Vec<Suggestion> {
    let mut reader = StringReader::new(text);
    let Err(err) = parse_compound(&mut reader, depth_limit) else {
        return Vec::new();
    };
    let hint = &err.hint;

    let node = target.and_then(|target| schema.node(target, &hint.path));
    let mut suggestions = Vec::new();

    match (hint.position, node) {
        (Some(ContainerPosition::Key), Some(node)) => {
            let quoted = hint.partial.starts_with(is_quote);
            let partial = hint.partial.trim_start_matches(is_quote);

            let keys = node.children
                .keys()
                .filter(|key| key.starts_with(partial) && !hint.existing_keys.contains(key))
                .map(|key| {
                    if quoted || !key.chars().all(allowed_unquoted) {
                        format!("\"{key}\"")
                    } else {
                        key.clone()
                    }
                });

            suggestions.extend(keys.map(|key| {
                Suggestion::new(key, hint.anchor, SuggestionKind::Field)
            }));
        }
        (Some(ContainerPosition::Value | ContainerPosition::ListItem), Some(node)) => {
            suggestions.extend(
                value_suggestions(node)
                    .filter(|value| value.starts_with(&hint.partial))
                    .map(|value| Suggestion::new(value, hint.anchor, SuggestionKind::Value)),
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

    log::trace!("NBT suggestions at {:?}: {} found", hint.path, suggestions.len());
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn value_suggestions(node: &SchemaNode) -> Box<dyn Iterator<Item = &str> + '_> {
    if node.suggestions.is_empty() {
        Box::new(tag_suggestions(node.kind).iter().copied())
    } else {
        Box::new(node.suggestions.iter().map(String::as_str))
    }
}
