use std::sync::Arc;

use indexmap::IndexSet;

use mcfunction_arguments::{ArgumentParser, CommandContext, ParserRegistry, Registries};
use mcfunction_grammar::{CommandNode, NodeKind, NodePath};
use mcfunction_reader::{Issue, StringReader, Suggestion};
use mcfunction_util::InspectNone as _;

use crate::{
    error::WalkError,
    options::ParseOptions,
    result::{LineResult, ParseResult},
    rules::ContextRules,
    walker::{Frontier, Walker},
};


/// Parses lines of commands against a command tree, reporting what matched and what
/// went wrong, and suggests completions.
///
/// Everything here is read-only after construction, so one parser can be shared between
/// threads and used for any number of lines at once.
#[derive(Debug, Clone)]
pub struct CommandParser {
    tree:     Arc<CommandNode>,
    registry: Arc<ParserRegistry>,
    rules:    Arc<ContextRules>,
    options:  ParseOptions,
}

impl CommandParser {
    /// A parser using the built-in argument parsers, which check blocks and NBT
    /// against `registries`.
    pub fn new(tree: Arc<CommandNode>, registries: Arc<Registries>, options: ParseOptions) -> Self {
        let registry = ParserRegistry::with_defaults(registries, options.arguments());
        Self::with_registry(tree, Arc::new(registry), options)
    }

    /// A parser using exactly the argument parsers in `registry`.
    pub fn with_registry(
        tree:     Arc<CommandNode>,
        registry: Arc<ParserRegistry>,
        options:  ParseOptions,
    ) -> Self {
        let mut unsupported = Vec::new();
        collect_unsupported(&tree, &registry, &mut unsupported);
        unsupported.sort_unstable();
        unsupported.dedup();
        if !unsupported.is_empty() {
            log::warn!(
                "Arguments of these types will never match: {}",
                unsupported.join(", "),
            );
        }

        Self {
            tree,
            registry,
            rules: Arc::new(ContextRules::default()),
            options,
        }
    }

    /// Apply `rules` to the context whenever a node they name is matched.
    #[must_use]
    pub fn with_context_rules(mut self, rules: Arc<ContextRules>) -> Self {
        self.rules = rules;
        self
    }

    #[inline]
    pub fn tree(&self) -> &CommandNode {
        &self.tree
    }

    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    // ================================
    //      Parsing
    // ================================

    /// Parse a whole command, starting from the root of the tree.
    pub fn parse_line(&self, text: &str, context: &CommandContext) -> ParseResult {
        self.parse_from(text, &NodePath::root(), context)
    }

    /// Parse `text` as what follows the node at `start`, such as the command after
    /// `execute run`.
    pub fn parse_from(&self, text: &str, start: &NodePath, context: &CommandContext) -> ParseResult {
        let Some(node) = self.tree.node_at(start.segments()) else {
            log::warn!("Cannot parse from '{start}', which is not in the command tree");
            let issue = WalkError::NoSuccess {
                remaining: text.to_owned(),
                span:      0..text.len(),
            };
            return ParseResult {
                spans: Vec::new(),
                issue: Some(Issue::from_error(&issue)),
            };
        };

        let mut walker = Walker::new(&self.tree, &self.registry, &self.rules);
        let mut reader = StringReader::new(text);
        let issue = walker.parse_children(node, &mut reader, start.clone(), context.clone());
        let (spans, _) = walker.into_parts();

        ParseResult { spans, issue }
    }

    /// Parse every command of a function file. Blank lines and comments are skipped.
    pub fn parse_function(&self, text: &str, context: &CommandContext) -> Vec<LineResult> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !self.is_skipped(line))
            .map(|(index, line)| LineResult {
                line:   index + 1,
                result: self.parse_line(line, context),
            })
            .collect()
    }

    /// Whether a line of a function file is not a command.
    pub fn is_skipped(&self, line: &str) -> bool {
        let line = line.trim_start();
        line.is_empty() || line.starts_with(self.options.comment_prefix)
    }

    // ================================
    //      Suggestions
    // ================================

    /// Completions at byte offset `cursor` of a whole command.
    pub fn suggest(&self, text: &str, cursor: usize, context: &CommandContext) -> Vec<Suggestion> {
        self.suggest_from(text, cursor, &NodePath::root(), context)
    }

    /// Completions at byte offset `cursor` of `text`, which follows the node at `start`.
    ///
    /// Only the text before the cursor is considered. Each suggestion replaces the text from
    /// its anchor up to the cursor.
    pub fn suggest_from(
        &self,
        text:    &str,
        cursor:  usize,
        start:   &NodePath,
        context: &CommandContext,
    ) -> Vec<Suggestion> {
        let node = self.tree
            .node_at(start.segments())
            .inspect_none(|| log::debug!("No suggestions after '{start}', which is not in the command tree"));
        let Some(node) = node else {
            return Vec::new();
        };

        let mut cursor = cursor.min(text.len());
        while !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let text = &text[..cursor];

        let mut walker = Walker::new(&self.tree, &self.registry, &self.rules);
        let mut reader = StringReader::new(text);
        walker.parse_children(node, &mut reader, start.clone(), context.clone());

        let (_, frontier) = walker.into_parts();
        frontier
            .map(|frontier| self.frontier_suggestions(text, &frontier))
            .unwrap_or_default()
    }

    /// Ask every child of the frontier node to complete the text after the frontier.
    fn frontier_suggestions(&self, text: &str, frontier: &Frontier<'_>) -> Vec<Suggestion> {
        let prefix = &text[frontier.begin..];
        log::trace!("Suggesting for '{prefix}' after '{}'", frontier.path);

        let children = frontier.node
            .literal_children()
            .chain(frontier.node.argument_children());

        let mut suggestions = IndexSet::new();
        for (name, child) in children {
            let Some(parser) = self.parser_for(child) else {
                continue;
            };

            let found = parser.suggestions(prefix, &child.properties(name), &frontier.context);
            suggestions.extend(found.into_iter().map(|suggestion| suggestion.shifted(frontier.begin)));

            if suggestions.len() >= self.options.max_suggestions {
                break;
            }
        }

        suggestions
            .into_iter()
            .take(self.options.max_suggestions)
            .collect()
    }

    fn parser_for(&self, node: &CommandNode) -> Option<&Arc<dyn ArgumentParser>> {
        match node.kind {
            NodeKind::Literal  => Some(self.registry.literal()),
            NodeKind::Argument => node.parser.as_deref().and_then(|id| self.registry.get(id)),
            NodeKind::Root     => None,
        }
    }
}

fn collect_unsupported<'a>(
    node:        &'a CommandNode,
    registry:    &ParserRegistry,
    unsupported: &mut Vec<&'a str>,
) {
    for (_, child) in node.argument_children() {
        if let Some(id) = child.parser.as_deref() {
            if !registry.contains(id) {
                unsupported.push(id);
            }
        }
    }
    for (_, child) in node.literal_children().chain(node.argument_children()) {
        collect_unsupported(child, registry, unsupported);
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::thread;

    use serde_json::json;

    use mcfunction_arguments::{ArgumentError, ArgumentOptions, JsonBlockRegistry};
    use mcfunction_grammar::NodeProperties;
    use mcfunction_nbt::{JsonNbtSchema, NbtTargetKind};
    use mcfunction_reader::{Severity, SuggestionKind};

    use super::*;


    fn parser(tree: serde_json::Value) -> CommandParser {
        let tree = CommandNode::from_value(tree).unwrap();
        CommandParser::new(Arc::new(tree), Arc::new(Registries::empty()), ParseOptions::default())
    }

    fn scenario_tree() -> CommandParser {
        parser(json!({
            "type": "root",
            "children": {
                "test1": { "type": "literal", "executable": true },
                "test2": {
                    "type": "literal",
                    "children": {
                        "int": {
                            "type": "argument",
                            "parser": "brigadier:integer",
                            "properties": { "min": -10, "max": 100 },
                            "executable": true
                        }
                    }
                },
                "help": { "type": "literal", "executable": true },
                "hello": { "type": "literal", "executable": true }
            }
        }))
    }

    fn names(result: &ParseResult) -> Vec<(&str, usize, usize)> {
        result.spans
            .iter()
            .map(|span| (span.name.as_str(), span.start, span.end))
            .collect()
    }

    #[test]
    fn executable_literal() {
        let result = scenario_tree().parse_line("test1", &CommandContext::new());
        assert_eq!(names(&result), [("test1", 0, 5)]);
        assert!(result.is_ok(), "unexpected issue {:?}", result.issue);
    }

    #[test]
    fn integer_bounds() {
        let parser = scenario_tree();

        let result = parser.parse_line("test2 500", &CommandContext::new());
        let issue = result.issue.as_ref().unwrap();
        assert_eq!(issue.category, "argument.integer.big");
        assert_eq!(issue.span(), 6..9);
        assert_eq!(names(&result), [("test2", 0, 5)]);

        let result = parser.parse_line("test2 50", &CommandContext::new());
        assert_eq!(names(&result), [("test2", 0, 5), ("int", 6, 8)]);
        assert!(result.is_ok(), "unexpected issue {:?}", result.issue);
    }

    #[test]
    fn bound_clamping() {
        let parser = parser(json!({
            "type": "root",
            "children": {
                "value": {
                    "type": "argument",
                    "parser": "brigadier:integer",
                    "properties": { "min": -10 },
                    "executable": true
                }
            }
        }));

        let issue = parser.parse_line("-999999999999", &CommandContext::new()).issue.unwrap();
        assert_eq!(issue.category, "argument.integer.low");
        assert_eq!(issue.start, 0);
        assert!(issue.message.contains("-10"), "message should name the bound: {}", issue.message);
    }

    #[test]
    fn empty_lines() {
        let result = scenario_tree().parse_line("", &CommandContext::new());
        let issue = result.issue.unwrap();
        assert_eq!(issue.category, "command.parsing.incomplete");
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.span(), 0..0);
        assert!(result.spans.is_empty(), "nothing to match");

        let parser = parser(json!({ "type": "root", "executable": true }));
        assert!(parser.parse_line("", &CommandContext::new()).is_ok(), "an executable root accepts nothing");
    }

    #[test]
    fn incomplete_and_trailing() {
        let parser = scenario_tree();
        let context = CommandContext::new();

        let issue = parser.parse_line("test2", &context).issue.unwrap();
        assert_eq!(issue.category, "command.parsing.incomplete");
        assert_eq!(issue.span(), 0..5);

        let issue = parser.parse_line("test2 ", &context).issue.unwrap();
        assert_eq!(issue.category, "command.parsing.incomplete");

        let issue = parser.parse_line("test1 ", &context).issue.unwrap();
        assert_eq!(issue.category, "command.parsing.trailing");
        assert_eq!(issue.span(), 5..6);
        assert!(!issue.is_error(), "a trailing separator is only a warning");
    }

    #[test]
    fn structural_errors() {
        let parser = scenario_tree();
        let context = CommandContext::new();

        let issue = parser.parse_line("test1 extra", &context).issue.unwrap();
        assert_eq!(issue.category, "command.parsing.childless");
        assert_eq!(issue.span(), 5..11);

        let issue = parser.parse_line("unknown", &context).issue.unwrap();
        assert_eq!(issue.category, "command.parsing.matchless");
        assert_eq!(issue.span(), 0..7);

        let issue = parser.parse_line("test2 5x", &context).issue.unwrap();
        assert_eq!(issue.category, "command.parsing.whitespace");
        assert_eq!(issue.span(), 7..8);
    }

    #[test]
    fn literal_priority() {
        let parser = parser(json!({
            "type": "root",
            "children": {
                "anything": {
                    "type": "argument",
                    "parser": "brigadier:string",
                    "properties": { "type": "word" },
                    "executable": true
                },
                "test": { "type": "literal", "executable": true }
            }
        }));

        let result = parser.parse_line("test", &CommandContext::new());
        assert_eq!(names(&result), [("test", 0, 4)]);

        let result = parser.parse_line("other", &CommandContext::new());
        assert_eq!(names(&result), [("anything", 0, 5)]);
    }

    #[test]
    fn determinism_and_round_trip() {
        let parser = scenario_tree();
        let context = CommandContext::new();

        for line in ["test1", "test2 50", "test2 -10", "hello"] {
            let first = parser.parse_line(line, &context);
            let second = parser.parse_line(line, &context);
            assert_eq!(first, second, "parsing '{line}' twice differs");

            let rebuilt: Vec<_> = first.spans.iter().map(|span| span.text(line)).collect();
            assert_eq!(rebuilt.join(" "), line);
        }
    }

    #[test]
    fn redirects_and_execute_run() {
        let parser = parser(json!({
            "type": "root",
            "children": {
                "execute": {
                    "type": "literal",
                    "children": {
                        "as": {
                            "type": "literal",
                            "children": {
                                "name": {
                                    "type": "argument",
                                    "parser": "minecraft:game_profile",
                                    "redirect": ["execute"]
                                }
                            }
                        },
                        "run": { "type": "literal" }
                    }
                },
                "say": {
                    "type": "literal",
                    "children": {
                        "message": {
                            "type": "argument",
                            "parser": "brigadier:string",
                            "properties": { "type": "greedy" },
                            "executable": true
                        }
                    }
                }
            }
        }));

        let line = "execute as Steve as Alex run say hi there";
        let result = parser.parse_line(line, &CommandContext::new());
        assert!(result.is_ok(), "unexpected issue {:?}", result.issue);

        let paths: Vec<_> = result.spans.iter().map(|span| span.path.to_string()).collect();
        assert_eq!(
            paths,
            [
                "execute", "execute as", "execute as name", "execute as",
                "execute as name", "execute run", "say", "say message",
            ],
        );
        assert_eq!(result.spans.last().unwrap().text(line), "hi there");

        let start: NodePath = ["say"].into_iter().collect();
        let result = parser.parse_from("hi there", &start, &CommandContext::new());
        assert_eq!(names(&result), [("message", 0, 8)]);
        assert_eq!(result.spans[0].path.to_string(), "say message");
    }

    #[test]
    fn best_candidate() {
        let parser = parser(json!({
            "type": "root",
            "children": {
                "word": {
                    "type": "argument",
                    "parser": "brigadier:string",
                    "properties": { "type": "word" },
                    "executable": true
                },
                "number": {
                    "type": "argument",
                    "parser": "brigadier:integer",
                    "executable": true
                }
            }
        }));

        // The word parser stops at `$` and so misses a separator, but the
        // integer parser's own error is more specific
        let issue = parser.parse_line("ab$", &CommandContext::new()).issue.unwrap();
        assert_eq!(issue.category, "parsing.int.expected");
    }

    #[test]
    fn context_from_rules_and_arguments() {
        let tree = CommandNode::from_value(json!({
            "type": "root",
            "children": {
                "summon": {
                    "type": "literal",
                    "children": {
                        "entity": {
                            "type": "argument",
                            "parser": "minecraft:resource_location",
                            "children": {
                                "nbt": {
                                    "type": "argument",
                                    "parser": "minecraft:nbt_compound_tag",
                                    "executable": true
                                }
                            }
                        }
                    }
                },
                "setblock": {
                    "type": "literal",
                    "children": {
                        "pos": {
                            "type": "argument",
                            "parser": "minecraft:block_pos",
                            "children": {
                                "block": {
                                    "type": "argument",
                                    "parser": "minecraft:block_state",
                                    "executable": true
                                }
                            }
                        }
                    }
                }
            }
        })).unwrap();
        let blocks = JsonBlockRegistry::from_json(r#"{ "minecraft:chest": {} }"#).unwrap();
        let schema = JsonNbtSchema::from_json(r#"{
            "entity": {
                "minecraft:zombie": {
                    "type": "compound",
                    "children": { "IsBaby": { "type": "byte" } }
                }
            }
        }"#).unwrap();
        let rules = ContextRules::from_json(r#"{
            "children": { "summon": { "children": { "entity": {
                "context": { "nbt_target": { "kind": "entity", "id": "%2$s" } }
            } } } }
        }"#).unwrap();

        let registries = Registries::new(Arc::new(blocks), Arc::new(schema));
        let parser = CommandParser::new(Arc::new(tree), Arc::new(registries), ParseOptions::default())
            .with_context_rules(Arc::new(rules));
        let context = CommandContext::new();

        let result = parser.parse_line("summon minecraft:zombie {IsBaby: 1b}", &context);
        assert!(result.is_ok(), "unexpected issue {:?}", result.issue);
        let target = result.spans[1].context.nbt_target().unwrap();
        assert_eq!(target.kind, NbtTargetKind::Entity);
        assert_eq!(target.id.as_deref(), Some("minecraft:zombie"));
        assert_eq!(result.spans[0].context.nbt_target(), None);

        let suggestions = parser.suggest("summon minecraft:zombie {", 25, &context);
        assert_eq!(suggestions, [Suggestion::new("IsBaby", 25, SuggestionKind::Field)]);

        let result = parser.parse_line("setblock ~ ~1 ~ minecraft:chest", &context);
        assert!(result.is_ok(), "unexpected issue {:?}", result.issue);
        let target = result.spans[2].context.nbt_target().unwrap();
        assert_eq!(target.kind, NbtTargetKind::Block);
        assert_eq!(target.id.as_deref(), Some("minecraft:chest"));

        let issue = parser.parse_line("setblock ~ ~1 ~ minecraft:nonblock", &context).issue.unwrap();
        assert_eq!(issue.category, "argument.block.id.invalid");
        assert_eq!(issue.span(), 16..34);
    }

    /// Records where each call to `parse` started, then fails.
    #[derive(Debug, Default)]
    struct Recorder {
        starts: Mutex<Vec<usize>>,
    }

    impl ArgumentParser for Recorder {
        fn parse(
            &self,
            reader:      &mut StringReader<'_>,
            _properties: &NodeProperties<'_>,
            _context:    &CommandContext,
        ) -> Result<Option<CommandContext>, ArgumentError> {
            self.starts.lock().unwrap().push(reader.cursor());
            reader.read_remaining();
            Err(ArgumentError::ExpectedString { position: reader.cursor() })
        }
    }

    #[test]
    fn cursor_restored_between_attempts() {
        let tree = CommandNode::from_value(json!({
            "type": "root",
            "children": {
                "cmd": {
                    "type": "literal",
                    "children": {
                        "first":  { "type": "argument", "parser": "test:recorder" },
                        "second": { "type": "argument", "parser": "test:recorder" },
                        "third":  { "type": "argument", "parser": "test:recorder" }
                    }
                }
            }
        })).unwrap();

        let recorder = Arc::new(Recorder::default());
        let mut registry = ParserRegistry::with_defaults(
            Arc::new(Registries::empty()),
            ArgumentOptions::default(),
        );
        registry.register("test:recorder", recorder.clone());

        let parser = CommandParser::with_registry(
            Arc::new(tree),
            Arc::new(registry),
            ParseOptions::default(),
        );
        let result = parser.parse_line("cmd some text", &CommandContext::new());

        assert_eq!(*recorder.starts.lock().unwrap(), [4, 4, 4]);
        assert_eq!(result.issue.unwrap().category, "argument.string.expected");
    }

    #[test]
    fn literal_suggestions() {
        let parser = scenario_tree();
        let suggestions = parser.suggest("he", 2, &CommandContext::new());

        assert_eq!(
            suggestions,
            [
                Suggestion::new("help", 0, SuggestionKind::Keyword),
                Suggestion::new("hello", 0, SuggestionKind::Keyword),
            ],
        );
    }

    #[test]
    fn suggestions_after_separator() {
        let parser = parser(json!({
            "type": "root",
            "children": {
                "set": {
                    "type": "literal",
                    "children": {
                        "on":    { "type": "literal", "executable": true },
                        "off":   { "type": "literal", "executable": true },
                        "value": { "type": "argument", "parser": "brigadier:bool", "executable": true }
                    }
                }
            }
        }));
        let context = CommandContext::new();

        let texts = |text: &str, cursor: usize| -> Vec<(String, usize)> {
            parser.suggest(text, cursor, &context)
                .into_iter()
                .map(|suggestion| (suggestion.text, suggestion.anchor))
                .collect()
        };

        assert_eq!(
            texts("set ", 4),
            [
                ("on".to_owned(), 4),
                ("off".to_owned(), 4),
                ("true".to_owned(), 4),
                ("false".to_owned(), 4),
            ],
        );
        assert_eq!(texts("set o", 5), [("on".to_owned(), 4), ("off".to_owned(), 4)]);
        // Text after the cursor is ignored
        assert_eq!(texts("set tr and more", 6), [("true".to_owned(), 4)]);
        assert_eq!(texts("s", 1), [("set".to_owned(), 0)]);
        assert!(texts("nothing ", 8).is_empty(), "no node matched");
    }

    #[test]
    fn suggestion_anchors() {
        let parser = scenario_tree();
        let context = CommandContext::new();

        for text in ["", "t", "test", "test2 ", "test2 5", "hel"] {
            for suggestion in parser.suggest(text, text.len(), &context) {
                assert!(suggestion.anchor <= text.len(), "anchor past the cursor in '{text}'");

                let accepted = format!("{}{}", &text[..suggestion.anchor], suggestion.text);
                let before = parser.parse_line(text, &context).spans.len();
                let after = parser.parse_line(&accepted, &context).spans.len();
                assert!(after >= before, "accepting '{}' in '{text}' lost matches", suggestion.text);
            }
        }
    }

    #[test]
    fn suggestion_cap() {
        let children: serde_json::Map<_, _> = (0..150)
            .map(|n| (format!("cmd{n}"), json!({ "type": "literal", "executable": true })))
            .collect();
        let parser = parser(json!({ "type": "root", "children": children }));

        assert_eq!(parser.suggest("cmd", 3, &CommandContext::new()).len(), 100);
    }

    #[test]
    fn function_files() {
        let parser = scenario_tree();
        let text = "# a comment\ntest1\n\n  \ntest2 500\r\nunknown\n";

        let lines = parser.parse_function(text, &CommandContext::new());
        let numbers: Vec<_> = lines.iter().map(|line| line.line).collect();
        assert_eq!(numbers, [2, 5, 6]);

        assert!(lines[0].result.is_ok(), "test1 is a complete command");
        assert!(lines[1].result.has_error(), "500 is out of range");
        assert!(lines[2].result.has_error(), "unknown is not a command");
    }

    #[test]
    fn shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CommandParser>();
        assert_send_sync::<ParseResult>();

        let parser = scenario_tree();
        let expected = parser.parse_line("test2 50", &CommandContext::new());

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let result = parser.parse_line("test2 50", &CommandContext::new());
                    assert_eq!(result, expected, "results differ between threads");
                });
            }
        });
    }
}
