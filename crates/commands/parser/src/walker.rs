use std::iter;
use std::ops::Range;

use mcfunction_arguments::{ArgumentError, CommandContext, ParserRegistry};
use mcfunction_grammar::{CommandNode, NodePath};
use mcfunction_reader::{ARGUMENT_SEPARATOR, Issue, StringReader};

use crate::{
    error::WalkError,
    result::MatchedSpan,
    rules::ContextRules,
};


/// The innermost node whose children were being matched when the walk stopped, which is
/// where completion resumes.
#[derive(Debug, Clone)]
pub(crate) struct Frontier<'t> {
    pub(crate) node:    &'t CommandNode,
    /// Where the children's text starts.
    pub(crate) begin:   usize,
    pub(crate) path:    NodePath,
    pub(crate) context: CommandContext,
}

/// A failed attempt at an argument child, kept in case no child matches.
#[derive(Debug)]
enum Candidate {
    Argument(ArgumentError),
    Separator(WalkError),
}

impl Candidate {
    /// Errors from an argument's own type say the most about what went wrong.
    fn rank(&self) -> u8 {
        match self {
            Self::Argument(_)  => 2,
            Self::Separator(_) => 1,
        }
    }

    fn into_issue(self) -> Issue {
        match self {
            Self::Argument(err)  => Issue::from_error(&err),
            Self::Separator(err) => Issue::from_error(&err),
        }
    }
}

#[derive(Debug)]
struct Accepted<'t> {
    name:    &'t str,
    node:    &'t CommandNode,
    context: CommandContext,
}

/// Matches one line against the command tree, depth-first, keeping the first child of
/// each node which matches.
#[derive(Debug)]
pub(crate) struct Walker<'t> {
    tree:     &'t CommandNode,
    registry: &'t ParserRegistry,
    rules:    &'t ContextRules,
    spans:    Vec<MatchedSpan>,
    frontier: Option<Frontier<'t>>,
}

impl<'t> Walker<'t> {
    pub(crate) fn new(
        tree:     &'t CommandNode,
        registry: &'t ParserRegistry,
        rules:    &'t ContextRules,
    ) -> Self {
        Self {
            tree,
            registry,
            rules,
            spans:    Vec::new(),
            frontier: None,
        }
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (Vec<MatchedSpan>, Option<Frontier<'t>>) {
        (self.spans, self.frontier)
    }

    /// Match the children of `node`, which is at `path`, against the text at the reader's
    /// cursor, and recurse into the subtree of the child which matched.
    pub(crate) fn parse_children(
        &mut self,
        node:    &'t CommandNode,
        reader:  &mut StringReader<'_>,
        path:    NodePath,
        context: CommandContext,
    ) -> Option<Issue> {
        let begin = reader.cursor();
        self.frontier = Some(Frontier {
            node,
            begin,
            path: path.clone(),
            context: context.clone(),
        });

        if !reader.can_read() {
            return (!node.executable).then(|| incomplete(reader));
        }

        let accepted = match self.match_literal(node, reader, &context) {
            Some(accepted) => accepted,
            None => match self.match_argument(node, reader, &context) {
                Ok(accepted) => accepted,
                Err(issue) => return Some(issue),
            },
        };

        let end = reader.cursor();
        let child_path = path.child(accepted.name);
        log::trace!("Matched '{child_path}' at {begin}..{end}");

        let context = self.adopt(&child_path, accepted.context, reader.string(), begin..end);
        self.spans.push(MatchedSpan {
            name:    accepted.name.to_owned(),
            path:    child_path.clone(),
            start:   begin,
            end,
            context: context.clone(),
        });

        self.parse_after(accepted.node, reader, child_path, context)
    }

    /// Literals are tried in the order they are declared, and only the keyword has to match.
    fn match_literal(
        &self,
        node:    &'t CommandNode,
        reader:  &mut StringReader<'_>,
        context: &CommandContext,
    ) -> Option<Accepted<'t>> {
        let begin = reader.cursor();

        for (name, child) in node.literal_children() {
            log::trace!("Trying literal '{name}' at {begin}");

            let matched = self.registry
                .literal()
                .parse(reader, &child.properties(name), context);

            if matched.is_ok() && at_separator(reader) {
                return Some(Accepted { name, node: child, context: context.clone() });
            }
            reader.set_cursor(begin);
        }

        None
    }

    /// Arguments are tried in the order they are declared; if none match, the most
    /// specific of their errors is returned.
    fn match_argument(
        &self,
        node:    &'t CommandNode,
        reader:  &mut StringReader<'_>,
        context: &CommandContext,
    ) -> Result<Accepted<'t>, Issue> {
        let begin = reader.cursor();
        let mut best: Option<Candidate> = None;

        for (name, child) in node.argument_children() {
            let Some(parser) = child.parser.as_deref().and_then(|id| self.registry.get(id)) else {
                log::trace!("Skipping argument '{name}' with unsupported parser {:?}", child.parser);
                continue;
            };
            log::trace!("Trying argument '{name}' at {begin}");

            let candidate = match parser.parse(reader, &child.properties(name), context) {
                Ok(new_context) if at_separator(reader) => {
                    let context = new_context.unwrap_or_else(|| context.clone());
                    return Ok(Accepted { name, node: child, context });
                }
                Ok(_) => {
                    log::debug!("Argument '{name}' at {begin} is not followed by a separator");
                    Candidate::Separator(WalkError::MissingArgumentSeparator {
                        found: reader.get_remaining().to_owned(),
                        span:  reader.cursor()..reader.total_length(),
                    })
                }
                Err(err) => {
                    log::debug!("Argument '{name}' failed at {begin}: {err}");
                    Candidate::Argument(err)
                }
            };
            reader.set_cursor(begin);

            if best.as_ref().is_none_or(|best| candidate.rank() > best.rank()) {
                best = Some(candidate);
            }
        }

        Err(best.map_or_else(
            || Issue::from_error(&WalkError::NoSuccess {
                remaining: reader.get_remaining().to_owned(),
                span:      begin..reader.total_length(),
            }),
            Candidate::into_issue,
        ))
    }

    /// Apply the context rule of the node just matched, if there is one.
    fn adopt(
        &self,
        path:    &NodePath,
        context: CommandContext,
        line:    &str,
        span:    Range<usize>,
    ) -> CommandContext {
        if self.rules.is_empty() {
            return context;
        }

        let args: Vec<&str> = self.spans
            .iter()
            .map(|span| span.text(line))
            .chain(iter::once(&line[span]))
            .collect();
        self.rules.apply(path, context, &args)
    }

    /// Continue after `node`, at `path`, has matched the text just before the cursor.
    fn parse_after(
        &mut self,
        node:    &'t CommandNode,
        reader:  &mut StringReader<'_>,
        path:    NodePath,
        context: CommandContext,
    ) -> Option<Issue> {
        if !reader.can_read() {
            return (!node.executable).then(|| incomplete(reader));
        }

        let separator = reader.cursor();
        reader.skip();
        let continuation = self.tree.continuation(node, &path);

        if !reader.can_read() {
            // Completion continues with the children, even though parsing can't
            if let Some((next, next_path)) = continuation {
                self.frontier = Some(Frontier {
                    node:    next,
                    begin:   reader.cursor(),
                    path:    next_path,
                    context,
                });
            }

            return Some(if node.executable {
                Issue::from_error(&WalkError::UnexpectedTrailingSeparator {
                    span: separator..reader.cursor(),
                })
            } else {
                incomplete(reader)
            });
        }

        match continuation {
            Some((next, next_path)) => self.parse_children(next, reader, next_path, context),
            None => Some(Issue::from_error(&WalkError::NoChildren {
                span: separator..reader.total_length(),
            })),
        }
    }
}

/// Whether the reader is just before an argument separator or at the end of the line.
#[inline]
fn at_separator(reader: &StringReader<'_>) -> bool {
    reader.peek().is_none_or(|ch| ch == ARGUMENT_SEPARATOR)
}

fn incomplete(reader: &StringReader<'_>) -> Issue {
    Issue::from_error(&WalkError::IncompleteCommand {
        command: reader.string().to_owned(),
        span:    0..reader.total_length(),
    })
}
