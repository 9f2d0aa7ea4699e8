use mcfunction_arguments::CommandContext;
use mcfunction_grammar::NodePath;
use mcfunction_reader::Issue;


/// The text of one node on the accepted path through the command tree.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedSpan {
    /// The node's name in its parent; for a literal, its keyword.
    pub name:    String,
    pub path:    NodePath,
    pub start:   usize,
    pub end:     usize,
    /// The context in effect for the nodes after this one.
    pub context: CommandContext,
}

impl MatchedSpan {
    /// The text of the span in `line`, the line it was parsed from.
    #[inline]
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }
}

/// Everything learned from parsing one line: the spans matched, in order, and the
/// single most specific problem, if there was one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseResult {
    pub spans: Vec<MatchedSpan>,
    pub issue: Option<Issue>,
}

impl ParseResult {
    /// Whether the line is a command which could be run.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.issue.is_none()
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.issue.as_ref().is_some_and(Issue::is_error)
    }
}

/// The result of parsing one line of a function file.
#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    /// One-based line number within the file.
    pub line:   usize,
    pub result: ParseResult,
}
