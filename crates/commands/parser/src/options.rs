use mcfunction_arguments::ArgumentOptions;
use mcfunction_datatypes::{DEFAULT_NAMESPACE, IdentifierParseOptions};
use mcfunction_nbt::DepthLimit;
use mcfunction_util::MAX_SUGGESTIONS;


/// Settings of a [`CommandParser`](crate::CommandParser), fixed when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// The most suggestions returned for one completion request.
    pub max_suggestions:   usize,
    /// The namespace of ids written without one, such as `stone` for `minecraft:stone`.
    pub default_namespace: &'static str,
    /// Lines of a function file starting with this character are comments.
    pub comment_prefix:    char,
    /// How deeply NBT compounds and lists may be nested.
    pub depth_limit:       DepthLimit,
}

impl ParseOptions {
    /// The options given to argument parsers.
    pub fn arguments(&self) -> ArgumentOptions {
        let mut identifiers = IdentifierParseOptions::command();
        identifiers.default_namespace = Some(self.default_namespace);

        ArgumentOptions {
            depth_limit: self.depth_limit,
            identifiers,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_suggestions:   MAX_SUGGESTIONS,
            default_namespace: DEFAULT_NAMESPACE,
            comment_prefix:    '#',
            depth_limit:       DepthLimit::default(),
        }
    }
}
