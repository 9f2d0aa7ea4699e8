#[cfg(feature = "derive_serde")]
use serde::Serialize;


/// How an editor should present a suggestion.
#[cfg_attr(feature = "derive_serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    Keyword,
    Value,
    Property,
    Enum,
    Field,
    Method,
    Interface,
    Text,
}

/// Replace the text from `anchor` up to the cursor with `text`.
#[cfg_attr(feature = "derive_serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suggestion {
    pub text:   String,
    pub anchor: usize,
    pub kind:   SuggestionKind,
}

impl Suggestion {
    #[inline]
    pub fn new<S: Into<String>>(text: S, anchor: usize, kind: SuggestionKind) -> Self {
        Self { text: text.into(), anchor, kind }
    }

    /// Move the anchor from being relative to a substring to being relative to the string
    /// containing it, where the substring started at `offset`.
    #[inline]
    pub fn shifted(mut self, offset: usize) -> Self {
        self.anchor += offset;
        self
    }
}
