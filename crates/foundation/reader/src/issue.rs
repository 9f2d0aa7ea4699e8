use std::fmt::Display;
use std::ops::Range;

#[cfg(feature = "derive_serde")]
use serde::Serialize;


#[cfg_attr(feature = "derive_serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    /// Advisory problems, such as a command which is valid so far but cannot be run yet.
    Warning,
}

/// A typed, positioned problem found while parsing a line. A line reports at most one.
#[cfg_attr(feature = "derive_serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dot-namespaced category, such as `argument.integer.big`.
    pub category: &'static str,
    pub message:  String,
    pub start:    usize,
    pub end:      usize,
    pub severity: Severity,
    /// Side-channel data left by compound argument parsers, so that completion can resume
    /// inside a partially-written value.
    pub hint:     Option<Box<ResumeHint>>,
}

impl Issue {
    pub fn new(
        category: &'static str,
        message:  String,
        span:     Range<usize>,
        severity: Severity,
    ) -> Self {
        Self {
            category,
            message,
            start: span.start,
            end:   span.end,
            severity,
            hint: None,
        }
    }

    pub fn from_error<E: Diagnose + ?Sized>(error: &E) -> Self {
        let mut issue = Self::new(error.category(), error.to_string(), error.span(), error.severity());
        issue.hint = error.resume_hint().cloned().map(Box::new);
        issue
    }

    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Implemented by every error type which can be reported as an [`Issue`].
/// The `Display` output is used as the issue's message.
pub trait Diagnose: Display {
    fn category(&self) -> &'static str;

    /// Byte offsets into the parsed line.
    fn span(&self) -> Range<usize>;

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn resume_hint(&self) -> Option<&ResumeHint> {
        None
    }
}

// ================================
//      Resume hints
// ================================

/// Where, inside a compound value, a parser stopped.
#[cfg_attr(feature = "derive_serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerPosition {
    /// A namespaced id at the start of a value, such as a block id.
    Identifier,
    /// A key of a compound, or the name of a block property.
    Key,
    /// The value of a compound entry or of a block property.
    Value,
    /// An element of a list or array.
    ListItem,
    /// Just before an optional trailing NBT compound.
    Nbt,
}

/// Structured failure context for compound values, such as block states and NBT.
///
/// All offsets are relative to the string the failing parser was given.
#[cfg_attr(feature = "derive_serde", derive(Serialize))]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResumeHint {
    /// Where a completion should be inserted.
    pub anchor:        usize,
    /// The text between `anchor` and the failure, which a completion would replace.
    pub partial:       String,
    /// Keys of the enclosing containers, outermost first.
    pub path:          Vec<String>,
    /// Keys already present in the innermost container.
    pub existing_keys: Vec<String>,
    pub position:      Option<ContainerPosition>,
    /// Literal text (such as closing brackets) known to be valid at the failure.
    pub completions:   Vec<String>,
}
