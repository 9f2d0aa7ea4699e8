use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;


/// The namespace assumed by commands when an identifier has none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";


/// Namespaced identifiers are also known as resource locations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespacedIdentifier {
    pub namespace: Box<str>,
    pub path:      Box<str>,
}

impl NamespacedIdentifier {
    pub fn parse_string(
        identifier: &str,
        opts:       IdentifierParseOptions,
    ) -> Result<Self, IdentifierParseError> {
        // `path_start` is the byte offset of the path within `identifier`
        let (namespace, path, path_start) = match identifier.find(':') {
            // "+ 1" because the UTF-8 byte length of ':' is 1
            Some(colon_pos) => (
                &identifier[..colon_pos],
                &identifier[colon_pos + 1..],
                colon_pos + 1,
            ),
            None => {
                if let Some(namespace) = opts.default_namespace {
                    (namespace, identifier, 0)
                } else {
                    return Err(IdentifierParseError::InvalidIdentifier(identifier.to_owned()));
                }
            }
        };

        if identifier.is_empty() || path.is_empty() {
            return Err(IdentifierParseError::InvalidIdentifier(identifier.to_owned()));
        }

        let namespace_error = |index: usize, ch: char| {
            IdentifierParseError::InvalidNamespaceCharacter {
                identifier: identifier.to_owned(),
                index,
                ch,
            }
        };
        let path_error = |index: usize, ch: char| {
            IdentifierParseError::InvalidPathCharacter {
                identifier: identifier.to_owned(),
                index: path_start + index,
                ch,
            }
        };

        // Validate the namespace and path
        if opts.java_character_constraints {
            // If we can find a character which is not allowed, return an error.
            // A default namespace is trusted, so only a written namespace is checked.
            if path_start != 0 {
                if let Some((index, ch)) = namespace
                    .char_indices()
                    .find(|&(_, ch)| !allowed_in_namespace(ch))
                {
                    return Err(namespace_error(index, ch));
                }
            }

            if let Some((index, ch)) = path.char_indices().find(|&(_, ch)| !allowed_in_path(ch)) {
                return Err(path_error(index, ch));
            }
        } else {
            // The character constraints used by Bedrock are a lot looser
            if let Some(index) = namespace.find('/') {
                return Err(namespace_error(index, '/'));
            }
            if let Some(index) = path.find(':') {
                return Err(path_error(index, ':'));
            }
        }

        Ok(Self {
            namespace: namespace.into(),
            path:      path.into(),
        })
    }

    #[inline]
    pub fn is_default_namespace(&self) -> bool {
        &*self.namespace == DEFAULT_NAMESPACE
    }
}

impl Display for NamespacedIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Java Edition's restriction on the characters of a namespace.
#[inline]
pub fn allowed_in_namespace(ch: char) -> bool {
    ch.is_ascii_digit() || ch.is_ascii_lowercase() || matches!(ch, '_' | '-' | '.')
}

/// Java Edition's restriction on the characters of a path, which may also contain `/`.
#[inline]
pub fn allowed_in_path(ch: char) -> bool {
    allowed_in_namespace(ch) || ch == '/'
}

/// Parse options for [`NamespacedIdentifier`]s, also known as Resource Locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierParseOptions {
    /// If `Some`, if the `namespace:` part of `namespace:path` is missing, assume
    /// that the namespace is this string. If this is `None` and a namespace is missing,
    /// an error is returned from appropriate functions.
    pub default_namespace:          Option<&'static str>,
    /// If true, use Java Edition's stricter restrictions for the characters
    /// which may appear in a [`NamespacedIdentifier`].
    pub java_character_constraints: bool,
}

impl IdentifierParseOptions {
    /// The options used for identifiers written in commands: the namespace defaults to
    /// [`DEFAULT_NAMESPACE`], and Java Edition's character constraints apply.
    #[inline]
    pub fn command() -> Self {
        Self {
            default_namespace:          Some(DEFAULT_NAMESPACE),
            java_character_constraints: true,
        }
    }
}

impl Default for IdentifierParseOptions {
    /// Defaults to the strictest settings.
    #[inline]
    fn default() -> Self {
        Self {
            default_namespace:          None,
            java_character_constraints: true,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierParseError {
    #[error("expected a string identifier in the form \"namespace:path\", but received \"{0}\"")]
    InvalidIdentifier(String),
    #[error("invalid character '{ch}' in the namespace of \"{identifier}\"")]
    InvalidNamespaceCharacter {
        identifier: String,
        /// Byte offset of `ch` in `identifier`.
        index:      usize,
        ch:         char,
    },
    #[error("invalid character '{ch}' in the path of \"{identifier}\"")]
    InvalidPathCharacter {
        identifier: String,
        /// Byte offset of `ch` in `identifier`.
        index:      usize,
        ch:         char,
    },
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn default_namespace() {
        let id = NamespacedIdentifier::parse_string("stone", IdentifierParseOptions::command());
        let id = id.unwrap();
        assert!(id.is_default_namespace());
        assert_eq!(id.to_string(), "minecraft:stone");
    }

    #[test]
    fn missing_namespace() {
        let err = NamespacedIdentifier::parse_string("stone", IdentifierParseOptions::default());
        assert!(matches!(err, Err(IdentifierParseError::InvalidIdentifier(_))));
    }

    #[test]
    fn explicit_namespace() {
        let opts = IdentifierParseOptions::command();
        let id = NamespacedIdentifier::parse_string("my_pack:util/tick", opts).unwrap();
        assert_eq!(&*id.namespace, "my_pack");
        assert_eq!(&*id.path, "util/tick");
    }

    #[test]
    fn invalid_characters() {
        let opts = IdentifierParseOptions::command();

        assert_eq!(
            NamespacedIdentifier::parse_string("Stone", opts),
            Err(IdentifierParseError::InvalidPathCharacter {
                identifier: "Stone".to_owned(),
                index:      0,
                ch:         'S',
            }),
        );
        assert!(matches!(
            NamespacedIdentifier::parse_string("my/pack:a", opts),
            Err(IdentifierParseError::InvalidNamespaceCharacter { index: 2, ch: '/', .. }),
        ));
        assert!(matches!(
            NamespacedIdentifier::parse_string("a:b:c", opts),
            Err(IdentifierParseError::InvalidPathCharacter { index: 3, ch: ':', .. }),
        ));
    }

    #[test]
    fn empty_path() {
        let opts = IdentifierParseOptions::command();
        assert!(NamespacedIdentifier::parse_string("minecraft:", opts).is_err());
        assert!(NamespacedIdentifier::parse_string("", opts).is_err());
    }

    #[test]
    fn bedrock_constraints() {
        let opts = IdentifierParseOptions {
            default_namespace:          None,
            java_character_constraints: false,
        };
        assert!(NamespacedIdentifier::parse_string("Custom:Block", opts).is_ok());
    }
}
