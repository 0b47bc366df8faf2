//! Token kinds and the regular-expression fragments they expand to.

use std::fmt;

/// Fragment matching a double- or single-quoted string with escapes.
pub const STRING_FRAGMENT: &str = r#"("([^"\\]*(\\.[^"\\]*)*)"|'([^'\\]*(\\.[^'\\]*)*)')"#;

/// Fragment matching one or more non-whitespace characters.
pub const WORD_FRAGMENT: &str = r"([^\s]+)";

/// Fragment matching an optionally negative run of decimal digits.
pub const INTEGER_FRAGMENT: &str = r"(-?\d+)";

/// The shape a named token expands to.
///
/// Every fragment is wrapped in one outer capturing group holding the whole
/// matched value. The string fragment has four more groups nested inside it,
/// so a runner binding arguments must skip them; [`TokenKind::group_count`]
/// reports how many groups each fragment opens.
///
/// # Examples
/// ```
/// use stepkit_tokens::TokenKind;
///
/// assert_eq!(TokenKind::Integer.fragment(), r"(-?\d+)");
/// assert_eq!(TokenKind::Word.to_string(), "word");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// A quoted string, either `"..."` or `'...'`.
    String,
    /// A single whitespace-free word.
    Word,
    /// A signed decimal integer.
    Integer,
}

impl TokenKind {
    /// Return the fixed regular-expression fragment for this kind.
    #[must_use]
    pub const fn fragment(self) -> &'static str {
        match self {
            Self::String => STRING_FRAGMENT,
            Self::Word => WORD_FRAGMENT,
            Self::Integer => INTEGER_FRAGMENT,
        }
    }

    /// Number of capturing groups the fragment opens, the outer one included.
    #[must_use]
    pub const fn group_count(self) -> usize {
        match self {
            Self::String => 5,
            Self::Word | Self::Integer => 1,
        }
    }

    /// Lowercase label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Word => "word",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token names every tokenizer starts with.
///
/// The table is copied into each new registry; explicit registration under
/// one of these names replaces the predefined kind for that tokenizer only.
pub const PREDEFINED_TOKENS: [(&str, TokenKind); 3] = [
    ("string", TokenKind::String),
    ("int", TokenKind::Integer),
    ("word", TokenKind::Word),
];
