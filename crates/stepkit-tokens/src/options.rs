//! Construction options for [`Tokenizer`](crate::Tokenizer).

/// Default opening marker of a token reference.
pub const DEFAULT_LEFT_DELIMITER: &str = "{";

/// Default closing marker of a token reference.
pub const DEFAULT_RIGHT_DELIMITER: &str = "}";

/// A single construction setting.
///
/// Options are applied in order, so a later option for the same side wins.
/// An empty delimiter keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerOption {
    /// Replace the opening marker.
    LeftDelimiter(String),
    /// Replace the closing marker.
    RightDelimiter(String),
}

/// Options overriding both delimiters at once.
///
/// # Examples
/// ```
/// use stepkit_tokens::{Tokenizer, with_delimiters};
///
/// let mut tokenizer = Tokenizer::with_options(with_delimiters("<", "}"));
/// tokenizer.int("Token");
/// let expanded = tokenizer
///     .interpolate("a string with a <Token}")
///     .expect("token is registered");
/// assert_eq!(expanded, r"a string with a (-?\d+)");
/// ```
#[must_use]
pub fn with_delimiters(left: impl Into<String>, right: impl Into<String>) -> [TokenizerOption; 2] {
    [
        TokenizerOption::LeftDelimiter(left.into()),
        TokenizerOption::RightDelimiter(right.into()),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Delimiters {
    pub(crate) left: String,
    pub(crate) right: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT_DELIMITER.to_owned(),
            right: DEFAULT_RIGHT_DELIMITER.to_owned(),
        }
    }
}

impl Delimiters {
    pub(crate) fn apply(&mut self, option: TokenizerOption) {
        match option {
            TokenizerOption::LeftDelimiter(left) if !left.is_empty() => self.left = left,
            TokenizerOption::RightDelimiter(right) if !right.is_empty() => self.right = right,
            TokenizerOption::LeftDelimiter(_) | TokenizerOption::RightDelimiter(_) => {}
        }
    }
}
