//! Setup-phase builder for [`Tokenizer`].

use crate::kind::TokenKind;
use crate::options::{Delimiters, TokenizerOption};

use super::Tokenizer;

/// Collects delimiters and token registrations before producing a
/// [`Tokenizer`].
///
/// # Examples
/// ```
/// use stepkit_tokens::{TokenKind, Tokenizer};
///
/// let tokenizer = Tokenizer::builder()
///     .delimiters("<", ">")
///     .int("Count")
///     .string("Sub Token")
///     .build();
/// assert_eq!(tokenizer.kind("Sub Token"), Some(TokenKind::String));
/// assert_eq!(
///     tokenizer.interpolate("<Count> pods").expect("token is registered"),
///     r"(-?\d+) pods"
/// );
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct TokenizerBuilder {
    delimiters: Delimiters,
    tokens: Vec<(String, TokenKind)>,
}

impl TokenizerBuilder {
    /// Apply a single construction option.
    pub fn option(mut self, option: TokenizerOption) -> Self {
        self.delimiters.apply(option);
        self
    }

    /// Override the opening marker.
    pub fn left_delimiter(self, left: impl Into<String>) -> Self {
        self.option(TokenizerOption::LeftDelimiter(left.into()))
    }

    /// Override the closing marker.
    pub fn right_delimiter(self, right: impl Into<String>) -> Self {
        self.option(TokenizerOption::RightDelimiter(right.into()))
    }

    /// Override both markers.
    pub fn delimiters(self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_delimiter(left).right_delimiter(right)
    }

    /// Register `name` as a token of `kind`.
    pub fn token(mut self, name: impl Into<String>, kind: TokenKind) -> Self {
        self.tokens.push((name.into(), kind));
        self
    }

    /// Register `name` as an integer token.
    pub fn int(self, name: impl Into<String>) -> Self {
        self.token(name, TokenKind::Integer)
    }

    /// Register `name` as a word token.
    pub fn word(self, name: impl Into<String>) -> Self {
        self.token(name, TokenKind::Word)
    }

    /// Register `name` as a quoted string token.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.token(name, TokenKind::String)
    }

    /// Finish setup. Registrations are applied in the order they were made.
    pub fn build(self) -> Tokenizer {
        let Self { delimiters, tokens } = self;
        let mut tokenizer = Tokenizer::with_options([
            TokenizerOption::LeftDelimiter(delimiters.left),
            TokenizerOption::RightDelimiter(delimiters.right),
        ]);
        for (name, kind) in tokens {
            tokenizer.register(name, kind);
        }
        tokenizer
    }
}
