//! Error types raised while expanding step templates.

use thiserror::Error;

/// Errors surfaced by [`Tokenizer::interpolate`](crate::Tokenizer::interpolate).
///
/// # Examples
/// ```
/// use stepkit_tokens::{Tokenizer, TokenizerError};
///
/// let err = Tokenizer::new()
///     .interpolate("there are {Count} pods")
///     .unwrap_err();
/// assert!(err.is_unknown_token());
/// assert_eq!(err.to_string(), "token is unknown: {Count} is not registered");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenizerError {
    /// The template referenced a token name with no registered kind.
    #[error("token is unknown: {placeholder} is not registered")]
    UnknownToken {
        /// Placeholder text exactly as written, delimiters included.
        placeholder: String,
        /// Name enclosed by the delimiters.
        name: String,
    },
    /// The placeholder scanner built from the delimiters failed to compile.
    #[error("invalid token delimiters: {0}")]
    Scanner(#[from] regex::Error),
}

impl TokenizerError {
    /// Returns `true` when the error reports an unregistered token.
    #[must_use]
    pub const fn is_unknown_token(&self) -> bool {
        matches!(self, Self::UnknownToken { .. })
    }

    /// The unresolved placeholder text, when the error is an unknown token.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::UnknownToken { placeholder, .. } => Some(placeholder),
            Self::Scanner(_) => None,
        }
    }
}

pub(crate) fn unknown_token(placeholder: &str, name: &str) -> TokenizerError {
    TokenizerError::UnknownToken {
        placeholder: placeholder.to_owned(),
        name: name.to_owned(),
    }
}
