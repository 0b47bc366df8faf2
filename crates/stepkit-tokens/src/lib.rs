//! Named tokens for step definitions.
//!
//! Step-definition authors write `there are {Count} pods` instead of a
//! hand-written regular expression. A [`Tokenizer`] maps each token name to a
//! [`TokenKind`] and expands every `{name}` reference into that kind's fixed
//! capturing group, producing a pattern a BDD runner can match step text
//! against.

mod errors;
mod expansion;
mod groups;
mod kind;
mod options;
mod tokenizer;

pub use errors::TokenizerError;
pub use expansion::Expansion;
pub use kind::{INTEGER_FRAGMENT, PREDEFINED_TOKENS, STRING_FRAGMENT, TokenKind, WORD_FRAGMENT};
pub use options::{
    DEFAULT_LEFT_DELIMITER, DEFAULT_RIGHT_DELIMITER, TokenizerOption, with_delimiters,
};
pub use tokenizer::{Tokenizer, TokenizerBuilder};
