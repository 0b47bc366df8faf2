//! Token registry and template interpolation.
//!
//! A [`Tokenizer`] goes through two phases. During setup it is owned and
//! mutated through `&mut self` (or assembled with a [`TokenizerBuilder`]);
//! afterwards it is shared by reference and only read. Interpolation takes
//! `&self`, so once a tokenizer sits behind `&Tokenizer` or `Arc<Tokenizer>`
//! the borrow checker rules out further registration and concurrent
//! expansion needs no locking.

mod builder;

use std::sync::OnceLock;

use hashbrown::HashMap;
use regex::Regex;

use crate::errors::{TokenizerError, unknown_token};
use crate::expansion::Expansion;
use crate::groups::GroupCounter;
use crate::kind::{PREDEFINED_TOKENS, TokenKind};
use crate::options::{Delimiters, TokenizerOption};

pub use builder::TokenizerBuilder;

/// Character class of a token name: a word character followed by any run of
/// word or whitespace characters.
const TOKEN_NAME_PATTERN: &str = r"([\w][\w\s]*)";

/// Registry of named tokens able to expand step templates into regular
/// expressions.
///
/// # Examples
/// ```
/// use stepkit_tokens::Tokenizer;
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.int("Token");
/// let expanded = tokenizer
///     .interpolate("string with a {Token}")
///     .expect("token is registered");
/// assert_eq!(expanded, r"string with a (-?\d+)");
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    tokens: HashMap<String, TokenKind>,
    delimiters: Delimiters,
    scanner: OnceLock<Regex>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with `{`/`}` delimiters and the predefined
    /// `string`, `int` and `word` tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(std::iter::empty())
    }

    /// Create a tokenizer, applying `options` in order.
    #[must_use]
    pub fn with_options(options: impl IntoIterator<Item = TokenizerOption>) -> Self {
        let mut delimiters = Delimiters::default();
        for option in options {
            delimiters.apply(option);
        }
        let tokens = PREDEFINED_TOKENS
            .iter()
            .map(|&(name, kind)| (name.to_owned(), kind))
            .collect();
        Self {
            tokens,
            delimiters,
            scanner: OnceLock::new(),
        }
    }

    /// Start assembling a tokenizer.
    #[must_use]
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::default()
    }

    /// Register `name` as a token of `kind`, replacing any earlier kind.
    pub fn register(&mut self, name: impl Into<String>, kind: TokenKind) -> &mut Self {
        self.tokens.insert(name.into(), kind);
        self
    }

    /// Register `name` as an integer token.
    pub fn int(&mut self, name: impl Into<String>) -> &mut Self {
        self.register(name, TokenKind::Integer)
    }

    /// Register `name` as a word token.
    pub fn word(&mut self, name: impl Into<String>) -> &mut Self {
        self.register(name, TokenKind::Word)
    }

    /// Register `name` as a quoted string token.
    pub fn string(&mut self, name: impl Into<String>) -> &mut Self {
        self.register(name, TokenKind::String)
    }

    /// Look up the kind registered for `name`.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<TokenKind> {
        self.tokens.get(name).copied()
    }

    /// Registered tokens sorted by name.
    #[must_use]
    pub fn tokens(&self) -> Vec<(&str, TokenKind)> {
        let mut tokens: Vec<_> = self
            .tokens
            .iter()
            .map(|(name, kind)| (name.as_str(), *kind))
            .collect();
        tokens.sort_unstable_by(|a, b| a.0.cmp(b.0));
        tokens
    }

    /// The opening marker of a token reference.
    #[must_use]
    pub fn left_delimiter(&self) -> &str {
        &self.delimiters.left
    }

    /// The closing marker of a token reference.
    #[must_use]
    pub fn right_delimiter(&self) -> &str {
        &self.delimiters.right
    }

    /// Regular-expression source used to find token references.
    ///
    /// # Examples
    /// ```
    /// use stepkit_tokens::Tokenizer;
    ///
    /// assert_eq!(Tokenizer::new().placeholder_pattern(), r"\{([\w][\w\s]*)\}");
    /// ```
    #[must_use]
    pub fn placeholder_pattern(&self) -> String {
        format!(
            "{}{TOKEN_NAME_PATTERN}{}",
            regex::escape(&self.delimiters.left),
            regex::escape(&self.delimiters.right)
        )
    }

    /// Expand every token reference in `template` into its kind's fragment.
    ///
    /// References are resolved left to right against the registry as it is
    /// at call time. Repeated references to the same token all expand to the
    /// same fragment. Text outside references is copied verbatim, so a
    /// template without references comes back unchanged.
    ///
    /// # Errors
    /// Returns [`TokenizerError::UnknownToken`] for the first reference whose
    /// name is not registered; no partial expansion is returned. Returns
    /// [`TokenizerError::Scanner`] when the delimiter-derived scanner cannot
    /// be compiled.
    pub fn interpolate(&self, template: &str) -> Result<String, TokenizerError> {
        self.expand(template).map(Expansion::into_pattern)
    }

    /// Expand `template` like [`Tokenizer::interpolate`], also reporting
    /// which capture groups carry the step's arguments.
    ///
    /// The argument groups are the capturing groups written in the template
    /// itself plus the outer group of every token reference, in the order
    /// they open. Groups nested inside a token's fragment are left out.
    ///
    /// # Errors
    /// Fails exactly when [`Tokenizer::interpolate`] does.
    pub fn expand(&self, template: &str) -> Result<Expansion, TokenizerError> {
        let scanner = self.scanner()?;
        let mut expanded = String::with_capacity(template.len());
        let mut argument_groups = Vec::new();
        let mut counter = GroupCounter::default();
        let mut opened = 0;
        let mut copied = 0;

        for caps in scanner.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let kind = self
                .kind(name.as_str())
                .ok_or_else(|| unknown_token(whole.as_str(), name.as_str()))?;
            let literal = template.get(copied..whole.start()).unwrap_or_default();
            opened = push_literal_groups(&mut argument_groups, &mut counter, literal, opened);
            argument_groups.push(opened + 1);
            opened += kind.group_count();
            expanded.push_str(literal);
            expanded.push_str(kind.fragment());
            copied = whole.end();
        }

        let literal = template.get(copied..).unwrap_or_default();
        push_literal_groups(&mut argument_groups, &mut counter, literal, opened);
        expanded.push_str(literal);
        Ok(Expansion::new(expanded, argument_groups))
    }

    fn scanner(&self) -> Result<&Regex, TokenizerError> {
        if let Some(regex) = self.scanner.get() {
            return Ok(regex);
        }
        let regex = Regex::new(&self.placeholder_pattern())?;
        Ok(self.scanner.get_or_init(|| regex))
    }
}

/// Record the author's groups opened in `literal`; returns the new total.
fn push_literal_groups(
    argument_groups: &mut Vec<usize>,
    counter: &mut GroupCounter,
    literal: &str,
    opened: usize,
) -> usize {
    let written = counter.count(literal);
    argument_groups.extend(opened + 1..=opened + written);
    opened + written
}
