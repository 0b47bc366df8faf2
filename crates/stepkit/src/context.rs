//! Registration glue tying the tokenizer, the adapter and a registrar
//! together.
//!
//! A [`ScenarioContext`] expands a step expression with its [`Tokenizer`],
//! adapts the handler and hands both to a [`StepRegistrar`]. Broken
//! definitions are programmer errors: [`ScenarioContext::step`] panics on
//! them so suite setup halts at the offending definition, while
//! [`ScenarioContext::try_step`] returns the error for callers that want to
//! report it themselves.

use stepkit_tokens::Tokenizer;

use crate::adapter::{StepHandler, adapt};
use crate::args::StepArgs;
use crate::error::RegistrationError;
use crate::recorder::FailureRecorder;
use crate::registry::StepRegistrar;

/// Step-definition context for one runner registration point.
///
/// # Examples
/// ```
/// use stepkit::{Recorder, ScenarioContext, StepRegistry, record_failure};
///
/// fn pods_running(t: &mut Recorder, count: i64) {
///     if count < 1 {
///         record_failure!(t, "expected running pods, found {count}");
///     }
/// }
///
/// let mut registry = StepRegistry::new();
/// ScenarioContext::new(&mut registry)
///     .int_token("Count")
///     .step("^there are {Count} pods$", pods_running);
///
/// assert!(registry.run_step("there are 3 pods").is_ok());
/// assert!(registry.run_step("there are 0 pods").is_err());
/// ```
#[derive(Debug)]
pub struct ScenarioContext<'r, S: ?Sized> {
    registrar: &'r mut S,
    tokenizer: Tokenizer,
}

impl<'r, S: StepRegistrar + ?Sized> ScenarioContext<'r, S> {
    /// Create a context with a default tokenizer.
    pub fn new(registrar: &'r mut S) -> Self {
        Self::with_tokenizer(registrar, Tokenizer::new())
    }

    /// Create a context using a preconfigured tokenizer.
    pub fn with_tokenizer(registrar: &'r mut S, tokenizer: Tokenizer) -> Self {
        Self {
            registrar,
            tokenizer,
        }
    }

    /// The tokenizer used to expand step expressions.
    #[must_use]
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Register an integer token.
    pub fn int_token(&mut self, name: impl Into<String>) -> &mut Self {
        self.tokenizer.int(name);
        self
    }

    /// Register a word token: an uninterrupted run of non-whitespace
    /// characters.
    pub fn word_token(&mut self, name: impl Into<String>) -> &mut Self {
        self.tokenizer.word(name);
        self
    }

    /// Register a quoted string token.
    pub fn string_token(&mut self, name: impl Into<String>) -> &mut Self {
        self.tokenizer.string(name);
        self
    }

    /// Expand `expression`, adapt `handler` and register the pair.
    ///
    /// The handler's arguments bind to the expression's own capture groups
    /// and to each token reference in order, skipping groups nested inside a
    /// token's fragment.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the expression references an
    /// unknown token or the registrar rejects the definition.
    pub fn try_step<H, R, Args>(
        &mut self,
        expression: &str,
        handler: H,
    ) -> Result<&mut Self, RegistrationError>
    where
        H: StepHandler<R, Args> + Send + Sync + 'static,
        R: FailureRecorder + Default + 'static,
        Args: StepArgs + 'static,
    {
        let (pattern, groups) = self.tokenizer.expand(expression)?.into_parts();
        let step = adapt(handler).erase().with_argument_groups(groups);
        self.registrar.register_step(&pattern, step)?;
        Ok(self)
    }

    /// Expand `expression`, adapt `handler` and register the pair.
    ///
    /// # Panics
    /// Panics with `step definition is incorrect: ...` when registration
    /// fails; a broken step definition must stop suite setup.
    pub fn step<H, R, Args>(&mut self, expression: &str, handler: H) -> &mut Self
    where
        H: StepHandler<R, Args> + Send + Sync + 'static,
        R: FailureRecorder + Default + 'static,
        Args: StepArgs + 'static,
    {
        match self.try_step(expression, handler) {
            Ok(context) => context,
            Err(err) => {
                log::error!("rejected step definition '{expression}': {err}");
                panic!("step definition is incorrect: {err}");
            }
        }
    }
}
