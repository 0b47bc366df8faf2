//! Error types for step registration and step execution.
//!
//! Registration errors describe broken step definitions and are meant to halt
//! suite setup. Step errors describe a single failed invocation and are
//! returned to the runner like any other step outcome.

use stepkit_tokens::TokenizerError;
use thiserror::Error;

use crate::args::StepArgsError;
use crate::recorder::StepFailure;

/// A step definition could not be registered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// The step expression referenced an unknown token.
    #[error(transparent)]
    Template(#[from] TokenizerError),
    /// The expanded step expression is not a valid regular expression.
    #[error("invalid step pattern '{pattern}': {source}")]
    Pattern {
        /// Expanded pattern that failed to compile.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
    /// The step binds an argument to a group the pattern does not have.
    #[error("step pattern '{pattern}' has no capture group {group}")]
    ArgumentGroup {
        /// Expanded pattern text.
        pattern: String,
        /// Requested one-based group number.
        group: usize,
    },
    /// The handler takes more arguments than the pattern captures.
    #[error(
        "step pattern '{pattern}' captures {captured} value(s) but the handler expects {expected}"
    )]
    Arity {
        /// Expanded pattern text.
        pattern: String,
        /// Number of parameters the handler declares after the recorder.
        expected: usize,
        /// Number of capture groups bound to arguments.
        captured: usize,
    },
}

/// A single step invocation did not succeed.
///
/// # Examples
/// ```
/// use stepkit::{StepError, StepFailure};
///
/// let err = StepError::from(StepFailure::new("expected 3 pods"));
/// assert!(err.is_failure());
/// assert_eq!(err.to_string(), "expected 3 pods");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepError {
    /// No registered pattern matched the step text.
    #[error("no step definition matches '{text}'")]
    NoMatch {
        /// Step text that was not matched.
        text: String,
    },
    /// The captures could not be converted into handler arguments.
    #[error("step '{pattern}' received unusable arguments: {source}")]
    Arguments {
        /// Pattern of the matched step.
        pattern: String,
        /// Conversion failure.
        source: StepArgsError,
    },
    /// The handler recorded a failure.
    #[error(transparent)]
    Failed(#[from] StepFailure),
}

impl StepError {
    /// Returns `true` when the handler itself recorded the failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
