//! Step-definition plumbing for BDD runners.
//!
//! This crate turns step handlers written like ordinary test functions into
//! steps a runner can dispatch:
//!
//! - [`adapt`] wraps a handler whose first parameter is a `&mut`
//!   [`FailureRecorder`] so that it takes only its domain arguments and
//!   returns a [`StepResult`].
//! - [`ScenarioContext`] expands `{Token}` references in a step expression
//!   via a [`Tokenizer`] and registers the adapted handler with any
//!   [`StepRegistrar`].
//! - [`StepRegistry`] is a small in-process registrar that matches step text
//!   against the registered patterns and invokes the first match.
//!
//! # Examples
//! ```
//! use stepkit::{Recorder, ScenarioContext, StepRegistry, record_failure};
//!
//! fn pods_should_be(t: &mut Recorder, running: i64, phase: String) {
//!     if phase != "Running" {
//!         record_failure!(t, "{running} pods are {phase}, expected Running");
//!     }
//! }
//!
//! let mut registry = StepRegistry::new();
//! ScenarioContext::new(&mut registry)
//!     .int_token("Count")
//!     .word_token("Phase")
//!     .step("^{Count} pods should be {Phase}$", pods_should_be);
//!
//! assert!(registry.run_step("3 pods should be Running").is_ok());
//! let err = registry.run_step("3 pods should be Pending").unwrap_err();
//! assert_eq!(err.to_string(), "3 pods are Pending, expected Running");
//! ```

mod adapter;
mod args;
mod context;
mod error;
mod recorder;
mod registry;

pub use adapter::{AdaptedStep, DynStep, StepFn, StepHandler, StepSignature, adapt};
pub use args::{StepArgs, StepArgsError};
pub use context::ScenarioContext;
pub use error::{RegistrationError, StepError};
pub use recorder::{FailureRecorder, Recorder, StepFailure, StepResult};
pub use registry::{RegisteredStep, StepRegistrar, StepRegistry};
pub use stepkit_tokens as tokens;
pub use stepkit_tokens::{
    Expansion, TokenKind, Tokenizer, TokenizerBuilder, TokenizerError, TokenizerOption,
};
