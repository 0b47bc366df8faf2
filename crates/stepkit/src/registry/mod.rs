//! Step registration and dispatch.
//!
//! [`StepRegistrar`] is the seam between step definitions and whatever runner
//! executes them: it accepts an expanded regular expression together with an
//! erased handler. [`StepRegistry`] is the in-process implementation used by
//! this crate's scenario context and tests. It keeps definitions in
//! registration order and dispatches step text to the first pattern that
//! matches.

use std::sync::atomic::{AtomicBool, Ordering};

use regex::Regex;

use crate::adapter::{DynStep, StepSignature};
use crate::error::{RegistrationError, StepError};

#[cfg(feature = "diagnostics")]
mod diagnostics;

/// Registration point accepting `(pattern, handler)` pairs.
pub trait StepRegistrar {
    /// Register `step` to run for step text matching `pattern`.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the registrar rejects the
    /// definition, for example because the pattern does not compile.
    fn register_step(&mut self, pattern: &str, step: DynStep) -> Result<(), RegistrationError>;
}

/// A compiled step definition held by a [`StepRegistry`].
#[derive(Debug)]
pub struct RegisteredStep {
    regex: Regex,
    step: DynStep,
    used: AtomicBool,
}

impl RegisteredStep {
    /// The expanded pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter list of the handler.
    #[must_use]
    pub const fn signature(&self) -> &StepSignature {
        self.step.signature()
    }

    /// Number of capture groups in the pattern.
    #[must_use]
    pub fn captures(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Whether any step text has been dispatched to this definition.
    #[must_use]
    pub fn was_used(&self) -> bool {
        self.used.load(Ordering::Relaxed)
    }

    /// Capture groups feeding the handler's arguments, in order.
    #[must_use]
    pub fn argument_groups(&self) -> Vec<usize> {
        self.step
            .argument_groups()
            .map_or_else(|| (1..self.regex.captures_len()).collect(), <[usize]>::to_vec)
    }

    fn capture_values<'t>(&self, text: &'t str) -> Option<Vec<&'t str>> {
        let caps = self.regex.captures(text)?;
        let value = |group: usize| caps.get(group).map_or("", |m| m.as_str());
        Some(match self.step.argument_groups() {
            Some(groups) => groups.iter().map(|&group| value(group)).collect(),
            None => (1..caps.len()).map(value).collect(),
        })
    }
}

/// Ordered collection of step definitions.
///
/// Registration takes `&mut self`; dispatch takes `&self`, so a fully
/// registered registry can be shared between threads running scenarios.
///
/// # Examples
/// ```
/// use stepkit::{Recorder, StepRegistrar, StepRegistry, adapt, record_failure};
///
/// let mut registry = StepRegistry::new();
/// registry
///     .register_step(
///         r"^there are (-?\d+) pods$",
///         adapt(|t: &mut Recorder, pods: i64| {
///             if pods < 1 {
///                 record_failure!(t, "no pods");
///             }
///         })
///         .erase(),
///     )
///     .expect("pattern is valid");
///
/// assert!(registry.run_step("there are 34 pods").is_ok());
/// assert!(registry.run_step("there are 0 pods").is_err());
/// ```
#[derive(Debug, Default)]
pub struct StepRegistry {
    steps: Vec<RegisteredStep>,
}

impl StepRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Registered definitions in registration order.
    #[must_use]
    pub fn steps(&self) -> &[RegisteredStep] {
        &self.steps
    }

    /// First definition whose pattern matches `text`.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<&RegisteredStep> {
        self.steps.iter().find(|step| step.regex.is_match(text))
    }

    /// Definitions no step text has been dispatched to yet.
    #[must_use]
    pub fn unused_steps(&self) -> Vec<&RegisteredStep> {
        self.steps.iter().filter(|step| !step.was_used()).collect()
    }

    /// Dispatch `text` to the first matching definition.
    ///
    /// Captured groups are passed to the handler in left-to-right order, or
    /// in the order of the step's argument groups when it has them; groups
    /// that did not participate in the match are passed as empty strings to
    /// keep positions aligned.
    ///
    /// # Errors
    /// Returns [`StepError::NoMatch`] when no pattern matches,
    /// [`StepError::Arguments`] when the captures do not convert into the
    /// handler's parameter types, and [`StepError::Failed`] when the handler
    /// records a failure.
    pub fn run_step(&self, text: &str) -> Result<(), StepError> {
        let Some((step, values)) = self
            .steps
            .iter()
            .find_map(|step| step.capture_values(text).map(|values| (step, values)))
        else {
            log::debug!("no step definition matches '{text}'");
            return Err(StepError::NoMatch {
                text: text.to_owned(),
            });
        };

        step.used.store(true, Ordering::Relaxed);
        log::trace!(
            "running step '{text}' with pattern '{}' and captures {values:?}",
            step.pattern()
        );
        match step.step.invoke(&values) {
            Ok(outcome) => outcome.map_err(StepError::from),
            Err(source) => Err(StepError::Arguments {
                pattern: step.pattern().to_owned(),
                source,
            }),
        }
    }

    /// Serialize the registry to JSON for diagnostic tooling.
    ///
    /// Each entry records the pattern, the handler's parameter types, the
    /// number of captures, the groups bound to arguments, and whether the
    /// step has been dispatched.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    ///
    /// # Examples
    /// ```
    /// use stepkit::StepRegistry;
    ///
    /// let json = StepRegistry::new().dump().expect("serialize registry");
    /// assert_eq!(json, r#"{"steps":[]}"#);
    /// ```
    #[cfg(feature = "diagnostics")]
    pub fn dump(&self) -> serde_json::Result<String> {
        diagnostics::dump(self)
    }
}

impl StepRegistrar for StepRegistry {
    fn register_step(&mut self, pattern: &str, step: DynStep) -> Result<(), RegistrationError> {
        let regex = Regex::new(pattern).map_err(|source| RegistrationError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        let groups = regex.captures_len();
        if let Some(&group) = step
            .argument_groups()
            .and_then(|bound| bound.iter().find(|&&group| group == 0 || group >= groups))
        {
            return Err(RegistrationError::ArgumentGroup {
                pattern: pattern.to_owned(),
                group,
            });
        }
        let captured = step
            .argument_groups()
            .map_or(groups.saturating_sub(1), <[usize]>::len);
        let expected = step.signature().arity();
        if expected > captured {
            return Err(RegistrationError::Arity {
                pattern: pattern.to_owned(),
                expected,
                captured,
            });
        }

        log::debug!("registered step pattern '{pattern}' as {}", step.signature());
        self.steps.push(RegisteredStep {
            regex,
            step,
            used: AtomicBool::new(false),
        });
        Ok(())
    }
}
