//! Failure recording for adapted step handlers.
//!
//! Handlers receive a fresh recorder as their first argument on every
//! invocation and report assertion failures through it instead of returning
//! an error. The adapter reads the recorder back once the handler returns.

use std::fmt;

use thiserror::Error;

/// A failure recorded by a step handler.
///
/// # Examples
/// ```
/// use stepkit::StepFailure;
///
/// let failure = StepFailure::new("expected 3 pods, found 2");
/// assert_eq!(failure.message(), "expected 3 pods, found 2");
/// assert_eq!(failure.to_string(), "expected 3 pods, found 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StepFailure {
    message: String,
}

impl StepFailure {
    /// Construct a failure from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Access the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of an adapted step: `Ok(())` or the recorded failure.
pub type StepResult = Result<(), StepFailure>;

/// Capability passed as the first argument of every adaptable handler.
pub trait FailureRecorder {
    /// Format and store a failure, replacing any earlier one.
    fn record_failure(&mut self, args: fmt::Arguments<'_>);

    /// The currently recorded failure, if any.
    fn failure(&self) -> Option<&StepFailure>;

    /// Remove and return the recorded failure.
    fn take_failure(&mut self) -> Option<StepFailure>;
}

/// Default per-invocation failure carrier.
///
/// Holds at most one failure; a later record replaces an earlier one.
///
/// # Examples
/// ```
/// use stepkit::{FailureRecorder, Recorder, record_failure};
///
/// let mut t = Recorder::default();
/// assert!(t.failure().is_none());
/// record_failure!(&mut t, "first");
/// record_failure!(&mut t, "expected {} got {}", 1, 2);
/// assert_eq!(t.failure().map(|f| f.message()), Some("expected 1 got 2"));
/// ```
#[derive(Debug, Default)]
pub struct Recorder {
    failure: Option<StepFailure>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { failure: None }
    }

    /// Returns `true` when a failure has been recorded.
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

impl FailureRecorder for Recorder {
    fn record_failure(&mut self, args: fmt::Arguments<'_>) {
        self.failure = Some(StepFailure::new(args.to_string()));
    }

    fn failure(&self) -> Option<&StepFailure> {
        self.failure.as_ref()
    }

    fn take_failure(&mut self) -> Option<StepFailure> {
        self.failure.take()
    }
}

/// Record a formatted failure on a [`FailureRecorder`].
///
/// The first argument is a mutable reference to the recorder; the rest
/// follow [`format!`] syntax.
///
/// # Examples
/// ```
/// use stepkit::{Recorder, record_failure};
///
/// fn pods_ready(t: &mut Recorder, ready: i64, wanted: i64) {
///     if ready != wanted {
///         record_failure!(t, "expected {wanted} pods, found {ready}");
///     }
/// }
///
/// let mut t = Recorder::new();
/// pods_ready(&mut t, 2, 3);
/// assert!(t.failed());
/// ```
#[macro_export]
macro_rules! record_failure {
    ($recorder:expr, $($arg:tt)+) => {
        $crate::FailureRecorder::record_failure(&mut *$recorder, ::core::format_args!($($arg)+))
    };
}
