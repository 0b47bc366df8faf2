//! Adapting recorder-style test functions into result-returning steps.
//!
//! Step authors write handlers shaped like ordinary test functions: a
//! `&mut` recorder first, the step's domain arguments after it, no return
//! value. Runners want the opposite shape: domain arguments in, a
//! failure-or-none value out. [`adapt`] converts the first into the second.
//!
//! The shape is checked by the type system. A value only implements
//! [`StepHandler`] when it is a function or closure whose first parameter is
//! `&mut R` for some [`FailureRecorder`] `R` and whose return type is `()`,
//! so malformed handlers are rejected when the step is defined rather than
//! when it first runs.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::args::{StepArgs, StepArgsError};
use crate::recorder::{FailureRecorder, Recorder, StepResult};

/// A handler taking a recorder followed by the argument tuple `Args`.
///
/// Implemented for every `Fn(&mut R, A1, .., An)` returning `()` with up to
/// eight domain arguments.
pub trait StepHandler<R, Args> {
    /// Invoke the handler with `recorder` prepended to `args`.
    fn call(&self, recorder: &mut R, args: Args);
}

macro_rules! impl_step_handler {
    ($($ty:ident $var:ident),*) => {
        impl<R, F, $($ty,)*> StepHandler<R, ($($ty,)*)> for F
        where
            F: Fn(&mut R, $($ty),*),
        {
            fn call(&self, recorder: &mut R, ($($var,)*): ($($ty,)*)) {
                self(recorder, $($var),*);
            }
        }
    };
}

impl_step_handler!();
impl_step_handler!(A a);
impl_step_handler!(A a, B b);
impl_step_handler!(A a, B b, C c);
impl_step_handler!(A a, B b, C c, D d);
impl_step_handler!(A a, B b, C c, D d, E e);
impl_step_handler!(A a, B b, C c, D d, E e, F2 f);
impl_step_handler!(A a, B b, C c, D d, E e, F2 f, G g);
impl_step_handler!(A a, B b, C c, D d, E e, F2 f, G g, H h);

/// Wrap `handler` so it takes only its domain arguments and returns a
/// [`StepResult`].
///
/// Each call of the adapted step builds a fresh `R::default()`, passes it as
/// the handler's first argument, and returns the failure it holds afterwards.
/// Calls share no state, so one adapted step may run concurrently from
/// several scenarios.
///
/// Closure parameters must carry type annotations so the recorder and
/// argument types can be inferred.
///
/// # Examples
/// ```
/// use stepkit::{Recorder, adapt, record_failure};
///
/// fn pods_ready(t: &mut Recorder, ready: i64, wanted: i64) {
///     if ready != wanted {
///         record_failure!(t, "expected {wanted} pods, found {ready}");
///     }
/// }
///
/// let step = adapt(pods_ready);
/// assert_eq!(step.signature().arity(), 2);
/// assert!(step.call((3, 3)).is_ok());
/// let failure = step.call((2, 3)).unwrap_err();
/// assert_eq!(failure.message(), "expected 3 pods, found 2");
/// ```
///
/// Values that are not functions are rejected:
/// ```compile_fail
/// let step = stepkit::adapt(42);
/// ```
///
/// So are handlers returning a value:
/// ```compile_fail
/// use stepkit::Recorder;
///
/// fn step(_t: &mut Recorder, n: i64) -> bool {
///     n > 0
/// }
/// let adapted = stepkit::adapt(step);
/// ```
///
/// Handlers must take at least the recorder:
/// ```compile_fail
/// fn step() {}
/// let adapted = stepkit::adapt(step);
/// ```
///
/// And the recorder must come first, by mutable reference:
/// ```compile_fail
/// use stepkit::Recorder;
///
/// fn step(n: i64, _t: &mut Recorder) {}
/// let adapted = stepkit::adapt(step);
/// ```
///
/// ```compile_fail
/// use stepkit::Recorder;
///
/// fn step(_t: Recorder, n: i64) {}
/// let adapted = stepkit::adapt(step);
/// ```
///
/// ```compile_fail
/// fn step(_t: &mut String, n: i64) {}
/// let adapted = stepkit::adapt(step);
/// ```
pub fn adapt<H, R, Args>(handler: H) -> AdaptedStep<H, R, Args>
where
    H: StepHandler<R, Args>,
    R: FailureRecorder + Default,
{
    AdaptedStep {
        handler,
        marker: PhantomData,
    }
}

/// A handler converted to the "arguments in, failure-or-none out" shape.
pub struct AdaptedStep<H, R = Recorder, Args = ()> {
    handler: H,
    marker: PhantomData<fn(Args) -> R>,
}

impl<H, R, Args> AdaptedStep<H, R, Args>
where
    H: StepHandler<R, Args>,
    R: FailureRecorder + Default,
{
    /// Run the handler with a fresh recorder.
    ///
    /// # Errors
    /// Returns the failure recorded by the handler, if any.
    pub fn call(&self, args: Args) -> StepResult {
        let mut recorder = R::default();
        self.handler.call(&mut recorder, args);
        recorder.take_failure().map_or(Ok(()), Err)
    }

    /// Consume the adapter and return a plain closure.
    ///
    /// # Examples
    /// ```
    /// use stepkit::{Recorder, adapt};
    ///
    /// let step = adapt(|_t: &mut Recorder, _word: String| {}).into_fn();
    /// assert!(step(("statement".to_owned(),)).is_ok());
    /// ```
    pub fn into_fn(self) -> impl Fn(Args) -> StepResult {
        move |args| self.call(args)
    }

    /// Access the wrapped handler.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H, R, Args> AdaptedStep<H, R, Args>
where
    H: StepHandler<R, Args>,
    R: FailureRecorder + Default,
    Args: StepArgs,
{
    /// Describe the adapted parameter list.
    #[must_use]
    pub fn signature(&self) -> StepSignature {
        StepSignature::of::<Args>()
    }

    /// Erase the argument types, producing the canonical handler shape used
    /// at the registration interface.
    ///
    /// # Examples
    /// ```
    /// use stepkit::{Recorder, adapt};
    ///
    /// let step = adapt(|_t: &mut Recorder, count: i64, _pods: String| {
    ///     assert_eq!(count, 34);
    /// })
    /// .erase();
    /// assert_eq!(step.signature().arity(), 2);
    /// assert!(matches!(step.invoke(&["34", "pods"]), Ok(Ok(()))));
    /// assert!(step.invoke(&["many", "pods"]).is_err());
    /// ```
    #[must_use]
    pub fn erase(self) -> DynStep
    where
        H: Send + Sync + 'static,
        R: 'static,
        Args: 'static,
    {
        let signature = self.signature();
        DynStep::new(signature, move |captures: &[&str]| {
            let args = Args::from_captures(captures)?;
            Ok(self.call(args))
        })
    }
}

impl<H: Clone, R, Args> Clone for AdaptedStep<H, R, Args> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            marker: PhantomData,
        }
    }
}

impl<H, R, Args> fmt::Debug for AdaptedStep<H, R, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptedStep")
            .field("handler", &type_name::<H>())
            .field("recorder", &type_name::<R>())
            .field("args", &type_name::<Args>())
            .finish()
    }
}

/// Parameter list of an adapted step.
///
/// The recorder parameter is not part of the signature; the return slot is
/// always a single failure-or-none value. Parameter names come from
/// [`std::any::type_name`], so they are for diagnostics only and their exact
/// text may change between compiler releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSignature {
    params: Vec<&'static str>,
}

impl StepSignature {
    /// Signature of a step taking `Args`.
    #[must_use]
    pub fn of<Args: StepArgs>() -> Self {
        Self {
            params: Args::type_names(),
        }
    }

    /// Parameter type names in order.
    #[must_use]
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for StepSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) -> StepResult", self.params.join(", "))
    }
}

/// Erased step body: ordered captures in, conversion error or step outcome
/// out.
pub type StepFn = dyn Fn(&[&str]) -> Result<StepResult, StepArgsError> + Send + Sync;

/// A type-erased adapted step ready for registration.
///
/// By default a registrar hands the step every capture group of its
/// pattern in order. [`DynStep::with_argument_groups`] narrows that to
/// chosen groups, which is how token references bind past the groups nested
/// inside their fragments.
#[derive(Clone)]
pub struct DynStep {
    signature: StepSignature,
    argument_groups: Option<Vec<usize>>,
    run: Arc<StepFn>,
}

impl DynStep {
    /// Wrap an erased step body together with its signature.
    #[must_use]
    pub fn new<F>(signature: StepSignature, run: F) -> Self
    where
        F: Fn(&[&str]) -> Result<StepResult, StepArgsError> + Send + Sync + 'static,
    {
        Self {
            signature,
            argument_groups: None,
            run: Arc::new(run),
        }
    }

    /// Bind the step's arguments to the one-based capture groups `groups`,
    /// in order.
    #[must_use]
    pub fn with_argument_groups(mut self, groups: Vec<usize>) -> Self {
        self.argument_groups = Some(groups);
        self
    }

    /// Capture groups bound to the arguments, when narrowed.
    #[must_use]
    pub fn argument_groups(&self) -> Option<&[usize]> {
        self.argument_groups.as_deref()
    }

    /// Parameter list of the wrapped handler.
    #[must_use]
    pub const fn signature(&self) -> &StepSignature {
        &self.signature
    }

    /// Convert `captures` and run the step.
    ///
    /// # Errors
    /// Returns [`StepArgsError`] when the captures cannot be converted; the
    /// handler is not invoked in that case.
    pub fn invoke(&self, captures: &[&str]) -> Result<StepResult, StepArgsError> {
        (self.run)(captures)
    }
}

impl fmt::Debug for DynStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynStep")
            .field("signature", &self.signature)
            .field("argument_groups", &self.argument_groups)
            .finish_non_exhaustive()
    }
}
