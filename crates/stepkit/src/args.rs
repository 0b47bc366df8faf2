//! Conversion of captured step text into typed handler arguments.
//!
//! The [`StepArgs`] trait is implemented for tuples of [`FromStr`] types. It
//! describes the ordered parameter list an adapted handler expects and turns
//! the runner's positional captures into that tuple. Only the first
//! [`StepArgs::ARITY`] captures are consumed; surplus captures are ignored.

use std::any::type_name;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Captured text could not be turned into the handler's argument tuple.
///
/// Positions are one-based, counting the handler's parameters after the
/// recorder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StepArgsError {
    /// The match supplied fewer captures than the handler has parameters.
    #[error("step takes {expected} argument(s) but the match supplied {supplied}")]
    Missing {
        /// Parameters the handler declares.
        expected: usize,
        /// Captures available.
        supplied: usize,
    },
    /// A capture did not parse as its parameter's type.
    #[error("argument {position} ('{raw}') is not a valid `{ty}`: {reason}")]
    Invalid {
        /// One-based parameter position.
        position: usize,
        /// Parameter type name, for diagnostics only.
        ty: &'static str,
        /// Captured text.
        raw: String,
        /// Parser error message.
        reason: String,
    },
}

/// Ordered handler parameters populated from pattern captures.
///
/// # Examples
/// ```
/// use stepkit::StepArgs;
///
/// assert_eq!(<(i64, String)>::ARITY, 2);
/// let (count, name) = <(i64, String)>::from_captures(&["34", "pods"])
///     .expect("captures parse");
/// assert_eq!(count, 34);
/// assert_eq!(name, "pods");
/// ```
pub trait StepArgs: Sized {
    /// Number of parameters.
    const ARITY: usize;

    /// Parameter type names in declaration order.
    ///
    /// Names come from [`std::any::type_name`] and are meant for
    /// diagnostics; their exact text is not stable.
    fn type_names() -> Vec<&'static str>;

    /// Convert the leading captures into the parameter tuple.
    ///
    /// # Errors
    /// Returns [`StepArgsError`] when fewer than [`Self::ARITY`] captures are
    /// supplied or a capture fails to parse.
    fn from_captures(captures: &[&str]) -> Result<Self, StepArgsError>;
}

fn parse_capture<T>(captures: &[&str], index: usize) -> Result<T, StepArgsError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = captures.get(index).ok_or(StepArgsError::Missing {
        expected: index + 1,
        supplied: captures.len(),
    })?;
    raw.parse().map_err(|err: T::Err| StepArgsError::Invalid {
        position: index + 1,
        ty: type_name::<T>(),
        raw: (*raw).to_owned(),
        reason: err.to_string(),
    })
}

macro_rules! impl_step_args {
    ($arity:literal $(, $index:tt $ty:ident)*) => {
        impl<$($ty,)*> StepArgs for ($($ty,)*)
        where
            $($ty: FromStr, <$ty as FromStr>::Err: fmt::Display,)*
        {
            const ARITY: usize = $arity;

            fn type_names() -> Vec<&'static str> {
                vec![$(type_name::<$ty>()),*]
            }

            fn from_captures(captures: &[&str]) -> Result<Self, StepArgsError> {
                if captures.len() < Self::ARITY {
                    return Err(StepArgsError::Missing {
                        expected: Self::ARITY,
                        supplied: captures.len(),
                    });
                }
                Ok(($(parse_capture::<$ty>(captures, $index)?,)*))
            }
        }
    };
}

impl_step_args!(0);
impl_step_args!(1, 0 A);
impl_step_args!(2, 0 A, 1 B);
impl_step_args!(3, 0 A, 1 B, 2 C);
impl_step_args!(4, 0 A, 1 B, 2 C, 3 D);
impl_step_args!(5, 0 A, 1 B, 2 C, 3 D, 4 E);
impl_step_args!(6, 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_step_args!(7, 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_step_args!(8, 0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
