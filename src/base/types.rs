//! Common result types.

/// The error type used throughout the application.
pub type Err = anyhow::Error;
/// A result carrying [`Err`] on failure.
pub type Res<T> = Result<T, Err>;
/// A result with no success value.
pub type Void = Res<()>;
