use thiserror::Error;

/// Result type alias for the layout engine.
pub type Result<T> = std::result::Result<T, FormworkError>;

/// Errors that halt a build run.
///
/// A cell for which no catalog part fits is not an error: it ends up as a
/// [`Collision`](crate::entities::Collision) in the placement report.
#[derive(Debug, Error)]
pub enum FormworkError {
    /// Outline, hole or obstacle is not a closed simple polygon.
    #[error("validation error: {0}")]
    Validation(String),

    /// The run was aborted upstream before placement started.
    #[error("build run cancelled")]
    Cancelled,

    /// Degenerate configuration that would make a generator loop meaningless.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The geometry host signalled a non-recoverable condition.
    #[error("geometry host failure: {0}")]
    Host(String),
}

impl FormworkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        FormworkError::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        FormworkError::InvariantViolation(msg.into())
    }
}

/// Returns early with a [`FormworkError::InvariantViolation`] if the condition does not hold.
#[macro_export]
macro_rules! ensure_invariant {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err($crate::FormworkError::InvariantViolation(format!($($arg)+)));
        }
    };
}
