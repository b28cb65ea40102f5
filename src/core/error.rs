//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by the scheduler itself.
///
/// Operation failures are never reported through this type; they travel to the
/// caller's failure channel untouched (see [`TaskError`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QewError {
    /// Concurrency limit below 1 at construction.
    #[error("max_concurrent has to be 1 or higher, got {0}")]
    InvalidConcurrency(usize),
    /// Configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Work was submitted after the qew was finished.
    #[error("cannot push onto a finished qew")]
    Finished,
    /// The task's result was dropped before delivery, because the qew was
    /// finished or the operation panicked.
    #[error("task abandoned: result dropped before it was delivered")]
    Abandoned,
    /// No async runtime is available to drive operations.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}

/// Outcome error of a single task observed through a [`TaskHandle`](crate::core::TaskHandle).
#[derive(Debug, Error)]
pub enum TaskError<E> {
    /// The operation itself failed with this reason.
    #[error("operation failed: {0}")]
    Failed(E),
    /// The scheduler gave up on the task.
    #[error(transparent)]
    Scheduler(#[from] QewError),
}

impl<E> TaskError<E> {
    /// Returns the operation's failure reason, if that is what this is.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(reason) => Some(reason),
            Self::Scheduler(_) => None,
        }
    }
}
