//! Result routing: turning settled outcomes into callback invocations.
//!
//! The scheduler never calls user code while it holds its lock. Instead every
//! settlement yields a [`Delivery`] which the caller runs once the lock is
//! released. The future-shaped APIs are thin adapters that build callbacks
//! feeding a oneshot channel, so both shapes share the same sink.

use tokio::sync::oneshot;

use super::task::{Callback, GroupCallback};

/// A pending invocation of a user sink.
pub(crate) enum Delivery<T, E> {
    /// Outcome of a single task.
    Single {
        callback: Callback<T, E>,
        outcome: Result<T, E>,
    },
    /// All slots of a group, in submission order.
    Group {
        callback: GroupCallback<T, E>,
        results: Vec<Result<T, E>>,
    },
}

impl<T, E> Delivery<T, E> {
    /// Invoke the sink. Must be called without holding the scheduler lock.
    pub(crate) fn deliver(self) {
        match self {
            Self::Single { callback, outcome } => callback(outcome),
            Self::Group { callback, results } => callback(results),
        }
    }
}

/// Callback resolving a oneshot channel with the task outcome.
pub(crate) fn promise_callback<T, E>(tx: oneshot::Sender<Result<T, E>>) -> Callback<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Box::new(move |outcome| {
        if tx.send(outcome).is_err() {
            tracing::debug!("task handle dropped before delivery");
        }
    })
}

/// Callback resolving a oneshot channel with a group's results.
pub(crate) fn promise_group_callback<T, E>(
    tx: oneshot::Sender<Vec<Result<T, E>>>,
) -> GroupCallback<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Box::new(move |results| {
        if tx.send(results).is_err() {
            tracing::debug!("group handle dropped before delivery");
        }
    })
}

/// Partition a group's results into successes and failures, keeping order
/// within each side.
pub fn split_results<T, E>(results: Vec<Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let mut values = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(reason) => failures.push(reason),
        }
    }
    (values, failures)
}
