//! Task records binding an operation to its result sink.

use std::future::Future;
use std::pin::Pin;

/// Identifier assigned to every submitted task, unique within one qew.
pub type TaskId = u64;

/// Identifier assigned to every non-empty batch, unique within one qew.
pub type GroupId = u64;

/// Boxed future produced by an operation.
pub type OperationFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

pub(crate) type Operation<T, E> = Box<dyn FnOnce() -> OperationFuture<T, E> + Send + 'static>;

pub(crate) type Callback<T, E> = Box<dyn FnOnce(Result<T, E>) + Send + 'static>;

pub(crate) type GroupCallback<T, E> = Box<dyn FnOnce(Vec<Result<T, E>>) + Send + 'static>;

/// Where a task's outcome goes once it settles.
pub(crate) enum Sink<T, E> {
    /// Delivered on its own.
    Single(Callback<T, E>),
    /// Written into `slot` of a live group.
    Group { group_id: GroupId, slot: usize },
}

/// A submitted operation waiting for admission.
pub(crate) struct Task<T, E> {
    pub(crate) id: TaskId,
    pub(crate) operation: Operation<T, E>,
    pub(crate) sink: Sink<T, E>,
}

/// Erase the concrete closure and future types of an operation.
pub(crate) fn boxed_operation<F, Fut, T, E>(operation: F) -> Operation<T, E>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    Box::new(move || -> OperationFuture<T, E> { Box::pin(operation()) })
}
