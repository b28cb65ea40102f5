//! Future-shaped result handles returned by `Qew::push` and `Qew::push_batch`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::task::{GroupId, TaskId};
use super::{QewError, TaskError};

/// Resolves with the outcome of one pushed operation.
///
/// Dropping the handle does not cancel the operation.
#[derive(Debug)]
pub struct TaskHandle<T, E> {
    id: TaskId,
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> TaskHandle<T, E> {
    pub(crate) const fn new(id: TaskId, rx: oneshot::Receiver<Result<T, E>>) -> Self {
        Self { id, rx }
    }

    /// Id of the underlying task.
    pub const fn id(&self) -> TaskId {
        self.id
    }
}

impl<T, E> Future for TaskHandle<T, E> {
    type Output = Result<T, TaskError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(Ok(value))) => Poll::Ready(Ok(value)),
            Poll::Ready(Ok(Err(reason))) => Poll::Ready(Err(TaskError::Failed(reason))),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TaskError::Scheduler(QewError::Abandoned))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Resolves with every result of a pushed batch, in submission order.
///
/// Individual failures show up as `Err` slots; the handle itself only fails if
/// the qew was finished before the batch completed.
#[derive(Debug)]
pub struct GroupHandle<T, E> {
    group_id: Option<GroupId>,
    rx: oneshot::Receiver<Vec<Result<T, E>>>,
}

impl<T, E> GroupHandle<T, E> {
    pub(crate) const fn new(
        group_id: Option<GroupId>,
        rx: oneshot::Receiver<Vec<Result<T, E>>>,
    ) -> Self {
        Self { group_id, rx }
    }

    /// Id of the group, or `None` for an empty batch.
    pub const fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }
}

impl<T, E> Future for GroupHandle<T, E> {
    type Output = Result<Vec<Result<T, E>>, QewError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|received| received.map_err(|_| QewError::Abandoned))
    }
}
