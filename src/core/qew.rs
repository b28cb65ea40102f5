//! Async driver around [`SchedulerCore`]: spawns admitted operations, routes
//! their outcomes and runs the cooldown before releasing capacity.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::delay::Delay;
use super::handle::{GroupHandle, TaskHandle};
use super::queue::AdmissionOrder;
use super::router::{promise_callback, promise_group_callback, Delivery};
use super::scheduler::{BatchReceipt, QewStats, SchedulerCore};
use super::task::{boxed_operation, Callback, GroupCallback, GroupId, Operation, TaskId};
use super::QewError;
use crate::runtime::TokioSpawner;

/// Abstraction for spawning task execution on a runtime.
pub trait Spawn {
    /// Spawn a future that runs to completion in the background.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// What caused an admission attempt. Only used for diagnostics.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Push,
    Completion,
}

struct Shared<T, E> {
    core: Mutex<SchedulerCore<T, E>>,
    delay: Delay,
}

/// Bounded-concurrency queue for async operations.
///
/// At most `max_concurrent` operations run at once. After an operation
/// settles its outcome is delivered, then the configured [`Delay`] elapses,
/// and only then is its capacity unit handed to the next pending operation.
///
/// All bookkeeping sits behind a single lock, so admission decisions are
/// serialized even on a multi-threaded runtime. Callbacks run outside that
/// lock and may push more work.
///
/// An operation that never settles keeps its capacity unit forever; there is
/// no timeout or cancellation. A panic in an operation, a callback or a delay
/// generator releases the unit without a cooldown. The panicking operation's
/// handle, or its whole batch, resolves with [`QewError::Abandoned`].
pub struct Qew<T, E = anyhow::Error, S = TokioSpawner> {
    shared: Arc<Shared<T, E>>,
    spawner: S,
}

impl<T, E, S: Clone> Clone for Qew<T, E, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            spawner: self.spawner.clone(),
        }
    }
}

impl<T, E> Qew<T, E, TokioSpawner>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a FIFO qew on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// [`QewError::InvalidConcurrency`] when `max_concurrent` is 0, or
    /// [`QewError::Runtime`] when called outside a tokio runtime.
    pub fn new(max_concurrent: usize, delay: impl Into<Delay>) -> Result<Self, QewError> {
        let spawner = TokioSpawner::try_current()?;
        Self::with_spawner(max_concurrent, delay, AdmissionOrder::Fifo, spawner)
    }
}

impl<T, E, S> Qew<T, E, S>
where
    T: Send + 'static,
    E: Send + 'static,
    S: Spawn + Clone + Send + 'static,
{
    /// Create a qew driven by `spawner`.
    ///
    /// # Errors
    ///
    /// [`QewError::InvalidConcurrency`] when `max_concurrent` is 0.
    pub fn with_spawner(
        max_concurrent: usize,
        delay: impl Into<Delay>,
        order: AdmissionOrder,
        spawner: S,
    ) -> Result<Self, QewError> {
        let core = SchedulerCore::new(max_concurrent, order)?;
        let delay = delay.into();
        tracing::debug!(max_concurrent, ?delay, ?order, "qew created");
        Ok(Self {
            shared: Arc::new(Shared {
                core: Mutex::new(core),
                delay,
            }),
            spawner,
        })
    }

    /// Push an operation and get a future for its outcome.
    ///
    /// # Errors
    ///
    /// [`QewError::Finished`] after [`finish`](Self::finish).
    pub fn push<F, Fut>(&self, operation: F) -> Result<TaskHandle<T, E>, QewError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let id = self.submit(boxed_operation(operation), promise_callback(tx))?;
        Ok(TaskHandle::new(id, rx))
    }

    /// Push an operation whose outcome is passed to `callback`.
    ///
    /// # Errors
    ///
    /// [`QewError::Finished`] after [`finish`](Self::finish).
    pub fn push_with<F, Fut, C>(&self, operation: F, callback: C) -> Result<TaskId, QewError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        C: FnOnce(Result<T, E>) + Send + 'static,
    {
        self.submit(boxed_operation(operation), Box::new(callback))
    }

    /// Push a batch and get a future for all of its results.
    ///
    /// The batch is admitted as one unit and its members start in the order
    /// given. An empty batch resolves immediately with an empty vector.
    ///
    /// # Errors
    ///
    /// [`QewError::Finished`] after [`finish`](Self::finish).
    pub fn push_batch<I, F, Fut>(&self, operations: I) -> Result<GroupHandle<T, E>, QewError>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let operations = operations.into_iter().map(boxed_operation).collect();
        let group_id = self.submit_batch(operations, promise_group_callback(tx))?;
        Ok(GroupHandle::new(group_id, rx))
    }

    /// Push a batch whose results are passed to `callback` once every member
    /// has settled. Returns `None` for an empty batch, in which case
    /// `callback` has already run.
    ///
    /// # Errors
    ///
    /// [`QewError::Finished`] after [`finish`](Self::finish).
    pub fn push_batch_with<I, F, Fut, C>(
        &self,
        operations: I,
        callback: C,
    ) -> Result<Option<GroupId>, QewError>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        C: FnOnce(Vec<Result<T, E>>) + Send + 'static,
    {
        let operations = operations.into_iter().map(boxed_operation).collect();
        self.submit_batch(operations, Box::new(callback))
    }

    /// Drop all pending and running bookkeeping and refuse further pushes.
    ///
    /// Operations that already started keep running, but their outcomes are
    /// discarded and capacity is not tracked anymore. Outstanding handles
    /// resolve with [`QewError::Abandoned`]. Returns how many tasks were
    /// dropped.
    pub fn finish(&self) -> usize {
        let dropped = self.shared.core.lock().finish();
        tracing::info!(dropped, "qew finished");
        dropped
    }

    /// Whether [`finish`](Self::finish) has been called.
    pub fn is_finished(&self) -> bool {
        self.shared.core.lock().is_finished()
    }

    /// Configured concurrency limit.
    pub fn max_concurrent(&self) -> usize {
        self.shared.core.lock().max_concurrent()
    }

    /// Snapshot of queue and execution counters.
    pub fn stats(&self) -> QewStats {
        self.shared.core.lock().stats()
    }

    fn submit(
        &self,
        operation: Operation<T, E>,
        callback: Callback<T, E>,
    ) -> Result<TaskId, QewError> {
        let (id, admitted) = {
            let mut core = self.shared.core.lock();
            let id = core.submit(operation, callback)?;
            (id, core.admit())
        };
        tracing::debug!(task_id = id, "task pushed");
        Self::launch_all(&self.shared, &self.spawner, admitted, Trigger::Push);
        Ok(id)
    }

    fn submit_batch(
        &self,
        operations: Vec<Operation<T, E>>,
        callback: GroupCallback<T, E>,
    ) -> Result<Option<GroupId>, QewError> {
        let size = operations.len();
        let (receipt, admitted) = {
            let mut core = self.shared.core.lock();
            let receipt = core.submit_batch(operations, callback)?;
            (receipt, core.admit())
        };

        // Whatever `admit` moved into the execution set must be started, even
        // for an empty batch: capacity may have been freed by another thread.
        Self::launch_all(&self.shared, &self.spawner, admitted, Trigger::Push);

        match receipt {
            BatchReceipt::Queued(group_id) => {
                tracing::debug!(group_id, size, "batch pushed");
                Ok(Some(group_id))
            }
            BatchReceipt::Completed(delivery) => {
                tracing::debug!("empty batch completed immediately");
                delivery.deliver();
                Ok(None)
            }
        }
    }

    /// Re-attempt admission after capacity was released.
    fn pump(shared: &Arc<Shared<T, E>>, spawner: &S) {
        let admitted = shared.core.lock().admit();
        Self::launch_all(shared, spawner, admitted, Trigger::Completion);
    }

    fn launch_all(
        shared: &Arc<Shared<T, E>>,
        spawner: &S,
        admitted: Vec<(TaskId, Operation<T, E>)>,
        trigger: Trigger,
    ) {
        tracing::debug!(?trigger, admitted = admitted.len(), "admission attempt");
        for (id, operation) in admitted {
            Self::launch(Arc::clone(shared), spawner.clone(), id, operation);
        }
    }

    /// Run one admitted operation through settle, cooldown and release.
    fn launch(shared: Arc<Shared<T, E>>, spawner: S, id: TaskId, operation: Operation<T, E>) {
        let runner = spawner.clone();
        runner.spawn(async move {
            let capacity = CapacityGuard {
                shared,
                spawner,
                id,
            };
            tracing::debug!(task_id = id, "executing task");
            let outcome = operation().await;

            let delivery: Option<Delivery<T, E>> = capacity.shared.core.lock().settle(id, outcome);
            if let Some(delivery) = delivery {
                delivery.deliver();
            }

            let cooldown = capacity.shared.delay.next();
            if !cooldown.is_zero() {
                tracing::debug!(task_id = id, ?cooldown, "cooling down before release");
                tokio::time::sleep(cooldown).await;
            }

            drop(capacity);
        });
    }
}

/// Capacity unit held by one launched task.
///
/// Released on drop, so a panicking operation, callback or delay generator
/// unwinds through the release instead of leaking the unit.
struct CapacityGuard<T, E, S>
where
    T: Send + 'static,
    E: Send + 'static,
    S: Spawn + Clone + Send + 'static,
{
    shared: Arc<Shared<T, E>>,
    spawner: S,
    id: TaskId,
}

impl<T, E, S> Drop for CapacityGuard<T, E, S>
where
    T: Send + 'static,
    E: Send + 'static,
    S: Spawn + Clone + Send + 'static,
{
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::warn!(task_id = self.id, "task panicked, releasing its capacity");
        }
        let released = self.shared.core.lock().release(self.id);
        if released {
            Qew::<T, E, S>::pump(&self.shared, &self.spawner);
        }
    }
}
