//! Synchronous admission/execution/completion state machine.
//!
//! `SchedulerCore` owns the admission queue, the execution set and the live
//! groups. It never awaits and never runs user code: every method is a direct
//! reaction to one event (a submission, an operation settling, a cooldown
//! ending) and returns what the async driver has to do next.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::group::GroupRegistry;
use super::queue::{AdmissionOrder, AdmissionQueue};
use super::router::Delivery;
use super::task::{Callback, GroupCallback, GroupId, Operation, Sink, Task, TaskId};
use super::QewError;

/// Snapshot of a qew's bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QewStats {
    /// Configured concurrency limit.
    pub max_concurrent: usize,
    /// Admission discipline in use.
    pub admission_order: AdmissionOrder,
    /// Tasks waiting for admission.
    pub pending: usize,
    /// Tasks holding a capacity unit (running or cooling down).
    pub executing: usize,
    /// Batches still waiting for at least one member.
    pub live_groups: usize,
    /// Tasks accepted since construction.
    pub submitted: u64,
    /// Operations that settled successfully.
    pub fulfilled: u64,
    /// Operations that settled with a failure.
    pub rejected: u64,
    /// Whether `finish` has been called.
    pub finished: bool,
}

/// Result of submitting a batch.
pub(crate) enum BatchReceipt<T, E> {
    /// Members were enqueued under this group.
    Queued(GroupId),
    /// The batch was empty and is already complete.
    Completed(Delivery<T, E>),
}

/// A task that holds a capacity unit. `sink` is taken when it settles.
struct Execution<T, E> {
    sink: Option<Sink<T, E>>,
}

pub(crate) struct SchedulerCore<T, E> {
    max_concurrent: usize,
    pending: AdmissionQueue<Task<T, E>>,
    executing: HashMap<TaskId, Execution<T, E>>,
    groups: GroupRegistry<T, E>,
    next_task_id: TaskId,
    finished: bool,
    submitted: u64,
    fulfilled: u64,
    rejected: u64,
}

impl<T, E> SchedulerCore<T, E> {
    pub(crate) fn new(max_concurrent: usize, order: AdmissionOrder) -> Result<Self, QewError> {
        if max_concurrent < 1 {
            return Err(QewError::InvalidConcurrency(max_concurrent));
        }
        Ok(Self {
            max_concurrent,
            pending: AdmissionQueue::new(order),
            executing: HashMap::with_capacity(max_concurrent.min(1024)),
            groups: GroupRegistry::new(),
            next_task_id: 0,
            finished: false,
            submitted: 0,
            fulfilled: 0,
            rejected: 0,
        })
    }

    fn ensure_open(&self) -> Result<(), QewError> {
        if self.finished {
            return Err(QewError::Finished);
        }
        Ok(())
    }

    fn allocate_ids(&mut self, count: usize) -> TaskId {
        let first = self.next_task_id;
        self.next_task_id += count as TaskId;
        self.submitted += count as u64;
        first
    }

    /// Enqueue one task with its own callback.
    pub(crate) fn submit(
        &mut self,
        operation: Operation<T, E>,
        callback: Callback<T, E>,
    ) -> Result<TaskId, QewError> {
        self.ensure_open()?;
        let id = self.allocate_ids(1);
        self.pending.push(Task {
            id,
            operation,
            sink: Sink::Single(callback),
        });
        Ok(id)
    }

    /// Enqueue a batch as one unit sharing a group.
    pub(crate) fn submit_batch(
        &mut self,
        operations: Vec<Operation<T, E>>,
        on_complete: GroupCallback<T, E>,
    ) -> Result<BatchReceipt<T, E>, QewError> {
        self.ensure_open()?;
        if operations.is_empty() {
            return Ok(BatchReceipt::Completed(Delivery::Group {
                callback: on_complete,
                results: Vec::new(),
            }));
        }

        let group_id = self.groups.open(operations.len(), on_complete);
        let first = self.allocate_ids(operations.len());
        let tasks = operations
            .into_iter()
            .enumerate()
            .map(|(slot, operation)| Task {
                id: first + slot as TaskId,
                operation,
                sink: Sink::Group { group_id, slot },
            })
            .collect();
        self.pending.push_batch(tasks);
        Ok(BatchReceipt::Queued(group_id))
    }

    /// Move pending tasks into the execution set until capacity or the queue
    /// runs out. Returns the operations the caller must start.
    pub(crate) fn admit(&mut self) -> Vec<(TaskId, Operation<T, E>)> {
        let mut admitted = Vec::new();
        while self.executing.len() < self.max_concurrent {
            let Some(task) = self.pending.pop() else {
                break;
            };
            let Task {
                id,
                operation,
                sink,
            } = task;
            self.executing.insert(id, Execution { sink: Some(sink) });
            admitted.push((id, operation));
        }
        admitted
    }

    /// React to an operation settling. The task keeps its capacity unit until
    /// [`release`](Self::release) is called.
    pub(crate) fn settle(&mut self, id: TaskId, outcome: Result<T, E>) -> Option<Delivery<T, E>> {
        let Some(execution) = self.executing.get_mut(&id) else {
            tracing::debug!(task_id = id, "outcome for untracked task dropped");
            return None;
        };
        let Some(sink) = execution.sink.take() else {
            tracing::warn!(task_id = id, "task settled twice, keeping first outcome");
            return None;
        };

        if outcome.is_ok() {
            self.fulfilled += 1;
        } else {
            self.rejected += 1;
        }

        match sink {
            Sink::Single(callback) => Some(Delivery::Single { callback, outcome }),
            Sink::Group { group_id, slot } => self.groups.fill(group_id, slot, outcome),
        }
    }

    /// Free the capacity unit held by a task.
    ///
    /// A task released without settling (its operation panicked) can never
    /// complete its group, so that group is dropped and its handle abandoned.
    /// A single task's sink is dropped along with it.
    pub(crate) fn release(&mut self, id: TaskId) -> bool {
        let Some(execution) = self.executing.remove(&id) else {
            return false;
        };
        if let Some(Sink::Group { group_id, .. }) = execution.sink {
            tracing::warn!(
                task_id = id,
                group_id,
                "task released unsettled, abandoning its group"
            );
            self.groups.abandon(group_id);
        }
        true
    }

    /// Drop all pending and executing bookkeeping and refuse further work.
    /// Returns how many tasks were dropped.
    pub(crate) fn finish(&mut self) -> usize {
        self.finished = true;
        let dropped = self.pending.clear() + self.executing.len();
        self.executing.clear();
        self.groups.clear();
        dropped
    }

    pub(crate) const fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub(crate) const fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn stats(&self) -> QewStats {
        QewStats {
            max_concurrent: self.max_concurrent,
            admission_order: self.pending.order(),
            pending: self.pending.len(),
            executing: self.executing.len(),
            live_groups: self.groups.len(),
            submitted: self.submitted,
            fulfilled: self.fulfilled,
            rejected: self.rejected,
            finished: self.finished,
        }
    }
}
