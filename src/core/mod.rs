//! Admission queue, scheduler state machine and result routing.

pub mod delay;
pub mod error;
pub mod group;
pub mod handle;
pub mod qew;
pub mod queue;
pub mod router;
pub mod scheduler;
pub mod task;

pub use delay::Delay;
pub use error::{QewError, TaskError};
pub use handle::{GroupHandle, TaskHandle};
pub use qew::{Qew, Spawn};
pub use queue::AdmissionOrder;
pub use router::split_results;
pub use scheduler::QewStats;
pub use task::{GroupId, OperationFuture, TaskId};
