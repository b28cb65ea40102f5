//! # Qew
//!
//! A bounded-concurrency queue for async operations.
//!
//! Push closures that produce futures; the qew runs at most `max_concurrent`
//! of them at a time, optionally waits a cooldown after each one settles before
//! admitting the next, and hands every outcome back to the caller.
//!
//! ## Key Features
//!
//! - **Concurrency gate**: never more than `max_concurrent` operations in flight
//! - **Cooldown**: fixed or generated delay between completion and the next admission
//! - **Two result shapes**: futures ([`TaskHandle`], [`GroupHandle`]) or callbacks
//! - **Batches**: a group of operations reported together, in order, with failures
//!   kept as `Err` slots instead of aborting the batch
//! - **Per-instance state**: every qew is independent and can be finished on its own
//!
//! ## Example
//!
//! ```rust,ignore
//! use qew::Qew;
//! use std::time::Duration;
//!
//! let qew: Qew<u32> = Qew::new(2, Duration::from_millis(500))?;
//!
//! // One operation, future shape
//! let value = qew.push(|| async { Ok(1) })?.await?;
//!
//! // A batch: resolves once every member settled
//! let results = qew
//!     .push_batch((0..4).map(|i| move || async move { Ok(i) }))?
//!     .await?;
//! ```
//!
//! ## Admission order
//!
//! Work is admitted oldest-first by default ([`AdmissionOrder::Fifo`]). A qew
//! can be built newest-first ([`AdmissionOrder::Lifo`]) instead; the order is
//! fixed for the lifetime of the instance. A batch counts as one submission and
//! its members always start in the order they were given.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Admission queue, scheduler state machine and result routing.
pub mod core;
/// Configuration models for qew instances.
pub mod config;
/// Builders to construct qew instances from configuration.
pub mod builders;
/// Runtime adapters used to drive operations.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::builders::QewBuilder;
pub use crate::config::QewConfig;
pub use crate::core::{
    AdmissionOrder, Delay, GroupHandle, GroupId, Qew, QewError, QewStats, TaskError, TaskHandle,
    TaskId,
};
