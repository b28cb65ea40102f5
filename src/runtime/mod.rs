//! Runtime adapters used to drive operations.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
