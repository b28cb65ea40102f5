//! Configuration models for qew instances.

pub mod qew;

pub use qew::{QewConfig, ENV_ADMISSION_ORDER, ENV_DELAY_MS, ENV_MAX_CONCURRENT};
