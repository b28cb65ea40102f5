//! Builders to construct qew instances from configuration.

pub mod qew_builder;

pub use qew_builder::QewBuilder;
