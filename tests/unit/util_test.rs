//! Tests for utility functions

use qew::util::{init_tracing, init_tracing_with};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    // A subscriber is now set, so nothing else gets installed
    assert!(!init_tracing_with("qew=debug"));
}
