//! Tests for error types

use qew::{QewError, TaskError};

#[test]
fn test_invalid_concurrency_error() {
    let err = QewError::InvalidConcurrency(0);
    assert_eq!(format!("{err}"), "max_concurrent has to be 1 or higher, got 0");
}

#[test]
fn test_finished_error() {
    assert_eq!(format!("{}", QewError::Finished), "cannot push onto a finished qew");
}

#[test]
fn test_abandoned_error() {
    assert_eq!(
        format!("{}", QewError::Abandoned),
        "task abandoned: result dropped before it was delivered"
    );
}

#[test]
fn test_invalid_config_error() {
    let err = QewError::InvalidConfig("bad delay".to_string());
    assert_eq!(format!("{err}"), "invalid configuration: bad delay");
}

#[test]
fn test_task_error_wraps_operation_failure() {
    let err: TaskError<String> = TaskError::Failed("timeout talking to upstream".into());
    assert_eq!(format!("{err}"), "operation failed: timeout talking to upstream");
    assert_eq!(err.into_failure().as_deref(), Some("timeout talking to upstream"));
}

#[test]
fn test_task_error_is_transparent_for_scheduler_errors() {
    let err: TaskError<String> = QewError::Abandoned.into();
    assert_eq!(format!("{err}"), format!("{}", QewError::Abandoned));
    assert!(err.into_failure().is_none());
}
