//! Tests for builders

use std::time::Duration;

use qew::runtime::TokioSpawner;
use qew::{AdmissionOrder, Qew, QewBuilder, QewConfig, QewError};

#[tokio::test]
async fn test_build_with_defaults() {
    let qew: Qew<u32> = QewBuilder::new().build().unwrap();
    let stats = qew.stats();
    assert_eq!(stats.max_concurrent, 1);
    assert_eq!(stats.admission_order, AdmissionOrder::Fifo);
    assert!(!stats.finished);
}

#[tokio::test]
async fn test_build_from_config() {
    let config = QewConfig {
        max_concurrent: 3,
        delay_ms: 100,
        admission_order: AdmissionOrder::Lifo,
    };
    let qew: Qew<u32> = QewBuilder::from_config(config).build().unwrap();
    assert_eq!(qew.max_concurrent(), 3);
    assert_eq!(qew.stats().admission_order, AdmissionOrder::Lifo);
}

#[tokio::test]
async fn test_build_rejects_zero_concurrency() {
    let result: Result<Qew<u32>, QewError> = QewBuilder::new()
        .max_concurrent(0)
        .delay(Duration::from_millis(10))
        .build();
    assert!(matches!(result, Err(QewError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_build_with_explicit_spawner() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
    let qew: Qew<u32, String, TokioSpawner> = QewBuilder::new()
        .max_concurrent(2)
        .build_with_spawner(spawner)
        .unwrap();

    let value = qew.push(|| async { Ok::<_, String>(7) }).unwrap().await.unwrap();
    assert_eq!(value, 7);
}
