//! Tests for runtime adapters

use std::time::Duration;

use qew::runtime::TokioSpawner;
use qew::{Qew, QewError};

#[test]
fn test_new_outside_runtime_fails() {
    let result: Result<Qew<u32>, QewError> = Qew::new(1, Duration::ZERO);
    assert!(matches!(result, Err(QewError::Runtime(_))));
}

#[test]
fn test_zero_concurrency_fails_before_runtime_is_needed() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let spawner = TokioSpawner::new(runtime.handle().clone());
    let result: Result<Qew<u32, String, TokioSpawner>, QewError> = Qew::with_spawner(
        0,
        Duration::ZERO,
        qew::AdmissionOrder::Fifo,
        spawner,
    );
    assert!(matches!(result, Err(QewError::InvalidConcurrency(0))));
}

#[test]
fn test_qew_on_multi_thread_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    let total = runtime.block_on(async {
        let qew: Qew<u64> = Qew::new(3, Duration::from_millis(1)).unwrap();
        let handles: Vec<_> = (0..20_u64)
            .map(|i| {
                qew.push(move || async move {
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    Ok::<_, anyhow::Error>(i)
                })
                .unwrap()
            })
            .collect();
        let mut total = 0;
        for handle in handles {
            total += handle.await.unwrap();
        }
        total
    });

    assert_eq!(total, (0..20).sum::<u64>());
}
