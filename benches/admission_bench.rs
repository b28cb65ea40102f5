//! Benchmarks for the qew scheduler.
//!
//! Benchmarks cover:
//! - Push and admission of ready operations at different concurrency limits
//! - Batch submission and aggregation
//! - Callback-shaped delivery

use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qew::Qew;
use tokio::runtime::Runtime;

const TASKS: u64 = 1_000;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_push_ready_operations(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("push_ready");
    group.throughput(Throughput::Elements(TASKS));

    for limit in [1_usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.to_async(&rt).iter(|| async move {
                let qew: Qew<u64> = Qew::new(limit, Duration::ZERO).unwrap();
                let handles: Vec<_> = (0..TASKS)
                    .map(|i| qew.push(move || async move { Ok(black_box(i)) }).unwrap())
                    .collect();
                for handle in handles {
                    black_box(handle.await.unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_push_batch(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("push_batch");
    group.throughput(Throughput::Elements(TASKS));

    for limit in [1_usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.to_async(&rt).iter(|| async move {
                let qew: Qew<u64> = Qew::new(limit, Duration::ZERO).unwrap();
                let results = qew
                    .push_batch((0..TASKS).map(|i| move || async move { Ok(black_box(i)) }))
                    .unwrap()
                    .await
                    .unwrap();
                assert_eq!(results.len(), TASKS as usize);
            });
        });
    }
    group.finish();
}

fn bench_callback_delivery(c: &mut Criterion) {
    let rt = runtime();
    c.bench_function("callback_delivery", |b| {
        b.to_async(&rt).iter(|| async {
            let qew: Qew<u64> = Qew::new(16, Duration::ZERO).unwrap();
            let delivered = Arc::new(AtomicUsize::new(0));
            let (tx, rx) = tokio::sync::oneshot::channel();
            let tx = Arc::new(parking_lot::Mutex::new(Some(tx)));

            for i in 0..TASKS {
                let delivered = Arc::clone(&delivered);
                let tx = Arc::clone(&tx);
                qew.push_with(
                    move || async move { Ok(i) },
                    move |outcome| {
                        black_box(outcome.ok());
                        if delivered.fetch_add(1, Ordering::SeqCst) + 1 == TASKS as usize {
                            if let Some(tx) = tx.lock().take() {
                                let _ = tx.send(());
                            }
                        }
                    },
                )
                .unwrap();
            }
            rx.await.unwrap();
        });
    });
}

// ============================================================================
// Benchmark Groups
// ============================================================================

criterion_group!(
    admission_benches,
    bench_push_ready_operations,
    bench_push_batch,
    bench_callback_delivery
);

criterion_main!(admission_benches);
