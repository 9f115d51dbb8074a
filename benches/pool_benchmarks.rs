//! Worker pool dispatch benchmarks.
//!
//! - round-robin vs. random single-target dispatch
//! - broadcast fan-out across pool sizes

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

// Layer 3: Internal module imports
use conclave_rt::actor::{ActorContext, Behavior, SpawnOptions};
use conclave_rt::mailbox::NoopDeadLetterSink;
use conclave_rt::monitoring::NoopMonitor;
use conclave_rt::pool::{Pool, PoolStrategy};
use conclave_rt::{Error, Message};

#[derive(Debug, Clone)]
struct Work {
    value: u64,
}

impl Message for Work {
    const MESSAGE_TYPE: &'static str = "work";
}

#[derive(Clone)]
struct Doubler;

#[async_trait]
impl Behavior for Doubler {
    type Message = Work;
    type Response = u64;

    async fn receive(
        &mut self,
        message: Self::Message,
        _ctx: &mut ActorContext<Self::Message>,
    ) -> Result<Self::Response, Error> {
        Ok(message.value * 2)
    }
}

fn spawn_pool(size: usize, strategy: PoolStrategy) -> Pool<Doubler> {
    Pool::spawn(
        "bench-pool",
        size,
        |_| Doubler,
        strategy,
        SpawnOptions::default(),
        Arc::new(NoopDeadLetterSink),
        Arc::new(NoopMonitor::new()),
    )
}

/// Benchmark: single-target dispatch under each strategy, at a range of
/// pool sizes.
fn pool_dispatch_strategies(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("pool_dispatch");
    for &size in &[4usize, 16, 64] {
        for strategy in [PoolStrategy::RoundRobin, PoolStrategy::Random] {
            let label = format!("{strategy:?}/{size}");
            group.bench_with_input(BenchmarkId::from_parameter(label), &size, |b, &size| {
                b.to_async(&rt).iter_batched(
                    || spawn_pool(size, strategy),
                    |pool| async move {
                        for i in 0..50 {
                            black_box(pool.ask(Work { value: i }).unwrap().await_reply().await.unwrap());
                        }
                        pool.stop_all(Duration::from_secs(1)).await;
                    },
                    criterion::BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

/// Benchmark: broadcast fan-out cost at a range of pool sizes.
fn pool_broadcast_fanout(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("pool_broadcast_fanout");
    for &size in &[4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.to_async(&rt).iter_batched(
                || spawn_pool(size, PoolStrategy::RoundRobin),
                |pool| async move {
                    black_box(pool.broadcast(Work { value: 7 }).await);
                    pool.stop_all(Duration::from_secs(1)).await;
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .without_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = pool_dispatch_strategies, pool_broadcast_fanout
}

criterion_main!(benches);
