//! Performance benchmarks for the prime coordinator
//! Measures partition planning, worker scaling, and strategy balance

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use primesum::coordinator::{Coordinator, RunOptions};
use primesum::partition::{plan_assignments, PartitionStrategy};
use primesum::primes::sequential_tally;
use std::hint::black_box;
use std::time::Duration;

const STRATEGIES: [PartitionStrategy; 3] = [
    PartitionStrategy::Float,
    PartitionStrategy::RemainderLast,
    PartitionStrategy::Balanced,
];

fn bench_partition_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_planning");

    for workers in &[4usize, 64, 1024] {
        for strategy in STRATEGIES {
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), workers),
                workers,
                |b, &workers| {
                    b.iter(|| {
                        let plan = plan_assignments(workers, black_box(10_000_000), strategy);
                        black_box(plan)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_worker_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_scaling");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let max_number = 200_000i64;
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(sequential_tally(black_box(max_number as u64))))
    });

    for workers in &[1i64, 2, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::new("threads", workers), workers, |b, &n| {
            let coordinator = Coordinator::new(RunOptions::default());
            b.iter(|| black_box(coordinator.run(n, black_box(max_number))));
        });
    }

    group.finish();
}

fn bench_strategy_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy_balance");
    group.sample_size(20);

    // Odd bound so the remainder lands somewhere
    let max_number = 150_001i64;
    for strategy in STRATEGIES {
        group.bench_function(strategy.as_str(), |b| {
            let coordinator = Coordinator::new(RunOptions {
                strategy,
                ..RunOptions::default()
            });
            b.iter(|| black_box(coordinator.run(7, black_box(max_number))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_partition_planning,
    bench_worker_scaling,
    bench_strategy_balance
);

criterion_main!(benches);
