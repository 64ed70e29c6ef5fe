//! Benchmarks for batch generation and the in-memory insert path

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use docbench::document;
use docbench::runner::BenchRunner;
use docbench::store::MemoryStore;
use docbench::BenchConfig;

fn config(client_count: usize, batch_size: usize) -> BenchConfig {
    BenchConfig {
        uri: "memory://".to_string(),
        database: "test".to_string(),
        collection: "test".to_string(),
        client_count,
        batch_size,
    }
}

fn bench_batch_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_build");
    for size in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(document::batch(7, size)));
        });
    }
    group.finish();
}

fn bench_memory_run(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("memory_run");
    for clients in [10usize, 100] {
        let batch_size = 100usize;
        group.throughput(Throughput::Elements((clients * batch_size) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(clients),
            &clients,
            |b, &clients| {
                b.iter(|| {
                    let runner = BenchRunner::new(
                        config(clients, batch_size),
                        Arc::new(MemoryStore::new()),
                    );
                    black_box(rt.block_on(runner.run()).unwrap())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_batch_build, bench_memory_run
);

criterion_main!(benches);
