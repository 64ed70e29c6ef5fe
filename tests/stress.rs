//! Stress test for docbench: wide fan-out, latency, throughput

use std::sync::Arc;
use std::time::{Duration, Instant};

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

#[tokio::test]
async fn stress_wide_fan_out() {
    let store = MemoryStore::new();
    let n = 1_000;
    let b = 100;

    let start = Instant::now();
    let report = BenchRunner::new(config(n, b), Arc::new(store.clone()))
        .run()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert!(report.all_completed());
    assert_eq!(report.clients.len(), n);
    assert_eq!(report.documents_inserted(), (n * b) as u64);
    assert_eq!(store.insert_calls(), n);
    assert_eq!(store.documents("test", "test").len(), n * b);

    println!("Fan out {} clients x {} docs: {:?}", n, b, elapsed);
    assert!(elapsed.as_secs_f64() < 30.0, "Fan-out too slow");
}

#[tokio::test]
async fn stress_slow_store_runs_clients_concurrently() {
    let store = MemoryStore::new();
    store.set_insert_delay(Duration::from_millis(25));
    let n = 200;

    let report = BenchRunner::new(config(n, 10), Arc::new(store.clone()))
        .run()
        .await
        .unwrap();

    assert!(report.all_completed());
    assert_eq!(store.insert_calls(), n);
    assert!(report.slowest_insert().unwrap() >= Duration::from_millis(25));
    assert!(report.total_elapsed >= report.slowest_insert().unwrap());

    // Sequential execution would take n * 25ms = 5s
    println!("Total time for {} delayed clients: {:?}", n, report.total_elapsed);
    assert!(
        report.total_elapsed < Duration::from_millis(2_500),
        "Clients did not run concurrently"
    );
}
