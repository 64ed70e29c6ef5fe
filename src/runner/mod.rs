//! Benchmark runner
//!
//! Fans out one task per client, waits on the whole set, and folds the
//! tagged outcomes into a [`RunReport`]. Each task owns its connection
//! and its batch; the only things shared across tasks are the store
//! factory handle and the read-only configuration.

pub mod report;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::common::{BenchConfig, Error, Result};
use crate::document;
use crate::store::DocumentStore;

pub use report::{ClientOutcome, ClientReport, RunReport};

/// Drives one benchmark run against a store.
pub struct BenchRunner {
    config: BenchConfig,
    store: Arc<dyn DocumentStore>,
}

impl BenchRunner {
    pub fn new(config: BenchConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self { config, store }
    }

    /// Fan out one task per client, wait for every one of them, and
    /// aggregate the outcomes.
    ///
    /// A failed unit of work never aborts the run; it surfaces as a
    /// [`ClientOutcome::Failed`] entry in the report. `Err` here means
    /// the run could not start at all.
    pub async fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            "run {}: {} clients x {} docs into {} ({} docs total)",
            run_id,
            self.config.client_count,
            self.config.batch_size,
            self.config.namespace(),
            self.config.total_documents()
        );

        let started = Instant::now();

        let mut handles = Vec::with_capacity(self.config.client_count);
        for client_index in 0..self.config.client_count as u64 {
            let store = Arc::clone(&self.store);
            let config = self.config.clone();
            handles.push((
                client_index,
                tokio::spawn(async move { run_client(store, config, client_index).await }),
            ));
        }

        // Join barrier: every unit completes or fails before the global
        // timer stops. A panicked task becomes a failed outcome.
        let mut clients = Vec::with_capacity(handles.len());
        for (client_index, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Client {} task panicked: {}", client_index, e);
                    ClientOutcome::Failed {
                        error: Error::Internal(format!(
                            "client {} task panicked: {}",
                            client_index, e
                        )),
                    }
                }
            };
            clients.push(ClientReport {
                client_index,
                outcome,
            });
        }

        let total_elapsed = started.elapsed();
        let report = RunReport {
            run_id,
            started_at,
            total_elapsed,
            clients,
        };
        info!(
            "run {} finished in {:?}: {} completed, {} failed, {} docs inserted",
            run_id,
            total_elapsed,
            report.completed_count(),
            report.failed_count(),
            report.documents_inserted()
        );

        Ok(report)
    }
}

/// One unit of work, resolved to a tagged outcome.
async fn run_client(
    store: Arc<dyn DocumentStore>,
    config: BenchConfig,
    client_index: u64,
) -> ClientOutcome {
    match drive_client(store, &config, client_index).await {
        Ok((inserted, elapsed)) => ClientOutcome::Completed { inserted, elapsed },
        Err(error) => {
            error!("Client {} failed: {}", client_index, error);
            ClientOutcome::Failed { error }
        }
    }
}

/// Connect, resolve the namespace, build the batch, and time exactly
/// one bulk insert. The connection is released when this scope ends.
async fn drive_client(
    store: Arc<dyn DocumentStore>,
    config: &BenchConfig,
    client_index: u64,
) -> Result<(u64, Duration)> {
    let connection = store.connect(&config.uri).await?;
    let collection = connection
        .database(&config.database)
        .collection(&config.collection);

    let docs = document::batch(client_index, config.batch_size);

    info!("Client {} inserting docs...", client_index);
    let started = Instant::now();
    let inserted = collection.insert_many(&docs).await?;
    let elapsed = started.elapsed();
    info!("Client {} inserted docs!", client_index);

    Ok((inserted, elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn test_config(client_count: usize, batch_size: usize) -> BenchConfig {
        BenchConfig {
            uri: "memory://".to_string(),
            database: "test".to_string(),
            collection: "test".to_string(),
            client_count,
            batch_size,
        }
    }

    fn runner(store: &MemoryStore, client_count: usize, batch_size: usize) -> BenchRunner {
        BenchRunner::new(
            test_config(client_count, batch_size),
            Arc::new(store.clone()),
        )
    }

    #[tokio::test]
    async fn test_one_outcome_per_client_in_index_order() {
        let store = MemoryStore::new();
        let report = runner(&store, 4, 2).run().await.unwrap();

        assert_eq!(report.clients.len(), 4);
        assert!(report.all_completed());
        let indices: Vec<u64> = report.clients.iter().map(|c| c.client_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(store.connect_calls(), 4);
        assert_eq!(store.insert_calls(), 4);
        assert_eq!(report.documents_inserted(), 8);
    }

    #[tokio::test]
    async fn test_zero_clients_is_an_empty_run() {
        let store = MemoryStore::new();
        let report = runner(&store, 0, 5).run().await.unwrap();

        assert!(report.clients.is_empty());
        assert!(report.all_completed());
        assert_eq!(store.connect_calls(), 0);
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_zero_batch_still_issues_one_insert_per_client() {
        let store = MemoryStore::new();
        let report = runner(&store, 2, 0).run().await.unwrap();

        assert!(report.all_completed());
        assert_eq!(store.insert_calls(), 2);
        assert_eq!(report.documents_inserted(), 0);
        for batch in store.batches("test", "test") {
            assert!(batch.is_empty());
        }
    }

    #[tokio::test]
    async fn test_connect_failure_does_not_stop_other_clients() {
        let store = MemoryStore::new();
        store.fail_next_connects(1);
        let report = runner(&store, 3, 1).run().await.unwrap();

        assert_eq!(report.clients.len(), 3);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.completed_count(), 2);
        assert_eq!(store.connect_calls(), 3);

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].1.is_connect());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_fan_out() {
        let store = MemoryStore::new();
        let mut config = test_config(2, 2);
        config.uri = String::new();
        let runner = BenchRunner::new(config, Arc::new(store.clone()));

        assert!(runner.run().await.is_err());
        assert_eq!(store.connect_calls(), 0);
    }
}
