//! In-process store for tests and dry runs
//!
//! Records every bulk insert it receives, keyed by namespace, and can
//! inject connect failures, per-client insert failures, and artificial
//! insert latency. All connections share one sink, so a test can keep a
//! cloned handle and inspect what a run produced.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::common::{Error, Result};
use crate::document::SyntheticDoc;
use crate::store::{DocumentStore, StoreCollection, StoreConnection, StoreDatabase};

type Namespace = (String, String);

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    connect_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    connect_failures: AtomicUsize,
    failing_clients: Mutex<HashSet<u64>>,
    insert_delay: Mutex<Option<Duration>>,
    batches: Mutex<HashMap<Namespace, Vec<Vec<serde_json::Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` connect calls fail.
    pub fn fail_next_connects(&self, n: usize) {
        self.inner.connect_failures.store(n, Ordering::SeqCst);
    }

    /// Reject any bulk insert carrying documents from this client.
    pub fn fail_inserts_for_client(&self, client_index: u64) {
        self.inner
            .failing_clients
            .lock()
            .unwrap()
            .insert(client_index);
    }

    /// Sleep this long inside every insert, to simulate a slow store.
    pub fn set_insert_delay(&self, delay: Duration) {
        *self.inner.insert_delay.lock().unwrap() = Some(delay);
    }

    /// Connect calls received so far, including rejected ones.
    pub fn connect_calls(&self) -> usize {
        self.inner.connect_calls.load(Ordering::SeqCst)
    }

    /// Bulk-insert calls received so far, including rejected ones.
    pub fn insert_calls(&self) -> usize {
        self.inner.insert_calls.load(Ordering::SeqCst)
    }

    /// Recorded batches for one namespace, in arrival order.
    pub fn batches(&self, database: &str, collection: &str) -> Vec<Vec<serde_json::Value>> {
        self.inner
            .batches
            .lock()
            .unwrap()
            .get(&(database.to_string(), collection.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// All documents recorded for one namespace, across batches.
    pub fn documents(&self, database: &str, collection: &str) -> Vec<serde_json::Value> {
        self.batches(database, collection)
            .into_iter()
            .flatten()
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&self, _uri: &str) -> Result<Box<dyn StoreConnection>> {
        self.inner.connect_calls.fetch_add(1, Ordering::SeqCst);

        let inject = self
            .inner
            .connect_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if inject {
            return Err(Error::Connect("injected connect failure".into()));
        }

        Ok(Box::new(MemoryConnection {
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct MemoryConnection {
    inner: Arc<Inner>,
}

impl StoreConnection for MemoryConnection {
    fn database(&self, name: &str) -> Box<dyn StoreDatabase> {
        Box::new(MemoryDatabase {
            inner: Arc::clone(&self.inner),
            database: name.to_string(),
        })
    }
}

struct MemoryDatabase {
    inner: Arc<Inner>,
    database: String,
}

impl StoreDatabase for MemoryDatabase {
    fn collection(&self, name: &str) -> Box<dyn StoreCollection> {
        Box::new(MemoryCollection {
            inner: Arc::clone(&self.inner),
            database: self.database.clone(),
            collection: name.to_string(),
        })
    }
}

struct MemoryCollection {
    inner: Arc<Inner>,
    database: String,
    collection: String,
}

#[async_trait]
impl StoreCollection for MemoryCollection {
    async fn insert_many(&self, docs: &[SyntheticDoc]) -> Result<u64> {
        self.inner.insert_calls.fetch_add(1, Ordering::SeqCst);

        // Copy the delay out so no guard is held across the await.
        let delay = *self.inner.insert_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        {
            let failing = self.inner.failing_clients.lock().unwrap();
            if let Some(doc) = docs.iter().find(|d| failing.contains(&d.client_index)) {
                return Err(Error::Insert(format!(
                    "injected insert failure for client {}",
                    doc.client_index
                )));
            }
        }

        let recorded: Vec<serde_json::Value> = docs
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::Encode(e.to_string()))?;
        let count = recorded.len() as u64;

        self.inner
            .batches
            .lock()
            .unwrap()
            .entry((self.database.clone(), self.collection.clone()))
            .or_default()
            .push(recorded);

        Ok(count)
    }
}
