//! The document-store seam
//!
//! The benchmark treats the store as an opaque collaborator reached
//! through four operations: connect, resolve a database, resolve a
//! collection, and issue one ordered bulk insert. Everything behind those
//! operations (pooling, wire protocol, persistence) is the backend's
//! business. Two backends ship: [`mongo::MongoStore`] drives a real
//! server through the MongoDB driver, [`memory::MemoryStore`] records
//! inserts in process for tests and dry runs.

use async_trait::async_trait;

use crate::common::Result;
use crate::document::SyntheticDoc;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Factory for client connections. One store handle serves a whole run;
/// every unit of work opens its own connection through it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open one connection to the endpoint named by `uri`.
    async fn connect(&self, uri: &str) -> Result<Box<dyn StoreConnection>>;
}

/// One client connection. Database resolution is synchronous and cheap.
pub trait StoreConnection: Send + Sync {
    fn database(&self, name: &str) -> Box<dyn StoreDatabase>;
}

/// A resolved logical database.
pub trait StoreDatabase: Send + Sync {
    fn collection(&self, name: &str) -> Box<dyn StoreCollection>;
}

/// A resolved collection accepting bulk writes.
#[async_trait]
pub trait StoreCollection: Send + Sync {
    /// Insert the documents as one ordered bulk write; returns how many
    /// the store acknowledged.
    async fn insert_many(&self, docs: &[SyntheticDoc]) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn assert_send_sync<T: Send + Sync>() {}

    // Seam objects cross task boundaries; they must stay Send + Sync.
    #[test]
    fn test_seam_objects_are_send_sync() {
        assert_send_sync::<Arc<dyn DocumentStore>>();
        assert_send_sync::<Box<dyn StoreConnection>>();
        assert_send_sync::<Box<dyn StoreDatabase>>();
        assert_send_sync::<Box<dyn StoreCollection>>();
    }
}
