//! MongoDB driver backend

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};

use crate::common::{Error, Result};
use crate::document::SyntheticDoc;
use crate::store::{DocumentStore, StoreCollection, StoreConnection, StoreDatabase};

/// Stateless factory; every `connect` yields an independent client with
/// its own connection pool, matching one-connection-per-benchmark-client
/// semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoStore;

impl MongoStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn connect(&self, uri: &str) -> Result<Box<dyn StoreConnection>> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        // The driver connects lazily; a ping forces the handshake so a
        // dead endpoint fails here instead of inside the timed insert.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| Error::Connect(e.to_string()))?;

        Ok(Box::new(MongoConnection { client }))
    }
}

struct MongoConnection {
    client: Client,
}

impl StoreConnection for MongoConnection {
    fn database(&self, name: &str) -> Box<dyn StoreDatabase> {
        Box::new(MongoDatabase {
            database: self.client.database(name),
        })
    }
}

struct MongoDatabase {
    database: Database,
}

impl StoreDatabase for MongoDatabase {
    fn collection(&self, name: &str) -> Box<dyn StoreCollection> {
        Box::new(MongoCollection {
            collection: self.database.collection::<Document>(name),
        })
    }
}

struct MongoCollection {
    collection: Collection<Document>,
}

#[async_trait]
impl StoreCollection for MongoCollection {
    async fn insert_many(&self, docs: &[SyntheticDoc]) -> Result<u64> {
        let payload = docs
            .iter()
            .map(mongodb::bson::to_document)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Encode(e.to_string()))?;

        let outcome = self
            .collection
            .insert_many(payload)
            .await
            .map_err(|e| Error::Insert(e.to_string()))?;

        Ok(outcome.inserted_ids.len() as u64)
    }
}
