//! Configuration for benchmark runs
//!
//! Defaults mirror the classic smoke-test setup: 1000 clients inserting
//! 1000 documents each into `test.test` on a local server. Values are
//! layered: struct defaults, then an optional TOML file, then `DOCBENCH_*`
//! environment variables, with CLI flags applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::{Error, Result};

/// Benchmark run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Connection string for the target store
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Logical database holding the target collection
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection receiving the bulk inserts
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Number of concurrent client units to fan out
    #[serde(default = "default_client_count")]
    pub client_count: usize,

    /// Documents per client, sent as one bulk insert
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}
fn default_database() -> String {
    "test".to_string()
}
fn default_collection() -> String {
    "test".to_string()
}
fn default_client_count() -> usize {
    1000
}
fn default_batch_size() -> usize {
    1000
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
            client_count: default_client_count(),
            batch_size: default_batch_size(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from the layered sources (defaults, optional
    /// file, environment). CLI overrides are the binary's business.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&BenchConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }

        let cfg: BenchConfig = builder
            .add_source(config::Environment::with_prefix("DOCBENCH").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(cfg)
    }

    /// Zero clients or an empty batch are legal (the run is just small);
    /// only the endpoint and namespace must be present.
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(Error::InvalidConfig("uri cannot be empty".into()));
        }
        if self.database.trim().is_empty() {
            return Err(Error::InvalidConfig("database name cannot be empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "collection name cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Documents a full run will attempt to insert.
    pub fn total_documents(&self) -> u64 {
        self.client_count as u64 * self.batch_size as u64
    }

    /// The `database.collection` target, for log lines.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}
