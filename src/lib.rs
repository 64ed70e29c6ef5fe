//! # docbench
//!
//! A concurrent bulk-insert benchmark for MongoDB-compatible document
//! stores:
//! - fans out N independent clients, each owning one connection
//! - every client times exactly one bulk insert of B synthetic documents
//! - join-all barrier before the total time, nothing abandoned
//! - tagged per-client outcomes, so one failure never aborts the run
//! - pluggable store seam with a real MongoDB backend and an in-memory
//!   backend for tests and dry runs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              BenchRunner                │
//! │   (fan out N clients, join them all)    │
//! └───────┬───────────┬────────────┬────────┘
//!         │           │            │
//!   ┌─────▼─────┐ ┌───▼───────┐ ┌──▼──────────┐
//!   │ Client 0  │ │ Client 1  │ │ Client N-1  │
//!   │ 1 connect │ │ 1 connect │ │ 1 connect   │
//!   │ B docs    │ │ B docs    │ │ B docs      │
//!   └─────┬─────┘ └───┬───────┘ └──┬──────────┘
//!         │           │            │
//!         └───────────┴────────────┘
//!                     │ one bulk insert each
//!             ┌───────▼────────┐
//!             │ Document store │
//!             └────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Classic run: 1000 clients x 1000 docs into test.test
//! docbench --uri mongodb://localhost:27017
//!
//! # Smaller run against a different namespace
//! docbench --clients 50 --batch-size 200 --database bench --collection docs
//!
//! # Dry run through the in-memory backend
//! docbench --backend memory --clients 10 --batch-size 10
//! ```

pub mod common;
pub mod document;
pub mod runner;
pub mod store;

// Re-export commonly used types
pub use common::{BenchConfig, Error, Result};
pub use runner::{BenchRunner, RunReport};
pub use store::{DocumentStore, MemoryStore, MongoStore};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build info
pub const BUILD_INFO: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARGO_PKG_NAME"), ")");
