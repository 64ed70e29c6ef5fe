//! Common utilities and types shared across docbench

pub mod config;
pub mod error;

pub use config::BenchConfig;
pub use error::{Error, Result};
