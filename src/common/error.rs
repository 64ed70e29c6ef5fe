//! Error types for docbench

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Store Errors ===
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Bulk insert failed: {0}")]
    Insert(String),

    #[error("Document encoding failed: {0}")]
    Encode(String),

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Did this unit of work die before reaching the store?
    pub fn is_connect(&self) -> bool {
        matches!(self, Error::Connect(_))
    }

    /// Did the store reject or lose the bulk write?
    pub fn is_insert(&self) -> bool {
        matches!(self, Error::Insert(_))
    }
}

// Implement From for common error types
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
