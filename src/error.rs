//! Error types for the wmiq query engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a connection backend while opening a host or running a query.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Query rejected: {0}")]
    QueryRejected(String),

    #[error("Invalid snapshot {path:?}: {message}")]
    InvalidSnapshot { path: PathBuf, message: String },

    #[error("Connection I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors raised while building property values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("Array of {expected} contains an element of type {found} at index {index}")]
    HeterogeneousArray {
        expected: String,
        found: String,
        index: usize,
    },
}

/// Errors surfaced by a query run.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read hosts file {path:?}: {source}")]
    HostsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: ConnectionError,
    },

    #[error("Query failed on {host}: {source}")]
    Query {
        host: String,
        #[source]
        source: ConnectionError,
    },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl QueryError {
    /// True for errors detected before any connection is attempted.
    pub fn is_configuration(&self) -> bool {
        matches!(self, QueryError::Config(_) | QueryError::HostsFile { .. })
    }
}

impl From<config::ConfigError> for QueryError {
    fn from(err: config::ConfigError) -> Self {
        QueryError::Config(err.to_string())
    }
}
