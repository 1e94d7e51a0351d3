//! Error types for the reduction layer
//!
//! Reduction itself cannot fail. These cover the data sources queries are
//! built on and configuration loading.

use thiserror::Error;

/// Errors a performance-counter data source may report
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Query timed out")]
    Timeout,

    #[error("Failed to decode query result: {0}")]
    Decode(String),
}

/// Errors that can occur while loading reduction configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
