//! Persistence Layer Error Types
//!
//! Error mapping to domain types

use std::path::PathBuf;

use roadmap_domain::errors::DomainError;
use thiserror::Error;

/// Persistence result type
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing document is not a JSON object of collections
    #[error("Corrupt document {}: {reason}", .path.display())]
    CorruptDocument { path: PathBuf, reason: String },

    /// Store configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<config::ConfigError> for PersistenceError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Serialization(reason) => DomainError::SerializationFailed { reason },
            other => DomainError::Repository {
                reason: other.to_string(),
            },
        }
    }
}
