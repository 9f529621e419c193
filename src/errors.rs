//! Unified error type for the cafeteria ledger.
//!
//! Lookup misses (get, update, delete, void) are reported through `Option`/`bool`
//! by the operations themselves. The variants here cover everything that aborts
//! an operation.

use thiserror::Error;

/// All errors produced by the store, the ledger and the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input rejected before any mutation took place
    #[error("Validation error: {message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },

    /// A sale line asks for more units than the article has in stock
    #[error("Insufficient stock for article {article_id}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Article that ran short
        article_id: String,
        /// Units currently in stock
        available: u32,
        /// Units the sale asked for
        requested: u32,
    },

    /// A record referenced by another record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record (e.g. "article")
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The collection changed between read and write
    #[error("Collection '{collection}' was modified concurrently")]
    Conflict {
        /// Collection key
        collection: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable could not be read
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
