//! Error types for ponpm-core.
//!
//! This module provides structured error types for all ponpm-core operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`StoreError`] - Errors from the object store client
//!
//! Malformed report rows are not errors: they surface as
//! [`RowSkip`](crate::report::RowSkip) values and are counted per entry.
//!
//! All errors implement `std::error::Error` and can be converted to `anyhow::Error`.

use thiserror::Error;

/// Main error type for ponpm-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Source key extension is neither `tar` nor `gz`
    #[error("Unsupported bundle format: '{extension}' (expected tar or gz)")]
    UnsupportedFormat { extension: String },

    /// Nested archive bundles cannot be extracted yet
    #[error("Nested archive extraction is not implemented (bundle: {key})")]
    NotImplemented { key: String },

    /// Error talking to the object store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Unparsable or unsupported store location
    #[error("Invalid location: {0}")]
    Location(String),

    /// Error reading or writing CSV records
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the object store client.
///
/// Each variant carries the key involved so a failed run can be traced
/// back to the object that caused it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store client could not be constructed
    #[error("Failed to build {scheme} store: {source}")]
    Build {
        scheme: String,
        #[source]
        source: object_store::Error,
    },

    /// Source object could not be downloaded
    #[error("Failed to fetch {key}: {source}")]
    Fetch {
        key: String,
        #[source]
        source: object_store::Error,
    },

    /// Existence probe failed with something other than "not found"
    #[error("Failed to probe {key}: {source}")]
    Probe {
        key: String,
        #[source]
        source: object_store::Error,
    },

    /// Artifact upload failed
    #[error("Failed to put {key}: {source}")]
    Put {
        key: String,
        #[source]
        source: object_store::Error,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
