//! Error types for snapshot import and persistence.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur when reading a raw content snapshot.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    #[diagnostic(code(draftpad::snapshot::json))]
    Json(#[from] serde_json::Error),

    #[error("duplicate block key in snapshot: {0}")]
    #[diagnostic(code(draftpad::snapshot::duplicate_key))]
    DuplicateKey(String),
}

/// Errors raised by a key-value store.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    #[diagnostic(code(draftpad::storage::unavailable))]
    Unavailable(String),

    #[error("failed to write {key}: {message}")]
    #[diagnostic(code(draftpad::storage::write))]
    Write { key: String, message: String },
}
