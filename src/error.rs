//! Error taxonomy for export and persistence operations.
//!
//! All failures are terminal for the operation that raised them: there are
//! no automatic retries, and every error is surfaced so the caller can
//! re-invoke the operation.

use thiserror::Error;

/// Errors raised while preparing, rendering, or composing an export batch.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Invalid export configuration (zero-area sheet grid, label larger
    /// than the page, empty selection). Detected before composition begins
    /// where feasible; aborts the export without touching library state.
    #[error("invalid export configuration: {0}")]
    Configuration(String),

    /// The rasterization collaborator failed for one label. A sheet or
    /// page layout with a missing buffer has no well-defined placeholder,
    /// so the whole batch aborts.
    #[error("label render failed: {0}")]
    Render(String),

    /// PNG or PDF byte production failed.
    #[error("artifact encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encode(err.to_string())
    }
}

/// Errors raised by the persistence collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage read/write failed. Callers catch and log this; the
    /// in-memory state remains authoritative for the session.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// Malformed JSON during library import. The file is rejected whole;
    /// nothing is partially imported.
    #[error("malformed import data: {0}")]
    ImportFormat(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::ImportFormat(err.to_string())
    }
}
