//! Error types for the timer service.

use std::path::PathBuf;

/// Failures raised by a configuration store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stored document is not valid configuration JSON.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// Store cannot accept requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Failures talking to the engine task.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine task has shut down.
    #[error("timer engine is not running")]
    Stopped,
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
