//! Simulation error handling
//!
//! Only setup can fail: reading the map, reading the config and acquiring
//! the terminal. Once frames are running every step is total.

use std::path::PathBuf;

/// Result alias used across the crate
pub type SimResult<T> = Result<T, SimError>;

/// Errors that stop the simulator before (or while) it starts
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("failed to open map file {path}: {source}")]
    MapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map file {path} has no cells")]
    EmptyMap { path: PathBuf },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Helper trait attaching a path to map I/O failures
pub trait MapErrorContext<T> {
    fn map_context(self, path: impl Into<PathBuf>) -> SimResult<T>;
}

impl<T> MapErrorContext<T> for std::io::Result<T> {
    fn map_context(self, path: impl Into<PathBuf>) -> SimResult<T> {
        self.map_err(|source| SimError::MapRead {
            path: path.into(),
            source,
        })
    }
}
