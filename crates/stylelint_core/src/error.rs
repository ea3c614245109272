//! Standalone error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineFailure;

/// Errors that abort a standalone run.
///
/// Syntax failures never show up here: they are converted into results.
#[derive(Debug, Error)]
pub enum StandaloneError {
    /// Invalid or contradictory options, or an unknown formatter.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The ignore file exists but could not be read.
    #[error("Failed to read ignore file {}: {source}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine raised something other than a syntax failure.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineFailure),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StandaloneError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
