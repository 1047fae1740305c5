use std::any::Any;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoundcheckError {
    #[error("Failed to load checks module {path}: {reason}")]
    ModuleLoad { path: PathBuf, reason: String },

    #[error("Cannot execute checks module {path}: function '{function}' {reason}")]
    NoLoader {
        path: PathBuf,
        function: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid library root {path}: {reason}")]
    LibraryRoot { path: PathBuf, reason: String },

    #[error("Failed to open log file: {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl SoundcheckError {
    /// Whether the error came from loading the checks module.
    #[must_use]
    pub const fn is_plugin_error(&self) -> bool {
        matches!(self, Self::ModuleLoad { .. } | Self::NoLoader { .. })
    }
}

pub type Result<T> = std::result::Result<T, SoundcheckError>;

/// Text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
