use serde::Deserialize;

use crate::engine::DEFAULT_WORKERS;
use crate::error::{Result, SoundcheckError};
use crate::output::OutputFormat;

/// Contents of `.soundcheck.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    /// Returns [`SoundcheckError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.run.workers == 0 {
            return Err(SoundcheckError::Config(
                "run.workers must be at least 1".to_string(),
            ));
        }
        if let Some(pattern) = self.scanner.exclude.iter().find(|p| p.trim().is_empty()) {
            return Err(SoundcheckError::Config(format!(
                "scanner.exclude contains an empty pattern: '{pattern}'"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Worker threads evaluating files (default: 8).
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Stop at the first failing result.
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            fail_fast: false,
        }
    }
}

/// Library traversal settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    /// Glob patterns matched against paths relative to the library root.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Follow symbolic links while walking (default: true).
    #[serde(default = "default_true")]
    pub follow_links: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

const fn default_workers() -> usize {
    DEFAULT_WORKERS
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
