mod json;
mod progress;
mod text;

pub use json::JsonLinesSink;
pub use progress::ScanProgress;
pub use text::{ColorMode, TextSink};

use std::io::Write;

use serde::Deserialize;

use crate::engine::CheckResult;
use crate::error::Result;

/// Receives check results as the aggregator observes them.
pub trait ResultSink {
    /// Report one result.
    ///
    /// # Errors
    /// Returns an error if the result cannot be written.
    fn write(&mut self, result: &CheckResult) -> Result<()>;

    /// Flush anything buffered once the run is over.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects results in memory.
impl ResultSink for Vec<CheckResult> {
    fn write(&mut self, result: &CheckResult) -> Result<()> {
        self.push(result.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Build the sink for `format` writing to `writer`.
pub fn create_sink<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
    color: ColorMode,
) -> Box<dyn ResultSink + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextSink::new(writer, color)),
        OutputFormat::Json => Box::new(JsonLinesSink::new(writer)),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
