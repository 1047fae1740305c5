use std::io::Write;

use crate::engine::CheckResult;
use crate::error::Result;

use super::ResultSink;

/// Writes one JSON object per result, e.g.
/// `{"check":"rules::check_has_title","file":"/music/a.mp3","status":"pass"}`.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn write(&mut self, result: &CheckResult) -> Result<()> {
        serde_json::to_writer(&mut self.writer, result)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
