use std::io::Write;

use crate::engine::{CheckResult, CheckStatus};
use crate::error::Result;

use super::ResultSink;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
}

/// Writes one human-readable line per result.
pub struct TextSink<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TextSink<W> {
    #[must_use]
    pub fn new(writer: W, mode: ColorMode) -> Self {
        Self {
            writer,
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(status: CheckStatus) -> &'static str {
        match status {
            CheckStatus::Pass => "✓",
            CheckStatus::Fail => "✗",
            CheckStatus::Error => "!",
        }
    }

    fn colorize(&self, text: &str, status: CheckStatus) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        let color = match status {
            CheckStatus::Pass => ansi::GREEN,
            CheckStatus::Fail => ansi::RED,
            CheckStatus::Error => ansi::YELLOW,
        };

        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_result(&self, result: &CheckResult) -> String {
        let label = format!("{:<5}", result.status.as_str().to_uppercase());
        let mut line = format!(
            "{} {} {} {}",
            Self::status_icon(result.status),
            self.colorize(&label, result.status),
            result.check,
            result.file.display()
        );
        if let Some(detail) = &result.detail {
            line.push_str(": ");
            line.push_str(detail);
        }
        line
    }
}

impl<W: Write> ResultSink for TextSink<W> {
    fn write(&mut self, result: &CheckResult) -> Result<()> {
        let line = self.format_result(result);
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
