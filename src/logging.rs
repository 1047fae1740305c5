//! Diagnostic logging setup.
//!
//! Results go to stdout; everything logged here goes to stderr or to the file
//! given with `--log-file`.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::{Result, SoundcheckError};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    #[value(alias = "warn")]
    Warning,
    Error,
    /// Same as `error`; kept for familiarity with other tools.
    Critical,
}

impl LogLevel {
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Build the filter for `level`, refined by any `RUST_LOG` directives.
#[must_use]
pub fn build_filter(level: LogLevel, rust_log: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::new(level.level_filter().to_string());
    for directive in rust_log.unwrap_or_default().split(',').map(str::trim) {
        if directive.is_empty() {
            continue;
        }
        match directive.parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring invalid RUST_LOG directive '{directive}': {e}"),
        }
    }
    filter
}

/// Install the global subscriber. Only the first call has any effect.
///
/// # Errors
/// Returns [`SoundcheckError::LogFile`] if the log file cannot be created.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    if LOGGING.get().is_some() {
        return Ok(());
    }

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| SoundcheckError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level, rust_log.as_deref()))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init()
        .is_ok();

    let _ = LOGGING.set(());
    if installed {
        tracing::debug!("Logging initialised at {level:?}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
