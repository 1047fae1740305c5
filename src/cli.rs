use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;
use crate::output::{ColorMode, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "soundcheck")]
#[command(author, version, disable_version_flag = true)]
#[command(about = "Lint a music library against a module of metadata checks")]
#[command(long_about = "Walks a music library, decodes the tags of every audio file and runs \
    each check of a checks module against it, printing one result per file and check.\n\n\
    Exit codes:\n  \
    0 - Run completed (individual checks may have failed)\n  \
    1 - Checks module could not be loaded, or --fail-fast stopped the run\n  \
    2 - Configuration or usage error")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Root directory of the music library
    #[arg(short, long, default_value = ".", value_parser = existing_dir)]
    pub library: PathBuf,

    /// Checks module defining the check_* functions to run
    #[arg(short = 'm', long)]
    pub checks_module: PathBuf,

    /// Stop at the first failing check
    #[arg(long)]
    pub fail_fast: bool,

    /// Minimum level of diagnostics to log
    #[arg(long, value_enum, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Number of worker threads (overrides config, default 8)
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Result format (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Exclude patterns relative to the library root (glob syntax, repeatable)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long)]
    pub no_config: bool,

    /// Suppress the progress counter
    #[arg(short, long)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => match std::fs::read_dir(&path) {
            Ok(_) => Ok(path),
            Err(e) => Err(format!("directory '{value}' is not readable: {e}")),
        },
        Ok(_) => Err(format!("'{value}' is not a directory")),
        Err(_) => Err(format!("directory '{value}' does not exist")),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
