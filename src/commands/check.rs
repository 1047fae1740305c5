use std::io::Write;
use std::path::Path;

use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::engine::{Engine, EngineOptions, RunOutcome};
use crate::error::{Result, SoundcheckError};
use crate::logging;
use crate::output::{ScanProgress, create_sink};
use crate::plugin::PluginLoader;
use crate::tags::LoftyTagReader;
use crate::walker::{GlobFilter, LibraryWalker};
use crate::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};

/// Run the linter and map the outcome to an exit code.
#[must_use]
pub fn run_check(cli: &Cli) -> i32 {
    if let Err(e) = logging::init(cli.log_level, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        return EXIT_CONFIG_ERROR;
    }

    let stdout = std::io::stdout();
    match run_check_impl(cli, stdout.lock()) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_plugin_error() {
                EXIT_FAILURE
            } else {
                EXIT_CONFIG_ERROR
            }
        }
    }
}

/// Load configuration and checks, run them over the library and write the
/// results to `out`.
///
/// # Errors
/// Returns an error for configuration problems, checks modules that cannot be
/// loaded, an unusable library root, or output failures.
pub fn run_check_impl<W: Write>(cli: &Cli, out: W) -> Result<i32> {
    // 1. Load configuration
    let mut config = load_config(cli.config.as_deref(), cli.no_config)?;

    // 2. Apply CLI argument overrides
    apply_cli_overrides(&mut config, cli);
    config.validate()?;

    // 3. Load the checks module
    let checks = PluginLoader::load(&cli.checks_module)?;

    // 4. Prepare the walk
    let lib_root = dunce::canonicalize(&cli.library).map_err(|e| SoundcheckError::LibraryRoot {
        path: cli.library.clone(),
        reason: e.to_string(),
    })?;
    tracing::info!("Checking library {}", lib_root.display());
    let filter = GlobFilter::new(&config.scanner.exclude)?;
    let walker = LibraryWalker::new(lib_root, filter).follow_links(config.scanner.follow_links);

    // 5. Run
    let reader = LoftyTagReader::new();
    let options = EngineOptions {
        workers: config.run.workers,
        fail_fast: config.run.fail_fast,
    };
    let mut sink = create_sink(config.output.format, out, cli.color);
    let summary = Engine::new(&checks, &reader, options)
        .with_progress(ScanProgress::new(cli.quiet))
        .run(&walker, sink.as_mut())?;

    match summary.outcome {
        RunOutcome::Completed => Ok(EXIT_SUCCESS),
        RunOutcome::Terminated { check, file } => {
            eprintln!(
                "Error: check {check} failed for {}; stopping (--fail-fast)",
                file.display()
            );
            Ok(EXIT_FAILURE)
        }
    }
}

pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    let loaded = match config_path {
        Some(path) => loader.load_from_path(path)?,
        None => loader.load()?,
    };
    Ok(loaded.config)
}

pub(crate) fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(jobs) = cli.jobs {
        config.run.workers = usize::from(jobs);
    }
    if cli.fail_fast {
        config.run.fail_fast = true;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    config.scanner.exclude.extend(cli.exclude.iter().cloned());
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
