pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod plugin;
pub mod tags;
pub mod walker;

pub use error::{Result, SoundcheckError};

/// The run completed; individual checks may still have failed.
pub const EXIT_SUCCESS: i32 = 0;
/// The checks module could not be loaded, or fail-fast stopped the run.
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
