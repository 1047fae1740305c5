use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam_channel::Sender;

use crate::context::LibraryContext;
use crate::error::panic_message;
use crate::output::ScanProgress;
use crate::plugin::{CheckFunction, CheckSet};
use crate::tags::{Extraction, TagReader, extract_tags};

use super::result::CheckResult;

/// Counters shared by all file tasks of a run.
#[derive(Debug, Default)]
pub struct RunCounters {
    submitted: AtomicUsize,
    decoded: AtomicUsize,
    unsupported: AtomicUsize,
    failed: AtomicUsize,
    cancelled: AtomicUsize,
}

/// Point-in-time copy of [`RunCounters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub submitted: usize,
    pub decoded: usize,
    pub unsupported: usize,
    pub failed: usize,
    /// Tasks skipped because the run was terminated before they started.
    pub cancelled: usize,
}

impl RunCounters {
    pub fn submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }
}

/// Everything a worker needs to process one file. Shared by reference across
/// all tasks; nothing in it is mutated except the atomics.
pub struct FileTask<'a> {
    pub checks: &'a CheckSet,
    pub reader: &'a dyn TagReader,
    pub lib_root: &'a Path,
    pub cancelled: &'a AtomicBool,
    pub counters: &'a RunCounters,
    pub progress: &'a ScanProgress,
}

impl FileTask<'_> {
    /// Decode `file`, run every check against it and push the results.
    pub fn run(&self, file: &Path, results: &Sender<CheckResult>) {
        if self.cancelled.load(Ordering::Acquire) {
            self.counters.cancelled.fetch_add(1, Ordering::Relaxed);
            return;
        }

        self.process(file, results);
        self.progress.inc();
    }

    fn process(&self, file: &Path, results: &Sender<CheckResult>) {
        let tags = match extract_tags(self.reader, file) {
            Extraction::Decoded(tags) => tags,
            Extraction::Unsupported => {
                self.counters.unsupported.fetch_add(1, Ordering::Relaxed);
                return;
            }
            Extraction::Failed => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };
        self.counters.decoded.fetch_add(1, Ordering::Relaxed);

        let Some(ctx) = LibraryContext::new(file, self.lib_root, tags) else {
            tracing::error!(
                file = %file.display(),
                "File is outside the library root {}",
                self.lib_root.display()
            );
            return;
        };

        for check in self.checks {
            let result = run_check(check, &ctx);
            if results.send(result).is_err() {
                tracing::debug!("Result queue closed, dropping remaining results");
                return;
            }
        }
    }
}

/// Evaluate one check, turning a panic into an error result.
pub fn run_check(check: &CheckFunction, ctx: &LibraryContext) -> CheckResult {
    match catch_unwind(AssertUnwindSafe(|| check.evaluate(ctx))) {
        Ok(outcome) => CheckResult::from_outcome(check.qualified_name(), ctx.abs_path(), outcome),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(
                check = check.qualified_name(),
                file = %ctx.abs_path().display(),
                "Check panicked: {message}"
            );
            CheckResult::error(
                check.qualified_name(),
                ctx.abs_path(),
                format!("check panicked: {message}"),
            )
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
