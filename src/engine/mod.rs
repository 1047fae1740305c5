//! Concurrent check execution.
//!
//! The coordinating thread walks the library and submits one task per file to
//! a rayon pool. Workers push results onto an unbounded crossbeam channel; the
//! coordinator pops one result after each submission and drains the rest once
//! the pool has quiesced.

mod aggregator;
mod result;
mod scheduler;
#[cfg(test)]
mod test_support;

pub use aggregator::{ResultAggregator, RunPhase, Tallies, Termination};
pub use result::{CheckResult, CheckStatus};
pub use scheduler::{CounterSnapshot, FileTask, RunCounters, run_check};

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, SoundcheckError};
use crate::output::{ResultSink, ScanProgress};
use crate::plugin::CheckSet;
use crate::tags::TagReader;
use crate::walker::{FileFilter, LibraryWalker};

pub const DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub workers: usize,
    pub fail_fast: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Fail-fast stopped the run at this failing result.
    Terminated { check: String, file: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub files: CounterSnapshot,
    pub tallies: Tallies,
    /// Results produced after termination and never reported.
    pub discarded: usize,
}

impl RunSummary {
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.outcome, RunOutcome::Terminated { .. })
    }
}

/// Runs a check set over a library.
pub struct Engine<'a> {
    checks: &'a CheckSet,
    reader: &'a dyn TagReader,
    options: EngineOptions,
    progress: ScanProgress,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub fn new(checks: &'a CheckSet, reader: &'a dyn TagReader, options: EngineOptions) -> Self {
        Self {
            checks,
            reader,
            options,
            progress: ScanProgress::hidden(),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ScanProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Check every file `walker` yields and report the results to `sink`.
    ///
    /// # Errors
    /// Returns an error if the worker pool cannot be built or the sink fails.
    pub fn run<F: FileFilter>(
        &self,
        walker: &LibraryWalker<F>,
        sink: &mut dyn ResultSink,
    ) -> Result<RunSummary> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers.max(1))
            .thread_name(|i| format!("soundcheck-worker-{i}"))
            .build()?;

        let (tx, rx) = crossbeam_channel::unbounded();
        let cancelled = AtomicBool::new(false);
        let counters = RunCounters::default();
        let task = FileTask {
            checks: self.checks,
            reader: self.reader,
            lib_root: walker.root(),
            cancelled: &cancelled,
            counters: &counters,
            progress: &self.progress,
        };

        let mut aggregator = ResultAggregator::new(sink, self.options.fail_fast);
        let mut sink_error: Option<SoundcheckError> = None;

        aggregator.transition(RunPhase::Scheduling);
        pool.in_place_scope(|scope| {
            for file in walker.walk() {
                if cancelled.load(Ordering::Acquire) {
                    break;
                }
                counters.submitted();
                let tx = tx.clone();
                let task = &task;
                scope.spawn(move |_| task.run(&file, &tx));

                aggregator.transition(RunPhase::DrainingPartial);
                if let Ok(result) = rx.try_recv()
                    && !continue_after(&mut aggregator, result, &mut sink_error)
                {
                    cancelled.store(true, Ordering::Release);
                }
            }
        });
        aggregator.transition(RunPhase::PoolQuiesced);

        drop(tx);
        aggregator.transition(RunPhase::DrainingFinal);
        for result in rx.iter() {
            if !continue_after(&mut aggregator, result, &mut sink_error) {
                cancelled.store(true, Ordering::Release);
            }
        }
        self.progress.finish();

        if let Some(e) = sink_error {
            return Err(e);
        }
        let (tallies, discarded, termination) = aggregator.finish()?;
        let summary = RunSummary {
            outcome: termination.map_or(RunOutcome::Completed, |t| RunOutcome::Terminated {
                check: t.check,
                file: t.file,
            }),
            files: counters.snapshot(),
            tallies,
            discarded,
        };
        log_summary(&summary);
        Ok(summary)
    }
}

/// Feed one result to the aggregator; false once the run must stop.
fn continue_after(
    aggregator: &mut ResultAggregator<'_>,
    result: CheckResult,
    sink_error: &mut Option<SoundcheckError>,
) -> bool {
    if sink_error.is_some() {
        return false;
    }
    match aggregator.observe(result) {
        Ok(ControlFlow::Continue(())) => true,
        Ok(ControlFlow::Break(())) => false,
        Err(e) => {
            *sink_error = Some(e);
            false
        }
    }
}

fn log_summary(summary: &RunSummary) {
    let files = &summary.files;
    tracing::info!(
        "Files: {} seen, {} checked, {} unsupported, {} failed to decode",
        files.submitted,
        files.decoded,
        files.unsupported,
        files.failed
    );
    tracing::info!(
        "Results: {} passed, {} failed, {} errors",
        summary.tallies.passed,
        summary.tallies.failed,
        summary.tallies.errors
    );
    if files.cancelled > 0 {
        tracing::debug!("{} file task(s) skipped after termination", files.cancelled);
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
