use std::fmt;
use std::ops::ControlFlow;
use std::path::PathBuf;

use crate::error::Result;
use crate::output::ResultSink;

use super::result::{CheckResult, CheckStatus};

/// Lifecycle of a run as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Scheduling,
    /// Opportunistic pops between submissions.
    DrainingPartial,
    PoolQuiesced,
    /// Blocking pops until every producer is gone.
    DrainingFinal,
    Done,
    Terminated,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Scheduling => "scheduling",
            Self::DrainingPartial => "draining (partial)",
            Self::PoolQuiesced => "pool quiesced",
            Self::DrainingFinal => "draining (final)",
            Self::Done => "done",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tallies {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl Tallies {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    const fn record(&mut self, status: CheckStatus) {
        match status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Fail => self.failed += 1,
            CheckStatus::Error => self.errors += 1,
        }
    }
}

/// The failing result that ended a fail-fast run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    pub check: String,
    pub file: PathBuf,
}

/// Single consumer of the result queue.
///
/// Forwards results to the sink until fail-fast sees a failure; from then on
/// results are only counted as discarded.
pub struct ResultAggregator<'s> {
    sink: &'s mut dyn ResultSink,
    fail_fast: bool,
    phase: RunPhase,
    tallies: Tallies,
    discarded: usize,
    termination: Option<Termination>,
}

impl<'s> ResultAggregator<'s> {
    pub fn new(sink: &'s mut dyn ResultSink, fail_fast: bool) -> Self {
        Self {
            sink,
            fail_fast,
            phase: RunPhase::Idle,
            tallies: Tallies::default(),
            discarded: 0,
            termination: None,
        }
    }

    /// Move to `phase`. A terminated run stays terminated.
    pub fn transition(&mut self, phase: RunPhase) {
        if self.phase == phase || self.phase == RunPhase::Terminated {
            return;
        }
        tracing::debug!("Run phase: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Handle one result popped from the queue.
    ///
    /// # Errors
    /// Returns an error if the sink cannot write the result.
    pub fn observe(&mut self, result: CheckResult) -> Result<ControlFlow<()>> {
        if self.termination.is_some() {
            self.discarded += 1;
            return Ok(ControlFlow::Break(()));
        }

        self.tallies.record(result.status);
        self.sink.write(&result)?;

        if self.fail_fast && result.is_fail() {
            tracing::debug!(
                check = %result.check,
                file = %result.file.display(),
                "Fail-fast triggered"
            );
            self.termination = Some(Termination {
                check: result.check,
                file: result.file,
            });
            self.transition(RunPhase::Terminated);
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Flush the sink and report what was seen.
    ///
    /// # Errors
    /// Returns an error if the sink cannot be flushed.
    pub fn finish(mut self) -> Result<(Tallies, usize, Option<Termination>)> {
        self.transition(RunPhase::Done);
        if self.discarded > 0 {
            tracing::debug!("Discarded {} result(s) after termination", self.discarded);
        }
        self.sink.finish()?;
        Ok((self.tallies, self.discarded, self.termination))
    }

    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    #[must_use]
    pub const fn tallies(&self) -> Tallies {
        self.tallies
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
