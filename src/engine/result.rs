use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::plugin::{CheckError, CheckOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Error,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check against one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Qualified check name, `<module>::<function>`.
    pub check: String,
    pub file: PathBuf,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    /// Classify a check outcome.
    #[must_use]
    pub fn from_outcome(check: impl Into<String>, file: impl Into<PathBuf>, outcome: CheckOutcome) -> Self {
        let (status, detail) = match outcome {
            Ok(true) => (CheckStatus::Pass, None),
            Ok(false) => (CheckStatus::Fail, None),
            Err(CheckError::Assertion(reason)) => (CheckStatus::Fail, Some(reason)),
            Err(CheckError::Evaluation(reason)) => (CheckStatus::Error, Some(reason)),
        };
        Self {
            check: check.into(),
            file: file.into(),
            status,
            detail: detail.filter(|d| !d.is_empty()),
        }
    }

    #[must_use]
    pub fn error(check: impl Into<String>, file: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            file: file.into(),
            status: CheckStatus::Error,
            detail: Some(detail.into()),
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    #[must_use]
    pub fn is_fail(&self) -> bool {
        self.status == CheckStatus::Fail
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == CheckStatus::Error
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
