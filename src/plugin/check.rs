use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::context::LibraryContext;

/// Why a check did not return `true`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The file does not satisfy the check. Reported as a failure.
    #[error("{0}")]
    Assertion(String),

    /// The check itself broke while evaluating. Reported as an error.
    #[error("{0}")]
    Evaluation(String),
}

impl CheckError {
    #[must_use]
    pub fn assertion(reason: impl Into<String>) -> Self {
        Self::Assertion(reason.into())
    }

    #[must_use]
    pub fn evaluation(reason: impl Into<String>) -> Self {
        Self::Evaluation(reason.into())
    }
}

/// Result of evaluating one check against one file.
///
/// `Ok(true)` passes, `Ok(false)` and [`CheckError::Assertion`] fail, and
/// [`CheckError::Evaluation`] is an error.
pub type CheckOutcome = Result<bool, CheckError>;

/// A stateless check evaluated against a file's context.
pub trait Predicate: Send + Sync {
    fn evaluate(&self, ctx: &LibraryContext) -> CheckOutcome;
}

impl<F> Predicate for F
where
    F: Fn(&LibraryContext) -> CheckOutcome + Send + Sync,
{
    fn evaluate(&self, ctx: &LibraryContext) -> CheckOutcome {
        self(ctx)
    }
}

/// A discovered check: a named predicate plus the module it came from.
#[derive(Clone)]
pub struct CheckFunction {
    name: String,
    qualified_name: String,
    predicate: Arc<dyn Predicate>,
}

impl CheckFunction {
    #[must_use]
    pub fn new(module: &str, name: impl Into<String>, predicate: Arc<dyn Predicate>) -> Self {
        let name = name.into();
        let qualified_name = format!("{module}::{name}");
        Self {
            name,
            qualified_name,
            predicate,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<module>::<function>`, used to identify the check in results.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn evaluate(&self, ctx: &LibraryContext) -> CheckOutcome {
        self.predicate.evaluate(ctx)
    }
}

impl fmt::Debug for CheckFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckFunction")
            .field("qualified_name", &self.qualified_name)
            .finish_non_exhaustive()
    }
}

/// The ordered, immutable set of checks run against every file.
#[derive(Debug, Clone, Default)]
pub struct CheckSet {
    checks: Vec<CheckFunction>,
}

impl CheckSet {
    #[must_use]
    pub const fn new(checks: Vec<CheckFunction>) -> Self {
        Self { checks }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckFunction> {
        self.checks.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(CheckFunction::name).collect()
    }
}

impl<'a> IntoIterator for &'a CheckSet {
    type Item = &'a CheckFunction;
    type IntoIter = std::slice::Iter<'a, CheckFunction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
