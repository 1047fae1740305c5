use std::sync::Arc;

use indexmap::IndexMap;

use crate::context::LibraryContext;

use super::check::{CheckFunction, CheckOutcome, CheckSet, Predicate};

/// Named predicates registered by one plugin, in registration order.
///
/// Registering a name twice replaces the predicate but keeps the position of
/// the first registration.
pub struct CheckRegistry {
    module: String,
    entries: IndexMap<String, Arc<dyn Predicate>>,
}

impl CheckRegistry {
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            entries: IndexMap::new(),
        }
    }

    /// Register a closure or function as a named predicate.
    pub fn register<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&LibraryContext) -> CheckOutcome + Send + Sync + 'static,
    {
        self.register_predicate(name, Arc::new(check))
    }

    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        predicate: Arc<dyn Predicate>,
    ) -> &mut Self {
        let name = name.into();
        if self.entries.insert(name.clone(), predicate).is_some() {
            tracing::debug!(module = %self.module, "Replacing previously registered function: {name}");
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collect the registered functions whose name starts with `prefix`.
    #[must_use]
    pub fn discover(&self, prefix: &str) -> CheckSet {
        let checks = self
            .entries
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, predicate)| {
                CheckFunction::new(&self.module, name.clone(), Arc::clone(predicate))
            })
            .collect();
        CheckSet::new(checks)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
