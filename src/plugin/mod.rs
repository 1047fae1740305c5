mod check;
mod loader;
mod registry;
mod rules;

pub use check::{CheckError, CheckFunction, CheckOutcome, CheckSet, Predicate};
pub use loader::PluginLoader;
pub use registry::CheckRegistry;
pub use rules::{PathTemplate, Rule, RuleModule, sanitize};

use crate::error::Result;

/// Functions whose name starts with this prefix are run as checks.
pub const CHECK_PREFIX: &str = "check_";

/// A source of named predicates.
///
/// A plugin registers every function it defines, helpers included; only the
/// `check_*` ones are picked up by [`discover`].
pub trait Plugin {
    /// Module name used to qualify check names, e.g. `library_rules`.
    fn name(&self) -> &str;

    /// Register the plugin's functions in definition order.
    ///
    /// # Errors
    /// Returns an error if the plugin cannot provide its functions.
    fn register(&self, registry: &mut CheckRegistry) -> Result<()>;
}

/// Register `plugin` and collect its checks, in definition order.
///
/// # Errors
/// Propagates registration errors from the plugin.
pub fn discover(plugin: &dyn Plugin) -> Result<CheckSet> {
    let mut registry = CheckRegistry::new(plugin.name());
    plugin.register(&mut registry)?;

    let checks = registry.discover(CHECK_PREFIX);
    for check in &checks {
        tracing::trace!("Found check function: {}", check.name());
    }
    if checks.is_empty() {
        tracing::warn!(
            module = plugin.name(),
            "No check functions found (names must start with '{CHECK_PREFIX}')"
        );
    }
    Ok(checks)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
