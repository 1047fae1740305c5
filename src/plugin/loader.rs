use std::path::Path;

use crate::error::Result;

use super::{CheckSet, RuleModule, discover};

/// Loads a checks module from disk and discovers its checks.
pub struct PluginLoader;

impl PluginLoader {
    /// Load the module at `path` and return its checks in definition order.
    ///
    /// # Errors
    /// [`crate::error::SoundcheckError::ModuleLoad`] when the module cannot be
    /// read or parsed, [`crate::error::SoundcheckError::NoLoader`] when one of
    /// its functions cannot be compiled.
    pub fn load(path: &Path) -> Result<CheckSet> {
        tracing::debug!("Loading checks module: {}", path.display());
        let module = RuleModule::load(path)?;
        let checks = discover(&module)?;
        tracing::debug!(
            module = module_name(path),
            "Loaded {} check(s) from {} function(s)",
            checks.len(),
            module.functions().count()
        );
        Ok(checks)
    }
}

fn module_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
