//! Declarative checks modules.
//!
//! A module is a TOML document holding an ordered list of `[[function]]`
//! tables. Every condition a function lists must hold for it to pass:
//!
//! ```toml
//! [[function]]
//! name = "is_flac"
//! extension = ["flac"]
//!
//! [[function]]
//! name = "check_lossless_has_artwork"
//! when = "is_flac"
//! artwork = true
//!
//! [[function]]
//! name = "check_path"
//! path = "{albumartist}/{year}-{album}/{disc:02}_{track:02}-{title:trim}"
//! ```
//!
//! Only functions named `check_*` are run as checks; the others are helpers
//! usable from `when`, `all`, `any` and `none`.

mod template;

pub use template::{PathTemplate, sanitize};

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

use crate::context::LibraryContext;
use crate::error::{Result, SoundcheckError};
use crate::tags::TagField;

use super::check::{CheckError, CheckOutcome, Predicate};
use super::{CheckRegistry, Plugin};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleDocument {
    #[serde(default, rename = "function")]
    functions: Vec<FunctionDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FunctionDef {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    require: Vec<TagField>,
    #[serde(default)]
    extension: Vec<String>,
    #[serde(default)]
    artwork: Option<bool>,
    #[serde(default)]
    matches: BTreeMap<String, String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    all: Vec<String>,
    #[serde(default)]
    any: Vec<String>,
    #[serde(default)]
    none: Vec<String>,
    #[serde(default)]
    when: Option<String>,
}

impl FunctionDef {
    fn has_condition(&self) -> bool {
        !self.require.is_empty()
            || !self.extension.is_empty()
            || self.artwork.is_some()
            || !self.matches.is_empty()
            || self.path.is_some()
            || !self.all.is_empty()
            || !self.any.is_empty()
            || !self.none.is_empty()
    }
}

/// A compiled function of a checks module.
#[derive(Debug)]
pub struct Rule {
    name: String,
    require: Vec<TagField>,
    extensions: Vec<String>,
    artwork: Option<bool>,
    matches: Vec<(TagField, Regex)>,
    path: Option<PathTemplate>,
    all: Vec<Arc<Rule>>,
    any: Vec<Arc<Rule>>,
    none: Vec<Arc<Rule>>,
    when: Option<Arc<Rule>>,
}

impl Rule {
    fn compile(
        def: FunctionDef,
        defined: &IndexMap<String, Arc<Self>>,
    ) -> std::result::Result<Self, String> {
        if !is_identifier(&def.name) {
            return Err("is not a valid function name".to_string());
        }
        if !def.has_condition() {
            return Err("defines no condition".to_string());
        }
        if let Some(description) = &def.description {
            tracing::trace!(function = %def.name, "{description}");
        }

        let resolve = |names: &[String]| -> std::result::Result<Vec<Arc<Self>>, String> {
            names
                .iter()
                .map(|name| {
                    defined.get(name).cloned().ok_or_else(|| {
                        format!("references unknown function '{name}' (functions must be defined before use)")
                    })
                })
                .collect()
        };

        let mut matches = Vec::with_capacity(def.matches.len());
        for (field_name, pattern) in &def.matches {
            let field = TagField::from_name(field_name)
                .ok_or_else(|| format!("matches unknown tag field '{field_name}'"))?;
            let regex = Regex::new(pattern)
                .map_err(|e| format!("has an invalid pattern for '{field_name}': {e}"))?;
            matches.push((field, regex));
        }

        let path = def.path.as_deref().map(PathTemplate::parse).transpose()?;
        let when = def
            .when
            .as_ref()
            .map(|name| resolve(std::slice::from_ref(name)))
            .transpose()?
            .and_then(|mut rules| rules.pop());

        Ok(Self {
            all: resolve(&def.all)?,
            any: resolve(&def.any)?,
            none: resolve(&def.none)?,
            extensions: def
                .extension
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            name: def.name,
            require: def.require,
            artwork: def.artwork,
            matches,
            path,
            when,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn check_tags(&self, ctx: &LibraryContext) -> std::result::Result<(), CheckError> {
        let tags = ctx.tags();
        if let Some(field) = self.require.iter().find(|field| !tags.is_present(**field)) {
            return Err(CheckError::assertion(format!("missing tag: {field}")));
        }

        for (field, regex) in &self.matches {
            match tags.get(*field) {
                Some(value) if regex.is_match(&value) => {}
                Some(value) => {
                    return Err(CheckError::assertion(format!(
                        "{field} '{value}' does not match /{regex}/"
                    )));
                }
                None => return Err(CheckError::assertion(format!("missing tag: {field}"))),
            }
        }

        match self.artwork {
            Some(true) if !tags.has_artwork() => {
                Err(CheckError::assertion("no embedded artwork"))
            }
            Some(false) if tags.has_artwork() => {
                Err(CheckError::assertion("unexpected embedded artwork"))
            }
            _ => Ok(()),
        }
    }

    fn check_location(&self, ctx: &LibraryContext) -> std::result::Result<(), CheckError> {
        if !self.extensions.is_empty() {
            let extension = ctx.extension();
            if !extension
                .as_ref()
                .is_some_and(|ext| self.extensions.contains(ext))
            {
                return Err(CheckError::assertion(format!(
                    "extension '{}' is not one of: {}",
                    extension.unwrap_or_default(),
                    self.extensions.join(", ")
                )));
            }
        }

        match &self.path {
            Some(template) => template.check(ctx),
            None => Ok(()),
        }
    }

    fn check_references(&self, ctx: &LibraryContext) -> std::result::Result<(), CheckError> {
        for rule in &self.all {
            if !passes(rule.evaluate(ctx))? {
                return Err(CheckError::assertion(format!("'{}' failed", rule.name)));
            }
        }

        if !self.any.is_empty() {
            let mut any_passed = false;
            for rule in &self.any {
                if passes(rule.evaluate(ctx))? {
                    any_passed = true;
                    break;
                }
            }
            if !any_passed {
                let names: Vec<&str> = self.any.iter().map(|rule| rule.name()).collect();
                return Err(CheckError::assertion(format!(
                    "none of {} passed",
                    names.join(", ")
                )));
            }
        }

        for rule in &self.none {
            if passes(rule.evaluate(ctx))? {
                return Err(CheckError::assertion(format!("'{}' passed", rule.name)));
            }
        }
        Ok(())
    }
}

impl Predicate for Rule {
    fn evaluate(&self, ctx: &LibraryContext) -> CheckOutcome {
        if let Some(guard) = &self.when
            && !passes(guard.evaluate(ctx))?
        {
            return Ok(true);
        }

        self.check_tags(ctx)?;
        self.check_location(ctx)?;
        self.check_references(ctx)?;
        Ok(true)
    }
}

/// Collapse an outcome into pass/fail, keeping evaluation errors.
fn passes(outcome: CheckOutcome) -> std::result::Result<bool, CheckError> {
    match outcome {
        Ok(passed) => Ok(passed),
        Err(CheckError::Assertion(_)) => Ok(false),
        Err(error @ CheckError::Evaluation(_)) => Err(error),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A checks module loaded from a TOML file.
#[derive(Debug)]
pub struct RuleModule {
    name: String,
    rules: IndexMap<String, Arc<Rule>>,
}

impl RuleModule {
    /// Read and compile the module at `path`.
    ///
    /// # Errors
    /// [`SoundcheckError::ModuleLoad`] when the file cannot be read or is not a
    /// checks module, [`SoundcheckError::NoLoader`] when a function cannot be
    /// compiled.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Err(module_load(path, "is a directory"));
        }
        let source = std::fs::read_to_string(path).map_err(|e| module_load(path, &e.to_string()))?;
        Self::parse(path, &source)
    }

    /// Compile module `source`; `path` names the module and its errors.
    ///
    /// # Errors
    /// See [`RuleModule::load`].
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let document: ModuleDocument =
            toml::from_str(source).map_err(|e| module_load(path, &e.to_string()))?;

        let mut rules: IndexMap<String, Arc<Rule>> = IndexMap::new();
        for def in document.functions {
            let function = def.name.clone();
            if rules.contains_key(&function) {
                return Err(no_loader(path, function, "is defined more than once".to_string()));
            }
            let rule = Rule::compile(def, &rules).map_err(|reason| no_loader(path, function.clone(), reason))?;
            rules.insert(function, Arc::new(rule));
        }

        let name = path
            .file_stem()
            .map_or_else(|| "checks".to_string(), |stem| stem.to_string_lossy().into_owned());

        Ok(Self { name, rules })
    }

    pub fn functions(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values().map(AsRef::as_ref)
    }
}

impl Plugin for RuleModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn register(&self, registry: &mut CheckRegistry) -> Result<()> {
        for (name, rule) in &self.rules {
            registry.register_predicate(name.clone(), Arc::clone(rule) as Arc<dyn Predicate>);
        }
        Ok(())
    }
}

fn module_load(path: &Path, reason: &str) -> SoundcheckError {
    SoundcheckError::ModuleLoad {
        path: path.to_path_buf(),
        reason: reason.trim().to_string(),
    }
}

fn no_loader(path: &Path, function: String, reason: String) -> SoundcheckError {
    SoundcheckError::NoLoader {
        path: path.to_path_buf(),
        function,
        reason,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
