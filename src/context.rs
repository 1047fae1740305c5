use std::path::{Path, PathBuf};

use crate::tags::TrackTags;

/// Everything a check may inspect about one library file.
///
/// Built once per file and never mutated, so it is shared by reference between
/// all checks evaluated for that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryContext {
    abs_path: PathBuf,
    lib_root: PathBuf,
    rel_path: PathBuf,
    tags: TrackTags,
}

impl LibraryContext {
    /// Build the context for `file`, which must live under `lib_root`.
    ///
    /// Returns `None` when `file` is not inside `lib_root`. A relative `file` is
    /// interpreted against `lib_root`.
    #[must_use]
    pub fn new(file: &Path, lib_root: &Path, tags: TrackTags) -> Option<Self> {
        let abs_path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            lib_root.join(file)
        };
        let rel_path = abs_path.strip_prefix(lib_root).ok()?.to_path_buf();

        Some(Self {
            abs_path,
            lib_root: lib_root.to_path_buf(),
            rel_path,
            tags,
        })
    }

    #[must_use]
    pub fn abs_path(&self) -> &Path {
        &self.abs_path
    }

    #[must_use]
    pub fn lib_root(&self) -> &Path {
        &self.lib_root
    }

    /// Path of the file relative to the library root.
    #[must_use]
    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    #[must_use]
    pub const fn tags(&self) -> &TrackTags {
        &self.tags
    }

    /// Lowercased file extension, if it has one.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.rel_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
