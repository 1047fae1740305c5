mod filter;

pub use filter::{FileFilter, GlobFilter};

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Lazily enumerates the regular files of a music library.
///
/// Every call to [`LibraryWalker::walk`] starts a fresh traversal. Entries are
/// visited depth-first in file name order, so an unchanged tree always yields
/// the same sequence.
pub struct LibraryWalker<F: FileFilter> {
    root: PathBuf,
    filter: F,
    follow_links: bool,
}

impl<F: FileFilter> LibraryWalker<F> {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, filter: F) -> Self {
        Self {
            root: root.into(),
            filter,
            follow_links: true,
        }
    }

    #[must_use]
    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the library. Unreadable entries and link cycles are logged and
    /// skipped.
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable library entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.is_included(entry))
            .map(DirEntry::into_path)
    }

    fn is_included(&self, entry: &DirEntry) -> bool {
        let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
        let included = self.filter.should_include(relative);
        if !included {
            tracing::trace!("Excluded: {}", relative.display());
        }
        included
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
