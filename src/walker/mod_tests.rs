use std::fs;
use std::path::Path;

use super::*;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

fn library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let album = dir.path().join("Artist").join("2001-Album");
    fs::create_dir_all(&album).unwrap();
    fs::create_dir_all(dir.path().join("Empty")).unwrap();
    fs::write(album.join("02-B.mp3"), b"b").unwrap();
    fs::write(album.join("01-A.mp3"), b"a").unwrap();
    fs::write(dir.path().join("notes.txt"), b"notes").unwrap();
    dir
}

fn relative(dir: &TempDir, files: Vec<PathBuf>) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn walk_yields_files_only_in_name_order() {
    let dir = library();
    let walker = LibraryWalker::new(dir.path(), AcceptAllFilter);

    let files = relative(&dir, walker.walk().collect());

    assert_eq!(
        files,
        vec![
            "Artist/2001-Album/01-A.mp3",
            "Artist/2001-Album/02-B.mp3",
            "notes.txt",
        ]
    );
}

#[test]
fn walk_is_restartable() {
    let dir = library();
    let walker = LibraryWalker::new(dir.path(), AcceptAllFilter);

    let first: Vec<_> = walker.walk().collect();
    let second: Vec<_> = walker.walk().collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn walk_applies_filter_to_relative_paths() {
    let dir = library();
    let filter = GlobFilter::new(&["*.txt".to_string(), "Artist/**/02-*".to_string()]).unwrap();
    let walker = LibraryWalker::new(dir.path(), filter);

    let files = relative(&dir, walker.walk().collect());

    assert_eq!(files, vec!["Artist/2001-Album/01-A.mp3"]);
}

#[test]
fn walk_of_empty_directory_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let walker = LibraryWalker::new(dir.path(), AcceptAllFilter);

    assert_eq!(walker.walk().count(), 0);
}

#[test]
fn walk_of_missing_root_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let walker = LibraryWalker::new(dir.path().join("missing"), AcceptAllFilter);

    assert_eq!(walker.walk().count(), 0);
}

#[cfg(unix)]
#[test]
fn walk_follows_symlinked_directories() {
    let dir = library();
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("linked.flac"), b"l").unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("Linked")).unwrap();

    let files = relative(&dir, LibraryWalker::new(dir.path(), AcceptAllFilter).walk().collect());
    assert!(files.contains(&"Linked/linked.flac".to_string()));

    let files = relative(
        &dir,
        LibraryWalker::new(dir.path(), AcceptAllFilter)
            .follow_links(false)
            .walk()
            .collect(),
    );
    assert!(!files.contains(&"Linked/linked.flac".to_string()));
}

#[cfg(unix)]
#[test]
fn walk_skips_link_cycles() {
    let dir = library();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("Artist").join("loop")).unwrap();

    let files: Vec<_> = LibraryWalker::new(dir.path(), AcceptAllFilter).walk().collect();

    assert_eq!(files.len(), 3);
}
