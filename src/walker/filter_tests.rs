use std::path::Path;

use super::*;

#[test]
fn empty_filter_accepts_all() {
    let filter = GlobFilter::new(&[]).unwrap();

    assert!(filter.should_include(Path::new("Artist/Album/01-Song.mp3")));
    assert!(filter.should_include(Path::new("cover.jpg")));
}

#[test]
fn exclude_directories_anywhere() {
    let filter = GlobFilter::new(&["**/scans/**".to_string()]).unwrap();

    assert!(filter.should_include(Path::new("Artist/Album/01-Song.flac")));
    assert!(!filter.should_include(Path::new("Artist/Album/scans/back.png")));
    assert!(!filter.should_include(Path::new("scans/front.png")));
}

#[test]
fn exclude_by_extension() {
    let filter = GlobFilter::new(&["*.cue".to_string(), "*.log".to_string()]).unwrap();

    assert!(filter.should_include(Path::new("Artist/Album/01-Song.flac")));
    assert!(!filter.should_include(Path::new("Artist/Album/rip.log")));
    assert!(!filter.should_include(Path::new("image.cue")));
}

#[test]
fn invalid_pattern_returns_error() {
    let result = GlobFilter::new(&["[invalid".to_string()]);

    match result {
        Err(SoundcheckError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "[invalid"),
        _ => panic!("expected InvalidPattern"),
    }
}
