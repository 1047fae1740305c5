use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::tags::DecodeErrorKind;
use crate::tags::test_fixtures::write_wav;

#[test]
fn reads_riff_info_tags_from_wav() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("song.wav");
    write_wav(&path, &[("INAM", "X"), ("IPRD", "Y"), ("IART", "Someone")]);

    let tags = LoftyTagReader::new().read(&path).unwrap();

    assert_eq!(tags.title.as_deref(), Some("X"));
    assert_eq!(tags.album.as_deref(), Some("Y"));
    assert_eq!(tags.artist.as_deref(), Some("Someone"));
    assert!(!tags.has_artwork());
}

#[test]
fn untagged_audio_decodes_to_empty_tags() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("silence.wav");
    write_wav(&path, &[]);

    let tags = LoftyTagReader::new().read(&path).unwrap();

    assert_eq!(tags, TrackTags::default());
}

#[test]
fn text_file_is_unsupported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.txt");
    std::fs::write(&path, "liner notes, not audio").unwrap();

    let err = LoftyTagReader::new().read(&path).unwrap_err();

    assert_eq!(err.kind(), DecodeErrorKind::UnsupportedFormat);
}

#[test]
fn missing_file_is_a_decode_failure() {
    let err = LoftyTagReader::new()
        .read(Path::new("/definitely/does/not/exist.mp3"))
        .unwrap_err();

    assert_eq!(err.kind(), DecodeErrorKind::Other);
}
