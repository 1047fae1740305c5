#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the soundcheck binary.
#[macro_export]
macro_rules! soundcheck {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("soundcheck"))
    };
}

/// Checks that only need tags readable from a RIFF INFO chunk.
pub const TITLE_AND_ALBUM_CHECKS: &str = r#"
[[function]]
name = "check_has_title"
require = ["title"]

[[function]]
name = "check_has_album"
require = ["album"]

[[function]]
name = "is_wav"
extension = ["wav"]
"#;

/// A temporary directory holding a `library/` tree, with config files and
/// checks modules next to it.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("library")).expect("Failed to create library");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn library(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    /// Creates a file with the given content, relative to the fixture root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn create_module(&self, name: &str, content: &str) -> PathBuf {
        self.create_file(name, content)
    }

    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".soundcheck.toml", content)
    }

    /// Writes a tagged WAV file inside the library.
    pub fn create_track(&self, relative_path: &str, info: &[(&str, &str)]) -> PathBuf {
        let path = self.library().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, wav_bytes(info)).expect("Failed to write track");
        path
    }
}

/// Builds a silent mono PCM WAV file carrying a RIFF INFO tag, e.g.
/// `[("INAM", "title"), ("IPRD", "album"), ("IART", "artist")]`.
pub fn wav_bytes(info: &[(&str, &str)]) -> Vec<u8> {
    const SAMPLE_RATE: u32 = 8000;

    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&1u16.to_le_bytes()); // channels
    fmt.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    fmt.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    fmt.extend_from_slice(&2u16.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());

    let mut body = Vec::new();
    body.extend_from_slice(b"WAVE");
    push_chunk(&mut body, b"fmt ", &fmt);
    push_chunk(&mut body, b"data", &[0u8; 400]);

    if !info.is_empty() {
        let mut list = Vec::new();
        list.extend_from_slice(b"INFO");
        for (id, value) in info {
            let mut text = value.as_bytes().to_vec();
            text.push(0);
            push_chunk(&mut list, id.as_bytes(), &text);
        }
        push_chunk(&mut body, b"LIST", &list);
    }

    let mut bytes = Vec::new();
    push_chunk(&mut bytes, b"RIFF", &body);
    bytes
}

fn push_chunk(out: &mut Vec<u8>, id: &[u8], data: &[u8]) {
    let len = u32::try_from(data.len()).expect("chunk too large");
    out.extend_from_slice(id);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(data);
    if data.len() % 2 == 1 {
        out.push(0);
    }
}
