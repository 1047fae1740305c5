use std::path::Path;

use crate::context::LibraryContext;
use crate::plugin::{CheckError, CheckRegistry, CheckSet};
use crate::tags::{DecodeError, TagReader, TrackTags};

/// Decodes by extension: `mp3` files are titled after their stem, `txt`
/// files are unsupported and `bad` files fail to decode.
pub struct FakeReader;

impl TagReader for FakeReader {
    fn read(&self, path: &Path) -> Result<TrackTags, DecodeError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("mp3") => Ok(TrackTags {
                title: path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned()),
                ..TrackTags::default()
            }),
            Some("bad") => Err(DecodeError::other("corrupt frame header")),
            _ => Err(DecodeError::unsupported("unknown format")),
        }
    }
}

/// `check_title` passes for titles not starting with `fail`, `check_true`
/// always passes.
pub fn checks() -> CheckSet {
    let mut registry = CheckRegistry::new("fake");
    registry
        .register("check_title", |ctx: &LibraryContext| {
            Ok(!ctx
                .tags()
                .title
                .as_deref()
                .is_some_and(|title| title.starts_with("fail")))
        })
        .register("check_true", |_ctx: &LibraryContext| Ok(true))
        .register("check_evaluation", |ctx: &LibraryContext| {
            if ctx.tags().title.as_deref() == Some("broken") {
                Err(CheckError::evaluation("cannot evaluate"))
            } else {
                Ok(true)
            }
        });
    registry.discover("check_")
}
