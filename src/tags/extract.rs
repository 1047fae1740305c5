use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use crate::error::panic_message;

use super::{DecodeErrorKind, TagReader, TrackTags};

/// Outcome of asking the tag reader for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Decoded(TrackTags),
    /// Not an audio format the reader knows; skipped quietly.
    Unsupported,
    /// Decoding failed; already reported at error level.
    Failed,
}

/// Decode the tags of `path`, turning reader failures into skip decisions.
///
/// Never aborts the run: an unsupported file is logged at trace level and any
/// other failure at error level, including a panic inside the reader.
pub fn extract_tags(reader: &dyn TagReader, path: &Path) -> Extraction {
    let decoded = match catch_unwind(AssertUnwindSafe(|| reader.read(path))) {
        Ok(decoded) => decoded,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(file = %path.display(), "Tag reader panicked: {message}");
            return Extraction::Failed;
        }
    };

    match decoded {
        Ok(tags) => Extraction::Decoded(tags),
        Err(error) => match error.kind() {
            DecodeErrorKind::UnsupportedFormat => {
                tracing::trace!(file = %path.display(), "Skipping unsupported file");
                Extraction::Unsupported
            }
            DecodeErrorKind::Other => {
                tracing::error!(file = %path.display(), "{error}");
                Extraction::Failed
            }
        },
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
