use std::path::Path;

use lofty::error::{ErrorKind, LoftyError};
use lofty::{Accessor, ItemKey, Tag, TaggedFileExt};

use super::{DecodeError, TagReader, TrackTags};

/// Tag reader backed by the lofty library.
///
/// Lofty reads embedded pictures by default, so artwork is always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl LoftyTagReader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn extract_from_tag(tag: &Tag) -> TrackTags {
        TrackTags {
            title: tag.title().map(|s| s.to_string()),
            artist: tag.artist().map(|s| s.to_string()),
            album: tag.album().map(|s| s.to_string()),
            album_artist: tag.get_string(&ItemKey::AlbumArtist).map(str::to_string),
            genre: tag.genre().map(|s| s.to_string()),
            comment: tag.comment().map(|s| s.to_string()),
            year: tag.year(),
            track: tag.track(),
            disc: tag.disk(),
            pictures: tag.pictures().len(),
        }
    }

    fn classify(error: &LoftyError) -> DecodeError {
        if matches!(error.kind(), ErrorKind::UnknownFormat) {
            DecodeError::unsupported(error.to_string())
        } else {
            DecodeError::other(error.to_string())
        }
    }
}

impl TagReader for LoftyTagReader {
    fn read(&self, path: &Path) -> Result<TrackTags, DecodeError> {
        let tagged_file = lofty::read_from_path(path).map_err(|e| Self::classify(&e))?;

        // Files without any tag still count as decoded; checks see empty fields.
        let tags = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .map_or_else(TrackTags::default, Self::extract_from_tag);

        Ok(tags)
    }
}

#[cfg(test)]
#[path = "lofty_reader_tests.rs"]
mod tests;
