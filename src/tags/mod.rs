//! Decoded audio metadata and the boundary to the tag decoding library.

mod extract;
mod lofty_reader;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use extract::{Extraction, extract_tags};
pub use lofty_reader::LoftyTagReader;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tag values of a single audio file.
///
/// Only the fields checks commonly look at are kept; `pictures` is the number
/// of embedded artwork images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub genre: Option<String>,
    pub comment: Option<String>,
    pub year: Option<u32>,
    pub track: Option<u32>,
    pub disc: Option<u32>,
    pub pictures: usize,
}

impl TrackTags {
    /// Returns the value of `field` rendered as text.
    #[must_use]
    pub fn get(&self, field: TagField) -> Option<String> {
        match field {
            TagField::Title => self.title.clone(),
            TagField::Artist => self.artist.clone(),
            TagField::Album => self.album.clone(),
            TagField::AlbumArtist => self.album_artist.clone(),
            TagField::Genre => self.genre.clone(),
            TagField::Comment => self.comment.clone(),
            TagField::Year => self.year.map(|v| v.to_string()),
            TagField::Track => self.track.map(|v| v.to_string()),
            TagField::Disc => self.disc.map(|v| v.to_string()),
        }
    }

    /// True when `field` holds a non-blank value.
    #[must_use]
    pub fn is_present(&self, field: TagField) -> bool {
        self.get(field).is_some_and(|value| !value.trim().is_empty())
    }

    #[must_use]
    pub const fn has_artwork(&self) -> bool {
        self.pictures > 0
    }
}

/// Tag fields addressable from check rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagField {
    Title,
    Artist,
    Album,
    #[serde(alias = "album_artist")]
    AlbumArtist,
    Genre,
    Comment,
    Year,
    Track,
    Disc,
}

impl TagField {
    pub const ALL: [Self; 9] = [
        Self::Title,
        Self::Artist,
        Self::Album,
        Self::AlbumArtist,
        Self::Genre,
        Self::Comment,
        Self::Year,
        Self::Track,
        Self::Disc,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
            Self::AlbumArtist => "albumartist",
            Self::Genre => "genre",
            Self::Comment => "comment",
            Self::Year => "year",
            Self::Track => "track",
            Self::Disc => "disc",
        }
    }

    /// Looks a field up by its rule name (`album_artist` is accepted as well).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "album_artist" {
            return Some(Self::AlbumArtist);
        }
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// No decoder recognises the file type.
    UnsupportedFormat,
    Other,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    message: String,
}

impl DecodeError {
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: DecodeErrorKind::UnsupportedFormat,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: DecodeErrorKind::Other,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }
}

/// Trait for decoding tags from an audio file.
///
/// Implementations must read embedded artwork as well, so that
/// [`TrackTags::pictures`] is meaningful.
pub trait TagReader: Send + Sync {
    /// Decode the tags of the file at `path`.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] whose kind tells unsupported files apart from
    /// files that could not be decoded.
    fn read(&self, path: &Path) -> std::result::Result<TrackTags, DecodeError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
