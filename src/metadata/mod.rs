//! Tag writing for converted files.
//!
//! Uses the lofty crate for format-independent metadata access. The
//! existing tag is updated in place so the cover picture embedded by the
//! encoder survives the save.
//!
//! # Fields
//! - title: `"{track name} ({mix name})"`
//! - artist, album (release name), genre
//! - date: release year only

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use std::path::Path;

use crate::catalog::TrackMetadata;
use crate::error::{ConvertError, Result};

/// Owner read/write, group and other read-only
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// The tag fields this tool manages, as stored in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub date: Option<String>,
    pub genre: Option<String>,
}

impl FileTags {
    /// The tag values a track's metadata maps to.
    pub fn from_metadata(meta: &TrackMetadata) -> Self {
        Self {
            title: Some(meta.title()),
            artist: Some(meta.artist.clone()),
            album: Some(meta.release.clone()),
            date: Some(meta.release_date.year.clone()),
            genre: Some(meta.genre.clone()),
        }
    }
}

/// Restrict a finished file to owner read/write, everyone else read-only.
#[cfg(unix)]
pub fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(OUTPUT_MODE)).map_err(
        |source| ConvertError::Permissions {
            path: path.to_path_buf(),
            source,
        },
    )
}

#[cfg(not(unix))]
pub fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Tags only; audio properties are never needed here.
fn open_tagged(path: &Path) -> lofty::error::Result<TaggedFile> {
    Probe::open(path)?
        .options(ParseOptions::new().read_properties(false))
        .read()
}

/// Write track metadata into a file's primary tag and save it once.
///
/// Writing the same metadata twice leaves the same field values.
pub fn write(path: &Path, meta: &TrackMetadata) -> Result<FileTags> {
    let tagging_failed = |message: String| ConvertError::TaggingFailed {
        path: path.to_path_buf(),
        message,
    };

    let mut tagged_file = open_tagged(path)
        .map_err(|e| tagging_failed(format!("Failed to read file for tag writing: {e}")))?;

    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| tagging_failed(format!("No writable {tag_type:?} tag")))?;

    let tags = FileTags::from_metadata(meta);
    tag.set_title(meta.title());
    tag.set_artist(meta.artist.clone());
    tag.set_album(meta.release.clone());
    tag.insert_text(ItemKey::RecordingDate, meta.release_date.year.clone());
    tag.set_genre(meta.genre.clone());

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| tagging_failed(format!("Failed to write tags to file: {e}")))?;

    tracing::debug!(path = %path.display(), ?tags, "Tags written");
    Ok(tags)
}

/// Read back the managed tag fields.
pub fn read_tags(path: &Path) -> Result<FileTags> {
    let tagged_file = open_tagged(path)
        .map_err(|e| ConvertError::TaggingFailed {
            path: path.to_path_buf(),
            message: format!("Failed to read file metadata: {e}"),
        })?;

    // Get the primary tag, or fall back to the first available tag
    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(FileTags::default());
    };

    Ok(FileTags {
        title: tag.title().map(|s| s.to_string()),
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        date: tag.get_string(&ItemKey::RecordingDate).map(String::from),
        genre: tag.genre().map(|s| s.to_string()),
    })
}
