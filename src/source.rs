//! Beatport source file naming.
//!
//! Beatport WAV downloads are named `<track id>_<title>.wav`. The leading
//! digit run is the catalog id of the track.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{ConvertError, Result};

/// `[0-9]` rather than `\d`: the regex crate's `\d` also matches non-ASCII digits.
static SOURCE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)_.+\.(?i:wav)$").expect("source name pattern is valid")
});

/// Numeric catalog identifier parsed from a source filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the track id from a Beatport source file path.
///
/// Only the base name is matched; directories may be named anything.
pub fn extract_id(path: &Path) -> Result<TrackId> {
    let captures = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| SOURCE_NAME.captures(name))
        .ok_or_else(|| ConvertError::FormatMismatch(path.to_path_buf()))?;

    Ok(TrackId(captures[1].to_string()))
}

/// Path the encoder writes its output to: the `.wav` suffix swapped for `.flac`.
pub fn flac_path_for(source: &Path) -> PathBuf {
    source.with_extension("flac")
}
