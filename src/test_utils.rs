//! Test utilities and fixtures for beatport2flac tests.
//!
//! This module provides a minimal FLAC writer (so tag tests don't need the
//! `flac` binary), canned catalog metadata, and catalog response bodies.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{write_minimal_flac, mock_track_metadata};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("1_a.flac");
//! write_minimal_flac(&path);
//! metadata::write(&path, &mock_track_metadata()).unwrap();
//! ```

use std::path::Path;

use crate::catalog::{ReleaseDate, TrackMetadata};

/// Writes a FLAC stream with a STREAMINFO block and no audio frames.
///
/// 44.1kHz, stereo, 16-bit, zero samples. Enough for lofty to read and
/// rewrite tags.
pub fn write_minimal_flac(path: &Path) {
    let sample_rate: u64 = 44_100;
    let channels: u64 = 2;
    let bits_per_sample: u64 = 16;
    let total_samples: u64 = 0;

    let mut stream_info = Vec::with_capacity(34);
    stream_info.extend_from_slice(&4096u16.to_be_bytes()); // min block size
    stream_info.extend_from_slice(&4096u16.to_be_bytes()); // max block size
    stream_info.extend_from_slice(&[0, 0, 0]); // min frame size (unknown)
    stream_info.extend_from_slice(&[0, 0, 0]); // max frame size (unknown)
    let packed = (sample_rate << 44)
        | ((channels - 1) << 41)
        | ((bits_per_sample - 1) << 36)
        | total_samples;
    stream_info.extend_from_slice(&packed.to_be_bytes());
    stream_info.extend_from_slice(&[0u8; 16]); // MD5 of the (empty) audio
    assert_eq!(stream_info.len(), 34);

    let mut bytes = b"fLaC".to_vec();
    // Last-metadata-block flag set, block type 0 (STREAMINFO), 24-bit length
    bytes.push(0x80);
    bytes.extend_from_slice(&(stream_info.len() as u32).to_be_bytes()[1..]);
    bytes.extend_from_slice(&stream_info);

    std::fs::write(path, bytes).expect("Failed to write test FLAC file");
}

/// Metadata matching [`catalog_body`]'s default track.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let meta = TrackMetadata {
///     artist: "A and B".to_string(),
///     ..mock_track_metadata()
/// };
/// ```
pub fn mock_track_metadata() -> TrackMetadata {
    TrackMetadata {
        track_name: "Song".to_string(),
        mix_name: "Club Mix".to_string(),
        genre: "House".to_string(),
        release: "Album".to_string(),
        release_date: ReleaseDate::parse("2014-05-01"),
        artwork_url: None,
        artist: "DJ X".to_string(),
    }
}

/// A catalog lookup body with one complete track and the given images map.
pub fn catalog_body(images: serde_json::Value) -> String {
    serde_json::json!({
        "results": [{
            "id": 12345,
            "name": "Song",
            "mixName": "Club Mix",
            "genres": [{"name": "House"}],
            "release": {"name": "Album"},
            "releaseDate": "2014-05-01",
            "images": images,
            "artists": [{"name": "DJ X", "type": "Artist"}]
        }]
    })
    .to_string()
}

/// A catalog lookup body with one track lacking a release date.
pub fn catalog_body_without_release_date() -> String {
    serde_json::json!({
        "results": [{
            "name": "Song",
            "mixName": "Club Mix",
            "genres": [{"name": "House"}],
            "release": {"name": "Album"},
            "artists": [{"name": "DJ X", "type": "Artist"}]
        }]
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_flac_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.flac");
        write_minimal_flac(&path);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"fLaC");
        assert_eq!(bytes[4], 0x80);
        assert_eq!(&bytes[5..8], &[0, 0, 34]);
        assert_eq!(bytes.len(), 4 + 4 + 34);
    }

    #[test]
    fn test_catalog_body_parses() {
        let body = catalog_body(serde_json::json!({}));
        let meta = crate::catalog::adapter::to_metadata(
            crate::catalog::parse_response(&body).unwrap(),
        )
        .unwrap();
        assert_eq!(meta, mock_track_metadata());
    }
}
