//! Adapter layer: Convert catalog DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types,
//! and the only place that decides which fields are required.

use super::domain::{ReleaseDate, TrackMetadata};
use super::dto;
use crate::error::{ConvertError, Result};

/// Role that marks a contributor as a primary artist (compared case-insensitively)
const PRIMARY_ARTIST_ROLE: &str = "artist";

/// Image variant used for cover art. Smaller variants are never used.
const ARTWORK_SIZE: &str = "large";

/// Convert a catalog lookup response to normalized track metadata.
///
/// Fails with `UnexpectedResponse` when there is no results collection,
/// `UnexpectedResultCount` unless there is exactly one result, and
/// `MissingMetadata` naming every required field that could not be resolved.
pub fn to_metadata(response: dto::CatalogResponse) -> Result<TrackMetadata> {
    let Some(results) = response.results else {
        return Err(ConvertError::UnexpectedResponse(
            "no results collection".to_string(),
        ));
    };

    let count = results.len();
    let mut results = results.into_iter();
    let (Some(result), None) = (results.next(), results.next()) else {
        return Err(ConvertError::UnexpectedResultCount { count });
    };

    let artwork_url = large_artwork_url(result.images.as_ref());
    // Derived before the presence check so an artist list with no primary
    // artists is reported like any other missing field.
    let artist = result.artists.as_deref().and_then(primary_artist);
    let genre = result
        .genres
        .and_then(|genres| genres.into_iter().next())
        .and_then(|genre| genre.name);
    let release = result.release.and_then(|release| release.name);
    let release_date = result.release_date.as_deref().map(ReleaseDate::parse);

    match (
        result.name,
        result.mix_name,
        genre,
        release,
        release_date,
        artist,
    ) {
        (
            Some(track_name),
            Some(mix_name),
            Some(genre),
            Some(release),
            Some(release_date),
            Some(artist),
        ) => Ok(TrackMetadata {
            track_name,
            mix_name,
            genre,
            release,
            release_date,
            artwork_url,
            artist,
        }),
        (track_name, mix_name, genre, release, release_date, artist) => {
            let fields = [
                ("Track name", track_name.is_none()),
                ("Mix name", mix_name.is_none()),
                ("Genre", genre.is_none()),
                ("Release", release.is_none()),
                ("Release date", release_date.is_none()),
                ("Artist", artist.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| field.to_string())
            .collect();

            Err(ConvertError::MissingMetadata { fields })
        }
    }
}

/// URL of the large image variant, if the catalog published one.
fn large_artwork_url(images: Option<&serde_json::Value>) -> Option<String> {
    images?
        .get(ARTWORK_SIZE)?
        .get("url")?
        .as_str()
        .map(String::from)
}

/// Join the names of all primary artists, keeping their order.
fn primary_artist(artists: &[dto::Artist]) -> Option<String> {
    let names: Vec<&str> = artists
        .iter()
        .filter(|artist| {
            artist
                .role
                .as_deref()
                .is_some_and(|role| role.eq_ignore_ascii_case(PRIMARY_ARTIST_ROLE))
        })
        .filter_map(|artist| artist.name.as_deref())
        .collect();

    join_artist_names(&names)
}

/// `[]` → None, `[A]` → "A", `[A, B]` → "A and B", `[A, B, C]` → "A, B and C".
pub fn join_artist_names(names: &[&str]) -> Option<String> {
    match names {
        [] => None,
        [only] => Some((*only).to_string()),
        [rest @ .., last] => Some(format!("{} and {}", rest.join(", "), last)),
    }
}
