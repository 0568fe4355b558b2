//! Beatport catalog API Data Transfer Objects
//!
//! These types match what the `catalog/tracks` endpoint returns.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! Every field is optional here. Presence rules live in the adapter so that a
//! missing field is reported by name instead of as a generic parse failure.

use serde::{Deserialize, Serialize};

/// Top-level response of a track lookup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogResponse {
    /// Matching tracks; a lookup by id should return exactly one
    pub results: Option<Vec<TrackResult>>,
}

/// A single track entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    /// Catalog track id
    pub id: Option<u64>,
    /// Track name without the mix
    pub name: Option<String>,
    /// Mix/version label ("Original Mix", "Club Mix")
    pub mix_name: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub release: Option<Release>,
    /// ISO-like date, e.g. "2014-05-01"
    pub release_date: Option<String>,
    /// Image variants keyed by size ("small", "medium", "large").
    ///
    /// Kept untyped: the API serializes an empty map as `[]`.
    pub images: Option<serde_json::Value>,
    /// Contributors with their role
    pub artists: Option<Vec<Artist>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Genre {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Release {
    pub name: Option<String>,
}

/// Contributor record
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Artist {
    pub name: Option<String>,
    /// Role: "Artist", "Remixer", ...
    #[serde(rename = "type")]
    pub role: Option<String>,
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_track_lookup_response() {
        let json = r#"{
            "metadata": {"host": "api.beatport.com", "path": "/catalog/tracks"},
            "results": [{
                "id": 12345,
                "type": "track",
                "name": "Song",
                "mixName": "Club Mix",
                "genres": [{"id": 5, "name": "House", "slug": "house"}],
                "release": {"id": 99, "name": "Album", "type": "release"},
                "releaseDate": "2014-05-01",
                "images": {
                    "small": {"width": 30, "height": 30, "url": "http://img/small.jpg"},
                    "large": {"width": 500, "height": 500, "url": "http://img/large.jpg"}
                },
                "artists": [
                    {"id": 1, "name": "DJ X", "type": "Artist"},
                    {"id": 2, "name": "DJ Y", "type": "Remixer"}
                ]
            }]
        }"#;

        let response: CatalogResponse =
            serde_json::from_str(json).expect("Should parse lookup response");

        let results = response.results.expect("results present");
        assert_eq!(results.len(), 1);
        let track = &results[0];
        assert_eq!(track.id, Some(12345));
        assert_eq!(track.mix_name.as_deref(), Some("Club Mix"));
        assert_eq!(track.release_date.as_deref(), Some("2014-05-01"));
        let artists = track.artists.as_ref().expect("artists present");
        assert_eq!(artists[1].role.as_deref(), Some("Remixer"));
    }

    #[test]
    fn test_parse_response_without_results() {
        let json = r#"{"metadata": {"count": 0}}"#;

        let response: CatalogResponse = serde_json::from_str(json).expect("Should parse");

        assert!(response.results.is_none());
    }

    #[test]
    fn test_parse_nulls_as_absent() {
        let json = r#"{"results": [{"name": null, "mixName": "Original Mix", "images": []}]}"#;

        let response: CatalogResponse = serde_json::from_str(json).expect("Should parse");

        let track = &response.results.expect("results present")[0];
        assert!(track.name.is_none());
        assert!(track.genres.is_none());
        assert!(track.images.as_ref().is_some_and(|v| v.is_array()));
    }
}
