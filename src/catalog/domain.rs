//! Normalized track metadata.
//!
//! These types are OUR types - they don't change when the catalog API changes.
//! Catalog responses are converted into them by the adapter, which is also
//! where required-field enforcement happens.

/// Release date split on `-` into at most three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDate {
    pub year: String,
    pub month: Option<String>,
    pub day: Option<String>,
}

impl ReleaseDate {
    /// Split an ISO-like date (`2014-05-01`, `2014-05`, `2014`).
    ///
    /// Anything after the second `-` stays in the day component.
    pub fn parse(date: &str) -> Self {
        let mut parts = date.splitn(3, '-');
        Self {
            year: parts.next().unwrap_or_default().to_string(),
            month: parts.next().map(String::from),
            day: parts.next().map(String::from),
        }
    }
}

/// Everything the tag writer needs for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub track_name: String,
    pub mix_name: String,
    /// Name of the first genre listed by the catalog
    pub genre: String,
    /// Release (album) name
    pub release: String,
    pub release_date: ReleaseDate,
    /// Large cover image, when the catalog publishes one
    pub artwork_url: Option<String>,
    /// Primary artists joined for display ("A, B and C")
    pub artist: String,
}

impl TrackMetadata {
    /// Title tag value: `"{track name} ({mix name})"`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.track_name, self.mix_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_date_full() {
        let date = ReleaseDate::parse("2014-05-01");
        assert_eq!(date.year, "2014");
        assert_eq!(date.month.as_deref(), Some("05"));
        assert_eq!(date.day.as_deref(), Some("01"));
    }

    #[test]
    fn test_release_date_year_only() {
        let date = ReleaseDate::parse("1999");
        assert_eq!(date.year, "1999");
        assert!(date.month.is_none());
        assert!(date.day.is_none());
    }

    #[test]
    fn test_release_date_keeps_at_most_three_parts() {
        let date = ReleaseDate::parse("2014-05-01-extra");
        assert_eq!(date.year, "2014");
        assert_eq!(date.day.as_deref(), Some("01-extra"));
    }

    #[test]
    fn test_title_includes_mix_name() {
        let meta = TrackMetadata {
            track_name: "Song".to_string(),
            mix_name: "Club Mix".to_string(),
            genre: "House".to_string(),
            release: "Album".to_string(),
            release_date: ReleaseDate::parse("2014-05-01"),
            artwork_url: None,
            artist: "DJ X".to_string(),
        };
        assert_eq!(meta.title(), "Song (Club Mix)");
    }
}
