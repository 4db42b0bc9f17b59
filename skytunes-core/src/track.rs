//! Track model.

use serde::{Deserialize, Serialize};

/// A single playable music item with minimal metadata.
///
/// Tracks are immutable catalog entries. Identity is defined purely by
/// [`Track::id`]: two tracks with the same id refer to the same song even
/// when the values are separate clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier within the catalog
    pub id: String,
    /// Track title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// URI of the playable audio source
    pub source_uri: String,
    /// Free-form mood tag (e.g. "happy", "melancholy")
    pub mood: String,
}

impl Track {
    /// Create a new track.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source_uri: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            source_uri: source_uri.into(),
            mood: mood.into(),
        }
    }

    /// Check whether this track has the given id.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_new_populates_fields() {
        let track = Track::new(
            "1",
            "Sunny Day",
            "Summer Vibes",
            "https://example.com/songs/sunny.mp3",
            "happy",
        );

        assert_eq!(track.id, "1");
        assert_eq!(track.title, "Sunny Day");
        assert_eq!(track.artist, "Summer Vibes");
        assert_eq!(track.source_uri, "https://example.com/songs/sunny.mp3");
        assert_eq!(track.mood, "happy");
    }

    #[test]
    fn has_id_matches_by_id_only() {
        let track = Track::new("7", "Gray Horizons", "Nimbus", "uri", "reflective");
        assert!(track.has_id("7"));
        assert!(!track.has_id("8"));
    }
}
