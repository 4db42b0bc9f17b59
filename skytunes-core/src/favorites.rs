//! Favorites set keyed by track id.

use crate::track::Track;
use std::collections::HashMap;

/// Set of favorite tracks, keyed by track id.
///
/// Membership is independent of the active playlist and carries no ordering
/// guarantees.
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    tracks: HashMap<String, Track>,
}

impl FavoritesSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a track's membership. Returns `true` when the track is a
    /// favorite after the call.
    pub fn toggle(&mut self, track: &Track) -> bool {
        if self.tracks.remove(&track.id).is_some() {
            false
        } else {
            self.tracks.insert(track.id.clone(), track.clone());
            true
        }
    }

    /// Check membership by track id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tracks.contains_key(id)
    }

    /// Snapshot of the current favorites, in no particular order.
    #[must_use]
    pub fn tracks(&self) -> Vec<Track> {
        self.tracks.values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, "Title", "Artist", "uri", "mood")
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = FavoritesSet::new();
        let t = track("1");

        assert!(favorites.toggle(&t));
        assert!(favorites.contains("1"));

        assert!(!favorites.toggle(&t));
        assert!(!favorites.contains("1"));
    }

    #[test]
    fn double_toggle_leaves_membership_unchanged() {
        let mut favorites = FavoritesSet::new();
        let t = track("5");

        favorites.toggle(&t);
        let before: usize = favorites.len();

        favorites.toggle(&track("9"));
        favorites.toggle(&track("9"));

        assert_eq!(favorites.len(), before);
        assert!(favorites.contains("5"));
        assert!(!favorites.contains("9"));
    }

    #[test]
    fn membership_is_by_id_not_by_value() {
        let mut favorites = FavoritesSet::new();
        favorites.toggle(&track("3"));

        // Same id, different metadata: still the same favorite.
        let renamed = Track::new("3", "Other Title", "Other Artist", "other", "calm");
        assert!(!favorites.toggle(&renamed));
        assert!(favorites.is_empty());
    }
}
