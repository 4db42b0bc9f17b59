//! Static mood library mapping condition buckets to curated playlists.

use crate::track::Track;
use crate::weather::ConditionBucket;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Read-only catalog mapping each [`ConditionBucket`] to an ordered playlist.
///
/// The built-in catalog carries five tracks per bucket. Custom libraries can
/// be constructed for hosts that source recommendations elsewhere.
#[derive(Debug, Clone)]
pub struct MoodLibrary {
    entries: HashMap<ConditionBucket, Vec<Track>>,
}

impl MoodLibrary {
    /// Create a library from explicit bucket entries.
    #[must_use]
    pub fn new(entries: HashMap<ConditionBucket, Vec<Track>>) -> Self {
        Self { entries }
    }

    /// Get the playlist for a bucket, or an empty slice when the bucket has
    /// no entry.
    #[must_use]
    pub fn playlist_for(&self, bucket: ConditionBucket) -> &[Track] {
        self.entries.get(&bucket).map_or(&[], Vec::as_slice)
    }

    /// Number of buckets with at least one track.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.entries.len()
    }

    /// The process-wide built-in catalog.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static LIBRARY: OnceLock<MoodLibrary> = OnceLock::new();
        LIBRARY.get_or_init(Self::build_builtin)
    }

    fn build_builtin() -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            ConditionBucket::Clear,
            vec![
                Track::new("1", "Sunny Day", "Summer Vibes", "https://example.com/songs/sunny.mp3", "happy"),
                Track::new("2", "Blue Skies", "Cloud Nine", "https://example.com/songs/blueskies.mp3", "relaxed"),
                Track::new("3", "Sunshine", "Solar Beats", "https://example.com/songs/sunshine.mp3", "energetic"),
                Track::new("4", "Clear Mind", "Zen Masters", "https://example.com/songs/clearmind.mp3", "calm"),
                Track::new("5", "Summer Nights", "Twilight", "https://example.com/songs/summernights.mp3", "romantic"),
            ],
        );

        entries.insert(
            ConditionBucket::Clouds,
            vec![
                Track::new("6", "Cloud Surfing", "Sky Riders", "https://example.com/songs/cloudsurfing.mp3", "dreamy"),
                Track::new("7", "Gray Horizons", "Nimbus", "https://example.com/songs/grayhorizons.mp3", "reflective"),
                Track::new("8", "Cloud Cover", "Ambient Skies", "https://example.com/songs/cloudcover.mp3", "calm"),
                Track::new("9", "Silver Lining", "Optimist", "https://example.com/songs/silverlining.mp3", "hopeful"),
                Track::new("10", "Overcast", "Soft Shadows", "https://example.com/songs/overcast.mp3", "melancholy"),
            ],
        );

        entries.insert(
            ConditionBucket::Rain,
            vec![
                Track::new("11", "Gentle Rain", "Water Sounds", "https://example.com/songs/gentlerain.mp3", "peaceful"),
                Track::new("12", "Rainy Jazz", "Blue Notes", "https://example.com/songs/rainyjazz.mp3", "sophisticated"),
                Track::new("13", "Downpour", "Storm Chasers", "https://example.com/songs/downpour.mp3", "intense"),
                Track::new("14", "Rain Dance", "Tribal Beats", "https://example.com/songs/raindance.mp3", "rhythmic"),
                Track::new("15", "Raindrops", "Piano Keys", "https://example.com/songs/raindrops.mp3", "melancholy"),
            ],
        );

        entries.insert(
            ConditionBucket::Thunderstorm,
            vec![
                Track::new("16", "Thunder Rolls", "Storm Front", "https://example.com/songs/thunderrolls.mp3", "intense"),
                Track::new("17", "Electric Sky", "Lightning Strikes", "https://example.com/songs/electricsky.mp3", "energetic"),
                Track::new("18", "Storm Warning", "Weather Alert", "https://example.com/songs/stormwarning.mp3", "dramatic"),
                Track::new("19", "Tempest", "Symphony of Thunder", "https://example.com/songs/tempest.mp3", "powerful"),
                Track::new("20", "Shelter", "Safe Haven", "https://example.com/songs/shelter.mp3", "comforting"),
            ],
        );

        entries.insert(
            ConditionBucket::Snow,
            vec![
                Track::new("21", "Winter Wonderland", "Snow Patrol", "https://example.com/songs/winterwonderland.mp3", "magical"),
                Track::new("22", "Snowfall", "Silent Night", "https://example.com/songs/snowfall.mp3", "peaceful"),
                Track::new("23", "Frosty Morning", "Winter Chill", "https://example.com/songs/frostymorning.mp3", "crisp"),
                Track::new("24", "Blizzard", "Arctic Winds", "https://example.com/songs/blizzard.mp3", "intense"),
                Track::new("25", "Cozy Fireplace", "Warm Embrace", "https://example.com/songs/cozyfireplace.mp3", "comforting"),
            ],
        );

        entries.insert(
            ConditionBucket::Atmosphere,
            vec![
                Track::new("26", "Misty Morning", "Foggy Dew", "https://example.com/songs/mistymorning.mp3", "mysterious"),
                Track::new("27", "Hazy Days", "Blur", "https://example.com/songs/hazydays.mp3", "dreamy"),
                Track::new("28", "Visibility", "Clear View", "https://example.com/songs/visibility.mp3", "searching"),
                Track::new("29", "Suspended", "Particle", "https://example.com/songs/suspended.mp3", "floating"),
                Track::new("30", "Air Quality", "Breath", "https://example.com/songs/airquality.mp3", "ethereal"),
            ],
        );

        Self { entries }
    }
}
