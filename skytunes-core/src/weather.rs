//! Weather snapshot model and condition classification.

use serde::{Deserialize, Serialize};

/// Coarse weather category derived from a numeric condition code.
///
/// The buckets follow the OpenWeatherMap condition code groups and are the
/// keys of the mood library: each bucket maps to a curated playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionBucket {
    /// Thunderstorm group (codes 2xx)
    Thunderstorm,
    /// Drizzle and rain groups (codes 3xx and 5xx)
    Rain,
    /// Snow group (codes 6xx)
    Snow,
    /// Atmosphere group: mist, fog, haze, etc. (codes 7xx)
    Atmosphere,
    /// Clear sky (code 800 exactly)
    Clear,
    /// Cloud groups (codes above 800)
    Clouds,
}

impl ConditionBucket {
    /// Classify a numeric weather condition code into a bucket.
    ///
    /// Pure and total over all integers: codes below 200 (including
    /// negatives) have no bucket and return `None`.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            200..=299 => Some(Self::Thunderstorm),
            300..=599 => Some(Self::Rain),
            600..=699 => Some(Self::Snow),
            700..=799 => Some(Self::Atmosphere),
            800 => Some(Self::Clear),
            801..=i32::MAX => Some(Self::Clouds),
            _ => None,
        }
    }

    /// Get the string identifier used in logs and serialized events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Atmosphere => "atmosphere",
            Self::Clear => "clear",
            Self::Clouds => "clouds",
        }
    }

    /// All buckets, in library order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Thunderstorm,
            Self::Rain,
            Self::Snow,
            Self::Atmosphere,
            Self::Clear,
            Self::Clouds,
        ]
    }
}

impl std::fmt::Display for ConditionBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched weather observation.
///
/// Immutable once fetched; the [`WeatherEngine`](crate::WeatherEngine)
/// replaces it wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Primary condition code (OpenWeatherMap condition id)
    pub condition_code: i32,
    /// Whether the condition icon indicates night time
    pub is_night: bool,
    /// Temperature in the configured units
    pub temperature: f32,
    /// Perceived temperature in the configured units
    pub feels_like: f32,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure_hpa: f32,
    /// Wind speed in the configured units
    pub wind_speed: f32,
    /// Resolved location name (city)
    pub location_name: String,
    /// ISO country code of the location
    pub country_code: String,
}

impl WeatherSnapshot {
    /// Classify this snapshot's primary condition code.
    #[must_use]
    pub const fn condition(&self) -> Option<ConditionBucket> {
        ConditionBucket::from_code(self.condition_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_thunderstorm_range() {
        assert_eq!(
            ConditionBucket::from_code(200),
            Some(ConditionBucket::Thunderstorm)
        );
        assert_eq!(
            ConditionBucket::from_code(232),
            Some(ConditionBucket::Thunderstorm)
        );
        assert_eq!(
            ConditionBucket::from_code(299),
            Some(ConditionBucket::Thunderstorm)
        );
    }

    #[test]
    fn classifies_drizzle_and_rain_as_rain() {
        assert_eq!(ConditionBucket::from_code(300), Some(ConditionBucket::Rain));
        assert_eq!(ConditionBucket::from_code(500), Some(ConditionBucket::Rain));
        assert_eq!(ConditionBucket::from_code(599), Some(ConditionBucket::Rain));
    }

    #[test]
    fn classifies_snow_range() {
        assert_eq!(ConditionBucket::from_code(600), Some(ConditionBucket::Snow));
        assert_eq!(ConditionBucket::from_code(699), Some(ConditionBucket::Snow));
    }

    #[test]
    fn classifies_atmosphere_range() {
        assert_eq!(
            ConditionBucket::from_code(700),
            Some(ConditionBucket::Atmosphere)
        );
        assert_eq!(
            ConditionBucket::from_code(741),
            Some(ConditionBucket::Atmosphere)
        );
        assert_eq!(
            ConditionBucket::from_code(799),
            Some(ConditionBucket::Atmosphere)
        );
    }

    #[test]
    fn classifies_clear_exactly_at_800() {
        assert_eq!(
            ConditionBucket::from_code(800),
            Some(ConditionBucket::Clear)
        );
    }

    #[test]
    fn classifies_everything_above_800_as_clouds() {
        assert_eq!(
            ConditionBucket::from_code(801),
            Some(ConditionBucket::Clouds)
        );
        assert_eq!(
            ConditionBucket::from_code(804),
            Some(ConditionBucket::Clouds)
        );
        assert_eq!(
            ConditionBucket::from_code(i32::MAX),
            Some(ConditionBucket::Clouds)
        );
    }

    #[test]
    fn codes_below_200_have_no_bucket() {
        assert_eq!(ConditionBucket::from_code(199), None);
        assert_eq!(ConditionBucket::from_code(0), None);
        assert_eq!(ConditionBucket::from_code(-1), None);
        assert_eq!(ConditionBucket::from_code(i32::MIN), None);
    }

    #[test]
    fn classification_is_deterministic() {
        for code in [-5, 0, 199, 200, 300, 599, 600, 700, 800, 801, 9000] {
            assert_eq!(
                ConditionBucket::from_code(code),
                ConditionBucket::from_code(code)
            );
        }
    }

    #[test]
    fn snapshot_condition_uses_primary_code() {
        let snapshot = WeatherSnapshot {
            condition_code: 800,
            is_night: false,
            temperature: 21.5,
            feels_like: 20.9,
            humidity: 40,
            pressure_hpa: 1013.0,
            wind_speed: 3.2,
            location_name: "Lisbon".to_string(),
            country_code: "PT".to_string(),
        };

        assert_eq!(snapshot.condition(), Some(ConditionBucket::Clear));
    }

    #[test]
    fn bucket_display_matches_identifier() {
        assert_eq!(ConditionBucket::Thunderstorm.to_string(), "thunderstorm");
        assert_eq!(ConditionBucket::Clouds.to_string(), "clouds");
    }
}
