pub mod audio;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod library;
pub mod location;
pub mod paths;
pub mod player;
pub mod provider;
pub mod recommender;
pub mod sync;
pub mod track;
pub mod weather;

pub use audio::{AudioBackend, AudioSink, LoadedAudio};
pub use config::{Config, PlaybackConfig, Units, WeatherConfig};
pub use error::{CoreError, Result};
pub use favorites::FavoritesSet;
pub use fetcher::WeatherFetcher;
pub use library::MoodLibrary;
pub use location::{Coordinates, FixedLocation, LocationSource};
pub use paths::{config_dir, config_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use player::{PlayerEngine, PlayerEvent};
pub use provider::{WeatherProvider, WeatherQuery};
pub use recommender::Recommender;
pub use sync::{WeatherEngine, WeatherEvent};
pub use track::Track;
pub use weather::{ConditionBucket, WeatherSnapshot};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
