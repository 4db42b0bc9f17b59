//! Weather data collaborator trait.

use crate::error::Result;
use crate::location::Coordinates;
use crate::weather::WeatherSnapshot;
use async_trait::async_trait;

/// Query parameters for fetching current weather.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Fetch by geographic position.
    Coordinates(Coordinates),
    /// Fetch by free-text place name (city search).
    Place(String),
}

impl WeatherQuery {
    /// Create a query for a place name.
    pub fn place(name: impl Into<String>) -> Self {
        Self::Place(name.into())
    }
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinates(coords) => write!(f, "coordinates {coords}"),
            Self::Place(name) => write!(f, "place \"{name}\""),
        }
    }
}

/// Trait for weather data providers.
///
/// Implementations query a weather HTTP API and map its payload into a
/// [`WeatherSnapshot`]. Providers never retry on their own: a manual refresh
/// re-invokes the fetch, which is the only recovery path.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Get the provider name (used in logs and error messages).
    fn name(&self) -> &'static str;

    /// Fetch the current weather for a query.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the payload cannot be
    /// interpreted as a weather snapshot.
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot>;
}
