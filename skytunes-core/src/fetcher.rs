//! Weather fetch orchestration.

use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::location::LocationSource;
use crate::provider::{WeatherProvider, WeatherQuery};
use crate::sync::WeatherEngine;

const LOG_TARGET: &str = "skytunes::weather::fetcher";

/// Orchestrates location lookup and weather fetches into the [`WeatherEngine`].
///
/// Every entry point is an explicit re-evaluation invoked by the host
/// (startup, pull-to-refresh, place search). There is no automatic retry:
/// a failed fetch surfaces through the engine's error flag and waits for the
/// caller to re-invoke.
pub struct WeatherFetcher {
    engine: Arc<WeatherEngine>,
    location: Arc<dyn LocationSource>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherFetcher {
    /// Create a new weather fetcher
    pub fn new(
        engine: Arc<WeatherEngine>,
        location: Arc<dyn LocationSource>,
        provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            engine,
            location,
            provider,
        }
    }

    /// Determine the current position and fetch weather for it.
    ///
    /// The resolved position is remembered on the engine so that
    /// [`refresh`](Self::refresh) can reuse it.
    ///
    /// # Errors
    ///
    /// Returns the location or fetch error after recording it on the engine.
    pub async fn locate_and_refresh(&self) -> Result<()> {
        self.engine.begin_refresh().await;

        let coordinates = match self.location.current_position().await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                self.engine.fail_refresh(&e).await;
                return Err(e);
            }
        };

        info!(
            target: LOG_TARGET,
            "Located position {coordinates} via {}",
            self.location.name()
        );
        self.engine.set_coordinates(coordinates).await;

        self.fetch(WeatherQuery::Coordinates(coordinates)).await
    }

    /// Re-fetch weather for the last located position.
    ///
    /// Falls back to a full [`locate_and_refresh`](Self::locate_and_refresh)
    /// when no position has been determined yet.
    ///
    /// # Errors
    ///
    /// Returns the location or fetch error after recording it on the engine.
    pub async fn refresh(&self) -> Result<()> {
        let Some(coordinates) = self.engine.coordinates().await else {
            return self.locate_and_refresh().await;
        };

        self.engine.begin_refresh().await;
        self.fetch(WeatherQuery::Coordinates(coordinates)).await
    }

    /// Fetch weather for a free-text place name.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording it on the engine.
    pub async fn search(&self, place: impl Into<String> + Send) -> Result<()> {
        self.engine.begin_refresh().await;
        self.fetch(WeatherQuery::place(place)).await
    }

    async fn fetch(&self, query: WeatherQuery) -> Result<()> {
        info!(
            target: LOG_TARGET,
            "Fetching weather for {query} via {}",
            self.provider.name()
        );

        match self.provider.fetch(&query).await {
            Ok(snapshot) => {
                self.engine.update_snapshot(snapshot).await;
                Ok(())
            }
            Err(e) => {
                self.engine.fail_refresh(&e).await;
                Err(e)
            }
        }
    }
}
