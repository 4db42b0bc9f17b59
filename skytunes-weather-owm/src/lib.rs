//! OpenWeatherMap implementation of the Skytunes [`WeatherProvider`] trait.

use async_trait::async_trait;
use serde::Deserialize;
use skytunes_core::{
    CoreError, Units, WeatherConfig, WeatherProvider, WeatherQuery, WeatherSnapshot,
};
use std::time::Duration;
use tracing::{debug, info, warn};

const LOG_TARGET: &str = "skytunes::provider::owm";

const PROVIDER_NAME: &str = "openweathermap";

/// OpenWeatherMap current-weather provider.
///
/// Queries the `/weather` endpoint by coordinates or by free-text place
/// name. Requests are never retried here: a failed fetch surfaces to the
/// caller, and a manual refresh is the only recovery path.
pub struct OpenWeatherProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    units: Units,
}

impl OpenWeatherProvider {
    /// Create a new OpenWeatherMap provider from the weather configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &WeatherConfig) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("Skytunes/0.1 (https://github.com/skytunes)")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units,
        })
    }

    fn build_url(&self, query: &WeatherQuery) -> String {
        match query {
            WeatherQuery::Coordinates(coords) => format!(
                "{}/weather?lat={}&lon={}&units={}&appid={}",
                self.base_url,
                coords.latitude,
                coords.longitude,
                self.units.as_str(),
                self.api_key
            ),
            WeatherQuery::Place(name) => format!(
                "{}/weather?q={}&units={}&appid={}",
                self.base_url,
                urlencoding::encode(name),
                self.units.as_str(),
                self.api_key
            ),
        }
    }
}

/// Response from the OpenWeatherMap current-weather endpoint.
/// The API returns many more fields (clouds, visibility, timestamps);
/// serde ignores unknown fields by default.
#[derive(Debug, Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: Option<OwmWind>,
    #[serde(default)]
    name: String,
    sys: Option<OwmSys>,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    id: i32,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f32,
    feels_like: f32,
    humidity: u8,
    pressure: f32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: Option<String>,
}

fn to_snapshot(response: OwmResponse) -> Result<WeatherSnapshot, CoreError> {
    let Some(condition) = response.weather.first() else {
        return Err(CoreError::WeatherFetchFailed {
            provider: PROVIDER_NAME.to_string(),
            reason: "response contained no weather conditions".to_string(),
        });
    };

    // Icon codes end in "d" for day and "n" for night (e.g. "01n").
    let is_night = condition.icon.ends_with('n');

    Ok(WeatherSnapshot {
        condition_code: condition.id,
        is_night,
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity,
        pressure_hpa: response.main.pressure,
        wind_speed: response.wind.map_or(0.0, |w| w.speed),
        location_name: response.name,
        country_code: response
            .sys
            .and_then(|s| s.country)
            .unwrap_or_default(),
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, CoreError> {
        info!(
            target: LOG_TARGET,
            "Fetching current weather for {query} ({} units)",
            self.units.as_str()
        );

        // Note: the URL carries the API key, so only the query is logged.
        let url = self.build_url(query);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!(
                target: LOG_TARGET,
                "OpenWeatherMap returned status {} for {query}",
                response.status()
            );
            return Err(CoreError::WeatherFetchFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: format!("OpenWeatherMap returned status: {}", response.status()),
            });
        }

        let payload: OwmResponse = response.json().await?;
        let snapshot = to_snapshot(payload)?;

        debug!(
            target: LOG_TARGET,
            "Weather for {} ({}): code {}, {}°",
            snapshot.location_name,
            snapshot.country_code,
            snapshot.condition_code,
            snapshot.temperature
        );

        Ok(snapshot)
    }
}
