//! Weather-reactive playlist recommendation.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::player::PlayerEngine;
use crate::sync::{WeatherEngine, WeatherEvent};

const LOG_TARGET: &str = "skytunes::recommender";

/// Routes weather condition changes into playlist selections.
///
/// Subscribes to [`WeatherEngine`] events and keeps the player's active
/// playlist in step with the classified condition. Selection is idempotent,
/// so re-applying an unchanged bucket is harmless.
pub struct Recommender {
    weather: Arc<WeatherEngine>,
    player: Arc<PlayerEngine>,
    cancel_token: CancellationToken,
}

impl Recommender {
    /// Create a new recommender
    ///
    /// # Arguments
    /// * `weather` - Weather engine to observe for condition changes
    /// * `player` - Player engine whose playlist follows the condition
    /// * `cancel_token` - Optional external cancellation token for graceful
    ///   shutdown
    pub fn new(
        weather: Arc<WeatherEngine>,
        player: Arc<PlayerEngine>,
        cancel_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            weather,
            player,
            cancel_token: cancel_token.unwrap_or_default(),
        }
    }

    /// Get a clone of the cancellation token
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Start the recommender in a background task
    #[must_use]
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Run the recommendation loop
    async fn run(&self) {
        info!(target: LOG_TARGET, "Starting weather recommender");

        let mut rx = self.weather.subscribe();

        // Apply the condition of a snapshot that may already be present.
        if self.weather.snapshot().await.is_some() {
            let bucket = self.weather.condition().await;
            info!(
                target: LOG_TARGET,
                "Found existing snapshot on startup, selecting playlist for {bucket:?}"
            );
            self.player.select_playlist(bucket).await;
        }

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: LOG_TARGET, "Recommender shutting down");
                    break;
                }
                event = rx.recv() => {
                    match event {
                        Ok(WeatherEvent::SnapshotUpdated { bucket, .. }) => {
                            self.player.select_playlist(bucket).await;
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                            break;
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                            // Missed events: re-apply the engine's current
                            // condition. Selection is idempotent, so this is
                            // a no-op when nothing actually changed.
                            let bucket = self.weather.condition().await;
                            self.player.select_playlist(bucket).await;
                        }
                        Ok(_) => {
                            // Status-only events carry no condition change.
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, LoadedAudio};
    use crate::config::PlaybackConfig;
    use crate::error::Result;
    use crate::library::MoodLibrary;
    use crate::weather::{ConditionBucket, WeatherSnapshot};
    use async_trait::async_trait;
    use std::time::Duration;

    struct NoAudio;

    #[async_trait]
    impl AudioBackend for NoAudio {
        fn name(&self) -> &'static str {
            "none"
        }

        async fn load(&self, uri: &str) -> Result<LoadedAudio> {
            Err(crate::error::CoreError::AudioLoadFailed {
                uri: uri.to_string(),
                reason: "no audio in tests".to_string(),
            })
        }
    }

    fn snapshot(code: i32) -> WeatherSnapshot {
        WeatherSnapshot {
            condition_code: code,
            is_night: false,
            temperature: 25.0,
            feels_like: 26.0,
            humidity: 30,
            pressure_hpa: 1015.0,
            wind_speed: 2.0,
            location_name: "Faro".to_string(),
            country_code: "PT".to_string(),
        }
    }

    async fn wait_for_bucket(player: &PlayerEngine, bucket: Option<ConditionBucket>) {
        for _ in 0..100 {
            if player.active_bucket().await == bucket {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("playlist never selected for {bucket:?}");
    }

    #[tokio::test]
    async fn weather_update_selects_matching_playlist() {
        let weather = WeatherEngine::new();
        let player = PlayerEngine::new(
            Arc::new(NoAudio),
            MoodLibrary::builtin().clone(),
            &PlaybackConfig::default(),
        );
        let recommender = Arc::new(Recommender::new(
            Arc::clone(&weather),
            Arc::clone(&player),
            None,
        ));
        let _handle = recommender.clone().start();
        // Let the loop subscribe before publishing.
        tokio::time::sleep(Duration::from_millis(20)).await;

        weather.update_snapshot(snapshot(800)).await;
        wait_for_bucket(&player, Some(ConditionBucket::Clear)).await;

        let playlist = player.active_playlist().await;
        assert_eq!(playlist.len(), 5);
        assert_eq!(playlist[0].id, "1");

        recommender.cancel_token().cancel();
    }

    #[tokio::test]
    async fn startup_applies_existing_snapshot() {
        let weather = WeatherEngine::new();
        weather.update_snapshot(snapshot(210)).await;

        let player = PlayerEngine::new(
            Arc::new(NoAudio),
            MoodLibrary::builtin().clone(),
            &PlaybackConfig::default(),
        );
        let recommender = Arc::new(Recommender::new(
            Arc::clone(&weather),
            Arc::clone(&player),
            None,
        ));
        let _handle = recommender.clone().start();

        wait_for_bucket(&player, Some(ConditionBucket::Thunderstorm)).await;

        recommender.cancel_token().cancel();
    }

    #[tokio::test]
    async fn condition_change_replaces_the_playlist() {
        let weather = WeatherEngine::new();
        let player = PlayerEngine::new(
            Arc::new(NoAudio),
            MoodLibrary::builtin().clone(),
            &PlaybackConfig::default(),
        );
        let recommender = Arc::new(Recommender::new(
            Arc::clone(&weather),
            Arc::clone(&player),
            None,
        ));
        let _handle = recommender.clone().start();
        tokio::time::sleep(Duration::from_millis(20)).await;

        weather.update_snapshot(snapshot(500)).await;
        wait_for_bucket(&player, Some(ConditionBucket::Rain)).await;

        weather.update_snapshot(snapshot(801)).await;
        wait_for_bucket(&player, Some(ConditionBucket::Clouds)).await;

        let playlist = player.active_playlist().await;
        assert_eq!(playlist[0].id, "6");

        recommender.cancel_token().cancel();
    }
}
