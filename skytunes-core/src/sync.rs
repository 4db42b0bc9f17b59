//! Weather state engine.

use crate::error::CoreError;
use crate::location::Coordinates;
use crate::weather::{ConditionBucket, WeatherSnapshot};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

const LOG_TARGET: &str = "skytunes::weather::engine";

/// Events emitted by the weather engine
#[derive(Debug, Clone)]
pub enum WeatherEvent {
    /// A refresh started (loading flag raised)
    RefreshStarted,
    /// A new snapshot replaced the previous one
    SnapshotUpdated {
        snapshot: WeatherSnapshot,
        bucket: Option<ConditionBucket>,
    },
    /// The classified condition bucket differs from the previous one
    ConditionChanged { bucket: Option<ConditionBucket> },
    /// A refresh failed; the previous snapshot (if any) is retained
    RefreshFailed { message: String },
    /// Location permission was denied
    LocationDenied,
}

/// Weather engine state
struct WeatherEngineInner {
    snapshot: Option<WeatherSnapshot>,
    coordinates: Option<Coordinates>,
    loading: bool,
    error: Option<String>,
}

/// Engine that owns the current weather snapshot and its classification.
///
/// State mutations happen only through [`WeatherFetcher`](crate::WeatherFetcher)
/// operations; observers subscribe to [`WeatherEvent`]s. A failed refresh
/// never corrupts the held snapshot.
pub struct WeatherEngine {
    inner: RwLock<WeatherEngineInner>,
    event_tx: broadcast::Sender<WeatherEvent>,
}

impl WeatherEngine {
    /// Create a new weather engine
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Subscribe to weather events
    pub fn subscribe(&self) -> broadcast::Receiver<WeatherEvent> {
        self.event_tx.subscribe()
    }

    /// Raise the loading flag and clear any previous error.
    pub async fn begin_refresh(&self) {
        let mut inner = self.inner.write().await;
        inner.loading = true;
        inner.error = None;
        let _ = self.event_tx.send(WeatherEvent::RefreshStarted);
    }

    /// Remember the last located position for subsequent refreshes.
    pub async fn set_coordinates(&self, coordinates: Coordinates) {
        self.inner.write().await.coordinates = Some(coordinates);
    }

    /// Replace the held snapshot and emit change events.
    ///
    /// Emits [`WeatherEvent::SnapshotUpdated`] on every call and
    /// [`WeatherEvent::ConditionChanged`] only when the classified bucket
    /// differs from the previous snapshot's bucket.
    pub async fn update_snapshot(&self, snapshot: WeatherSnapshot) {
        let mut inner = self.inner.write().await;

        let old_bucket = inner.snapshot.as_ref().and_then(WeatherSnapshot::condition);
        let new_bucket = snapshot.condition();

        info!(
            target: LOG_TARGET,
            "Weather updated for {} ({}): code {}, bucket {:?}",
            snapshot.location_name, snapshot.country_code, snapshot.condition_code, new_bucket
        );

        inner.snapshot = Some(snapshot.clone());
        inner.loading = false;
        inner.error = None;

        let _ = self.event_tx.send(WeatherEvent::SnapshotUpdated {
            snapshot,
            bucket: new_bucket,
        });

        if old_bucket != new_bucket {
            let _ = self
                .event_tx
                .send(WeatherEvent::ConditionChanged { bucket: new_bucket });
        }
    }

    /// Record a failed refresh.
    ///
    /// Sets the visible error flag and lowers the loading flag; the held
    /// snapshot and coordinates are left untouched.
    pub async fn fail_refresh(&self, error: &CoreError) {
        let message = error.to_string();
        warn!(target: LOG_TARGET, "Weather refresh failed: {message}");

        let mut inner = self.inner.write().await;
        inner.loading = false;
        inner.error = Some(message.clone());

        let event = if matches!(error, CoreError::LocationDenied) {
            WeatherEvent::LocationDenied
        } else {
            WeatherEvent::RefreshFailed { message }
        };
        let _ = self.event_tx.send(event);
    }

    /// Get the current snapshot
    pub async fn snapshot(&self) -> Option<WeatherSnapshot> {
        self.inner.read().await.snapshot.clone()
    }

    /// Classify the current snapshot
    pub async fn condition(&self) -> Option<ConditionBucket> {
        self.inner
            .read()
            .await
            .snapshot
            .as_ref()
            .and_then(WeatherSnapshot::condition)
    }

    /// Get the last located position
    pub async fn coordinates(&self) -> Option<Coordinates> {
        self.inner.read().await.coordinates
    }

    /// Check whether a refresh is in flight
    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    /// Get the visible error message, if any
    pub async fn error_message(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }
}

impl Default for WeatherEngine {
    fn default() -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            inner: RwLock::new(WeatherEngineInner {
                snapshot: None,
                coordinates: None,
                loading: false,
                error: None,
            }),
            event_tx,
        }
    }
}
