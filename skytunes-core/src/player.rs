//! Player engine: playlist selection, playback sequencing, favorites.

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, AudioSink, LoadedAudio};
use crate::config::PlaybackConfig;
use crate::favorites::FavoritesSet;
use crate::library::MoodLibrary;
use crate::track::Track;
use crate::weather::ConditionBucket;

const LOG_TARGET: &str = "skytunes::player";

/// Events emitted by the player engine
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// The active playlist was replaced
    PlaylistSelected {
        bucket: Option<ConditionBucket>,
        track_count: usize,
    },
    /// A track was loaded; playback starts unless autoplay is disabled
    TrackLoaded { track: Track },
    /// Acquiring the playback resource failed; nothing is loaded
    LoadFailed { track: Track, message: String },
    /// Playback was paused
    PlaybackPaused,
    /// Playback was resumed
    PlaybackResumed,
    /// A track was added to the favorites
    FavoriteAdded { track: Track },
    /// A track was removed from the favorites
    FavoriteRemoved { track_id: String },
}

enum Direction {
    Forward,
    Backward,
}

/// Player engine state
struct PlayerInner {
    playlist: Vec<Track>,
    bucket: Option<ConditionBucket>,
    current: Option<Track>,
    is_playing: bool,
    sink: Option<Box<dyn AudioSink>>,
    generation: u64,
    favorites: FavoritesSet,
    last_error: Option<String>,
}

/// Engine that owns the active playlist, the loaded track and the favorites.
///
/// The active playlist is always exactly the mood library entry for the most
/// recently selected condition bucket, or empty when no bucket is available.
/// A loaded track persists across playlist switches until explicitly
/// replaced.
///
/// Natural playback completion is routed through an internal channel and
/// handled by the [`run`](Self::start) loop, which advances to the next
/// track exactly once per completion; completions from superseded loads are
/// discarded by a generation check.
pub struct PlayerEngine {
    inner: RwLock<PlayerInner>,
    backend: Arc<dyn AudioBackend>,
    library: MoodLibrary,
    autoplay_on_load: bool,
    event_tx: broadcast::Sender<PlayerEvent>,
    completion_tx: mpsc::UnboundedSender<u64>,
    completion_rx: Mutex<Option<mpsc::UnboundedReceiver<u64>>>,
    cancel_token: CancellationToken,
}

impl PlayerEngine {
    /// Create a new player engine.
    ///
    /// The mood library, the audio backend and the playback settings are
    /// explicit dependencies; the engine reads no ambient state.
    #[must_use]
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        library: MoodLibrary,
        playback: &PlaybackConfig,
    ) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(64);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Arc::new(Self {
            inner: RwLock::new(PlayerInner {
                playlist: Vec::new(),
                bucket: None,
                current: None,
                is_playing: false,
                sink: None,
                generation: 0,
                favorites: FavoritesSet::new(),
                last_error: None,
            }),
            backend,
            library,
            autoplay_on_load: playback.autoplay_on_load,
            event_tx,
            completion_tx,
            completion_rx: Mutex::new(Some(completion_rx)),
            cancel_token: CancellationToken::new(),
        })
    }

    /// Subscribe to player events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.event_tx.subscribe()
    }

    /// Get a clone of the cancellation token
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Start the playback sequencer in a background task.
    ///
    /// The sequencer consumes natural-completion notifications and advances
    /// the playlist. Without it, completed tracks simply stop.
    #[must_use]
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        let Some(mut rx) = self.completion_rx.lock().await.take() else {
            warn!(target: LOG_TARGET, "Playback sequencer is already running");
            return;
        };

        info!(target: LOG_TARGET, "Starting playback sequencer");

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!(target: LOG_TARGET, "Playback sequencer shutting down");
                    break;
                }
                completed = rx.recv() => {
                    match completed {
                        Some(generation) => self.handle_completion(generation).await,
                        None => break,
                    }
                }
            }
        }
    }

    async fn handle_completion(&self, generation: u64) {
        let current = {
            let inner = self.inner.read().await;
            if inner.generation != generation {
                debug!(
                    target: LOG_TARGET,
                    "Ignoring completion from superseded load (generation {generation})"
                );
                return;
            }
            inner.current.clone()
        };

        if let Some(track) = current {
            info!(
                target: LOG_TARGET,
                "Track finished naturally: {} - {}", track.artist, track.title
            );
            self.next().await;
        }
    }

    /// Replace the active playlist with the library entry for a bucket.
    ///
    /// `None` (or a bucket with no library entry) empties the playlist; the
    /// previous playlist is never retained. Idempotent when the bucket is
    /// unchanged. The loaded track is not touched.
    pub async fn select_playlist(&self, bucket: Option<ConditionBucket>) {
        let mut inner = self.inner.write().await;
        if inner.bucket == bucket {
            return;
        }

        let playlist: Vec<Track> = bucket
            .map(|b| self.library.playlist_for(b).to_vec())
            .unwrap_or_default();

        info!(
            target: LOG_TARGET,
            "Selecting playlist for bucket {:?} ({} tracks)",
            bucket,
            playlist.len()
        );

        inner.bucket = bucket;
        inner.playlist = playlist;
        let track_count = inner.playlist.len();
        drop(inner);

        let _ = self.event_tx.send(PlayerEvent::PlaylistSelected {
            bucket,
            track_count,
        });
    }

    /// Load a track. Playback starts immediately unless autoplay is
    /// disabled, in which case the track is held paused until
    /// [`toggle_playback`](Self::toggle_playback).
    ///
    /// The previously held playback resource is released before the new one
    /// is acquired, on every path. On acquisition failure nothing stays
    /// loaded: the failure is logged, recorded in the error flag and
    /// surfaced as a [`PlayerEvent::LoadFailed`] event.
    pub async fn load(&self, track: Track) {
        let (generation, previous) = {
            let mut inner = self.inner.write().await;
            inner.generation += 1;
            inner.is_playing = false;
            inner.current = None;
            (inner.generation, inner.sink.take())
        };

        if let Some(mut sink) = previous {
            if let Err(e) = sink.unload().await {
                warn!(
                    target: LOG_TARGET,
                    "Failed to release previous audio resource: {e}"
                );
            }
        }

        debug!(
            target: LOG_TARGET,
            "Acquiring audio resource for {} via {}", track.source_uri, self.backend.name()
        );

        match self.backend.load(&track.source_uri).await {
            Ok(LoadedAudio { sink, finished }) => {
                let mut sink = sink;

                // The backend starts playback on load; hold the track back
                // when autoplay is disabled. The flag only stays false when
                // the sink accepted the pause.
                let mut is_playing = true;
                if !self.autoplay_on_load {
                    match sink.pause().await {
                        Ok(()) => is_playing = false,
                        Err(e) => warn!(
                            target: LOG_TARGET,
                            "Failed to pause freshly loaded track: {e}"
                        ),
                    }
                }

                {
                    let mut inner = self.inner.write().await;
                    if inner.generation != generation {
                        // A later load superseded this one while we were
                        // acquiring; release the resource we just got.
                        drop(inner);
                        if let Err(e) = sink.unload().await {
                            warn!(
                                target: LOG_TARGET,
                                "Failed to release superseded audio resource: {e}"
                            );
                        }
                        return;
                    }
                    inner.sink = Some(sink);
                    inner.current = Some(track.clone());
                    inner.is_playing = is_playing;
                    inner.last_error = None;
                }

                let completion_tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    if finished.await.is_ok() {
                        let _ = completion_tx.send(generation);
                    }
                });

                if is_playing {
                    info!(
                        target: LOG_TARGET,
                        "Now playing: {} - {}", track.artist, track.title
                    );
                } else {
                    info!(
                        target: LOG_TARGET,
                        "Loaded paused: {} - {}", track.artist, track.title
                    );
                }
                let _ = self.event_tx.send(PlayerEvent::TrackLoaded { track });
            }
            Err(e) => {
                let message = e.to_string();
                warn!(
                    target: LOG_TARGET,
                    "Failed to load {} - {}: {message}", track.artist, track.title
                );

                let mut inner = self.inner.write().await;
                inner.last_error = Some(message.clone());
                drop(inner);

                let _ = self.event_tx.send(PlayerEvent::LoadFailed { track, message });
            }
        }
    }

    /// Flip between playing and paused. No-op when nothing is loaded.
    ///
    /// The flag flips only when the sink accepts the command; a rejected
    /// command is logged and recorded in the error flag.
    pub async fn toggle_playback(&self) {
        let mut inner = self.inner.write().await;
        if inner.sink.is_none() {
            return;
        }

        let was_playing = inner.is_playing;
        let result = match inner.sink.as_mut() {
            Some(sink) => {
                if was_playing {
                    sink.pause().await
                } else {
                    sink.resume().await
                }
            }
            None => return,
        };

        match result {
            Ok(()) => {
                inner.is_playing = !was_playing;
                drop(inner);
                let event = if was_playing {
                    PlayerEvent::PlaybackPaused
                } else {
                    PlayerEvent::PlaybackResumed
                };
                let _ = self.event_tx.send(event);
            }
            Err(e) => {
                let message = e.to_string();
                warn!(target: LOG_TARGET, "Playback command failed: {message}");
                inner.last_error = Some(message);
            }
        }
    }

    /// Load the next track in the active playlist, wrapping at the end.
    ///
    /// No-op when the playlist is empty or nothing is loaded.
    pub async fn next(&self) {
        self.advance(Direction::Forward).await;
    }

    /// Load the previous track in the active playlist, wrapping at the start.
    ///
    /// No-op when the playlist is empty or nothing is loaded.
    pub async fn previous(&self) {
        self.advance(Direction::Backward).await;
    }

    async fn advance(&self, direction: Direction) {
        let target = {
            let inner = self.inner.read().await;
            if inner.playlist.is_empty() {
                return;
            }
            let Some(current) = &inner.current else {
                return;
            };

            let len = inner.playlist.len();
            match inner.playlist.iter().position(|t| t.has_id(&current.id)) {
                Some(index) => {
                    let next_index = match direction {
                        Direction::Forward => (index + 1) % len,
                        Direction::Backward => (index + len - 1) % len,
                    };
                    inner.playlist[next_index].clone()
                }
                // The playlist changed under the held track; restart from
                // the first track.
                None => inner.playlist[0].clone(),
            }
        };

        self.load(target).await;
    }

    /// Toggle a track's favorite membership. Returns the new membership.
    pub async fn toggle_favorite(&self, track: &Track) -> bool {
        let now_favorite = {
            let mut inner = self.inner.write().await;
            inner.favorites.toggle(track)
        };

        let event = if now_favorite {
            PlayerEvent::FavoriteAdded {
                track: track.clone(),
            }
        } else {
            PlayerEvent::FavoriteRemoved {
                track_id: track.id.clone(),
            }
        };
        let _ = self.event_tx.send(event);

        now_favorite
    }

    /// Check favorite membership by track id
    pub async fn is_favorite(&self, id: &str) -> bool {
        self.inner.read().await.favorites.contains(id)
    }

    /// Snapshot of the favorites, in no particular order
    pub async fn favorites(&self) -> Vec<Track> {
        self.inner.read().await.favorites.tracks()
    }

    /// Get the active playlist
    pub async fn active_playlist(&self) -> Vec<Track> {
        self.inner.read().await.playlist.clone()
    }

    /// Get the bucket the active playlist was selected for
    pub async fn active_bucket(&self) -> Option<ConditionBucket> {
        self.inner.read().await.bucket
    }

    /// Get the currently loaded track
    pub async fn current_track(&self) -> Option<Track> {
        self.inner.read().await.current.clone()
    }

    /// Check whether playback is running
    pub async fn is_playing(&self) -> bool {
        self.inner.read().await.is_playing
    }

    /// Get the last playback error message, if any
    pub async fn last_error(&self) -> Option<String> {
        self.inner.read().await.last_error.clone()
    }

    /// Tear the engine down: stop the sequencer and release the held
    /// playback resource.
    pub async fn shutdown(&self) {
        self.cancel_token.cancel();

        let sink = {
            let mut inner = self.inner.write().await;
            // Any in-flight completion becomes stale.
            inner.generation += 1;
            inner.is_playing = false;
            inner.current = None;
            inner.sink.take()
        };

        if let Some(mut sink) = sink {
            if let Err(e) = sink.unload().await {
                warn!(
                    target: LOG_TARGET,
                    "Failed to release audio resource on shutdown: {e}"
                );
            }
        }

        info!(target: LOG_TARGET, "Player engine shut down");
    }
}
