//! Audio playback collaborator traits.

use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::oneshot;

/// A live handle to an actively loaded audio source.
///
/// The handle is held exclusively by the [`PlayerEngine`](crate::PlayerEngine);
/// it is always unloaded before a replacement is acquired, on every code
/// path including error paths.
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Pause playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying playback resource rejects the
    /// command.
    async fn pause(&mut self) -> Result<()>;

    /// Resume playback.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying playback resource rejects the
    /// command.
    async fn resume(&mut self) -> Result<()>;

    /// Release the playback resource. The sink is unusable afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be released cleanly.
    async fn unload(&mut self) -> Result<()>;
}

/// A freshly acquired playback resource.
pub struct LoadedAudio {
    /// Control handle for the loaded source.
    pub sink: Box<dyn AudioSink>,
    /// Fires exactly once when playback finishes naturally. Never fires on
    /// pause or unload.
    pub finished: oneshot::Receiver<()>,
}

/// Trait for audio backends that acquire playback resources.
///
/// Loading starts playback immediately. Acquisition failure is non-fatal to
/// the player: it is reported and the previous resource stays released.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Acquire a playback resource for a source URI and start playing it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AudioLoadFailed`](crate::CoreError::AudioLoadFailed)
    /// when the source cannot be loaded.
    async fn load(&self, uri: &str) -> Result<LoadedAudio>;
}
