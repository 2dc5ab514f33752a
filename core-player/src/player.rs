//! # Track Player Facade
//!
//! Async command surface over the native playback authority.
//!
//! ## Overview
//!
//! `TrackPlayer` owns no playback state. Every operation:
//! 1. copies the caller's input,
//! 2. resolves bundled asset references in the copy,
//! 3. issues exactly one command to the [`NativePlayer`],
//! 4. maps a native failure to the [`PlayerError`] category of the command.
//!
//! Calls are neither serialized nor retried. Two commands in flight at once
//! take effect in whatever order the native side applies them.
//!
//! ## Usage
//!
//! ```ignore
//! use core_player::{Track, TrackPlayer};
//! use core_runtime::config::PlayerConfig;
//!
//! let player = TrackPlayer::new(PlayerConfig::builder().native_player(native).build()?);
//!
//! player.setup_player(Default::default()).await?;
//! player.add(Track::new("https://example.com/song.mp3").with_title("Song"), None).await?;
//! player.play().await?;
//! ```

use crate::error::{PlayerError, Result};
use crate::input::{IndexList, TrackList};
use crate::resolve;
use bridge_traits::error::BridgeError;
use bridge_traits::event::{EventKind, PlayerEvent};
use bridge_traits::headless::HeadlessTaskRegistry;
use bridge_traits::player::{
    MetadataOptions, NativePlayer, NowPlayingMetadata, PlayerOptions, RepeatMode, State, Track,
    TrackMetadataUpdate,
};
use bridge_traits::AssetResolver;
use core_runtime::config::PlayerConfig;
use core_runtime::events::{EventBus, Subscription};
use core_runtime::logging::redact_uri;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Insertion index / initial position meaning "default" on the wire.
const NATIVE_DEFAULT: i32 = -1;

/// Wraps a native failure into the category of `command`, logging it once.
fn failed(
    command: &'static str,
    category: fn(BridgeError) -> PlayerError,
) -> impl FnOnce(BridgeError) -> PlayerError {
    move |err| {
        warn!(command, error = %err, "Native player command failed");
        category(err)
    }
}

fn position_or_default(initial_position: Option<f64>) -> f64 {
    initial_position.unwrap_or(NATIVE_DEFAULT as f64)
}

/// Playback facade handed to application code.
///
/// Cloning is cheap; clones share the native player and the event bus.
#[derive(Clone)]
pub struct TrackPlayer {
    native: Arc<dyn NativePlayer>,
    assets: Arc<dyn AssetResolver>,
    events: EventBus,
    pub(crate) headless: Option<Arc<dyn HeadlessTaskRegistry>>,
    pub(crate) service_task_name: String,
}

impl fmt::Debug for TrackPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackPlayer")
            .field("events", &self.events)
            .field("headless", &self.headless.is_some())
            .field("service_task_name", &self.service_task_name)
            .finish()
    }
}

impl TrackPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            native: config.native_player,
            assets: config.asset_resolver,
            events: config.event_bus,
            headless: config.headless_registry,
            service_task_name: config.service_task_name,
        }
    }

    /// The bus native events arrive on.
    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Initialise the native player. Resolves once it reports readiness.
    #[instrument(skip(self, options))]
    pub async fn setup_player(&self, options: PlayerOptions) -> Result<()> {
        debug!("Setting up native player");
        self.native
            .setup_player(options)
            .await
            .map_err(failed("setup_player", PlayerError::Initialization))
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Invoke `callback` for every future event of `kind`.
    ///
    /// Dropping the returned handle keeps the listener attached; call
    /// [`Subscription::remove`] to detach it.
    pub fn add_event_listener<F>(&self, kind: EventKind, callback: F) -> Result<Subscription>
    where
        F: Fn(&PlayerEvent) + Send + Sync + 'static,
    {
        let subscription = self.events.add_listener(kind, callback)?;
        debug!(event = %kind, subscription = %subscription.id(), "Added event listener");
        Ok(subscription)
    }

    // ========================================================================
    // Queue
    // ========================================================================

    /// Insert tracks before `insert_before_index`, or append when it is
    /// `None`, negative, or past the end of the queue.
    ///
    /// The caller's tracks are copied; asset references are resolved in the
    /// copy. An empty input returns without contacting the native player.
    #[instrument(skip(self, tracks), fields(count))]
    pub async fn add(
        &self,
        tracks: impl Into<TrackList>,
        insert_before_index: Option<i32>,
    ) -> Result<()> {
        let tracks = tracks.into();
        tracing::Span::current().record("count", tracks.len());

        if tracks.is_empty() {
            debug!("No tracks to add");
            return Ok(());
        }

        let resolved: Vec<Track> = tracks
            .iter()
            .map(|track| resolve::resolve_track(self.assets.as_ref(), track))
            .collect();

        for track in &resolved {
            if let Some(url) = track.url.as_ref() {
                trace!(url = %redact_uri(&url.to_string()), "Queueing track");
            }
        }

        let index = insert_before_index
            .filter(|index| *index >= 0)
            .unwrap_or(NATIVE_DEFAULT);

        debug!(insert_before_index = index, "Adding tracks");
        self.native
            .add(resolved, index)
            .await
            .map_err(failed("add", PlayerError::Queue))
    }

    /// Remove the tracks at `indexes` (one index or a sequence).
    pub async fn remove(&self, indexes: impl Into<IndexList>) -> Result<()> {
        let indexes = indexes.into().into_inner();
        debug!(count = indexes.len(), "Removing tracks");
        self.native
            .remove(indexes)
            .await
            .map_err(failed("remove", PlayerError::Queue))
    }

    /// Remove every track after the current one.
    pub async fn remove_upcoming_tracks(&self) -> Result<()> {
        debug!("Removing upcoming tracks");
        self.native
            .remove_upcoming_tracks()
            .await
            .map_err(failed("remove_upcoming_tracks", PlayerError::Queue))
    }

    /// Jump to the track at `track_index`, starting at `initial_position`
    /// seconds (or the default start when `None`).
    #[instrument(skip(self))]
    pub async fn skip(&self, track_index: u32, initial_position: Option<f64>) -> Result<()> {
        debug!("Skipping to track");
        self.native
            .skip(track_index, position_or_default(initial_position))
            .await
            .map_err(failed("skip", PlayerError::Skip))
    }

    pub async fn skip_to_next(&self, initial_position: Option<f64>) -> Result<()> {
        debug!("Skipping to next track");
        self.native
            .skip_to_next(position_or_default(initial_position))
            .await
            .map_err(failed("skip_to_next", PlayerError::Skip))
    }

    pub async fn skip_to_previous(&self, initial_position: Option<f64>) -> Result<()> {
        debug!("Skipping to previous track");
        self.native
            .skip_to_previous(position_or_default(initial_position))
            .await
            .map_err(failed("skip_to_previous", PlayerError::Skip))
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Update media session and notification options.
    ///
    /// Forwarded even when every field is empty.
    pub async fn update_options(&self, options: &MetadataOptions) -> Result<()> {
        let resolved = resolve::resolve_options(self.assets.as_ref(), options);
        debug!("Updating player options");
        self.native
            .update_options(resolved)
            .await
            .map_err(failed("update_options", PlayerError::Command))
    }

    pub async fn update_metadata_for_track(
        &self,
        track_index: u32,
        metadata: &TrackMetadataUpdate,
    ) -> Result<()> {
        let resolved = resolve::resolve_track_metadata(self.assets.as_ref(), metadata);
        debug!(track_index, "Updating track metadata");
        self.native
            .update_metadata_for_track(track_index, resolved)
            .await
            .map_err(failed("update_metadata_for_track", PlayerError::Command))
    }

    /// Override what the media session shows, independently of the queue.
    pub async fn update_now_playing_metadata(&self, metadata: &NowPlayingMetadata) -> Result<()> {
        let resolved = resolve::resolve_now_playing(self.assets.as_ref(), metadata);
        debug!("Updating now playing metadata");
        self.native
            .update_now_playing_metadata(resolved)
            .await
            .map_err(failed("update_now_playing_metadata", PlayerError::Command))
    }

    pub async fn clear_now_playing_metadata(&self) -> Result<()> {
        debug!("Clearing now playing metadata");
        self.native
            .clear_now_playing_metadata()
            .await
            .map_err(failed("clear_now_playing_metadata", PlayerError::Command))
    }

    // ========================================================================
    // Transport controls
    // ========================================================================

    /// Stop playback and clear the queue.
    pub async fn reset(&self) -> Result<()> {
        debug!("Resetting player");
        self.native
            .reset()
            .await
            .map_err(failed("reset", PlayerError::Command))
    }

    pub async fn play(&self) -> Result<()> {
        debug!("Play");
        self.native
            .play()
            .await
            .map_err(failed("play", PlayerError::Command))
    }

    pub async fn pause(&self) -> Result<()> {
        debug!("Pause");
        self.native
            .pause()
            .await
            .map_err(failed("pause", PlayerError::Command))
    }

    pub async fn stop(&self) -> Result<()> {
        debug!("Stop");
        self.native
            .stop()
            .await
            .map_err(failed("stop", PlayerError::Command))
    }

    /// Seek within the current track, in seconds.
    pub async fn seek_to(&self, position: f64) -> Result<()> {
        debug!(position, "Seeking");
        self.native
            .seek_to(position)
            .await
            .map_err(failed("seek_to", PlayerError::Command))
    }

    /// Set the volume. The range is not validated here.
    pub async fn set_volume(&self, level: f32) -> Result<()> {
        debug!(level, "Setting volume");
        self.native
            .set_volume(level)
            .await
            .map_err(failed("set_volume", PlayerError::Command))
    }

    pub async fn set_rate(&self, rate: f32) -> Result<()> {
        debug!(rate, "Setting playback rate");
        self.native
            .set_rate(rate)
            .await
            .map_err(failed("set_rate", PlayerError::Command))
    }

    /// Set the repeat mode and return the mode the native player applied.
    pub async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<RepeatMode> {
        debug!(%mode, "Setting repeat mode");
        let applied = self
            .native
            .set_repeat_mode(mode)
            .await
            .map_err(failed("set_repeat_mode", PlayerError::Command))?;
        RepeatMode::try_from(applied).map_err(failed("set_repeat_mode", PlayerError::Command))
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub async fn get_repeat_mode(&self) -> Result<RepeatMode> {
        let raw = self
            .native
            .get_repeat_mode()
            .await
            .map_err(failed("get_repeat_mode", PlayerError::Command))?;
        RepeatMode::try_from(raw).map_err(failed("get_repeat_mode", PlayerError::Command))
    }

    pub async fn get_volume(&self) -> Result<f32> {
        self.native
            .get_volume()
            .await
            .map_err(failed("get_volume", PlayerError::Command))
    }

    pub async fn get_rate(&self) -> Result<f32> {
        self.native
            .get_rate()
            .await
            .map_err(failed("get_rate", PlayerError::Command))
    }

    /// Track at `track_index`, re-fetched from the native queue.
    pub async fn get_track(&self, track_index: u32) -> Result<Option<Track>> {
        self.native
            .get_track(track_index)
            .await
            .map_err(failed("get_track", PlayerError::Command))
    }

    pub async fn get_queue(&self) -> Result<Vec<Track>> {
        self.native
            .get_queue()
            .await
            .map_err(failed("get_queue", PlayerError::Command))
    }

    /// Index of the current track, `None` when the queue is empty.
    pub async fn get_current_track(&self) -> Result<Option<u32>> {
        self.native
            .get_current_track()
            .await
            .map_err(failed("get_current_track", PlayerError::Command))
    }

    pub async fn get_duration(&self) -> Result<f64> {
        self.native
            .get_duration()
            .await
            .map_err(failed("get_duration", PlayerError::Command))
    }

    pub async fn get_buffered_position(&self) -> Result<f64> {
        self.native
            .get_buffered_position()
            .await
            .map_err(failed("get_buffered_position", PlayerError::Command))
    }

    pub async fn get_position(&self) -> Result<f64> {
        self.native
            .get_position()
            .await
            .map_err(failed("get_position", PlayerError::Command))
    }

    pub async fn get_state(&self) -> Result<State> {
        self.native
            .get_state()
            .await
            .map_err(failed("get_state", PlayerError::Command))
    }
}
