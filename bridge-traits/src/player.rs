//! Native player bridge trait and the data model shared across the boundary.
//!
//! The native playback authority (decoder, queue owner, media session and
//! notification integration) lives in the host platform. The core only talks
//! to it through [`NativePlayer`]: one async method per command, each
//! answering exactly once. Every type here is serialized in camelCase so a
//! host can marshal it as a plain map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;

use crate::asset::AssetSource;
use crate::error::{BridgeError, Result};

/// Playback state reported by the native player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    None,
    Ready,
    Playing,
    Paused,
    Stopped,
    Buffering,
    Connecting,
    Error,
}

impl State {
    /// `true` while audio is playing or about to play.
    pub fn is_active(&self) -> bool {
        matches!(self, State::Playing | State::Buffering | State::Connecting)
    }
}

/// Queue repeat behaviour.
///
/// Travels as its numeric value (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum RepeatMode {
    #[default]
    Off = 0,
    Track = 1,
    Queue = 2,
}

impl From<RepeatMode> for i32 {
    fn from(mode: RepeatMode) -> Self {
        mode as i32
    }
}

impl TryFrom<i32> for RepeatMode {
    type Error = BridgeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(RepeatMode::Off),
            1 => Ok(RepeatMode::Track),
            2 => Ok(RepeatMode::Queue),
            other => Err(BridgeError::InvalidReply(format!(
                "unknown repeat mode {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Queue => "queue",
        };
        f.write_str(name)
    }
}

/// Remote-control capabilities advertised to the media session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Play,
    PlayFromId,
    PlayFromSearch,
    Pause,
    Stop,
    SeekTo,
    Skip,
    SkipToNext,
    SkipToPrevious,
    JumpForward,
    JumpBackward,
    SetRating,
    Like,
    Dislike,
    Bookmark,
}

/// Rating style the media session should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingType {
    Heart,
    ThumbsUpDown,
    ThreeStars,
    FourStars,
    FiveStars,
    Percentage,
}

/// A rating value: boolean for heart/thumbs styles, numeric otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Boolean(bool),
    Value(f64),
}

/// Streaming format hint for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    #[default]
    Default,
    Dash,
    Hls,
    SmoothStreaming,
}

/// Time-stretch algorithm used when the playback rate changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchAlgorithm {
    Linear,
    Music,
    Voice,
}

/// One playable item.
///
/// `url` and `artwork` are locators and get resolved before the track is
/// handed to the native player. Everything else is descriptive and passes
/// through verbatim, including unknown keys collected in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub track_type: Option<TrackType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_algorithm: Option<PitchAlgorithm>,
    /// Application-defined fields, opaque to the bridge.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn new(url: impl Into<AssetSource>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_artwork(mut self, artwork: impl Into<AssetSource>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Attach an application-defined field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Options for `setup_player`. Buffer sizes are in seconds, cache in KiB.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_buffer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_buffer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_buffer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_buffer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cache_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_buffer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_update_metadata: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_category_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios_category_options: Option<Vec<String>>,
}

/// Media session and notification options for `update_options`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_type: Option<RatingType>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_jump_interval: Option<f64>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backward_jump_interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_with_app: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_pause_on_interruption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_capabilities: Option<Vec<Capability>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact_capabilities: Option<Vec<Capability>>,
    /// Notification accent color, ARGB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewind_icon: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_icon: Option<AssetSource>,
}

impl MetadataOptions {
    /// Mutable access to every icon-typed field.
    pub fn icons_mut(&mut self) -> [&mut Option<AssetSource>; 8] {
        [
            &mut self.icon,
            &mut self.play_icon,
            &mut self.pause_icon,
            &mut self.stop_icon,
            &mut self.previous_icon,
            &mut self.next_icon,
            &mut self.rewind_icon,
            &mut self.forward_icon,
        ]
    }

    /// Every icon-typed field, in declaration order.
    pub fn icons(&self) -> [&Option<AssetSource>; 8] {
        [
            &self.icon,
            &self.play_icon,
            &self.pause_icon,
            &self.stop_icon,
            &self.previous_icon,
            &self.next_icon,
            &self.rewind_icon,
            &self.forward_icon,
        ]
    }
}

/// Descriptive fields that can be rewritten on a queued track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadataUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// Now-playing override shown by the media session, independent of the queue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<AssetSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Seconds into the current item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
}

/// Command surface of the native playback authority.
///
/// The native side owns the queue and all playback state. Implementations
/// must not assume the caller serializes commands: two calls may be in flight
/// at once, and the order in which they take effect is the implementation's
/// own.
///
/// Positions and durations are seconds. `-1` as an insertion index means
/// "append"; `-1` as an initial position means "default start position".
///
/// # Example
///
/// ```ignore
/// use bridge_traits::player::{NativePlayer, Track};
///
/// async fn enqueue(player: &dyn NativePlayer) -> bridge_traits::error::Result<()> {
///     player.add(vec![Track::new("https://example.com/a.mp3")], -1).await?;
///     player.play().await
/// }
/// ```
#[async_trait::async_trait]
pub trait NativePlayer: Send + Sync {
    /// Initialise the player. Resolves once the native side is ready.
    async fn setup_player(&self, options: PlayerOptions) -> Result<()>;

    async fn update_options(&self, options: MetadataOptions) -> Result<()>;

    /// Insert `tracks` before `insert_before_index`, or append for `-1`.
    async fn add(&self, tracks: Vec<Track>, insert_before_index: i32) -> Result<()>;

    async fn remove(&self, indexes: Vec<u32>) -> Result<()>;

    async fn remove_upcoming_tracks(&self) -> Result<()>;

    async fn skip(&self, track_index: u32, initial_position: f64) -> Result<()>;

    async fn skip_to_next(&self, initial_position: f64) -> Result<()>;

    async fn skip_to_previous(&self, initial_position: f64) -> Result<()>;

    async fn update_metadata_for_track(
        &self,
        track_index: u32,
        metadata: TrackMetadataUpdate,
    ) -> Result<()>;

    async fn update_now_playing_metadata(&self, metadata: NowPlayingMetadata) -> Result<()>;

    async fn clear_now_playing_metadata(&self) -> Result<()>;

    async fn reset(&self) -> Result<()>;

    async fn play(&self) -> Result<()>;

    async fn pause(&self) -> Result<()>;

    async fn stop(&self) -> Result<()>;

    async fn seek_to(&self, position: f64) -> Result<()>;

    async fn set_volume(&self, level: f32) -> Result<()>;

    async fn get_volume(&self) -> Result<f32>;

    async fn set_rate(&self, rate: f32) -> Result<()>;

    async fn get_rate(&self) -> Result<f32>;

    /// Apply a repeat mode; answers with the raw mode actually applied.
    async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<i32>;

    /// Raw repeat mode currently applied.
    async fn get_repeat_mode(&self) -> Result<i32>;

    async fn get_track(&self, track_index: u32) -> Result<Option<Track>>;

    async fn get_queue(&self) -> Result<Vec<Track>>;

    /// Index of the current track, `None` when the queue is empty.
    async fn get_current_track(&self) -> Result<Option<u32>>;

    async fn get_duration(&self) -> Result<f64>;

    async fn get_buffered_position(&self) -> Result<f64>;

    async fn get_position(&self) -> Result<f64>;

    async fn get_state(&self) -> Result<State>;
}
