//! Shared fakes for the core-player integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::headless::{HeadlessTaskRegistry, ServiceFactory};
use bridge_traits::player::{
    MetadataOptions, NativePlayer, NowPlayingMetadata, PlayerOptions, RepeatMode, State, Track,
    TrackMetadataUpdate,
};
use bridge_traits::AssetResolver;
use core_player::{EventTransportKind, PlayerConfig, TrackPlayer};
use mockall::mock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording fake
// ============================================================================

/// One command as received by the native side.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetupPlayer(PlayerOptions),
    UpdateOptions(MetadataOptions),
    Add(Vec<Track>, i32),
    Remove(Vec<u32>),
    RemoveUpcomingTracks,
    Skip(u32, f64),
    SkipToNext(f64),
    SkipToPrevious(f64),
    UpdateMetadataForTrack(u32, TrackMetadataUpdate),
    UpdateNowPlayingMetadata(NowPlayingMetadata),
    ClearNowPlayingMetadata,
    Reset,
    Play,
    Pause,
    Stop,
    SeekTo(f64),
    SetVolume(f32),
    SetRate(f32),
    SetRepeatMode(RepeatMode),
    Get(&'static str),
}

/// Native player that records every command and keeps a simple queue.
pub struct RecordingPlayer {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, BridgeError>>,
    repeat_reply: Mutex<Option<i32>>,
    queue: Mutex<Vec<Track>>,
}

impl RecordingPlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            repeat_reply: Mutex::new(None),
            queue: Mutex::new(Vec::new()),
        })
    }

    /// Make `command` fail with `error` from now on.
    pub fn fail_with(&self, command: &'static str, error: BridgeError) {
        self.failures.lock().unwrap().insert(command, error);
    }

    /// Reply to repeat mode commands with `raw` instead of echoing.
    pub fn reply_repeat_mode(&self, raw: i32) {
        *self.repeat_reply.lock().unwrap() = Some(raw);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, command: &'static str, call: Call) -> BridgeResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(command) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn get(&self, command: &'static str) -> BridgeResult<()> {
        self.record(command, Call::Get(command))
    }
}

#[async_trait]
impl NativePlayer for RecordingPlayer {
    async fn setup_player(&self, options: PlayerOptions) -> BridgeResult<()> {
        self.record("setup_player", Call::SetupPlayer(options))
    }

    async fn update_options(&self, options: MetadataOptions) -> BridgeResult<()> {
        self.record("update_options", Call::UpdateOptions(options))
    }

    async fn add(&self, tracks: Vec<Track>, insert_before_index: i32) -> BridgeResult<()> {
        self.record("add", Call::Add(tracks.clone(), insert_before_index))?;
        let mut queue = self.queue.lock().unwrap();
        let at = usize::try_from(insert_before_index)
            .ok()
            .filter(|index| *index < queue.len())
            .unwrap_or(queue.len());
        queue.splice(at..at, tracks);
        Ok(())
    }

    async fn remove(&self, indexes: Vec<u32>) -> BridgeResult<()> {
        self.record("remove", Call::Remove(indexes))
    }

    async fn remove_upcoming_tracks(&self) -> BridgeResult<()> {
        self.record("remove_upcoming_tracks", Call::RemoveUpcomingTracks)
    }

    async fn skip(&self, track_index: u32, initial_position: f64) -> BridgeResult<()> {
        self.record("skip", Call::Skip(track_index, initial_position))
    }

    async fn skip_to_next(&self, initial_position: f64) -> BridgeResult<()> {
        self.record("skip_to_next", Call::SkipToNext(initial_position))
    }

    async fn skip_to_previous(&self, initial_position: f64) -> BridgeResult<()> {
        self.record("skip_to_previous", Call::SkipToPrevious(initial_position))
    }

    async fn update_metadata_for_track(
        &self,
        track_index: u32,
        metadata: TrackMetadataUpdate,
    ) -> BridgeResult<()> {
        self.record(
            "update_metadata_for_track",
            Call::UpdateMetadataForTrack(track_index, metadata),
        )
    }

    async fn update_now_playing_metadata(&self, metadata: NowPlayingMetadata) -> BridgeResult<()> {
        self.record(
            "update_now_playing_metadata",
            Call::UpdateNowPlayingMetadata(metadata),
        )
    }

    async fn clear_now_playing_metadata(&self) -> BridgeResult<()> {
        self.record("clear_now_playing_metadata", Call::ClearNowPlayingMetadata)
    }

    async fn reset(&self) -> BridgeResult<()> {
        self.record("reset", Call::Reset)?;
        self.queue.lock().unwrap().clear();
        Ok(())
    }

    async fn play(&self) -> BridgeResult<()> {
        self.record("play", Call::Play)
    }

    async fn pause(&self) -> BridgeResult<()> {
        self.record("pause", Call::Pause)
    }

    async fn stop(&self) -> BridgeResult<()> {
        self.record("stop", Call::Stop)
    }

    async fn seek_to(&self, position: f64) -> BridgeResult<()> {
        self.record("seek_to", Call::SeekTo(position))
    }

    async fn set_volume(&self, level: f32) -> BridgeResult<()> {
        self.record("set_volume", Call::SetVolume(level))
    }

    async fn get_volume(&self) -> BridgeResult<f32> {
        self.get("get_volume").map(|_| 0.5)
    }

    async fn set_rate(&self, rate: f32) -> BridgeResult<()> {
        self.record("set_rate", Call::SetRate(rate))
    }

    async fn get_rate(&self) -> BridgeResult<f32> {
        self.get("get_rate").map(|_| 1.0)
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> BridgeResult<i32> {
        self.record("set_repeat_mode", Call::SetRepeatMode(mode))?;
        Ok(self.repeat_reply.lock().unwrap().unwrap_or(mode.into()))
    }

    async fn get_repeat_mode(&self) -> BridgeResult<i32> {
        self.get("get_repeat_mode")?;
        Ok(self.repeat_reply.lock().unwrap().unwrap_or(0))
    }

    async fn get_track(&self, track_index: u32) -> BridgeResult<Option<Track>> {
        self.get("get_track")?;
        Ok(self.queue.lock().unwrap().get(track_index as usize).cloned())
    }

    async fn get_queue(&self) -> BridgeResult<Vec<Track>> {
        self.get("get_queue")?;
        Ok(self.queue.lock().unwrap().clone())
    }

    async fn get_current_track(&self) -> BridgeResult<Option<u32>> {
        self.get("get_current_track")?;
        Ok((!self.queue.lock().unwrap().is_empty()).then_some(0))
    }

    async fn get_duration(&self) -> BridgeResult<f64> {
        self.get("get_duration").map(|_| 120.0)
    }

    async fn get_buffered_position(&self) -> BridgeResult<f64> {
        self.get("get_buffered_position").map(|_| 60.0)
    }

    async fn get_position(&self) -> BridgeResult<f64> {
        self.get("get_position").map(|_| 30.0)
    }

    async fn get_state(&self) -> BridgeResult<State> {
        self.get("get_state").map(|_| State::Playing)
    }
}

// ============================================================================
// mockall mocks
// ============================================================================

mock! {
    pub Native {}

    #[async_trait]
    impl NativePlayer for Native {
        async fn setup_player(&self, options: PlayerOptions) -> BridgeResult<()>;
        async fn update_options(&self, options: MetadataOptions) -> BridgeResult<()>;
        async fn add(&self, tracks: Vec<Track>, insert_before_index: i32) -> BridgeResult<()>;
        async fn remove(&self, indexes: Vec<u32>) -> BridgeResult<()>;
        async fn remove_upcoming_tracks(&self) -> BridgeResult<()>;
        async fn skip(&self, track_index: u32, initial_position: f64) -> BridgeResult<()>;
        async fn skip_to_next(&self, initial_position: f64) -> BridgeResult<()>;
        async fn skip_to_previous(&self, initial_position: f64) -> BridgeResult<()>;
        async fn update_metadata_for_track(
            &self,
            track_index: u32,
            metadata: TrackMetadataUpdate,
        ) -> BridgeResult<()>;
        async fn update_now_playing_metadata(&self, metadata: NowPlayingMetadata) -> BridgeResult<()>;
        async fn clear_now_playing_metadata(&self) -> BridgeResult<()>;
        async fn reset(&self) -> BridgeResult<()>;
        async fn play(&self) -> BridgeResult<()>;
        async fn pause(&self) -> BridgeResult<()>;
        async fn stop(&self) -> BridgeResult<()>;
        async fn seek_to(&self, position: f64) -> BridgeResult<()>;
        async fn set_volume(&self, level: f32) -> BridgeResult<()>;
        async fn get_volume(&self) -> BridgeResult<f32>;
        async fn set_rate(&self, rate: f32) -> BridgeResult<()>;
        async fn get_rate(&self) -> BridgeResult<f32>;
        async fn set_repeat_mode(&self, mode: RepeatMode) -> BridgeResult<i32>;
        async fn get_repeat_mode(&self) -> BridgeResult<i32>;
        async fn get_track(&self, track_index: u32) -> BridgeResult<Option<Track>>;
        async fn get_queue(&self) -> BridgeResult<Vec<Track>>;
        async fn get_current_track(&self) -> BridgeResult<Option<u32>>;
        async fn get_duration(&self) -> BridgeResult<f64>;
        async fn get_buffered_position(&self) -> BridgeResult<f64>;
        async fn get_position(&self) -> BridgeResult<f64>;
        async fn get_state(&self) -> BridgeResult<State>;
    }
}

mock! {
    pub Registry {}

    impl HeadlessTaskRegistry for Registry {
        fn register_headless_task(&self, task_name: &str, factory: ServiceFactory) -> BridgeResult<()>;
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Facade over `native` with the direct event transport.
pub fn player_with(native: Arc<dyn NativePlayer>) -> TrackPlayer {
    TrackPlayer::new(
        PlayerConfig::builder()
            .native_player(native)
            .event_transport(EventTransportKind::Direct)
            .build()
            .expect("valid config"),
    )
}

/// Facade over `native` resolving bundled assets through `resolver`.
pub fn player_with_assets(
    native: Arc<dyn NativePlayer>,
    resolver: Arc<dyn AssetResolver>,
) -> TrackPlayer {
    TrackPlayer::new(
        PlayerConfig::builder()
            .native_player(native)
            .asset_resolver(resolver)
            .event_transport(EventTransportKind::Direct)
            .build()
            .expect("valid config"),
    )
}
