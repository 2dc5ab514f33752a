//! # Track Player
//!
//! Async facade over a platform playback engine.
//!
//! ## Overview
//!
//! - [`TrackPlayer`]: queue mutation, transport controls, metadata and
//!   getters, each forwarded as one command to the native player
//! - asset resolution of every locator before it crosses the boundary
//! - event listeners backed by the runtime event bus
//! - playback service registration, headless or in-process
//!
//! Types from the boundary contract are re-exported so applications only
//! need this crate.

pub mod error;
pub mod input;
pub mod player;
pub mod progress;
pub mod resolve;
mod service;

pub use error::{PlayerError, Result};
pub use input::{IndexList, TrackList};
pub use player::TrackPlayer;
pub use progress::Progress;

pub use bridge_traits::{
    AssetId, AssetResolver, AssetSource, BridgeError, Capability, EventKind, HeadlessTaskRegistry,
    MetadataOptions, NativePlayer, NowPlayingMetadata, PitchAlgorithm, PlayerEvent, PlayerOptions,
    Rating, RatingType, RepeatMode, SearchQuery, State, StreamMetadata, Track, TrackMetadataUpdate,
    TrackType,
};
pub use core_runtime::config::{PlayerConfig, PlayerConfigBuilder};
pub use core_runtime::events::{EventBus, EventEmitter, EventTransportKind, Subscription};
