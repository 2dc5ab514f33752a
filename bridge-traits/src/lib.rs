//! # Host Bridge Traits
//!
//! The contract between the track player core and the native playback
//! authority that each host platform ships.
//!
//! ## Overview
//!
//! The native side decodes audio, owns the queue, drives the media session and
//! emits events. The core never holds playback state; it marshals commands
//! through [`NativePlayer`](player::NativePlayer) and redistributes
//! [`PlayerEvent`](event::PlayerEvent)s to application listeners.
//!
//! ## Traits
//!
//! ### Playback
//! - [`NativePlayer`](player::NativePlayer) - Command surface of the native player
//!
//! ### Platform Integration
//! - [`AssetResolver`](asset::AssetResolver) - Packaged asset handle to URI lookup
//! - [`HeadlessTaskRegistry`](headless::HeadlessTaskRegistry) - Background service registration
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Asset resolver, headless registry |
//! | iOS      | Host app            | 📋 Injected at startup |
//! | Android  | Host app            | 📋 Injected at startup |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Native adapters
//! should convert platform errors into it and keep the platform's error code in
//! [`BridgeError::Rejected`](error::BridgeError::Rejected) so callers can act on it.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`; the core shares them across tasks
//! behind `Arc`.
//!
//! ## Examples
//!
//! ### Implementing NativePlayer
//!
//! ```ignore
//! use bridge_traits::error::Result;
//! use bridge_traits::player::{NativePlayer, PlayerOptions};
//! use async_trait::async_trait;
//!
//! pub struct ExoPlayerModule { /* JNI handles */ }
//!
//! #[async_trait]
//! impl NativePlayer for ExoPlayerModule {
//!     async fn setup_player(&self, options: PlayerOptions) -> Result<()> {
//!         // Forward to the platform player
//!         todo!()
//!     }
//!     // ...
//! }
//! ```

pub mod asset;
pub mod error;
pub mod event;
pub mod headless;
pub mod logging;
pub mod player;

pub use error::BridgeError;

// Re-export commonly used types
pub use asset::{AssetId, AssetResolver, AssetSource, NoopAssetResolver};
pub use event::{EventKind, PlayerEvent, SearchQuery, StreamMetadata};
pub use headless::{HeadlessTaskRegistry, ServiceFactory, ServiceFuture};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use player::{
    Capability, MetadataOptions, NativePlayer, NowPlayingMetadata, PitchAlgorithm, PlayerOptions,
    Rating, RatingType, RepeatMode, State, Track, TrackMetadataUpdate, TrackType,
};
