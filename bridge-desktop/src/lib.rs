//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `AssetResolver` backed by a registry of files bundled with the app
//! - `HeadlessTaskRegistry` that starts playback services on Tokio
//!
//! The playback authority itself (`NativePlayer`) is supplied by the audio
//! engine adapter of the host application.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{BundledAssetRegistry, TokioHeadlessRegistry};
//! use core_runtime::config::PlayerConfig;
//! use std::sync::Arc;
//!
//! let assets = Arc::new(BundledAssetRegistry::for_app("my-player"));
//! let play_icon = assets.register("icons/play.png");
//!
//! let config = PlayerConfig::builder()
//!     .native_player(engine_adapter)
//!     .asset_resolver(assets)
//!     .headless_registry(Arc::new(TokioHeadlessRegistry::new()))
//!     .build()?;
//! ```

mod assets;
mod headless;

pub use assets::BundledAssetRegistry;
pub use headless::TokioHeadlessRegistry;
