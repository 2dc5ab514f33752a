//! Workspace entry crate.
//!
//! Re-exports the track player facade so host applications can depend on a
//! single crate. The `desktop` feature (default) adds the desktop bridge
//! implementations.
//!
//! ```ignore
//! use track_player_workspace::{PlayerConfig, Track, TrackPlayer};
//!
//! let player = TrackPlayer::new(PlayerConfig::builder().native_player(engine).build()?);
//! player.add(Track::new("https://example.com/a.mp3"), None).await?;
//! ```

pub use core_player::*;

#[cfg(feature = "desktop")]
pub use bridge_desktop as desktop;
