//! # Player Error Types
//!
//! Every facade operation fails with the category of the command that was
//! issued. The native error is kept untouched as the source.

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors returned by [`TrackPlayer`](crate::TrackPlayer) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// `setup_player` was refused by the native player.
    #[error("Player initialization failed: {0}")]
    Initialization(#[source] BridgeError),

    /// A queue mutation (`add`, `remove`, `remove_upcoming_tracks`) failed.
    #[error("Queue operation failed: {0}")]
    Queue(#[source] BridgeError),

    /// A skip command failed, e.g. the target index is out of range.
    #[error("Skip failed: {0}")]
    Skip(#[source] BridgeError),

    /// Any other command or getter failed.
    #[error("Player command failed: {0}")]
    Command(#[source] BridgeError),

    #[error("Playback service registration failed: {0}")]
    ServiceRegistration(#[source] BridgeError),

    /// Runtime infrastructure refused the request (e.g. no async runtime for
    /// the broadcast event transport).
    #[error(transparent)]
    Runtime(#[from] core_runtime::Error),
}

impl PlayerError {
    /// The native error carried by this failure, if it came from the bridge.
    pub fn bridge_error(&self) -> Option<&BridgeError> {
        match self {
            PlayerError::Initialization(err)
            | PlayerError::Queue(err)
            | PlayerError::Skip(err)
            | PlayerError::Command(err)
            | PlayerError::ServiceRegistration(err) => Some(err),
            PlayerError::Runtime(_) => None,
        }
    }

    /// Authority-defined error code, when the native side supplied one.
    pub fn code(&self) -> Option<&str> {
        self.bridge_error().and_then(BridgeError::code)
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
