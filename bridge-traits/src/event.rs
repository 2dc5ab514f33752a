//! Events emitted by the native player.
//!
//! Every event is keyed by a kebab-case name (`playback-state`,
//! `remote-play`, ...) and carries a fixed payload shape for that name. The
//! serialized form is `{"type": "<name>", ...payload}` with camelCase payload
//! keys, matching what native modules hand over.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;
use crate::player::{Rating, State};

/// Name of an event, used to register listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    PlaybackState,
    PlaybackError,
    PlaybackQueueEnded,
    PlaybackTrackChanged,
    PlaybackMetadataReceived,
    RemotePlay,
    RemotePlayId,
    RemotePlaySearch,
    RemotePause,
    RemoteStop,
    RemoteSkip,
    RemoteNext,
    RemotePrevious,
    RemoteJumpForward,
    RemoteJumpBackward,
    RemoteSeek,
    RemoteSetRating,
    RemoteDuck,
    RemoteLike,
    RemoteDislike,
    RemoteBookmark,
}

impl EventKind {
    pub const ALL: [EventKind; 21] = [
        EventKind::PlaybackState,
        EventKind::PlaybackError,
        EventKind::PlaybackQueueEnded,
        EventKind::PlaybackTrackChanged,
        EventKind::PlaybackMetadataReceived,
        EventKind::RemotePlay,
        EventKind::RemotePlayId,
        EventKind::RemotePlaySearch,
        EventKind::RemotePause,
        EventKind::RemoteStop,
        EventKind::RemoteSkip,
        EventKind::RemoteNext,
        EventKind::RemotePrevious,
        EventKind::RemoteJumpForward,
        EventKind::RemoteJumpBackward,
        EventKind::RemoteSeek,
        EventKind::RemoteSetRating,
        EventKind::RemoteDuck,
        EventKind::RemoteLike,
        EventKind::RemoteDislike,
        EventKind::RemoteBookmark,
    ];

    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PlaybackState => "playback-state",
            EventKind::PlaybackError => "playback-error",
            EventKind::PlaybackQueueEnded => "playback-queue-ended",
            EventKind::PlaybackTrackChanged => "playback-track-changed",
            EventKind::PlaybackMetadataReceived => "playback-metadata-received",
            EventKind::RemotePlay => "remote-play",
            EventKind::RemotePlayId => "remote-play-id",
            EventKind::RemotePlaySearch => "remote-play-search",
            EventKind::RemotePause => "remote-pause",
            EventKind::RemoteStop => "remote-stop",
            EventKind::RemoteSkip => "remote-skip",
            EventKind::RemoteNext => "remote-next",
            EventKind::RemotePrevious => "remote-previous",
            EventKind::RemoteJumpForward => "remote-jump-forward",
            EventKind::RemoteJumpBackward => "remote-jump-backward",
            EventKind::RemoteSeek => "remote-seek",
            EventKind::RemoteSetRating => "remote-set-rating",
            EventKind::RemoteDuck => "remote-duck",
            EventKind::RemoteLike => "remote-like",
            EventKind::RemoteDislike => "remote-dislike",
            EventKind::RemoteBookmark => "remote-bookmark",
        }
    }

    /// `true` for events that originate from a remote control (lock screen,
    /// headset, car, watch) rather than from the player itself.
    pub fn is_remote(&self) -> bool {
        self.as_str().starts_with("remote-")
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BridgeError::InvalidReply(format!("unknown event '{}'", s)))
    }
}

/// Timed metadata parsed from a live stream (ICY, ID3, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamMetadata {
    /// Metadata container the values came from, e.g. `icy` or `id3`.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// Voice search request from a remote control.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<String>,
}

/// Event emitted by the native player.
///
/// Positions and intervals are seconds; track references are queue indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum PlayerEvent {
    PlaybackState {
        state: State,
    },
    PlaybackError {
        code: String,
        message: String,
    },
    PlaybackQueueEnded {
        track: Option<u32>,
        position: f64,
    },
    PlaybackTrackChanged {
        track: Option<u32>,
        position: f64,
        next_track: Option<u32>,
    },
    PlaybackMetadataReceived(StreamMetadata),
    RemotePlay,
    RemotePlayId {
        id: String,
    },
    RemotePlaySearch(SearchQuery),
    RemotePause,
    RemoteStop,
    RemoteSkip {
        index: u32,
    },
    RemoteNext,
    RemotePrevious,
    RemoteJumpForward {
        interval: f64,
    },
    RemoteJumpBackward {
        interval: f64,
    },
    RemoteSeek {
        position: f64,
    },
    RemoteSetRating {
        rating: Rating,
    },
    RemoteDuck {
        paused: bool,
        permanent: bool,
    },
    RemoteLike,
    RemoteDislike,
    RemoteBookmark,
}

impl PlayerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PlayerEvent::PlaybackState { .. } => EventKind::PlaybackState,
            PlayerEvent::PlaybackError { .. } => EventKind::PlaybackError,
            PlayerEvent::PlaybackQueueEnded { .. } => EventKind::PlaybackQueueEnded,
            PlayerEvent::PlaybackTrackChanged { .. } => EventKind::PlaybackTrackChanged,
            PlayerEvent::PlaybackMetadataReceived(_) => EventKind::PlaybackMetadataReceived,
            PlayerEvent::RemotePlay => EventKind::RemotePlay,
            PlayerEvent::RemotePlayId { .. } => EventKind::RemotePlayId,
            PlayerEvent::RemotePlaySearch(_) => EventKind::RemotePlaySearch,
            PlayerEvent::RemotePause => EventKind::RemotePause,
            PlayerEvent::RemoteStop => EventKind::RemoteStop,
            PlayerEvent::RemoteSkip { .. } => EventKind::RemoteSkip,
            PlayerEvent::RemoteNext => EventKind::RemoteNext,
            PlayerEvent::RemotePrevious => EventKind::RemotePrevious,
            PlayerEvent::RemoteJumpForward { .. } => EventKind::RemoteJumpForward,
            PlayerEvent::RemoteJumpBackward { .. } => EventKind::RemoteJumpBackward,
            PlayerEvent::RemoteSeek { .. } => EventKind::RemoteSeek,
            PlayerEvent::RemoteSetRating { .. } => EventKind::RemoteSetRating,
            PlayerEvent::RemoteDuck { .. } => EventKind::RemoteDuck,
            PlayerEvent::RemoteLike => EventKind::RemoteLike,
            PlayerEvent::RemoteDislike => EventKind::RemoteDislike,
            PlayerEvent::RemoteBookmark => EventKind::RemoteBookmark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_match_serde_names() {
        for kind in EventKind::ALL {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value, json!(kind.as_str()));
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("playback-exploded".parse::<EventKind>().is_err());
    }

    #[test]
    fn event_wire_format() {
        let event = PlayerEvent::PlaybackTrackChanged {
            track: Some(0),
            position: 12.5,
            next_track: Some(1),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"type": "playback-track-changed", "track": 0, "position": 12.5, "nextTrack": 1})
        );
        assert_eq!(event.kind(), EventKind::PlaybackTrackChanged);

        let parsed: PlayerEvent =
            serde_json::from_value(json!({"type": "playback-state", "state": "buffering"}))
                .unwrap();
        assert_eq!(
            parsed,
            PlayerEvent::PlaybackState {
                state: State::Buffering
            }
        );

        let parsed: PlayerEvent = serde_json::from_value(json!({"type": "remote-play"})).unwrap();
        assert_eq!(parsed.kind(), EventKind::RemotePlay);
    }

    #[test]
    fn metadata_payload_is_flattened() {
        let parsed: PlayerEvent = serde_json::from_value(json!({
            "type": "playback-metadata-received",
            "source": "icy",
            "title": "Live Set"
        }))
        .unwrap();
        match parsed {
            PlayerEvent::PlaybackMetadataReceived(meta) => {
                assert_eq!(meta.source, "icy");
                assert_eq!(meta.title.as_deref(), Some("Live Set"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn remote_classification() {
        assert!(EventKind::RemoteDuck.is_remote());
        assert!(!EventKind::PlaybackQueueEnded.is_remote());
    }
}
