use crate::error::Result;
use crate::player::TrackPlayer;
use serde::{Deserialize, Serialize};

/// Playback progress of the current track, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub position: f64,
    pub duration: f64,
    pub buffered: f64,
}

impl Progress {
    /// Fraction of the track already played, `0.0` when the duration is unknown.
    pub fn fraction_played(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl TrackPlayer {
    /// Position, duration and buffered position, fetched concurrently.
    pub async fn get_progress(&self) -> Result<Progress> {
        let (position, duration, buffered) = futures::try_join!(
            self.get_position(),
            self.get_duration(),
            self.get_buffered_position()
        )?;

        Ok(Progress {
            position,
            duration,
            buffered,
        })
    }
}
