//! Queue events
//!
//! The queue records what changed as it happens; front ends drain the
//! buffered events after each call and refresh whatever they display.

use crate::types::PlaybackMode;
use beat_core::types::{PlaylistId, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueEvent {
    /// Current track changed
    TrackChanged {
        /// ID of the new current track (`None` when the source ran empty)
        track_id: Option<TrackId>,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Source context changed
    ModeChanged {
        mode: PlaybackMode,
        /// Active playlist, present in playlist mode only
        playlist_id: Option<PlaylistId>,
    },

    /// Shuffle was switched on or off
    ShuffleChanged { enabled: bool },

    /// Shuffle history was emptied
    HistoryCleared,
}
