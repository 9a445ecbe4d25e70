//! Core types for playback sequencing

use beat_core::types::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the next track is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// The whole library, in library order
    #[default]
    Library,

    /// The active playlist, in playlist order
    Playlist,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The track that is now current
    Track(Track),

    /// The source is empty; the caller should show "nothing to play"
    NothingToPlay,

    /// The request arrived inside the debounce interval and was dropped
    Ignored,
}

impl Step {
    /// The selected track, if any
    pub fn track(&self) -> Option<&Track> {
        match self {
            Step::Track(track) => Some(track),
            Step::NothingToPlay | Step::Ignored => None,
        }
    }

    /// Whether the request was dropped by the debounce guard
    pub fn is_ignored(&self) -> bool {
        matches!(self, Step::Ignored)
    }
}

/// Configuration for the playback queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Minimum interval between accepted next/previous requests (default: 200)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum shuffle history size (default: 50)
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Start the session with shuffle enabled (default: false)
    #[serde(default)]
    pub shuffle: bool,
}

impl PlaybackConfig {
    /// Debounce interval as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_history_size() -> usize {
    50
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            history_size: default_history_size(),
            shuffle: false,
        }
    }
}
