//! Shuffle history
//!
//! Bounded stack of the tracks visited by forward movement while shuffle is
//! on, consumed by "previous" to walk back along the random path.

use beat_core::types::TrackId;
use std::collections::VecDeque;

/// Shuffle history with bounded size
///
/// Most recent entry is at the back. When full, the oldest entry is
/// discarded on push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleHistory {
    entries: VecDeque<TrackId>,
    max_size: usize,
}

impl ShuffleHistory {
    /// Create an empty history holding at most `max_size` entries
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a track that was left by forward movement
    pub fn push(&mut self, track: TrackId) {
        if self.max_size == 0 {
            return;
        }
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(track);
    }

    /// Remove and return the most recent entry
    pub fn pop(&mut self) -> Option<TrackId> {
        self.entries.pop_back()
    }

    /// Drop every entry for which `keep` returns false
    pub fn retain(&mut self, mut keep: impl FnMut(TrackId) -> bool) {
        self.entries.retain(|id| keep(*id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ShuffleHistory {
    fn default() -> Self {
        Self::new(50)
    }
}
