//! Ordered playlist mutation
//!
//! A `PlaylistOrder` is the in-memory track order of one loaded playlist.
//! Every mutation is written through to the gateway first and applied in
//! memory only once the write succeeded, so the order always equals the
//! last persisted order.

use beat_core::types::{Playlist, PlaylistId, TrackId, UserId};
use beat_core::{BeatError, PersistenceGateway, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Track order of a single playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistOrder {
    id: PlaylistId,
    owner_id: UserId,
    name: String,
    track_ids: Vec<TrackId>,
}

impl PlaylistOrder {
    pub fn id(&self) -> PlaylistId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Track ids in play order
    pub fn track_ids(&self) -> &[TrackId] {
        &self.track_ids
    }

    pub fn contains(&self, track_id: TrackId) -> bool {
        self.track_ids.contains(&track_id)
    }

    /// Number of tracks on the playlist
    pub fn count(&self) -> usize {
        self.track_ids.len()
    }

    /// Zero-based position of a track, or -1 when it is not on the playlist
    pub fn position_of(&self, track_id: TrackId) -> i64 {
        self.index_of(track_id)
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Sum of the durations of every track on the playlist
    ///
    /// Computed from the current order on each call; ids `duration_of`
    /// cannot resolve contribute nothing.
    pub fn total_duration(&self, duration_of: impl Fn(TrackId) -> Option<Duration>) -> Duration {
        self.track_ids
            .iter()
            .filter_map(|id| duration_of(*id))
            .sum()
    }

    /// Snapshot as a plain `Playlist` value
    pub fn to_playlist(&self) -> Playlist {
        Playlist {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            track_ids: self.track_ids.clone(),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a track at the end
    ///
    /// # Errors
    ///
    /// `DuplicateTrack` when the track is already present, or the gateway's
    /// error; the order is unchanged in both cases.
    pub fn append<G>(&mut self, gateway: &G, track_id: TrackId) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        if self.contains(track_id) {
            return Err(BeatError::DuplicateTrack {
                playlist: self.id,
                track: track_id,
            });
        }

        if let Err(e) = gateway.append_track_to_playlist(self.id, track_id) {
            warn!("Failed to add track {} to playlist {}: {}", track_id, self.id, e);
            return Err(e);
        }

        self.track_ids.push(track_id);
        debug!("Added track {} to playlist {}", track_id, self.id);
        Ok(())
    }

    /// Remove a track
    ///
    /// # Errors
    ///
    /// `NotFound` when the track is not on the playlist, or the gateway's
    /// error; the order is unchanged in both cases.
    pub fn remove_by_id<G>(&mut self, gateway: &G, track_id: TrackId) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        let index = self.require_index(track_id)?;

        if let Err(e) = gateway.remove_track_from_playlist(self.id, track_id) {
            warn!("Failed to remove track {} from playlist {}: {}", track_id, self.id, e);
            return Err(e);
        }

        self.track_ids.remove(index);
        debug!("Removed track {} from playlist {}", track_id, self.id);
        Ok(())
    }

    /// Exchange the tracks at two neighbouring positions
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless both indices are in range and differ by exactly
    /// one, or the gateway's error.
    pub fn swap_adjacent<G>(&mut self, gateway: &G, a: usize, b: usize) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        if a.abs_diff(b) != 1 {
            return Err(BeatError::invalid_input(format!(
                "positions {a} and {b} are not adjacent"
            )));
        }
        let (first, second) = match (self.track_ids.get(a), self.track_ids.get(b)) {
            (Some(first), Some(second)) => (*first, *second),
            _ => {
                return Err(BeatError::invalid_input(format!(
                    "positions {a} and {b} are out of range for {} tracks",
                    self.count()
                )))
            }
        };

        if let Err(e) = gateway.swap_adjacent_tracks(self.id, first, second) {
            warn!("Failed to reorder playlist {}: {}", self.id, e);
            return Err(e);
        }

        self.track_ids.swap(a, b);
        debug!("Swapped positions {} and {} on playlist {}", a, b, self.id);
        Ok(())
    }

    /// Move a track one position towards the start
    ///
    /// Does nothing when the track is already first.
    ///
    /// # Errors
    ///
    /// `NotFound` when the track is not on the playlist, or the gateway's
    /// error.
    pub fn move_up<G>(&mut self, gateway: &G, track_id: TrackId) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        match self.require_index(track_id)? {
            0 => Ok(()),
            index => self.swap_adjacent(gateway, index - 1, index),
        }
    }

    /// Move a track one position towards the end
    ///
    /// Does nothing when the track is already last.
    ///
    /// # Errors
    ///
    /// `NotFound` when the track is not on the playlist, or the gateway's
    /// error.
    pub fn move_down<G>(&mut self, gateway: &G, track_id: TrackId) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        let index = self.require_index(track_id)?;
        if index + 1 == self.count() {
            return Ok(());
        }
        self.swap_adjacent(gateway, index, index + 1)
    }

    /// Rename the playlist
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name, or the gateway's error.
    pub fn rename<G>(&mut self, gateway: &G, name: &str) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(BeatError::invalid_input("playlist name cannot be empty"));
        }

        let renamed = gateway.rename_playlist(self.id, name)?;
        self.name = renamed.name;
        Ok(())
    }

    /// Drop a track from memory after its deletion cascaded in storage
    ///
    /// Returns whether the track was on the playlist.
    pub fn forget_track(&mut self, track_id: TrackId) -> bool {
        let before = self.count();
        self.track_ids.retain(|id| *id != track_id);
        before != self.count()
    }

    fn index_of(&self, track_id: TrackId) -> Option<usize> {
        self.track_ids.iter().position(|id| *id == track_id)
    }

    fn require_index(&self, track_id: TrackId) -> Result<usize> {
        self.index_of(track_id)
            .ok_or_else(|| BeatError::not_found("Playlist track", track_id))
    }
}

impl From<Playlist> for PlaylistOrder {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id,
            owner_id: playlist.owner_id,
            name: playlist.name,
            track_ids: playlist.track_ids,
        }
    }
}
