//! In-memory `PersistenceGateway` for tests
//!
//! Mirrors the behavior of the SQLite backend (cascading deletes, duplicate
//! membership rejection, ids assigned from a shared counter) without a
//! database. Writes can be made to fail on demand to exercise the
//! persist-then-mutate paths of callers.

use crate::error::{BeatError, Result};
use crate::gateway::PersistenceGateway;
use crate::types::{
    CreateTrack, Playlist, PlaylistId, Track, TrackId, UpdateTrack, UserId, MAIN_GENRES,
};
use std::cell::{Cell, RefCell};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    tracks: Vec<Track>,
    playlists: Vec<Playlist>,
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn playlist_mut(&mut self, id: PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BeatError::not_found("Playlist", id))
    }
}

/// Gateway backed by plain vectors
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: RefCell<State>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `BeatError::Persistence`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Persisted order of a playlist, straight from the backing store
    pub fn stored_order(&self, id: PlaylistId) -> Option<Vec<TrackId>> {
        self.state
            .borrow()
            .playlists
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.track_ids.clone())
    }

    fn write<T>(&self, op: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        if self.fail_writes.get() {
            return Err(BeatError::persistence("write rejected by test gateway"));
        }
        let value = op(&mut self.state.borrow_mut())?;
        self.writes.set(self.writes.get() + 1);
        Ok(value)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn create_track(&self, owner: UserId, track: CreateTrack) -> Result<Track> {
        self.write(|state| {
            let created = Track {
                id: TrackId::new(state.allocate_id()),
                owner_id: owner,
                title: track.title,
                artist: track.artist,
                genre: track.genre,
                path: track.path,
                duration_seconds: track.duration_seconds,
            };
            state.tracks.push(created.clone());
            Ok(created)
        })
    }

    fn update_track(&self, id: TrackId, update: UpdateTrack) -> Result<Track> {
        self.write(|state| {
            let track = state
                .tracks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| BeatError::not_found("Track", id))?;
            track.apply(&update);
            Ok(track.clone())
        })
    }

    fn delete_track(&self, id: TrackId) -> Result<()> {
        self.write(|state| {
            let before = state.tracks.len();
            state.tracks.retain(|t| t.id != id);
            if state.tracks.len() == before {
                return Err(BeatError::not_found("Track", id));
            }
            for playlist in &mut state.playlists {
                playlist.track_ids.retain(|t| *t != id);
            }
            Ok(())
        })
    }

    fn list_tracks(&self, owner: UserId) -> Result<Vec<Track>> {
        Ok(self
            .state
            .borrow()
            .tracks
            .iter()
            .filter(|t| t.owner_id == owner)
            .cloned()
            .collect())
    }

    fn create_playlist(&self, owner: UserId, name: &str) -> Result<Playlist> {
        self.write(|state| {
            let playlist = Playlist::new(PlaylistId::new(state.allocate_id()), owner, name);
            state.playlists.push(playlist.clone());
            Ok(playlist)
        })
    }

    fn rename_playlist(&self, id: PlaylistId, name: &str) -> Result<Playlist> {
        self.write(|state| {
            let playlist = state.playlist_mut(id)?;
            playlist.name = name.to_string();
            Ok(playlist.clone())
        })
    }

    fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        self.write(|state| {
            let before = state.playlists.len();
            state.playlists.retain(|p| p.id != id);
            if state.playlists.len() == before {
                return Err(BeatError::not_found("Playlist", id));
            }
            Ok(())
        })
    }

    fn list_playlists(&self, owner: UserId) -> Result<Vec<Playlist>> {
        Ok(self
            .state
            .borrow()
            .playlists
            .iter()
            .filter(|p| p.owner_id == owner)
            .cloned()
            .collect())
    }

    fn append_track_to_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.write(|state| {
            if !state.tracks.iter().any(|t| t.id == track) {
                return Err(BeatError::not_found("Track", track));
            }
            let entry = state.playlist_mut(playlist)?;
            if entry.track_ids.contains(&track) {
                return Err(BeatError::DuplicateTrack { playlist, track });
            }
            entry.track_ids.push(track);
            Ok(())
        })
    }

    fn remove_track_from_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.write(|state| {
            let entry = state.playlist_mut(playlist)?;
            let index = entry
                .track_ids
                .iter()
                .position(|t| *t == track)
                .ok_or_else(|| BeatError::not_found("Playlist track", track))?;
            entry.track_ids.remove(index);
            Ok(())
        })
    }

    fn swap_adjacent_tracks(
        &self,
        playlist: PlaylistId,
        first: TrackId,
        second: TrackId,
    ) -> Result<()> {
        self.write(|state| {
            let entry = state.playlist_mut(playlist)?;
            let position = |id: TrackId| {
                entry
                    .track_ids
                    .iter()
                    .position(|t| *t == id)
                    .ok_or_else(|| BeatError::not_found("Playlist track", id))
            };
            let (a, b) = (position(first)?, position(second)?);
            entry.track_ids.swap(a, b);
            Ok(())
        })
    }

    fn list_genres(&self) -> Result<Vec<String>> {
        let mut genres: Vec<String> = MAIN_GENRES.iter().map(|g| (*g).to_string()).collect();
        genres.sort();
        Ok(genres)
    }
}
