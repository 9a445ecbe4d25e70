//! Persistence contract consumed by the playback and playlist engine
//!
//! Calls are synchronous and blocking from the caller's point of view. An
//! implementation reports failure with `BeatError::Persistence` (or
//! `BeatError::NotFound` when a referenced row is missing) and performs no
//! retry of its own.

use crate::error::Result;
use crate::types::{CreateTrack, Playlist, PlaylistId, Track, TrackId, UpdateTrack, UserId};

/// Durable storage for tracks, playlists and playlist membership
pub trait PersistenceGateway {
    // ========================================================================
    // Tracks
    // ========================================================================

    /// Create a track owned by `owner`
    fn create_track(&self, owner: UserId, track: CreateTrack) -> Result<Track>;

    /// Rewrite title, artist and genre of a track
    fn update_track(&self, id: TrackId, update: UpdateTrack) -> Result<Track>;

    /// Delete a track and every playlist membership referencing it
    fn delete_track(&self, id: TrackId) -> Result<()>;

    /// All tracks owned by `owner`, in library order
    fn list_tracks(&self, owner: UserId) -> Result<Vec<Track>>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create an empty playlist
    fn create_playlist(&self, owner: UserId, name: &str) -> Result<Playlist>;

    /// Rename a playlist
    fn rename_playlist(&self, id: PlaylistId, name: &str) -> Result<Playlist>;

    /// Delete a playlist and its membership rows
    fn delete_playlist(&self, id: PlaylistId) -> Result<()>;

    /// All playlists owned by `owner`, each with its track order resolved
    fn list_playlists(&self, owner: UserId) -> Result<Vec<Playlist>>;

    // ========================================================================
    // Playlist membership
    // ========================================================================

    /// Append a track at the end of a playlist
    fn append_track_to_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()>;

    /// Remove a track from a playlist, closing the gap in positions
    fn remove_track_from_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()>;

    /// Exchange the positions of two tracks on a playlist
    fn swap_adjacent_tracks(
        &self,
        playlist: PlaylistId,
        first: TrackId,
        second: TrackId,
    ) -> Result<()>;

    // ========================================================================
    // Genres
    // ========================================================================

    /// Known genre names
    fn list_genres(&self) -> Result<Vec<String>>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn create_track(&self, owner: UserId, track: CreateTrack) -> Result<Track> {
        (**self).create_track(owner, track)
    }

    fn update_track(&self, id: TrackId, update: UpdateTrack) -> Result<Track> {
        (**self).update_track(id, update)
    }

    fn delete_track(&self, id: TrackId) -> Result<()> {
        (**self).delete_track(id)
    }

    fn list_tracks(&self, owner: UserId) -> Result<Vec<Track>> {
        (**self).list_tracks(owner)
    }

    fn create_playlist(&self, owner: UserId, name: &str) -> Result<Playlist> {
        (**self).create_playlist(owner, name)
    }

    fn rename_playlist(&self, id: PlaylistId, name: &str) -> Result<Playlist> {
        (**self).rename_playlist(id, name)
    }

    fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        (**self).delete_playlist(id)
    }

    fn list_playlists(&self, owner: UserId) -> Result<Vec<Playlist>> {
        (**self).list_playlists(owner)
    }

    fn append_track_to_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        (**self).append_track_to_playlist(playlist, track)
    }

    fn remove_track_from_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        (**self).remove_track_from_playlist(playlist, track)
    }

    fn swap_adjacent_tracks(
        &self,
        playlist: PlaylistId,
        first: TrackId,
        second: TrackId,
    ) -> Result<()> {
        (**self).swap_adjacent_tracks(playlist, first, second)
    }

    fn list_genres(&self) -> Result<Vec<String>> {
        (**self).list_genres()
    }
}
