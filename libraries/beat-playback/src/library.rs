//! Library state
//!
//! The `Library` is the one place track metadata lives. Tracks are kept in a
//! catalog keyed by id next to the library order; every loaded playlist holds
//! ids only and resolves them here, so an edit shows up in every playlist at
//! once.

use crate::playlist_order::PlaylistOrder;
use crate::types::PlaybackMode;
use beat_core::search::{filter_tracks, starts_with_ignore_case};
use beat_core::types::{CreateTrack, PlaylistId, Track, TrackId, UpdateTrack, UserId};
use beat_core::{BeatError, PersistenceGateway, Result};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Tracks and playlists of one owner
#[derive(Debug, Clone)]
pub struct Library {
    owner: UserId,
    catalog: HashMap<TrackId, Track>,
    order: Vec<TrackId>,
    playlists: Vec<PlaylistOrder>,
}

impl Library {
    /// Empty library for `owner`
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            catalog: HashMap::new(),
            order: Vec::new(),
            playlists: Vec::new(),
        }
    }

    /// Load every track and playlist of `owner`
    ///
    /// Playlist entries referencing tracks outside the owner's library are
    /// dropped from the in-memory order.
    pub fn load<G>(gateway: &G, owner: UserId) -> Result<Self>
    where
        G: PersistenceGateway + ?Sized,
    {
        let mut library = Self::new(owner);

        for track in gateway.list_tracks(owner)? {
            library.order.push(track.id);
            library.catalog.insert(track.id, track);
        }

        for mut playlist in gateway.list_playlists(owner)? {
            playlist
                .track_ids
                .retain(|id| library.catalog.contains_key(id));
            library.playlists.push(PlaylistOrder::from(playlist));
        }

        info!(
            "Loaded library for user {}: {} tracks, {} playlists",
            owner,
            library.order.len(),
            library.playlists.len()
        );
        Ok(library)
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.catalog.get(&id)
    }

    /// Tracks in library order
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.order.iter().filter_map(|id| self.catalog.get(id))
    }

    /// Track ids in library order
    pub fn track_ids(&self) -> &[TrackId] {
        &self.order
    }

    pub fn track_count(&self) -> usize {
        self.order.len()
    }

    pub fn playlists(&self) -> &[PlaylistOrder] {
        &self.playlists
    }

    pub fn playlist(&self, id: PlaylistId) -> Option<&PlaylistOrder> {
        self.playlists.iter().find(|p| p.id() == id)
    }

    pub fn playlist_mut(&mut self, id: PlaylistId) -> Option<&mut PlaylistOrder> {
        self.playlists.iter_mut().find(|p| p.id() == id)
    }

    /// Tracks of a playlist, resolved through the catalog
    pub fn playlist_tracks(&self, id: PlaylistId) -> Option<Vec<&Track>> {
        self.playlist(id)
            .map(|p| p.track_ids().iter().filter_map(|t| self.track(*t)).collect())
    }

    /// Ordered ids the queue draws from in `mode`
    ///
    /// Playlist mode without a loaded active playlist is an empty source.
    pub fn source(&self, mode: PlaybackMode, active: Option<PlaylistId>) -> &[TrackId] {
        match mode {
            PlaybackMode::Library => &self.order,
            PlaybackMode::Playlist => active
                .and_then(|id| self.playlist(id))
                .map_or(&[][..], PlaylistOrder::track_ids),
        }
    }

    pub fn duration_of(&self, id: TrackId) -> Option<Duration> {
        self.track(id).map(Track::duration)
    }

    /// Combined duration of every track in the library
    pub fn total_duration(&self) -> Duration {
        self.tracks().map(Track::duration).sum()
    }

    /// Combined duration of a playlist
    pub fn playlist_duration(&self, id: PlaylistId) -> Option<Duration> {
        self.playlist(id)
            .map(|p| p.total_duration(|track| self.duration_of(track)))
    }

    /// Tracks whose title or artist starts with `prefix`, in library order
    pub fn filter_tracks(&self, prefix: &str) -> Vec<&Track> {
        filter_tracks(self.tracks(), prefix)
    }

    /// Playlists whose name starts with `prefix`
    pub fn filter_playlists(&self, prefix: &str) -> Vec<&PlaylistOrder> {
        self.playlists
            .iter()
            .filter(|p| starts_with_ignore_case(p.name(), prefix))
            .collect()
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Create a track and append it to the library order
    pub fn create_track<G>(&mut self, gateway: &G, track: CreateTrack) -> Result<&Track>
    where
        G: PersistenceGateway + ?Sized,
    {
        if track.title.trim().is_empty() {
            return Err(BeatError::invalid_input("track title cannot be empty"));
        }

        let created = gateway.create_track(self.owner, track)?;
        let id = created.id;
        debug!("Created track {} '{}'", id, created.title);

        self.order.push(id);
        Ok(&*self.catalog.entry(id).or_insert(created))
    }

    /// Rewrite title, artist and genre of a track
    pub fn update_track<G>(
        &mut self,
        gateway: &G,
        id: TrackId,
        update: UpdateTrack,
    ) -> Result<&Track>
    where
        G: PersistenceGateway + ?Sized,
    {
        if !self.catalog.contains_key(&id) {
            return Err(BeatError::not_found("Track", id));
        }
        if update.title.trim().is_empty() {
            return Err(BeatError::invalid_input("track title cannot be empty"));
        }

        let stored = gateway.update_track(id, update)?;
        let track = self
            .catalog
            .get_mut(&id)
            .ok_or_else(|| BeatError::not_found("Track", id))?;
        track.title = stored.title;
        track.artist = stored.artist;
        track.genre = stored.genre;
        debug!("Updated track {}", id);
        Ok(&*track)
    }

    /// Delete a track from the library and from every loaded playlist
    pub fn delete_track<G>(&mut self, gateway: &G, id: TrackId) -> Result<Track>
    where
        G: PersistenceGateway + ?Sized,
    {
        if !self.catalog.contains_key(&id) {
            return Err(BeatError::not_found("Track", id));
        }

        gateway.delete_track(id)?;

        self.order.retain(|t| *t != id);
        for playlist in &mut self.playlists {
            playlist.forget_track(id);
        }
        let removed = self
            .catalog
            .remove(&id)
            .ok_or_else(|| BeatError::not_found("Track", id))?;
        debug!("Deleted track {}", id);
        Ok(removed)
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create an empty playlist
    pub fn create_playlist<G>(&mut self, gateway: &G, name: &str) -> Result<&PlaylistOrder>
    where
        G: PersistenceGateway + ?Sized,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(BeatError::invalid_input("playlist name cannot be empty"));
        }

        let playlist = gateway.create_playlist(self.owner, name)?;
        debug!("Created playlist {} '{}'", playlist.id, playlist.name);

        self.playlists.push(PlaylistOrder::from(playlist));
        let index = self.playlists.len() - 1;
        Ok(&self.playlists[index])
    }

    pub fn rename_playlist<G>(&mut self, gateway: &G, id: PlaylistId, name: &str) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        self.require_playlist_mut(id)?.rename(gateway, name)
    }

    /// Delete a playlist; its tracks stay in the library
    pub fn delete_playlist<G>(&mut self, gateway: &G, id: PlaylistId) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        if self.playlist(id).is_none() {
            return Err(BeatError::not_found("Playlist", id));
        }

        gateway.delete_playlist(id)?;
        self.playlists.retain(|p| p.id() != id);
        debug!("Deleted playlist {}", id);
        Ok(())
    }

    /// Append a library track to a playlist
    pub fn add_to_playlist<G>(
        &mut self,
        gateway: &G,
        playlist: PlaylistId,
        track: TrackId,
    ) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        if !self.catalog.contains_key(&track) {
            return Err(BeatError::not_found("Track", track));
        }
        self.require_playlist_mut(playlist)?.append(gateway, track)
    }

    pub fn remove_from_playlist<G>(
        &mut self,
        gateway: &G,
        playlist: PlaylistId,
        track: TrackId,
    ) -> Result<()>
    where
        G: PersistenceGateway + ?Sized,
    {
        self.require_playlist_mut(playlist)?
            .remove_by_id(gateway, track)
    }

    /// Loaded playlist by id, or `NotFound`
    pub fn require_playlist_mut(&mut self, id: PlaylistId) -> Result<&mut PlaylistOrder> {
        self.playlist_mut(id)
            .ok_or_else(|| BeatError::not_found("Playlist", id))
    }
}
