//! Session context
//!
//! A `Session` bundles everything one front end works with: the gateway,
//! the owner, the loaded library and the playback queue. Operations that
//! touch both the library and the queue (deleting the playing track,
//! deleting the active playlist) keep them consistent here.

use crate::events::QueueEvent;
use crate::library::Library;
use crate::playlist_order::PlaylistOrder;
use crate::queue::PlaybackQueue;
use crate::types::{PlaybackConfig, PlaybackMode, Step};
use beat_core::types::{CreateTrack, PlaylistId, Track, TrackId, UpdateTrack, UserId};
use beat_core::{PersistenceGateway, Result};
use std::time::Instant;

/// One user's library and playback state
#[derive(Debug)]
pub struct Session<G: PersistenceGateway> {
    gateway: G,
    library: Library,
    queue: PlaybackQueue,
}

impl<G: PersistenceGateway> Session<G> {
    /// Load `owner`'s library through `gateway` and start an idle queue
    pub fn open(gateway: G, owner: UserId, config: &PlaybackConfig) -> Result<Self> {
        let library = Library::load(&gateway, owner)?;
        Ok(Self {
            gateway,
            library,
            queue: PlaybackQueue::new(config),
        })
    }

    /// Same as `open` with a caller-supplied queue (seeded in tests)
    pub fn with_queue(gateway: G, owner: UserId, queue: PlaybackQueue) -> Result<Self> {
        let library = Library::load(&gateway, owner)?;
        Ok(Self {
            gateway,
            library,
            queue,
        })
    }

    pub fn owner(&self) -> UserId {
        self.library.owner()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    /// Currently selected track, resolved through the library
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current().and_then(|id| self.library.track(id))
    }

    /// Genre names offered for tagging
    pub fn genres(&self) -> Result<Vec<String>> {
        self.gateway.list_genres()
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn advance(&mut self) -> Step {
        self.queue.advance(&self.library)
    }

    pub fn advance_at(&mut self, now: Instant) -> Step {
        self.queue.advance_at(&self.library, now)
    }

    pub fn retreat(&mut self) -> Step {
        self.queue.retreat(&self.library)
    }

    pub fn retreat_at(&mut self, now: Instant) -> Step {
        self.queue.retreat_at(&self.library, now)
    }

    pub fn select_initial(&mut self) -> Step {
        self.queue.select_initial(&self.library)
    }

    pub fn play_track(
        &mut self,
        track: TrackId,
        mode: PlaybackMode,
        playlist: Option<PlaylistId>,
    ) -> Result<Track> {
        self.queue.play_track(&self.library, track, mode, playlist)
    }

    pub fn set_mode(&mut self, mode: PlaybackMode, playlist: Option<PlaylistId>) {
        self.queue.set_mode(mode, playlist);
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.queue.toggle_shuffle()
    }

    pub fn drain_events(&mut self) -> Vec<QueueEvent> {
        self.queue.drain_events()
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    pub fn create_track(&mut self, track: CreateTrack) -> Result<&Track> {
        self.library.create_track(&self.gateway, track)
    }

    pub fn update_track(&mut self, id: TrackId, update: UpdateTrack) -> Result<&Track> {
        self.library.update_track(&self.gateway, id, update)
    }

    /// Delete a track everywhere, including the queue's current selection
    /// and shuffle history
    pub fn delete_track(&mut self, id: TrackId) -> Result<Track> {
        let removed = self.library.delete_track(&self.gateway, id)?;
        self.queue.forget_track(id);
        Ok(removed)
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    pub fn create_playlist(&mut self, name: &str) -> Result<&PlaylistOrder> {
        self.library.create_playlist(&self.gateway, name)
    }

    pub fn rename_playlist(&mut self, id: PlaylistId, name: &str) -> Result<()> {
        self.library.rename_playlist(&self.gateway, id, name)
    }

    /// Delete a playlist; playback falls back to the library if it was active
    pub fn delete_playlist(&mut self, id: PlaylistId) -> Result<()> {
        self.library.delete_playlist(&self.gateway, id)?;
        self.queue.forget_playlist(id);
        Ok(())
    }

    pub fn add_to_playlist(&mut self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.library.add_to_playlist(&self.gateway, playlist, track)
    }

    pub fn remove_from_playlist(&mut self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.library
            .remove_from_playlist(&self.gateway, playlist, track)
    }

    pub fn swap_adjacent(&mut self, playlist: PlaylistId, a: usize, b: usize) -> Result<()> {
        self.library
            .require_playlist_mut(playlist)?
            .swap_adjacent(&self.gateway, a, b)
    }

    pub fn move_up(&mut self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.library
            .require_playlist_mut(playlist)?
            .move_up(&self.gateway, track)
    }

    pub fn move_down(&mut self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.library
            .require_playlist_mut(playlist)?
            .move_down(&self.gateway, track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beat_core::test_utils::MemoryGateway;
    use std::path::PathBuf;

    fn session() -> Session<MemoryGateway> {
        let mut session = Session::with_queue(
            MemoryGateway::new(),
            UserId::new(1),
            PlaybackQueue::with_seed(&PlaybackConfig::default(), 5),
        )
        .unwrap();
        for title in ["A", "B"] {
            session
                .create_track(CreateTrack {
                    title: title.to_string(),
                    artist: "Artist".to_string(),
                    genre: "Blues".to_string(),
                    path: PathBuf::from(format!("/music/{title}.mp3")),
                    duration_seconds: 90,
                })
                .unwrap();
        }
        session
    }

    #[test]
    fn deleting_current_track_clears_selection() {
        let mut session = session();
        session.select_initial();
        let current = session.current_track().unwrap().id;

        session.delete_track(current).unwrap();

        assert!(session.current_track().is_none());
        assert_eq!(session.library().track_count(), 1);
    }

    #[test]
    fn deleting_active_playlist_falls_back_to_library() {
        let mut session = session();
        let playlist = session.create_playlist("Mix").unwrap().id();
        let first = session.library().track_ids()[0];
        session.add_to_playlist(playlist, first).unwrap();
        session
            .play_track(first, PlaybackMode::Playlist, Some(playlist))
            .unwrap();

        session.delete_playlist(playlist).unwrap();

        assert_eq!(session.queue().mode(), PlaybackMode::Library);
        assert_eq!(session.queue().active_playlist(), None);
    }

    #[test]
    fn genres_come_from_gateway() {
        let session = session();
        assert_eq!(session.genres().unwrap().len(), 5);
    }
}
