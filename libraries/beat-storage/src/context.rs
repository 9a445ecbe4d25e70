use crate::{create_pool, genres, playlists, run_migrations, tracks, users, StorageError};
use beat_core::types::{CreateTrack, Playlist, PlaylistId, Track, TrackId, UpdateTrack, UserId};
use beat_core::{PersistenceGateway, Result};
use sqlx::SqlitePool;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

/// Local storage context using `SQLite`
///
/// Owns a current-thread tokio runtime and blocks on it for every call, so
/// it must not be used from inside another async runtime.
pub struct LocalStorageContext {
    runtime: Runtime,
    pool: SqlitePool,
}

impl LocalStorageContext {
    /// Connect to `database_url` and bring the schema up to date
    pub fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let pool = runtime.block_on(async {
            let pool = create_pool(database_url).await?;
            run_migrations(&pool).await?;
            Ok::<_, StorageError>(pool)
        })?;

        Ok(Self { runtime, pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the owner row if it does not exist yet
    pub fn ensure_user(&self, id: UserId) -> Result<()> {
        self.block_on(users::ensure(&self.pool, id))
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

impl std::fmt::Debug for LocalStorageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorageContext")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PersistenceGateway for LocalStorageContext {
    // Tracks
    fn create_track(&self, owner: UserId, track: CreateTrack) -> Result<Track> {
        self.block_on(tracks::create(&self.pool, owner, track))
    }

    fn update_track(&self, id: TrackId, update: UpdateTrack) -> Result<Track> {
        self.block_on(tracks::update(&self.pool, id, update))
    }

    fn delete_track(&self, id: TrackId) -> Result<()> {
        self.block_on(tracks::delete(&self.pool, id))
    }

    fn list_tracks(&self, owner: UserId) -> Result<Vec<Track>> {
        self.block_on(tracks::get_by_owner(&self.pool, owner))
    }

    // Playlists
    fn create_playlist(&self, owner: UserId, name: &str) -> Result<Playlist> {
        self.block_on(playlists::create(&self.pool, owner, name))
    }

    fn rename_playlist(&self, id: PlaylistId, name: &str) -> Result<Playlist> {
        self.block_on(playlists::rename(&self.pool, id, name))
    }

    fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        self.block_on(playlists::delete(&self.pool, id))
    }

    fn list_playlists(&self, owner: UserId) -> Result<Vec<Playlist>> {
        self.block_on(playlists::get_by_owner(&self.pool, owner))
    }

    // Membership
    fn append_track_to_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.block_on(playlists::add_track(&self.pool, playlist, track))
    }

    fn remove_track_from_playlist(&self, playlist: PlaylistId, track: TrackId) -> Result<()> {
        self.block_on(playlists::remove_track(&self.pool, playlist, track))
    }

    fn swap_adjacent_tracks(
        &self,
        playlist: PlaylistId,
        first: TrackId,
        second: TrackId,
    ) -> Result<()> {
        self.block_on(playlists::swap_tracks(&self.pool, playlist, first, second))
    }

    // Genres
    fn list_genres(&self) -> Result<Vec<String>> {
        self.block_on(genres::get_all(&self.pool))
    }
}
