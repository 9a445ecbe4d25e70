use beat_core::error::{BeatError, Result};
use beat_core::types::{Playlist, PlaylistId, TrackId, UserId};
use sqlx::{Row, Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::collections::HashMap;

/// All playlists owned by a user, each with its ordered track ids
pub async fn get_by_owner(pool: &SqlitePool, owner: UserId) -> Result<Vec<Playlist>> {
    let rows = sqlx::query("SELECT id, owner_id, name FROM playlists WHERE owner_id = ? ORDER BY id")
        .bind(owner)
        .fetch_all(pool)
        .await?;

    let mut playlists: Vec<Playlist> = rows
        .into_iter()
        .map(|row| Playlist::new(row.get("id"), row.get("owner_id"), row.get::<String, _>("name")))
        .collect();

    let members = sqlx::query(
        r#"
        SELECT pt.playlist_id, pt.track_id
        FROM playlist_tracks pt
        INNER JOIN playlists p ON p.id = pt.playlist_id
        WHERE p.owner_id = ?
        ORDER BY pt.playlist_id, pt.position
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    let mut orders: HashMap<PlaylistId, Vec<TrackId>> = HashMap::new();
    for row in members {
        orders
            .entry(row.get("playlist_id"))
            .or_default()
            .push(row.get("track_id"));
    }

    for playlist in &mut playlists {
        if let Some(track_ids) = orders.remove(&playlist.id) {
            playlist.track_ids = track_ids;
        }
    }

    Ok(playlists)
}

/// Get playlist by ID with its track order
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, owner_id, name FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut playlist = Playlist::new(row.get("id"), row.get("owner_id"), row.get::<String, _>("name"));
    playlist.track_ids = sqlx::query_scalar(
        "SELECT track_id FROM playlist_tracks WHERE playlist_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(playlist))
}

/// Create new (empty) playlist
pub async fn create(pool: &SqlitePool, owner: UserId, name: &str) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (owner_id, name) VALUES (?, ?)")
        .bind(owner)
        .bind(name)
        .execute(pool)
        .await?;

    Ok(Playlist::new(
        PlaylistId::new(result.last_insert_rowid()),
        owner,
        name,
    ))
}

pub async fn rename(pool: &SqlitePool, id: PlaylistId, name: &str) -> Result<Playlist> {
    let result = sqlx::query("UPDATE playlists SET name = ?, updated_at = datetime('now') WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BeatError::not_found("Playlist", id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| BeatError::not_found("Playlist", id))
}

/// Delete playlist; membership rows cascade
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BeatError::not_found("Playlist", id));
    }
    Ok(())
}

/// Append track at the end of a playlist
pub async fn add_track(pool: &SqlitePool, playlist_id: PlaylistId, track_id: TrackId) -> Result<()> {
    let mut tx = pool.begin().await?;

    require_playlist(&mut tx, playlist_id).await?;

    let track_exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM tracks WHERE id = ?")
        .bind(track_id)
        .fetch_optional(&mut *tx)
        .await?;
    if track_exists.is_none() {
        return Err(BeatError::not_found("Track", track_id));
    }

    if position_of(&mut tx, playlist_id, track_id).await?.is_some() {
        return Err(BeatError::DuplicateTrack {
            playlist: playlist_id,
            track: track_id,
        });
    }

    let next_position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO playlist_tracks (playlist_id, track_id, position) VALUES (?, ?, ?)")
        .bind(playlist_id)
        .bind(track_id)
        .bind(next_position)
        .execute(&mut *tx)
        .await?;

    touch(&mut tx, playlist_id).await?;
    tx.commit().await?;
    Ok(())
}

/// Remove track from playlist, closing the gap it leaves
pub async fn remove_track(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id)
        .bind(track_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BeatError::not_found("Playlist track", track_id));
    }

    compact_positions(&mut tx, playlist_id).await?;
    touch(&mut tx, playlist_id).await?;
    tx.commit().await?;
    Ok(())
}

/// Exchange the positions of two tracks on a playlist
pub async fn swap_tracks(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    first: TrackId,
    second: TrackId,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let first_position = position_of(&mut tx, playlist_id, first)
        .await?
        .ok_or_else(|| BeatError::not_found("Playlist track", first))?;
    let second_position = position_of(&mut tx, playlist_id, second)
        .await?
        .ok_or_else(|| BeatError::not_found("Playlist track", second))?;

    for (track, position) in [(first, second_position), (second, first_position)] {
        sqlx::query("UPDATE playlist_tracks SET position = ? WHERE playlist_id = ? AND track_id = ?")
            .bind(position)
            .bind(playlist_id)
            .bind(track)
            .execute(&mut *tx)
            .await?;
    }

    touch(&mut tx, playlist_id).await?;
    tx.commit().await?;
    Ok(())
}

// Helper functions

/// Renumber positions on a playlist to 0..n, keeping their relative order
pub(crate) async fn compact_positions(
    tx: &mut Transaction<'_, Sqlite>,
    playlist_id: PlaylistId,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE playlist_tracks
        SET position = (
            SELECT COUNT(*)
            FROM playlist_tracks pt2
            WHERE pt2.playlist_id = playlist_tracks.playlist_id
              AND pt2.position < playlist_tracks.position
        )
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn require_playlist(conn: &mut SqliteConnection, id: PlaylistId) -> Result<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| BeatError::not_found("Playlist", id))
}

async fn position_of(
    conn: &mut SqliteConnection,
    playlist_id: PlaylistId,
    track_id: TrackId,
) -> Result<Option<i64>> {
    let position = sqlx::query_scalar(
        "SELECT position FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?",
    )
    .bind(playlist_id)
    .bind(track_id)
    .fetch_optional(conn)
    .await?;

    Ok(position)
}

async fn touch(conn: &mut SqliteConnection, id: PlaylistId) -> Result<()> {
    sqlx::query("UPDATE playlists SET updated_at = datetime('now') WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}
