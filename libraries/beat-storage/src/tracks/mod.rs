use beat_core::error::{BeatError, Result};
use beat_core::types::{CreateTrack, Track, TrackId, UpdateTrack, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;

use crate::playlists;

const TRACK_COLUMNS: &str = "id, owner_id, title, artist, genre, path, duration_seconds";

fn track_from_row(row: &SqliteRow) -> Track {
    Track {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        artist: row.get("artist"),
        genre: row.get("genre"),
        path: PathBuf::from(row.get::<String, _>("path")),
        duration_seconds: row.get("duration_seconds"),
    }
}

/// All tracks owned by a user, in library order (creation order)
pub async fn get_by_owner(pool: &SqlitePool, owner: UserId) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks WHERE owner_id = ? ORDER BY id"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(track_from_row).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(&format!("SELECT {TRACK_COLUMNS} FROM tracks WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(track_from_row))
}

/// Create new track
pub async fn create(pool: &SqlitePool, owner: UserId, track: CreateTrack) -> Result<Track> {
    let path = track
        .path
        .to_str()
        .ok_or_else(|| BeatError::invalid_input("track path is not valid UTF-8"))?;

    let result = sqlx::query(
        r#"
        INSERT INTO tracks (owner_id, title, artist, genre, path, duration_seconds)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(owner)
    .bind(&track.title)
    .bind(&track.artist)
    .bind(&track.genre)
    .bind(path)
    .bind(track.duration_seconds)
    .execute(pool)
    .await?;

    let id = TrackId::new(result.last_insert_rowid());
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| BeatError::persistence("Failed to retrieve created track"))
}

/// Rewrite title, artist and genre
pub async fn update(pool: &SqlitePool, id: TrackId, update: UpdateTrack) -> Result<Track> {
    let result = sqlx::query(
        r#"
        UPDATE tracks
        SET title = ?, artist = ?, genre = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(&update.title)
    .bind(&update.artist)
    .bind(&update.genre)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BeatError::not_found("Track", id));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| BeatError::not_found("Track", id))
}

/// Delete a track
///
/// Membership rows go with it (foreign key cascade); positions on every
/// affected playlist are compacted in the same transaction.
pub async fn delete(pool: &SqlitePool, id: TrackId) -> Result<()> {
    let mut tx = pool.begin().await?;

    let affected: Vec<i64> =
        sqlx::query_scalar("SELECT playlist_id FROM playlist_tracks WHERE track_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BeatError::not_found("Track", id));
    }

    for playlist_id in affected {
        playlists::compact_positions(&mut tx, playlist_id.into()).await?;
    }

    tx.commit().await?;
    Ok(())
}
