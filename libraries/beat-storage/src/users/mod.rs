use beat_core::error::Result;
use beat_core::types::UserId;
use sqlx::SqlitePool;

/// Make sure a user row exists for `id`
///
/// Tracks and playlists reference their owner, so a fresh owner id needs a
/// row before anything can be stored under it.
pub async fn ensure(pool: &SqlitePool, id: UserId) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO users (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(format!("user-{id}"))
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn exists(pool: &SqlitePool, id: UserId) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}
