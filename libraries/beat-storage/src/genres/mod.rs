use beat_core::error::Result;
use sqlx::SqlitePool;

/// Genre names, sorted alphabetically
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar("SELECT name FROM genres ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(names)
}
