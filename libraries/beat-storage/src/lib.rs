//! Beatbone Storage
//!
//! `SQLite` persistence for Beatbone tracks, playlists and genres.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity owns its queries as async free functions
//!   over a `SqlitePool` (`tracks`, `playlists`, `genres`, `users`)
//! - **Embedded Migrations**: the schema ships inside the binary
//! - **Synchronous Facade**: `LocalStorageContext` owns a small tokio runtime
//!   and implements the blocking `PersistenceGateway` contract on top of the
//!   async slices
//!
//! # Example
//!
//! ```rust,no_run
//! use beat_core::types::UserId;
//! use beat_core::PersistenceGateway;
//! use beat_storage::LocalStorageContext;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = LocalStorageContext::open("sqlite://beatbone.db")?;
//!
//! let playlist = storage.create_playlist(UserId::new(1), "Road Trip")?;
//! let tracks = storage.list_tracks(UserId::new(1))?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod context;
mod error;

// Vertical slices
pub mod genres;
pub mod playlists;
pub mod tracks;
pub mod users;

pub use context::LocalStorageContext;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before any slice function touches the pool.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// File databases are created when missing and run in WAL mode. An
/// in-memory database lives inside a single connection, so its pool is
/// pinned to exactly one connection that is never recycled.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://beatbone.db`
///   or `sqlite::memory:`)
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    debug!("Creating pool for {}", database_url);

    let in_memory = is_in_memory(database_url);
    let mut options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(30));

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    debug!("Pool ready for {}", database_url);
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
