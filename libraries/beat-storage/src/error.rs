/// Storage-specific errors
use beat_core::BeatError;
use thiserror::Error;

/// Storage error types
///
/// Raised while opening or migrating the database. Query failures inside the
/// slices surface directly as `BeatError`.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error (runtime construction)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for BeatError {
    fn from(err: StorageError) -> Self {
        BeatError::persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_become_persistence_failures() {
        let err: BeatError = StorageError::Connection("refused".to_string()).into();
        assert!(err.is_persistence());
        assert_eq!(
            err.to_string(),
            "Persistence failure: Database connection error: refused"
        );
    }
}
