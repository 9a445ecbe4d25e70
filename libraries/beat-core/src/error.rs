/// Core error types for Beatbone
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `BeatError`
pub type Result<T> = std::result::Result<T, BeatError>;

/// Core error type for Beatbone
///
/// An empty selection source is deliberately absent here: "nothing to play"
/// is an ordinary value, not an error.
#[derive(Error, Debug)]
pub enum BeatError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Track is already part of the playlist
    #[error("Track {track} is already on playlist {playlist}")]
    DuplicateTrack {
        playlist: PlaylistId,
        track: TrackId,
    },

    /// The persistence collaborator could not complete a write or read
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BeatError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error came from the persistence layer
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for BeatError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Row", "unknown"),
            other => Self::Persistence(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = BeatError::not_found("Track", TrackId::new(7));
        assert_eq!(err.to_string(), "Track not found: 7");
    }

    #[test]
    fn duplicate_message_names_both_ids() {
        let err = BeatError::DuplicateTrack {
            playlist: PlaylistId::new(3),
            track: TrackId::new(9),
        };
        assert_eq!(err.to_string(), "Track 9 is already on playlist 3");
    }

    #[test]
    fn persistence_is_detected() {
        assert!(BeatError::persistence("disk full").is_persistence());
        assert!(!BeatError::invalid_input("bad").is_persistence());
    }
}
