//! Beatbone Core
//!
//! Domain types, the persistence contract and error handling shared by every
//! Beatbone crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist` and their strongly typed ids
//! - **Persistence Contract**: the `PersistenceGateway` trait implemented by storage backends
//! - **Search**: case-insensitive prefix filtering for tracks and playlists
//! - **Error Handling**: unified `BeatError` and `Result` types
//! - **Test Utilities**: an in-memory gateway behind the `test-utils` feature
//!
//! # Example
//!
//! ```rust
//! use beat_core::search::filter_tracks;
//! use beat_core::types::{Track, TrackId, UserId};
//! use std::path::PathBuf;
//!
//! let track = Track {
//!     id: TrackId::new(1),
//!     owner_id: UserId::new(1),
//!     title: "Blue in Green".to_string(),
//!     artist: "Miles Davis".to_string(),
//!     genre: "Jazz".to_string(),
//!     path: PathBuf::from("/music/blue.mp3"),
//!     duration_seconds: 337,
//! };
//!
//! let tracks = vec![track];
//! assert_eq!(filter_tracks(&tracks, "mil").len(), 1);
//! assert!(filter_tracks(&tracks, "davis").is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod gateway;
pub mod search;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod time;
pub mod types;

// Re-export commonly used types
pub use error::{BeatError, Result};
pub use gateway::PersistenceGateway;
pub use types::{
    CreateTrack, Playlist, PlaylistId, Track, TrackId, UpdateTrack, UserId, MAIN_GENRES,
};
