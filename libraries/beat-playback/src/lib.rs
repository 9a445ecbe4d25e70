//! Beatbone - Playback Sequencing
//!
//! Decides which track plays next and keeps playlist orders consistent with
//! storage.
//!
//! This crate provides:
//! - Track selection (sequential with wrap-around, random without repeats)
//! - Bounded shuffle history for "previous" under shuffle
//! - A debounced playback queue over two source contexts (library, playlist)
//! - Write-through playlist ordering (append, remove, adjacent swap)
//! - A `Session` tying library, queue and persistence together
//!
//! # Architecture
//!
//! `beat-playback` does no I/O of its own. Durable writes go through the
//! `PersistenceGateway` trait from `beat-core`; any backend implementing it
//! (SQLite in `beat-storage`, in memory for tests) can drive a session.
//!
//! # Example
//!
//! ```rust
//! use beat_core::test_utils::MemoryGateway;
//! use beat_core::types::{CreateTrack, UserId};
//! use beat_playback::{PlaybackConfig, Session};
//! use std::path::PathBuf;
//!
//! let mut session = Session::open(MemoryGateway::new(), UserId::new(1), &PlaybackConfig::default())?;
//!
//! for title in ["Intro", "Outro"] {
//!     session.create_track(CreateTrack {
//!         title: title.to_string(),
//!         artist: "Band".to_string(),
//!         genre: "Rock".to_string(),
//!         path: PathBuf::from(format!("/music/{title}.mp3")),
//!         duration_seconds: 200,
//!     })?;
//! }
//!
//! assert_eq!(session.select_initial().track().unwrap().title, "Intro");
//! assert_eq!(session.advance().track().unwrap().title, "Outro");
//! # Ok::<(), beat_core::BeatError>(())
//! ```

#![forbid(unsafe_code)]

pub mod events;
pub mod history;
pub mod library;
pub mod playlist_order;
pub mod queue;
pub mod selector;
pub mod session;
pub mod types;

pub use events::QueueEvent;
pub use history::ShuffleHistory;
pub use library::Library;
pub use playlist_order::PlaylistOrder;
pub use queue::PlaybackQueue;
pub use session::Session;
pub use types::{PlaybackConfig, PlaybackMode, Step};
