/// Track domain type
use super::ids::{TrackId, UserId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Audio track
///
/// Identity is the `id`; two tracks with the same id are the same track even
/// if one of them carries stale metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Owning user
    pub owner_id: UserId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Genre
    pub genre: String,

    /// Playable resource locator
    pub path: PathBuf,

    /// Track duration in whole seconds
    pub duration_seconds: u32,
}

impl Track {
    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }

    /// Apply a metadata update in place
    ///
    /// Only title, artist and genre are editable; id, path and duration are
    /// fixed for the lifetime of the entity.
    pub fn apply(&mut self, update: &UpdateTrack) {
        self.title.clone_from(&update.title);
        self.artist.clone_from(&update.artist);
        self.genre.clone_from(&update.genre);
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

/// Data for creating a new track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub path: PathBuf,
    pub duration_seconds: u32,
}

/// Editable track metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTrack {
    pub title: String,
    pub artist: String,
    pub genre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: i64, title: &str) -> Track {
        Track {
            id: TrackId::new(id),
            owner_id: UserId::new(1),
            title: title.to_string(),
            artist: "Artist".to_string(),
            genre: "Rock".to_string(),
            path: PathBuf::from(format!("/music/{id}.mp3")),
            duration_seconds: 180,
        }
    }

    #[test]
    fn equality_is_by_id() {
        assert_eq!(track(1, "Old title"), track(1, "New title"));
        assert_ne!(track(1, "Same"), track(2, "Same"));
    }

    #[test]
    fn duration_conversion() {
        assert_eq!(track(1, "Song").duration(), Duration::from_secs(180));
    }

    #[test]
    fn apply_keeps_path_and_duration() {
        let mut t = track(1, "Song");
        t.apply(&UpdateTrack {
            title: "Renamed".to_string(),
            artist: "Someone".to_string(),
            genre: "Jazz".to_string(),
        });

        assert_eq!(t.title, "Renamed");
        assert_eq!(t.artist, "Someone");
        assert_eq!(t.genre, "Jazz");
        assert_eq!(t.path, PathBuf::from("/music/1.mp3"));
        assert_eq!(t.duration_seconds, 180);
    }
}
