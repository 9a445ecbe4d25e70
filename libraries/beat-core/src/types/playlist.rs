/// Playlist domain type
use super::ids::{PlaylistId, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// Playlist as returned by persistence
///
/// The track order holds ids only. Track metadata is resolved through the
/// library catalog so a single edit is visible from every playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner user ID
    pub owner_id: UserId,

    /// Playlist name
    pub name: String,

    /// Ordered track references (position 0 first)
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl Playlist {
    /// Create an empty playlist value
    pub fn new(id: PlaylistId, owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            track_ids: Vec::new(),
        }
    }
}
