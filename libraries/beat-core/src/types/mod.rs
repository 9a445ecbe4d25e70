mod genre;
mod ids;
mod playlist;
mod track;

pub use genre::MAIN_GENRES;
pub use ids::{PlaylistId, TrackId, UserId};
pub use playlist::Playlist;
pub use track::{CreateTrack, Track, UpdateTrack};
