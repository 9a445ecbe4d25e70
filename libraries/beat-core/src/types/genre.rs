//! Genre types

/// Genres offered as quick picks when tagging a track
pub const MAIN_GENRES: &[&str] = &["Rap", "Jazz", "Blues", "Rock", "Pop"];
