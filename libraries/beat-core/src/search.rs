//! Prefix search over tracks and playlists
//!
//! Matching is case-insensitive and anchored at the start of the field:
//! `"ja"` finds "Jazzmin" but `"az"` does not.

use crate::types::{Playlist, Track};

/// Whether `field` starts with `filter`, ignoring case
pub fn starts_with_ignore_case(field: &str, filter: &str) -> bool {
    let mut field_chars = field.chars().flat_map(char::to_lowercase);
    filter
        .chars()
        .flat_map(char::to_lowercase)
        .all(|expected| field_chars.next() == Some(expected))
}

/// Tracks whose title or artist starts with `filter`
///
/// Order of the input is preserved.
pub fn filter_tracks<'a, I>(tracks: I, filter: &str) -> Vec<&'a Track>
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks
        .into_iter()
        .filter(|track| {
            starts_with_ignore_case(&track.title, filter)
                || starts_with_ignore_case(&track.artist, filter)
        })
        .collect()
}

/// Playlists whose name starts with `filter`
pub fn filter_playlists<'a, I>(playlists: I, filter: &str) -> Vec<&'a Playlist>
where
    I: IntoIterator<Item = &'a Playlist>,
{
    playlists
        .into_iter()
        .filter(|playlist| starts_with_ignore_case(&playlist.name, filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaylistId, TrackId, UserId};
    use std::path::PathBuf;

    fn track(id: i64, title: &str, artist: &str) -> Track {
        Track {
            id: TrackId::new(id),
            owner_id: UserId::new(1),
            title: title.to_string(),
            artist: artist.to_string(),
            genre: "Pop".to_string(),
            path: PathBuf::from(format!("/music/{id}.mp3")),
            duration_seconds: 200,
        }
    }

    #[test]
    fn prefix_matches_artists() {
        let tracks = vec![
            track(1, "One", "Jay"),
            track(2, "Two", "Jazzmin"),
            track(3, "Three", "Dave"),
        ];

        let artists: Vec<&str> = filter_tracks(&tracks, "ja")
            .iter()
            .map(|t| t.artist.as_str())
            .collect();
        assert_eq!(artists, vec!["Jay", "Jazzmin"]);
    }

    #[test]
    fn substring_is_not_a_match() {
        let tracks = vec![
            track(1, "One", "Jay"),
            track(2, "Two", "Jazzmin"),
            track(3, "Three", "Dave"),
        ];

        assert!(filter_tracks(&tracks, "az").is_empty());
    }

    #[test]
    fn title_or_artist_may_match() {
        let tracks = vec![track(1, "Rocket", "Elton"), track(2, "Song", "Rolling")];
        assert_eq!(filter_tracks(&tracks, "RO").len(), 2);
    }

    #[test]
    fn filter_longer_than_field_does_not_match() {
        let tracks = vec![track(1, "Ab", "Cd")];
        assert!(filter_tracks(&tracks, "abc").is_empty());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let tracks = vec![track(1, "A", "B"), track(2, "C", "D")];
        assert_eq!(filter_tracks(&tracks, "").len(), 2);
    }

    #[test]
    fn playlists_match_on_name() {
        let playlists = vec![
            Playlist::new(PlaylistId::new(1), UserId::new(1), "Chill"),
            Playlist::new(PlaylistId::new(2), UserId::new(1), "Workout"),
            Playlist::new(PlaylistId::new(3), UserId::new(1), "chiptune"),
        ];

        let names: Vec<&str> = filter_playlists(&playlists, "CH")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chill", "chiptune"]);
    }
}
