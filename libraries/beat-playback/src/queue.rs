//! Playback queue
//!
//! State machine deciding what plays next. It tracks the source context
//! (library or one playlist), the shuffle flag, the shuffle history and the
//! current track, and drops navigation requests that arrive faster than the
//! configured debounce interval.
//!
//! The queue owns no tracks. Every call takes the `Library` the ids resolve
//! against, so metadata edits and deletions are always seen.

use crate::events::QueueEvent;
use crate::history::ShuffleHistory;
use crate::library::Library;
use crate::selector::{
    first_of, next_random_distinct, next_sequential, previous_from_history, previous_sequential,
    random_of,
};
use crate::types::{PlaybackConfig, PlaybackMode, Step};
use beat_core::types::{PlaylistId, Track, TrackId};
use beat_core::{BeatError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::debug;

/// Playback sequencing state for one session
#[derive(Debug)]
pub struct PlaybackQueue {
    mode: PlaybackMode,
    shuffle: bool,
    current: Option<TrackId>,
    active_playlist: Option<PlaylistId>,
    history: ShuffleHistory,

    debounce: Duration,
    last_accepted: Option<Instant>,

    rng: StdRng,
    events: Vec<QueueEvent>,
}

impl PlaybackQueue {
    /// Create a queue in library mode with nothing selected
    pub fn new(config: &PlaybackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a queue whose shuffle picks are reproducible
    pub fn with_seed(config: &PlaybackConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &PlaybackConfig, rng: StdRng) -> Self {
        Self {
            mode: PlaybackMode::Library,
            shuffle: config.shuffle,
            current: None,
            active_playlist: None,
            history: ShuffleHistory::new(config.history_size),
            debounce: config.debounce(),
            last_accepted: None,
            rng,
            events: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    /// Active playlist, set only in playlist mode
    pub fn active_playlist(&self) -> Option<PlaylistId> {
        self.active_playlist
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &ShuffleHistory {
        &self.history
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<QueueEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Context
    // ========================================================================

    /// Switch the source context
    ///
    /// Changing mode clears the shuffle history, and so does moving to a
    /// different playlist while already in playlist mode. `playlist` is
    /// ignored in library mode.
    pub fn set_mode(&mut self, mode: PlaybackMode, playlist: Option<PlaylistId>) {
        let playlist = match mode {
            PlaybackMode::Library => None,
            PlaybackMode::Playlist => playlist,
        };

        if mode == self.mode && playlist == self.active_playlist {
            return;
        }

        self.clear_history();
        self.mode = mode;
        self.active_playlist = playlist;

        debug!("Playback mode set to {:?} (playlist {:?})", mode, playlist);
        self.events.push(QueueEvent::ModeChanged {
            mode,
            playlist_id: playlist,
        });
    }

    /// Flip shuffle on or off, clearing the history either way
    ///
    /// Returns the new shuffle state.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.clear_history();
        self.shuffle = !self.shuffle;

        debug!("Shuffle {}", if self.shuffle { "on" } else { "off" });
        self.events.push(QueueEvent::ShuffleChanged {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Move to the next track
    pub fn advance(&mut self, library: &Library) -> Step {
        self.advance_at(library, Instant::now())
    }

    /// Move to the next track, with an explicit request time
    pub fn advance_at(&mut self, library: &Library, now: Instant) -> Step {
        if !self.accept(now) {
            return Step::Ignored;
        }

        let source = library.source(self.mode, self.active_playlist);
        let current = self.current;

        let next = if self.shuffle {
            let picked = next_random_distinct(source, current.as_ref(), &mut self.rng).copied();
            // Only tracks of the active source are worth walking back to
            if let (Some(previous), Some(next)) = (current, picked) {
                if source.len() > 1 && next != previous && source.contains(&previous) {
                    self.history.push(previous);
                }
            }
            picked
        } else {
            next_sequential(source, current.as_ref()).copied()
        };

        self.select(library, next)
    }

    /// Move to the previous track
    pub fn retreat(&mut self, library: &Library) -> Step {
        self.retreat_at(library, Instant::now())
    }

    /// Move to the previous track, with an explicit request time
    ///
    /// With shuffle on this walks back along the shuffle history, skipping
    /// tracks that have since been deleted. With an empty history the current
    /// track stays.
    pub fn retreat_at(&mut self, library: &Library, now: Instant) -> Step {
        if !self.accept(now) {
            return Step::Ignored;
        }

        let previous = if self.shuffle {
            previous_from_history(&mut self.history, self.current, |id| {
                library.track(id).is_some()
            })
        } else {
            let source = library.source(self.mode, self.active_playlist);
            previous_sequential(source, self.current.as_ref()).copied()
        };

        self.select(library, previous)
    }

    /// Pick a starting track when playback begins with nothing loaded
    ///
    /// First track of the source, or a random one with shuffle on. Not
    /// subject to the debounce guard.
    pub fn select_initial(&mut self, library: &Library) -> Step {
        let source = library.source(self.mode, self.active_playlist);
        let first = if self.shuffle {
            random_of(source, &mut self.rng).copied()
        } else {
            first_of(source).copied()
        };
        self.select(library, first)
    }

    /// Play a track the user picked directly
    ///
    /// Applies the `set_mode` rules for the given context, then makes the
    /// track current. Not subject to the debounce guard.
    ///
    /// # Errors
    ///
    /// `NotFound` when the track is not in the library, or when playlist mode
    /// names a playlist that does not contain the track.
    pub fn play_track(
        &mut self,
        library: &Library,
        track_id: TrackId,
        mode: PlaybackMode,
        playlist: Option<PlaylistId>,
    ) -> Result<Track> {
        let track = library
            .track(track_id)
            .ok_or_else(|| BeatError::not_found("Track", track_id))?;

        if mode == PlaybackMode::Playlist {
            let id = playlist.ok_or_else(|| BeatError::invalid_input("no playlist selected"))?;
            let on_playlist = library
                .playlist(id)
                .ok_or_else(|| BeatError::not_found("Playlist", id))?
                .contains(track_id);
            if !on_playlist {
                return Err(BeatError::not_found("Playlist track", track_id));
            }
        }

        self.set_mode(mode, playlist);
        self.set_current(Some(track_id));
        Ok(track.clone())
    }

    /// Drop every reference to a deleted track
    pub fn forget_track(&mut self, track_id: TrackId) {
        self.history.retain(|id| id != track_id);
        if self.current == Some(track_id) {
            self.set_current(None);
        }
    }

    /// Leave playlist mode if `playlist` was the active one
    pub fn forget_playlist(&mut self, playlist: PlaylistId) {
        if self.active_playlist == Some(playlist) {
            self.set_mode(PlaybackMode::Library, None);
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Debounce guard: records `now` when the request is accepted
    fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.debounce {
                debug!("Navigation request ignored (debounce)");
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    fn select(&mut self, library: &Library, next: Option<TrackId>) -> Step {
        self.set_current(next);
        match next.and_then(|id| library.track(id)) {
            Some(track) => Step::Track(track.clone()),
            None => Step::NothingToPlay,
        }
    }

    fn set_current(&mut self, next: Option<TrackId>) {
        if next == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.events.push(QueueEvent::TrackChanged {
            track_id: next,
            previous_track_id: previous,
        });
    }

    fn clear_history(&mut self) {
        if !self.history.is_empty() {
            self.history.clear();
            self.events.push(QueueEvent::HistoryCleared);
        }
    }
}

impl Default for PlaybackQueue {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beat_core::test_utils::MemoryGateway;
    use beat_core::types::{CreateTrack, UserId};
    use std::path::PathBuf;

    const OWNER: UserId = UserId::new(1);

    struct Fixture {
        gateway: MemoryGateway,
        library: Library,
        ids: Vec<TrackId>,
    }

    fn fixture(durations: &[u32]) -> Fixture {
        let gateway = MemoryGateway::new();
        let mut library = Library::new(OWNER);
        let ids = durations
            .iter()
            .enumerate()
            .map(|(i, secs)| {
                library
                    .create_track(
                        &gateway,
                        CreateTrack {
                            title: format!("T{i}"),
                            artist: "Artist".to_string(),
                            genre: "Rock".to_string(),
                            path: PathBuf::from(format!("/music/{i}.mp3")),
                            duration_seconds: *secs,
                        },
                    )
                    .unwrap()
                    .id
            })
            .collect();
        Fixture {
            gateway,
            library,
            ids,
        }
    }

    fn queue() -> PlaybackQueue {
        PlaybackQueue::with_seed(&PlaybackConfig::default(), 11)
    }

    /// Instants spaced well beyond the debounce interval
    fn ticks() -> impl Iterator<Item = Instant> {
        let start = Instant::now();
        (1u64..).map(move |n| start + Duration::from_secs(n))
    }

    #[test]
    fn sequential_library_wraps() {
        let f = fixture(&[180, 200]);
        let mut queue = queue();
        let mut clock = ticks();

        assert_eq!(queue.select_initial(&f.library).track().unwrap().id, f.ids[0]);
        let step = queue.advance_at(&f.library, clock.next().unwrap());
        assert_eq!(step.track().unwrap().id, f.ids[1]);
        let step = queue.advance_at(&f.library, clock.next().unwrap());
        assert_eq!(step.track().unwrap().id, f.ids[0]);
    }

    #[test]
    fn sequential_retreat_clamps_at_first() {
        let f = fixture(&[10, 10, 10]);
        let mut queue = queue();
        let mut clock = ticks();

        queue.select_initial(&f.library);
        let step = queue.retreat_at(&f.library, clock.next().unwrap());
        assert_eq!(step.track().unwrap().id, f.ids[0]);
    }

    #[test]
    fn empty_source_has_nothing_to_play() {
        let f = fixture(&[]);
        let mut queue = queue();

        assert_eq!(queue.select_initial(&f.library), Step::NothingToPlay);
        assert_eq!(queue.advance(&f.library), Step::NothingToPlay);
        assert_eq!(queue.current(), None);
    }

    #[test]
    fn requests_inside_debounce_interval_are_ignored() {
        let f = fixture(&[10, 10, 10]);
        let mut queue = queue();
        let start = Instant::now();

        queue.select_initial(&f.library);
        assert!(!queue.advance_at(&f.library, start).is_ignored());
        let current = queue.current();

        let step = queue.advance_at(&f.library, start + Duration::from_millis(50));
        assert!(step.is_ignored());
        assert!(queue
            .retreat_at(&f.library, start + Duration::from_millis(199))
            .is_ignored());
        assert_eq!(queue.current(), current);

        assert!(!queue
            .advance_at(&f.library, start + Duration::from_millis(200))
            .is_ignored());
    }

    #[test]
    fn shuffle_advance_records_history_and_retreat_returns() {
        let mut f = fixture(&[10, 10, 10]);
        let playlist = f
            .library
            .create_playlist(&f.gateway, "Mix")
            .unwrap()
            .id();
        for id in f.ids.clone() {
            f.library.add_to_playlist(&f.gateway, playlist, id).unwrap();
        }

        let mut queue = queue();
        let mut clock = ticks();
        queue
            .play_track(&f.library, f.ids[1], PlaybackMode::Playlist, Some(playlist))
            .unwrap();
        queue.toggle_shuffle();

        let next = queue.advance_at(&f.library, clock.next().unwrap());
        let next_id = next.track().unwrap().id;
        assert!(next_id == f.ids[0] || next_id == f.ids[2]);
        assert_eq!(queue.history_len(), 1);

        let back = queue.retreat_at(&f.library, clock.next().unwrap());
        assert_eq!(back.track().unwrap().id, f.ids[1]);
        assert_eq!(queue.history_len(), 0);

        // Empty history keeps the current track
        let stay = queue.retreat_at(&f.library, clock.next().unwrap());
        assert_eq!(stay.track().unwrap().id, f.ids[1]);
    }

    #[test]
    fn single_track_shuffle_does_not_grow_history() {
        let f = fixture(&[10]);
        let mut queue = queue();
        queue.toggle_shuffle();
        queue.select_initial(&f.library);

        for now in ticks().take(5) {
            assert_eq!(queue.advance_at(&f.library, now).track().unwrap().id, f.ids[0]);
        }
        assert_eq!(queue.history_len(), 0);
    }

    #[test]
    fn entering_single_track_playlist_under_shuffle_keeps_history_empty() {
        let mut f = fixture(&[10, 10]);
        let playlist = f
            .library
            .create_playlist(&f.gateway, "Solo")
            .unwrap()
            .id();
        f.library
            .add_to_playlist(&f.gateway, playlist, f.ids[1])
            .unwrap();

        let mut queue = queue();
        queue.toggle_shuffle();
        queue
            .play_track(&f.library, f.ids[0], PlaybackMode::Library, None)
            .unwrap();
        queue.set_mode(PlaybackMode::Playlist, Some(playlist));

        let step = queue.advance_at(&f.library, Instant::now());
        assert_eq!(step.track().unwrap().id, f.ids[1]);
        assert_eq!(queue.history_len(), 0);
    }

    #[test]
    fn retreat_after_context_switch_stays_inside_new_source() {
        let mut f = fixture(&[10, 10, 10, 10]);
        let playlist = f
            .library
            .create_playlist(&f.gateway, "Middle")
            .unwrap()
            .id();
        for id in [f.ids[1], f.ids[2]] {
            f.library.add_to_playlist(&f.gateway, playlist, id).unwrap();
        }

        let mut queue = queue();
        let mut clock = ticks();
        queue.toggle_shuffle();
        queue
            .play_track(&f.library, f.ids[3], PlaybackMode::Library, None)
            .unwrap();
        queue.set_mode(PlaybackMode::Playlist, Some(playlist));

        let entered = queue
            .advance_at(&f.library, clock.next().unwrap())
            .track()
            .unwrap()
            .id;
        assert!(entered == f.ids[1] || entered == f.ids[2]);
        assert_eq!(queue.history_len(), 0);

        // Empty history keeps the current playlist track
        let back = queue.retreat_at(&f.library, clock.next().unwrap());
        assert_eq!(back.track().unwrap().id, entered);

        let other = queue
            .advance_at(&f.library, clock.next().unwrap())
            .track()
            .unwrap()
            .id;
        assert_ne!(other, entered);
        let back = queue.retreat_at(&f.library, clock.next().unwrap());
        assert_eq!(back.track().unwrap().id, entered);
    }

    #[test]
    fn toggling_shuffle_or_mode_clears_history() {
        let mut f = fixture(&[10, 10, 10]);
        let playlist = f
            .library
            .create_playlist(&f.gateway, "Mix")
            .unwrap()
            .id();
        let mut queue = queue();
        queue.toggle_shuffle();
        queue.select_initial(&f.library);

        let mut clock = ticks();
        queue.advance_at(&f.library, clock.next().unwrap());
        queue.advance_at(&f.library, clock.next().unwrap());
        assert_eq!(queue.history_len(), 2);

        queue.set_mode(PlaybackMode::Playlist, Some(playlist));
        assert_eq!(queue.history_len(), 0);

        queue.set_mode(PlaybackMode::Library, None);
        queue.advance_at(&f.library, clock.next().unwrap());
        assert_eq!(queue.history_len(), 1);
        queue.toggle_shuffle();
        assert_eq!(queue.history_len(), 0);
        assert!(!queue.is_shuffle());
    }

    #[test]
    fn same_mode_keeps_history() {
        let f = fixture(&[10, 10]);
        let mut queue = queue();
        queue.toggle_shuffle();
        queue.select_initial(&f.library);
        queue.advance_at(&f.library, Instant::now());

        queue.set_mode(PlaybackMode::Library, None);
        assert_eq!(queue.history_len(), 1);
    }

    #[test]
    fn retreat_skips_deleted_tracks() {
        let mut f = fixture(&[10, 10, 10]);
        let mut queue = queue();
        let mut clock = ticks();

        queue.toggle_shuffle();
        queue
            .play_track(&f.library, f.ids[0], PlaybackMode::Library, None)
            .unwrap();
        queue.advance_at(&f.library, clock.next().unwrap());
        let middle = queue.current().unwrap();
        queue.advance_at(&f.library, clock.next().unwrap());

        // Delete the middle track behind the queue's back
        f.library.delete_track(&f.gateway, middle).unwrap();

        let back = queue.retreat_at(&f.library, clock.next().unwrap());
        assert_eq!(back.track().unwrap().id, f.ids[0]);
    }

    #[test]
    fn play_track_rejects_tracks_outside_playlist() {
        let mut f = fixture(&[10, 10]);
        let playlist = f
            .library
            .create_playlist(&f.gateway, "Mix")
            .unwrap()
            .id();
        let mut queue = queue();

        let err = queue
            .play_track(&f.library, f.ids[0], PlaybackMode::Playlist, Some(playlist))
            .unwrap_err();
        assert!(matches!(err, BeatError::NotFound { .. }));
        assert_eq!(queue.mode(), PlaybackMode::Library);
    }

    #[test]
    fn playlist_mode_without_playlist_is_empty() {
        let f = fixture(&[10]);
        let mut queue = queue();
        queue.set_mode(PlaybackMode::Playlist, None);

        assert_eq!(queue.select_initial(&f.library), Step::NothingToPlay);
    }

    #[test]
    fn forget_track_clears_current_and_history() {
        let f = fixture(&[10, 10, 10]);
        let mut queue = queue();
        queue.toggle_shuffle();
        queue.select_initial(&f.library);
        let first = queue.current().unwrap();
        queue.advance_at(&f.library, Instant::now());
        let second = queue.current().unwrap();

        queue.forget_track(first);
        assert_eq!(queue.history_len(), 0);

        queue.forget_track(second);
        assert_eq!(queue.current(), None);
    }

    #[test]
    fn events_describe_transitions() {
        let f = fixture(&[10, 10]);
        let mut queue = queue();

        queue.select_initial(&f.library);
        queue.toggle_shuffle();
        let events = queue.drain_events();

        assert_eq!(
            events,
            vec![
                QueueEvent::TrackChanged {
                    track_id: Some(f.ids[0]),
                    previous_track_id: None,
                },
                QueueEvent::ShuffleChanged { enabled: true },
            ]
        );
        assert!(queue.drain_events().is_empty());
    }
}
