//! Track selection algorithms
//!
//! Stateless functions deciding which element of an ordered source comes
//! next or previous. Elements are compared by equality only, so the same
//! functions work over track ids, tracks or anything else with identity.
//!
//! An empty source is never an error: every function returns `None`.
//! Randomness is drawn from the caller's RNG, so a seeded RNG gives
//! reproducible picks.

use crate::history::ShuffleHistory;
use beat_core::types::TrackId;
use rand::seq::SliceRandom;
use rand::Rng;

fn index_of<T: PartialEq>(seq: &[T], current: Option<&T>) -> Option<usize> {
    let current = current?;
    seq.iter().position(|item| item == current)
}

/// First element of the source
pub fn first_of<T>(seq: &[T]) -> Option<&T> {
    seq.first()
}

/// Uniformly random element of the source
pub fn random_of<'a, T, R>(seq: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    seq.choose(rng)
}

/// Element following `current`, wrapping from the last back to the first
///
/// Falls back to the first element when `current` is `None` or not part of
/// the source.
pub fn next_sequential<'a, T: PartialEq>(seq: &'a [T], current: Option<&T>) -> Option<&'a T> {
    match index_of(seq, current) {
        Some(index) => seq.get(index + 1).or_else(|| first_of(seq)),
        None => first_of(seq),
    }
}

/// Element preceding `current`, clamped at the first element
///
/// Falls back to the first element when `current` is `None` or not part of
/// the source.
pub fn previous_sequential<'a, T: PartialEq>(
    seq: &'a [T],
    current: Option<&T>,
) -> Option<&'a T> {
    match index_of(seq, current) {
        Some(index) => seq.get(index.saturating_sub(1)),
        None => first_of(seq),
    }
}

/// Random element at a different position than `current`
///
/// With a single element that element is returned, so the result equals
/// `current` only when there is nothing else to choose. When `current` is
/// not part of the source any element may be picked.
pub fn next_random_distinct<'a, T, R>(
    seq: &'a [T],
    current: Option<&T>,
    rng: &mut R,
) -> Option<&'a T>
where
    T: PartialEq,
    R: Rng + ?Sized,
{
    if seq.len() <= 1 {
        return first_of(seq);
    }

    match index_of(seq, current) {
        Some(skip) => {
            // Draw from len - 1 slots and step over the current position
            let drawn = rng.gen_range(0..seq.len() - 1);
            let index = if drawn >= skip { drawn + 1 } else { drawn };
            seq.get(index)
        }
        None => random_of(seq, rng),
    }
}

/// Walk back along the shuffle history
///
/// Pops entries until one satisfies `is_playable`; entries that fail it
/// (deleted tracks) are discarded. When the history runs dry `current` is
/// returned unchanged.
pub fn previous_from_history(
    history: &mut ShuffleHistory,
    current: Option<TrackId>,
    mut is_playable: impl FnMut(TrackId) -> bool,
) -> Option<TrackId> {
    while let Some(candidate) = history.pop() {
        if is_playable(candidate) {
            return Some(candidate);
        }
    }
    current
}
