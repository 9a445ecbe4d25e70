//! Human-readable track and playlist durations

use crate::error::{BeatError, Result};

/// Render seconds as `m:ss`, or `h:mm:ss` from one hour upwards
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Parse `ss`, `m:ss` or `h:mm:ss` into seconds
///
/// Minute and second fields after the first component must be below 60.
pub fn parse_duration(text: &str) -> Result<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Err(BeatError::invalid_input("duration is empty"));
    }

    let parts = text
        .split(':')
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| BeatError::invalid_input(format!("invalid duration '{text}'")))
        })
        .collect::<Result<Vec<u32>>>()?;

    if parts.len() > 3 {
        return Err(BeatError::invalid_input(format!(
            "invalid duration '{text}'"
        )));
    }

    if parts.iter().skip(1).any(|&part| part >= 60) {
        return Err(BeatError::invalid_input(format!(
            "invalid duration '{text}': fields after the first must be below 60"
        )));
    }

    parts
        .iter()
        .try_fold(0u32, |acc, &part| acc.checked_mul(60)?.checked_add(part))
        .ok_or_else(|| BeatError::invalid_input(format!("duration '{text}' is too long")))
}
