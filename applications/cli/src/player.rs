//! Interactive playback loop
//!
//! Reads one command per line and prints what is playing after each step.
//! Nothing is decoded or sent to an audio device; the loop only drives the
//! playback queue.

use crate::commands::track_line;
use crate::error::{CliError, Result};
use beat_core::types::{PlaylistId, TrackId};
use beat_core::PersistenceGateway;
use beat_playback::{PlaybackMode, Session, Step};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  next, n            play the next track
  prev, p            play the previous track
  shuffle, s         toggle shuffle
  library            play from the whole library
  playlist <id>      play from a playlist
  play <track-id>    play a specific track in the current context
  now                show the current track
  help, h            show this help
  quit, q            leave the player";

/// A parsed player command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Next,
    Previous,
    Shuffle,
    Library,
    Playlist(PlaylistId),
    Play(TrackId),
    Now,
    Help,
    Quit,
}

impl PlayerCommand {
    /// Parse one input line; `None` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let argument = words.next();

        let command = match (word.to_ascii_lowercase().as_str(), argument) {
            ("next" | "n", None) => Self::Next,
            ("prev" | "p", None) => Self::Previous,
            ("shuffle" | "s", None) => Self::Shuffle,
            ("library", None) => Self::Library,
            ("playlist", Some(id)) => Self::Playlist(parse_id(id)?),
            ("play", Some(id)) => Self::Play(parse_id(id)?),
            ("now", None) => Self::Now,
            ("help" | "h" | "?", None) => Self::Help,
            ("quit" | "q" | "exit", None) => Self::Quit,
            _ => return Err(CliError::Usage(format!("unknown command '{}'", line.trim()))),
        };

        if words.next().is_some() {
            return Err(CliError::Usage(format!(
                "too many arguments in '{}'",
                line.trim()
            )));
        }

        Ok(Some(command))
    }
}

fn parse_id<T: std::str::FromStr>(text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| CliError::Usage(format!("'{text}' is not a valid id")))
}

fn render_step<W: Write>(step: &Step, out: &mut W) -> Result<()> {
    match step {
        Step::Track(track) => writeln!(out, "Now playing: {}", track_line(track))?,
        Step::NothingToPlay => writeln!(out, "Nothing to play")?,
        Step::Ignored => debug!("Request dropped by debounce"),
    }
    Ok(())
}

fn flush_events<G: PersistenceGateway>(session: &mut Session<G>) {
    for event in session.drain_events() {
        debug!(?event, "Queue event");
    }
}

/// Run the player until `quit` or end of input
///
/// Bad input is reported on `out` and the loop keeps going; only I/O
/// failures end it early.
pub fn run_player<G, R, W>(session: &mut Session<G>, input: R, out: &mut W) -> Result<()>
where
    G: PersistenceGateway,
    R: BufRead,
    W: Write,
{
    let step = session.select_initial();
    render_step(&step, out)?;
    flush_events(session);

    for line in input.lines() {
        let line = line?;

        let command = match PlayerCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        if command == PlayerCommand::Quit {
            break;
        }

        if let Err(e) = execute(session, command, out) {
            warn!("Player command failed: {}", e);
            writeln!(out, "{e}")?;
        }
        flush_events(session);
    }

    out.flush()?;
    Ok(())
}

fn execute<G, W>(session: &mut Session<G>, command: PlayerCommand, out: &mut W) -> Result<()>
where
    G: PersistenceGateway,
    W: Write,
{
    match command {
        PlayerCommand::Next => render_step(&session.advance(), out)?,
        PlayerCommand::Previous => render_step(&session.retreat(), out)?,

        PlayerCommand::Shuffle => {
            let enabled = session.toggle_shuffle();
            writeln!(out, "Shuffle {}", if enabled { "on" } else { "off" })?;
        }

        PlayerCommand::Library => {
            session.set_mode(PlaybackMode::Library, None);
            writeln!(out, "Playing from library")?;
        }

        PlayerCommand::Playlist(id) => {
            let name = session
                .library()
                .playlist(id)
                .map(|p| p.name().to_string())
                .ok_or_else(|| beat_core::BeatError::not_found("Playlist", id))?;
            session.set_mode(PlaybackMode::Playlist, Some(id));
            writeln!(out, "Playing from playlist '{name}'")?;
        }

        PlayerCommand::Play(track) => {
            let queue = session.queue();
            let (mode, playlist) = (queue.mode(), queue.active_playlist());
            let track = session.play_track(track, mode, playlist)?;
            render_step(&Step::Track(track), out)?;
        }

        PlayerCommand::Now => match session.current_track() {
            Some(track) => writeln!(out, "Now playing: {}", track_line(track))?,
            None => writeln!(out, "Nothing to play")?,
        },

        PlayerCommand::Help => writeln!(out, "{HELP}")?,

        PlayerCommand::Quit => {}
    }

    Ok(())
}
