//! One-shot library and playlist commands
//!
//! Every command runs against an open `Session` and writes its result to
//! the given writer, either as aligned text or as JSON.

use crate::cli::{PlaylistCommand, TrackCommand};
use crate::error::{CliError, Result};
use beat_core::time::{format_duration, parse_duration};
use beat_core::types::{CreateTrack, Track, UpdateTrack};
use beat_core::PersistenceGateway;
use beat_playback::{PlaylistOrder, Session};
use serde::Serialize;
use std::io::Write;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// One line of track output
pub fn track_line(track: &Track) -> String {
    let mut line = format!("{:>4}  {}", track.id, track.title);
    if !track.artist.is_empty() {
        line.push_str(" - ");
        line.push_str(&track.artist);
    }
    if !track.genre.is_empty() {
        line.push_str(&format!(" [{}]", track.genre));
    }
    line.push_str(&format!(
        " ({})",
        format_duration(u64::from(track.duration_seconds))
    ));
    line
}

fn playlist_line<G: PersistenceGateway>(session: &Session<G>, playlist: &PlaylistOrder) -> String {
    let duration = session
        .library()
        .playlist_duration(playlist.id())
        .unwrap_or_default();
    format!(
        "{:>4}  {} ({} tracks, {})",
        playlist.id(),
        playlist.name(),
        playlist.count(),
        format_duration(duration.as_secs())
    )
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn run_tracks<G, W>(
    session: &mut Session<G>,
    command: TrackCommand,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    G: PersistenceGateway,
    W: Write,
{
    match command {
        TrackCommand::List { filter } => {
            let tracks = session
                .library()
                .filter_tracks(filter.as_deref().unwrap_or(""));
            match format {
                OutputFormat::Json => write_json(out, &tracks)?,
                OutputFormat::Text => {
                    for track in &tracks {
                        writeln!(out, "{}", track_line(track))?;
                    }
                    let total: u64 = tracks.iter().map(|t| u64::from(t.duration_seconds)).sum();
                    writeln!(out, "{} tracks, {}", tracks.len(), format_duration(total))?;
                }
            }
        }

        TrackCommand::Add {
            title,
            artist,
            genre,
            path,
            duration,
        } => {
            let duration_seconds = parse_duration(&duration)?;
            let track = session.create_track(CreateTrack {
                title,
                artist,
                genre,
                path,
                duration_seconds,
            })?;
            tracing::info!("Added track {}", track.id);
            match format {
                OutputFormat::Json => write_json(out, track)?,
                OutputFormat::Text => writeln!(out, "Added {}", track_line(track))?,
            }
        }

        TrackCommand::Edit {
            id,
            title,
            artist,
            genre,
        } => {
            let existing = session
                .library()
                .track(id)
                .ok_or_else(|| beat_core::BeatError::not_found("Track", id))?;
            let update = UpdateTrack {
                title: title.unwrap_or_else(|| existing.title.clone()),
                artist: artist.unwrap_or_else(|| existing.artist.clone()),
                genre: genre.unwrap_or_else(|| existing.genre.clone()),
            };
            let track = session.update_track(id, update)?;
            match format {
                OutputFormat::Json => write_json(out, track)?,
                OutputFormat::Text => writeln!(out, "Updated {}", track_line(track))?,
            }
        }

        TrackCommand::Remove { id } => {
            let removed = session.delete_track(id)?;
            tracing::info!("Removed track {}", id);
            match format {
                OutputFormat::Json => write_json(out, &removed)?,
                OutputFormat::Text => writeln!(out, "Removed {}", track_line(&removed))?,
            }
        }
    }

    Ok(())
}

pub fn run_playlists<G, W>(
    session: &mut Session<G>,
    command: PlaylistCommand,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    G: PersistenceGateway,
    W: Write,
{
    match command {
        PlaylistCommand::List { filter } => {
            let playlists = session
                .library()
                .filter_playlists(filter.as_deref().unwrap_or(""));
            match format {
                OutputFormat::Json => {
                    let values: Vec<_> = playlists.iter().map(|p| p.to_playlist()).collect();
                    write_json(out, &values)?;
                }
                OutputFormat::Text => {
                    for playlist in playlists {
                        writeln!(out, "{}", playlist_line(session, playlist))?;
                    }
                }
            }
        }

        PlaylistCommand::Show { id } => {
            let library = session.library();
            let playlist = library
                .playlist(id)
                .ok_or_else(|| beat_core::BeatError::not_found("Playlist", id))?;
            let tracks = library.playlist_tracks(id).unwrap_or_default();
            match format {
                OutputFormat::Json => write_json(out, &tracks)?,
                OutputFormat::Text => {
                    writeln!(out, "{}", playlist_line(session, playlist))?;
                    for (position, track) in tracks.iter().enumerate() {
                        writeln!(out, "{:>3}. {}", position + 1, track_line(track))?;
                    }
                }
            }
        }

        PlaylistCommand::Create { name } => {
            let playlist = session.create_playlist(&name)?;
            let id = playlist.id();
            tracing::info!("Created playlist {}", id);
            write_playlist(session, id, "Created", format, out)?;
        }

        PlaylistCommand::Rename { id, name } => {
            session.rename_playlist(id, &name)?;
            write_playlist(session, id, "Renamed", format, out)?;
        }

        PlaylistCommand::Delete { id } => {
            session.delete_playlist(id)?;
            tracing::info!("Deleted playlist {}", id);
            if format == OutputFormat::Text {
                writeln!(out, "Deleted playlist {id}")?;
            }
        }

        PlaylistCommand::Add { playlist, track } => {
            session.add_to_playlist(playlist, track)?;
            write_playlist(session, playlist, "Updated", format, out)?;
        }

        PlaylistCommand::Remove { playlist, track } => {
            session.remove_from_playlist(playlist, track)?;
            write_playlist(session, playlist, "Updated", format, out)?;
        }

        PlaylistCommand::Up { playlist, track } => {
            session.move_up(playlist, track)?;
            write_playlist(session, playlist, "Updated", format, out)?;
        }

        PlaylistCommand::Down { playlist, track } => {
            session.move_down(playlist, track)?;
            write_playlist(session, playlist, "Updated", format, out)?;
        }
    }

    Ok(())
}

fn write_playlist<G, W>(
    session: &Session<G>,
    id: beat_core::types::PlaylistId,
    verb: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    G: PersistenceGateway,
    W: Write,
{
    let playlist = session
        .library()
        .playlist(id)
        .ok_or_else(|| CliError::Usage(format!("playlist {id} is not loaded")))?;

    match format {
        OutputFormat::Json => write_json(out, &playlist.to_playlist()),
        OutputFormat::Text => {
            writeln!(out, "{verb} {}", playlist_line(session, playlist))?;
            Ok(())
        }
    }
}

pub fn run_genres<G, W>(session: &Session<G>, format: OutputFormat, out: &mut W) -> Result<()>
where
    G: PersistenceGateway,
    W: Write,
{
    let genres = session.genres()?;
    match format {
        OutputFormat::Json => write_json(out, &genres)?,
        OutputFormat::Text => {
            for genre in genres {
                writeln!(out, "{genre}")?;
            }
        }
    }
    Ok(())
}
