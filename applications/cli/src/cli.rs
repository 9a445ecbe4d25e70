/// Command-line interface definition
use beat_core::types::{PlaylistId, TrackId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "beatbone")]
#[command(about = "Beatbone music library manager", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage library tracks
    #[command(subcommand)]
    Tracks(TrackCommand),

    /// Manage playlists and their order
    #[command(subcommand)]
    Playlists(PlaylistCommand),

    /// List known genres
    Genres,

    /// Start an interactive playback session
    Play {
        /// Play from this playlist instead of the whole library
        #[arg(short, long)]
        playlist: Option<PlaylistId>,

        /// Start with shuffle enabled
        #[arg(short, long)]
        shuffle: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TrackCommand {
    /// List tracks in library order
    List {
        /// Only tracks whose title or artist starts with this prefix
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Add a track to the library
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        artist: String,

        #[arg(short, long, default_value = "")]
        genre: String,

        /// Location of the audio file
        #[arg(short, long)]
        path: PathBuf,

        /// Duration as `ss`, `m:ss` or `h:mm:ss`
        #[arg(short, long, default_value = "0")]
        duration: String,
    },

    /// Edit title, artist or genre of a track
    Edit {
        id: TrackId,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        artist: Option<String>,

        #[arg(short, long)]
        genre: Option<String>,
    },

    /// Delete a track from the library and every playlist
    Remove { id: TrackId },
}

#[derive(Debug, Subcommand)]
pub enum PlaylistCommand {
    /// List playlists
    List {
        /// Only playlists whose name starts with this prefix
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show the tracks of a playlist in order
    Show { id: PlaylistId },

    /// Create an empty playlist
    Create { name: String },

    /// Rename a playlist
    Rename { id: PlaylistId, name: String },

    /// Delete a playlist (its tracks stay in the library)
    Delete { id: PlaylistId },

    /// Append a track to a playlist
    Add { playlist: PlaylistId, track: TrackId },

    /// Remove a track from a playlist
    Remove { playlist: PlaylistId, track: TrackId },

    /// Move a track one position up
    Up { playlist: PlaylistId, track: TrackId },

    /// Move a track one position down
    Down { playlist: PlaylistId, track: TrackId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_subcommands() {
        let cli = Cli::try_parse_from(["beatbone", "--json", "playlists", "up", "3", "7"]).unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Playlists(PlaylistCommand::Up { playlist, track }) => {
                assert_eq!(playlist, PlaylistId::new(3));
                assert_eq!(track, TrackId::new(7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["beatbone", "tracks", "remove", "abc"]).is_err());
    }

    #[test]
    fn verifies_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
