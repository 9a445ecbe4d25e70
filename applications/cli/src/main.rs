/// Beatbone - music library manager and player
use anyhow::Context;
use beat_playback::{PlaybackMode, Session};
use beat_storage::LocalStorageContext;
use beatbone_cli::cli::{Cli, Commands};
use beatbone_cli::commands::{run_genres, run_playlists, run_tracks, OutputFormat};
use beatbone_cli::config::AppConfig;
use beatbone_cli::player::run_player;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beatbone=info,beatbone_cli=info,beat_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::info!("Opening library at {}", config.storage.database_url);
    let storage = LocalStorageContext::open(&config.storage.database_url)
        .context("failed to open the library database")?;

    let owner = config.session.owner();
    storage.ensure_user(owner)?;

    let mut session = Session::open(storage, owner, &config.playback)?;
    tracing::info!(
        "Loaded {} tracks and {} playlists",
        session.library().track_count(),
        session.library().playlists().len()
    );

    let format = OutputFormat::from_json_flag(cli.json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Tracks(command) => run_tracks(&mut session, command, format, &mut out)?,
        Commands::Playlists(command) => run_playlists(&mut session, command, format, &mut out)?,
        Commands::Genres => run_genres(&session, format, &mut out)?,
        Commands::Play { playlist, shuffle } => {
            if let Some(id) = playlist {
                if session.library().playlist(id).is_none() {
                    anyhow::bail!("playlist {id} does not exist");
                }
                session.set_mode(PlaybackMode::Playlist, Some(id));
            }
            if shuffle && !session.queue().is_shuffle() {
                session.toggle_shuffle();
            }

            let stdin = std::io::stdin();
            run_player(&mut session, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
