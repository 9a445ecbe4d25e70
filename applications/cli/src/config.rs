/// Application configuration
use crate::error::{CliError, Result};
use beat_core::types::UserId;
use beat_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "beatbone.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Library owner the session acts for
    #[serde(default = "default_owner_id")]
    pub owner_id: i64,
}

impl SessionSettings {
    pub fn owner(&self) -> UserId {
        UserId::new(self.owner_id)
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `beatbone.toml` is read when
    /// present. Environment variables prefixed with `BEATBONE_` override
    /// both, with `__` between nested keys
    /// (`BEATBONE_STORAGE__DATABASE_URL`, `BEATBONE_PLAYBACK__DEBOUNCE_MS`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("BEATBONE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "database URL is required (set BEATBONE_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.session.owner_id <= 0 {
            return Err(CliError::Config(format!(
                "owner id must be positive, got {}",
                self.session.owner_id
            )));
        }

        if self.playback.history_size == 0 {
            return Err(CliError::Config(
                "playback.history_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://beatbone.db".to_string()
}

fn default_session() -> SessionSettings {
    SessionSettings {
        owner_id: default_owner_id(),
    }
}

fn default_owner_id() -> i64 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playback: PlaybackConfig::default(),
            session: default_session(),
        }
    }
}
