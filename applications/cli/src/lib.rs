//! Beatbone command-line front end
//!
//! Library management commands and an interactive player on top of
//! `beat-playback` sessions. The binary in `main.rs` wires these to the
//! SQLite store; tests drive them with the in-memory gateway.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod player;

pub use config::AppConfig;
pub use error::{CliError, Result};
