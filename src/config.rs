//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::audio::AudioBackend;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "interval-timer")]
#[command(about = "Stopwatch, countdown and interval training timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File the timer configuration is saved to
    #[arg(short, long, default_value = "interval-timer.json")]
    pub config_file: PathBuf,

    /// Keep configuration in memory only
    #[arg(long, conflicts_with = "config_file")]
    pub ephemeral: bool,

    /// Configuration file of a linked peer to mirror saves to and poll for changes
    #[arg(long)]
    pub peer_file: Option<PathBuf>,

    /// Seconds between polls of the peer file
    #[arg(long, default_value = "5")]
    pub sync_interval: u64,

    /// How audio cues are played
    #[arg(short, long, value_enum, default_value = "bell")]
    pub audio: AudioBackend,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Poll period for the peer file, never shorter than one second
    pub fn sync_period(&self) -> Duration {
        Duration::from_secs(self.sync_interval.max(1))
    }
}
