use clap::Parser;
use std::path::PathBuf;

use crate::model::HoleCount;

/// Sentinel for `--store` that keeps everything in memory.
pub const MEMORY_STORE: &str = ":memory:";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite file holding scores, clubs, accounts and saved games. Use `:memory:` for a throwaway store.
    #[arg(short = 's', long, value_name = "STORE", default_value = "greenway.db")]
    pub store: String,
    #[arg(short = 'b', long, value_name = "BIND_ADDR", default_value = "0.0.0.0:5201")]
    pub bind: String,
    /// Hole count the scorecard opens with.
    #[arg(
        long,
        value_name = "HOLES",
        default_value = "18",
        value_parser = crate::args::validation::check_hole_count
    )]
    pub holes: HoleCount,
    #[arg(
        short = 'l',
        long,
        value_name = "LOG_LEVEL",
        default_value = "info",
        value_parser = crate::args::validation::check_log_level
    )]
    pub log_level: String,
    /// Write rotating log files here instead of stderr.
    #[arg(long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, value_name = "STATIC_DIR", default_value = "./static")]
    pub static_dir: PathBuf,
    /// Base URL of the remote session backend. Sync is off unless both url and key are set.
    #[arg(long, value_name = "SYNC_URL", env = "GREENWAY_SYNC_URL")]
    pub sync_url: Option<String>,
    #[arg(long, value_name = "SYNC_KEY", env = "GREENWAY_SYNC_KEY", hide_env_values = true)]
    pub sync_key: Option<String>,
    #[arg(long, value_name = "SECONDS", default_value = "3")]
    pub sync_poll_secs: u64,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    /// `None` means the in-memory store.
    pub store_path: Option<PathBuf>,
    pub bind: String,
    pub holes: HoleCount,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub static_dir: PathBuf,
    pub sync_url: Option<String>,
    pub sync_key: Option<String>,
    pub sync_poll_secs: u64,
}
