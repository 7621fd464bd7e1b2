use clap::Parser;
use std::path::PathBuf;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, MEMORY_STORE};

use crate::sync::SyncConfig;

/// # Errors
///
/// Will return `Err` if the arguments are inconsistent
pub fn args_checks() -> Result<CleanArgs, String> {
    let mut args = Args::parse();
    args.validate()?;
    Ok(CleanArgs::new(args))
}

impl Args {
    /// # Errors
    ///
    /// Will return `Err` if the store location or sync settings are unusable
    pub fn validate(&mut self) -> Result<(), String> {
        if self.store != MEMORY_STORE {
            validation::check_store_path(&PathBuf::from(&self.store))?;
        }
        // Blank values from the environment count as unset.
        self.sync_url = self.sync_url.take().filter(|u| !u.trim().is_empty());
        self.sync_key = self.sync_key.take().filter(|k| !k.trim().is_empty());
        if let Some(url) = &self.sync_url {
            validation::check_sync_url(url)?;
            if self.sync_key.is_none() {
                return Err("A sync key is required when a sync url is given.".to_string());
            }
        }
        if self.sync_poll_secs == 0 {
            return Err("The sync poll interval must be at least one second.".to_string());
        }
        Ok(())
    }
}

impl CleanArgs {
    #[must_use]
    pub fn new(args: Args) -> Self {
        let store_path = (args.store != MEMORY_STORE).then(|| PathBuf::from(args.store));
        CleanArgs {
            store_path,
            bind: args.bind,
            holes: args.holes,
            log_level: args.log_level,
            log_dir: args.log_dir,
            static_dir: args.static_dir,
            sync_url: args.sync_url,
            sync_key: args.sync_key,
            sync_poll_secs: args.sync_poll_secs,
        }
    }

    #[must_use]
    pub fn sync_config(&self) -> Option<SyncConfig> {
        SyncConfig::from_parts(
            self.sync_url.clone(),
            self.sync_key.clone(),
            self.sync_poll_secs,
        )
    }
}
