//! Init command

use std::path::Path;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use nodemetrics_config::Config;
use nodemetrics_signing::NodeKeyFile;

use super::save;

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct InitCmd {
    /// Overwrite existing configuration and key files
    #[arg(long)]
    pub overwrite: bool,
}

impl InitCmd {
    pub fn run(&self, config_file: &Path, key_file: &Path) -> Result<()> {
        if config_file.exists() && !self.overwrite {
            warn!(file = %config_file.display(), "Configuration file already exists, skipping");
        } else {
            save_config(config_file, &Config::default())?;
            info!(file = %config_file.display(), "Saved configuration");
        }

        if key_file.exists() && !self.overwrite {
            warn!(file = %key_file.display(), "Key file already exists, skipping");
        } else {
            let key = NodeKeyFile::generate()?;
            save_key_file(key_file, &key)?;
            info!(file = %key_file.display(), peer_id = %key.peer_id, "Saved node key");
        }

        Ok(())
    }
}

pub fn save_config(config_file: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).wrap_err("Failed to serialize configuration")?;
    save(config_file, &content)
}

pub fn save_key_file(key_file: &Path, key: &NodeKeyFile) -> Result<()> {
    let content = serde_json::to_string_pretty(key).wrap_err("Failed to serialize node key")?;
    save(key_file, &content)
}
