//! Command-line interface arguments
//!
//! Configuration is read from the file given with `--config`, or from
//! `$HOME/.nodemetrics/config/config.toml` by default. Logging settings can be
//! overridden on the command-line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use directories::BaseDirs;

use nodemetrics_config::{Config, LogFormat, LogLevel};

use crate::cmd::canonicalize::CanonicalizeCmd;
use crate::cmd::ingest::IngestCmd;
use crate::cmd::init::InitCmd;
use crate::cmd::sign::SignCmd;
use crate::cmd::verify::VerifyCmd;

const APP_FOLDER: &str = ".nodemetrics";
const CONFIG_FILE: &str = "config.toml";

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Home directory (default: `~/.nodemetrics`)
    #[arg(long, global = true, value_name = "HOME_DIR", env = "NODEMETRICS_HOME")]
    pub home: Option<PathBuf>,

    /// Config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (default: `info`)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log format (default: `plaintext`)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum Commands {
    /// Write a default configuration and a fresh node key
    Init(InitCmd),

    /// Print the peer identifier of the node key
    PeerId,

    /// Sign the node's metrics and print the wrapped record
    Sign(SignCmd),

    /// Validate one wrapped record or an array of them
    Verify(VerifyCmd),

    /// Print the canonical encoding of a record
    Canonicalize(CanonicalizeCmd),

    /// Validate an array of published records and report what would be ingested
    Ingest(IngestCmd),
}

impl Args {
    pub fn new() -> Args {
        Args::parse()
    }

    /// Typically `$HOME/.nodemetrics`, dependent on the operating system.
    pub fn get_home_dir(&self) -> Result<PathBuf> {
        match &self.home {
            Some(dir) => Ok(dir.clone()),
            None => Ok(BaseDirs::new()
                .ok_or_else(|| eyre!("could not determine home directory path"))?
                .home_dir()
                .join(APP_FOLDER)),
        }
    }

    pub fn get_config_dir(&self) -> Result<PathBuf> {
        Ok(self.get_home_dir()?.join("config"))
    }

    pub fn get_config_file_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(self.get_config_dir()?.join(CONFIG_FILE)),
        }
    }

    /// The node key file, resolved against the directory of the config file.
    pub fn get_key_file_path(&self, config: &Config) -> Result<PathBuf> {
        let config_file = self.get_config_file_path()?;
        let base = config_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();

        Ok(config.node.key_file_in(base))
    }
}
