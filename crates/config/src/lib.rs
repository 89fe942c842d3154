//! Configuration for the node metrics attestation tools.
//!
//! Configuration is read from a TOML file and layered with environment
//! variables. Variables are named after the path of the setting, upper-cased
//! and separated by `__`, e.g. `NODEMETRICS__COLLECTOR__PAGE_SIZE=50`.

use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use nodemetrics_schema::Environment;

mod utils;

/// Prefix of the environment variables overriding the configuration file.
pub const ENV_PREFIX: &str = "NODEMETRICS";

/// Node metrics configuration options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Identity of the reporting node
    #[serde(default)]
    pub node: NodeConfig,

    /// Log configuration options
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ingestion configuration options
    #[serde(default)]
    pub collector: CollectorConfig,
}

/// Identity of the reporting node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// IPFS peer identifier reported in published records
    #[serde(default)]
    pub ipfs_peer_id: String,

    /// Deployment this node belongs to
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Path to the node identity key file
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,
}

fn default_environment() -> Environment {
    Environment::Local
}

fn default_key_file() -> PathBuf {
    PathBuf::from("node_key.json")
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            ipfs_peer_id: String::new(),
            environment: default_environment(),
            key_file: default_key_file(),
        }
    }
}

impl NodeConfig {
    /// The key file path, resolved against `base` when relative.
    pub fn key_file_in(&self, base: impl AsRef<Path>) -> PathBuf {
        if self.key_file.is_absolute() {
            self.key_file.clone()
        } else {
            base.as_ref().join(&self.key_file)
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            e => Err(format!("Invalid log level: {e}")),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plaintext,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plaintext" => Ok(LogFormat::Plaintext),
            "json" => Ok(LogFormat::Json),
            e => Err(format!("Invalid log format: {e}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Plaintext => f.write_str("plaintext"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Ingestion of published records
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Model under which wrapped records are published and queried
    #[serde(default = "default_model")]
    pub model: String,

    /// Number of documents fetched per page
    #[serde(
        default = "default_page_size",
        deserialize_with = "utils::usize_from_anything"
    )]
    pub page_size: usize,
}

fn default_model() -> String {
    "nodemetrics.wrapped.v1".to_string()
}

fn default_page_size() -> usize {
    100
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            page_size: default_page_size(),
        }
    }
}

/// Parses the provided config file and layers the environment variables
/// starting with `prefix` (default: [`ENV_PREFIX`]) on top of it.
pub fn load_config(
    path: impl AsRef<Path>,
    prefix: Option<&str>,
) -> Result<Config, ::config::ConfigError> {
    load(
        path.as_ref(),
        ::config::Environment::with_prefix(prefix.unwrap_or(ENV_PREFIX)).separator("__"),
    )
}

fn load(path: &Path, environment: ::config::Environment) -> Result<Config, ::config::ConfigError> {
    ::config::Config::builder()
        .add_source(::config::File::from(path))
        .add_source(environment)
        .build()?
        .try_deserialize()
}
