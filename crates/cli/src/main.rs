use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::{debug, info, trace, warn};

use nodemetrics_config::{load_config, Config};

use args::{Args, Commands};

mod args;
mod cmd;
mod logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::new();

    let config_file = args.get_config_file_path()?;
    let opt_config = load_config(&config_file, None)
        .map_err(|error| eyre!("Failed to load configuration file: {error}"));

    // Command-line parameters take precedence over the configuration file.
    let mut logging = opt_config
        .as_ref()
        .map(|c| c.logging)
        .unwrap_or_default();
    if let Some(log_level) = args.log_level {
        logging.log_level = log_level;
    }
    if let Some(log_format) = args.log_format {
        logging.log_format = log_format;
    }

    logging::init(logging.log_level, logging.log_format)?;

    trace!("Command-line parameters: {args:?}");

    match &args.command {
        Commands::Init(cmd) => {
            let key_file = args.get_key_file_path(&Config::default())?;
            cmd.run(&config_file, &key_file)
        }

        Commands::PeerId => {
            let config = loaded(opt_config, &config_file)?;
            cmd::peer_id::run(&args.get_key_file_path(&config)?)
        }

        Commands::Sign(cmd) => {
            let config = loaded(opt_config, &config_file)?;
            cmd.run(&config, &args.get_key_file_path(&config)?)
        }

        Commands::Verify(cmd) => cmd.run(),

        Commands::Canonicalize(cmd) => cmd.run(),

        Commands::Ingest(cmd) => {
            let config = config_or_default(opt_config, &config_file);
            cmd.run(&config.collector).await
        }
    }
}

/// Ingestion needs no node identity, so it runs on defaults when the
/// configuration cannot be loaded.
fn config_or_default(config: Result<Config>, config_file: &std::path::Path) -> Config {
    match config {
        Ok(config) => config,
        Err(e) if config_file.exists() => {
            warn!(
                file = %config_file.display(),
                error = %e,
                "Ignoring unreadable configuration, using defaults"
            );
            Config::default()
        }
        Err(e) => {
            debug!(
                file = %config_file.display(),
                error = %e,
                "No configuration, using defaults"
            );
            Config::default()
        }
    }
}

fn loaded(config: Result<Config>, config_file: &std::path::Path) -> Result<Config> {
    let config = config.wrap_err("Run `nodemetrics init` to create a configuration")?;
    info!(file = %config_file.display(), "Loaded configuration");
    trace!(?config, "Configuration");
    Ok(config)
}
