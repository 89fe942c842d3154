use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

use nodemetrics_config::{LogFormat, LogLevel};

/// Installs the global subscriber, writing to stderr so that stdout only
/// carries command output.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(log_level: LogLevel, log_format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(log_level)))
        .map_err(|e| eyre!("Invalid log filter: {e}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match log_format {
        LogFormat::Plaintext => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| eyre!("Failed to install log subscriber: {e}"))
}

/// Our own crates log at `log_level`, dependencies only log warnings.
fn default_directive(log_level: LogLevel) -> String {
    format!("warn,nodemetrics={log_level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_scopes_level_to_own_crates() {
        assert_eq!(default_directive(LogLevel::Debug), "warn,nodemetrics=debug");
        assert!(EnvFilter::try_new(default_directive(LogLevel::Trace)).is_ok());
    }
}
