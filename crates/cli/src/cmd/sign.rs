use std::path::Path;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

use nodemetrics_config::Config;
use nodemetrics_schema::{now_iso8601, Environment, SignableMetrics};
use nodemetrics_signing::{sign, Keypair, SigningProvider, WrappedMetrics};

use super::peer_id::load_keypair;

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct SignCmd {
    /// Number of streams held by the node
    #[arg(long, value_name = "COUNT")]
    pub total_streams: u64,

    /// Number of CIDs pinned by the node
    #[arg(long, value_name = "COUNT")]
    pub total_pinned_cids: u64,

    /// Collection time as an RFC 3339 timestamp (default: now)
    #[arg(long, value_name = "TIMESTAMP")]
    pub collected_at: Option<String>,

    /// Override the IPFS peer identifier from the configuration
    #[arg(long, value_name = "PEER_ID")]
    pub ipfs_peer_id: Option<String>,

    /// Override the environment from the configuration
    #[arg(long)]
    pub environment: Option<Environment>,
}

impl SignCmd {
    pub fn run(&self, config: &Config, key_file: &Path) -> Result<()> {
        let keypair = load_keypair(key_file)?;
        let wrapped = self.sign(config, &keypair)?;

        info!(peer_id = %wrapped.metrics().ceramic_peer_id(), "Signed metrics record");

        let output =
            serde_json::to_string_pretty(&wrapped).wrap_err("Failed to serialize record")?;
        println!("{output}");

        Ok(())
    }

    pub fn sign(&self, config: &Config, keypair: &Keypair) -> Result<WrappedMetrics> {
        let collected_at = match &self.collected_at {
            Some(collected_at) => collected_at.clone(),
            None => now_iso8601()?,
        };

        let metrics = SignableMetrics::builder()
            .ipfs_peer_id(
                self.ipfs_peer_id
                    .clone()
                    .unwrap_or_else(|| config.node.ipfs_peer_id.clone()),
            )
            .ceramic_peer_id(keypair.peer_id())
            .environment(self.environment.unwrap_or(config.node.environment))
            .total_streams(self.total_streams)
            .total_pinned_cids(self.total_pinned_cids)
            .collected_at(collected_at)
            .build()
            .wrap_err("Invalid metrics record")?;

        sign(&metrics, keypair).wrap_err("Failed to sign metrics record")
    }
}
