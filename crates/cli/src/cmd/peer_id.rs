use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use nodemetrics_signing::{Keypair, NodeKeyFile, SigningProvider};

pub fn load_keypair(key_file: &Path) -> Result<Keypair> {
    NodeKeyFile::load(key_file)
        .and_then(|key| key.keypair())
        .wrap_err_with(|| format!("Failed to load node key from {}", key_file.display()))
}

pub fn run(key_file: &Path) -> Result<()> {
    let keypair = load_keypair(key_file)?;
    println!("{}", keypair.peer_id());
    Ok(())
}
