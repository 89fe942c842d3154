use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde_json::Value;

pub mod canonicalize;
pub mod ingest;
pub mod init;
pub mod peer_id;
pub mod sign;
pub mod verify;

/// Reads a JSON document from `input`, or from stdin when absent or `-`.
pub(crate) fn read_json(input: Option<&Path>) -> Result<Value> {
    let content = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .wrap_err("Failed to read stdin")?;
            content
        }
    };

    serde_json::from_str(&content).wrap_err("Input is not valid JSON")
}

/// Writes `data` to `path`, creating parent directories as needed.
pub(crate) fn save(path: &Path, data: &str) -> Result<()> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|e| {
            eyre!(
                "Failed to create parent directory {}: {e:?}",
                parent_dir.display()
            )
        })?;
    }

    let mut f = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| eyre!("Failed to create file at {}: {e:?}", path.display()))?;

    f.write_all(data.as_bytes())
        .map_err(|e| eyre!("Failed to write to {}: {e:?}", path.display()))?;

    Ok(())
}
