use std::io;
use std::path::PathBuf;

use nodemetrics_codec::CodecError;
use thiserror::Error;

/// Failure to produce a signed record.
#[derive(Debug, Error)]
pub enum SignError {
    #[error("Cannot sign metrics: {0}")]
    Encoding(#[from] CodecError),

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Failure to read or write a node key file.
#[derive(Debug, Error)]
pub enum KeyFileError {
    #[error("Failed to access key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed key file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Private key is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Private key cannot be decoded: {0}")]
    Decoding(String),

    #[error("Key file declares peer ID {declared} but the key belongs to {actual}")]
    PeerIdMismatch { declared: String, actual: String },
}
