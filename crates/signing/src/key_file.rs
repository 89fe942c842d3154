use core::fmt;
use std::fs;
use std::path::Path;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use libp2p_identity::Keypair;
use serde::{Deserialize, Serialize};

use crate::KeyFileError;

/// On-disk form of a node identity key.
///
/// ```json
/// { "peer_id": "12D3KooW…", "private_key": "<base64 protobuf keypair>" }
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeKeyFile {
    /// Peer identifier of the key, kept alongside it for operators
    pub peer_id: String,

    /// Base64-encoded protobuf encoding of the keypair
    pub private_key: String,
}

impl NodeKeyFile {
    /// Generates a fresh Ed25519 identity.
    pub fn generate() -> Result<Self, KeyFileError> {
        Self::from_keypair(&Keypair::generate_ed25519())
    }

    pub fn from_keypair(keypair: &Keypair) -> Result<Self, KeyFileError> {
        let encoded = keypair
            .to_protobuf_encoding()
            .map_err(|e| KeyFileError::Decoding(e.to_string()))?;

        Ok(Self {
            peer_id: keypair.public().to_peer_id().to_base58(),
            private_key: BASE64_STANDARD.encode(encoded),
        })
    }

    /// Decodes the keypair and checks it against the declared peer identifier.
    pub fn keypair(&self) -> Result<Keypair, KeyFileError> {
        let bytes = BASE64_STANDARD.decode(&self.private_key)?;
        let keypair = Keypair::from_protobuf_encoding(&bytes)
            .map_err(|e| KeyFileError::Decoding(e.to_string()))?;

        let actual = keypair.public().to_peer_id().to_base58();
        if actual != self.peer_id {
            return Err(KeyFileError::PeerIdMismatch {
                declared: self.peer_id.clone(),
                actual,
            });
        }

        Ok(keypair)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeyFileError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| KeyFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), KeyFileError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).map_err(|source| KeyFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl fmt::Debug for NodeKeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeKeyFile")
            .field("peer_id", &self.peer_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
