use libp2p_identity::{Keypair, PublicKey};

use crate::SignError;

/// Holder of a node's private identity key.
///
/// The signature scheme is the one of the key type.
pub trait SigningProvider: Send + Sync {
    /// The public half of the identity key.
    fn public_key(&self) -> PublicKey;

    /// Signs arbitrary bytes.
    fn sign_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, SignError>;

    /// The peer identifier derived from [`SigningProvider::public_key`].
    fn peer_id(&self) -> String {
        nodemetrics_peer::peer_id_of(&self.public_key())
    }
}

impl SigningProvider for Keypair {
    fn public_key(&self) -> PublicKey {
        self.public()
    }

    fn sign_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, SignError> {
        self.sign(bytes)
            .map_err(|e| SignError::Signing(e.to_string()))
    }
}
