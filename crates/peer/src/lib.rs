//! Peer identifiers and the verification keys they embed.
//!
//! A peer identifier is the base58btc encoding of a multihash over the
//! protobuf-encoded public key of the peer. Keys whose encoding fits in
//! [`MAX_INLINE_KEY_LENGTH`] bytes (Ed25519, secp256k1) are stored verbatim
//! under the identity hash, so the key can be recovered from the identifier
//! alone. Larger keys (RSA, ECDSA) are hashed with SHA2-256 and cannot be
//! recovered; such identifiers are well-formed but yield [`ResolveError::NoPublicKey`].

use multihash::Multihash;
use thiserror::Error;

pub use libp2p_identity::{KeyType, PublicKey};

/// Multihash code of the identity "hash", under which keys are inlined.
pub const IDENTITY_CODE: u64 = 0x00;

/// Multihash code of SHA2-256, used for keys too large to inline.
pub const SHA2_256_CODE: u64 = 0x12;

/// Largest protobuf-encoded key that is inlined in a peer identifier.
pub const MAX_INLINE_KEY_LENGTH: usize = 42;

const SHA2_256_LENGTH: usize = 32;

/// Why a peer identifier could not be resolved to a public key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The string is not a well-formed peer identifier.
    #[error("Invalid peer ID format")]
    InvalidPeerId {
        #[source]
        reason: InvalidReason,
    },

    /// The identifier is well-formed, but only carries a hash of the key.
    #[error("Peer ID does not contain a public key")]
    NoPublicKey { code: u64 },
}

/// Detail of an [`ResolveError::InvalidPeerId`] error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("not valid base58: {0}")]
    Base58(String),

    #[error("not a valid multihash: {0}")]
    Multihash(String),

    #[error("unsupported multihash code 0x{0:x}")]
    UnsupportedCode(u64),

    #[error("digest of {actual} bytes, expected {expected}")]
    DigestLength { expected: usize, actual: usize },

    #[error("inline key is not a valid protobuf-encoded public key: {0}")]
    KeyDecoding(String),
}

impl From<InvalidReason> for ResolveError {
    fn from(reason: InvalidReason) -> Self {
        Self::InvalidPeerId { reason }
    }
}

/// Derives the public key embedded in a peer identifier.
///
/// This is a pure function of the string: nothing is looked up.
pub fn resolve_public_key(peer_id: &str) -> Result<PublicKey, ResolveError> {
    let bytes = bs58::decode(peer_id)
        .into_vec()
        .map_err(|e| InvalidReason::Base58(e.to_string()))?;

    let multihash =
        Multihash::<64>::from_bytes(&bytes).map_err(|e| InvalidReason::Multihash(e.to_string()))?;

    let digest = multihash.digest();

    match multihash.code() {
        IDENTITY_CODE => {
            if digest.len() > MAX_INLINE_KEY_LENGTH {
                return Err(InvalidReason::DigestLength {
                    expected: MAX_INLINE_KEY_LENGTH,
                    actual: digest.len(),
                }
                .into());
            }

            let key = PublicKey::try_decode_protobuf(digest)
                .map_err(|e| InvalidReason::KeyDecoding(e.to_string()))?;

            Ok(key)
        }

        SHA2_256_CODE if digest.len() == SHA2_256_LENGTH => Err(ResolveError::NoPublicKey {
            code: SHA2_256_CODE,
        }),

        SHA2_256_CODE => Err(InvalidReason::DigestLength {
            expected: SHA2_256_LENGTH,
            actual: digest.len(),
        }
        .into()),

        code => Err(InvalidReason::UnsupportedCode(code).into()),
    }
}

/// The peer identifier of a public key, in its base58btc string form.
pub fn peer_id_of(public_key: &PublicKey) -> String {
    public_key.to_peer_id().to_base58()
}
