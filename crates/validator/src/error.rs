use core::fmt;

use nodemetrics_peer::ResolveError;
use nodemetrics_schema::StructuralError;
use thiserror::Error;

/// Why a wrapped record was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("Failed to encode canonical bytes: {0}")]
    Encoding(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Cryptographic signature verification failed")]
    SignatureMismatch,
}

impl VerificationError {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::Structural(_) | Self::Encoding(_) => RejectionKind::Structural,
            Self::Resolve(ResolveError::InvalidPeerId { .. }) => RejectionKind::InvalidPeerId,
            Self::Resolve(ResolveError::NoPublicKey { .. }) => RejectionKind::NoPublicKey,
            Self::SignatureMismatch => RejectionKind::SignatureMismatch,
        }
    }
}

/// Coarse classification of a rejection, for counting and routing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectionKind {
    /// Shape, type or range violation
    Structural,
    /// Malformed peer identifier
    InvalidPeerId,
    /// Well-formed peer identifier without an inline public key
    NoPublicKey,
    /// Signature does not match the record and key
    SignatureMismatch,
}

impl RejectionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::InvalidPeerId => "invalid_peer_id",
            Self::NoPublicKey => "no_public_key",
            Self::SignatureMismatch => "signature_mismatch",
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
