use serde_json::Value;
use tracing::{debug, trace};

use nodemetrics_codec::{canonicalize, CodecError};
use nodemetrics_peer::resolve_public_key;
use nodemetrics_schema::{validate_wrapped, SignableMetrics, WrappedMetrics};

use crate::{ValidationResult, VerificationError};

/// Returns the fields covered by the signature, i.e. everything but the signature itself.
pub fn extract_signable_data(wrapped: &WrappedMetrics) -> SignableMetrics {
    wrapped.metrics().clone()
}

/// Verifies that a wrapped record was signed by the key embedded in its `ceramicPeerId`.
///
/// A single verification attempt is authoritative.
pub fn verify_metrics(wrapped: &WrappedMetrics) -> Result<(), VerificationError> {
    let signable = extract_signable_data(wrapped);

    let canonical = canonicalize(&signable).map_err(|e| match e {
        CodecError::Structural(e) => VerificationError::Structural(e),
        CodecError::Json(e) => VerificationError::Encoding(e.to_string()),
    })?;

    let peer_id = signable.ceramic_peer_id();
    let public_key = resolve_public_key(peer_id)?;

    trace!(%peer_id, key_type = ?public_key.key_type(), "Resolved public key");

    if public_key.verify(canonical.as_bytes(), wrapped.signature().as_bytes()) {
        Ok(())
    } else {
        Err(VerificationError::SignatureMismatch)
    }
}

/// Validates an untrusted candidate structurally and cryptographically,
/// returning the typed record on success.
pub fn verify_candidate(candidate: &Value) -> Result<WrappedMetrics, VerificationError> {
    let wrapped = validate_wrapped(candidate)?;

    match verify_metrics(&wrapped) {
        Ok(()) => {
            debug!(peer_id = %wrapped.metrics().ceramic_peer_id(), "Metrics signature verified");
            Ok(wrapped)
        }
        Err(e) => {
            debug!(
                peer_id = %wrapped.metrics().ceramic_peer_id(),
                error = %e,
                kind = %e.kind(),
                "Metrics signature rejected"
            );
            Err(e)
        }
    }
}

/// Confirms authorship and integrity of an untrusted candidate record.
///
/// Structural problems short-circuit before any cryptographic work. Peer
/// identifier errors are surfaced verbatim; any other mismatch is reported as
/// `Cryptographic signature verification failed`.
pub fn validate_metrics_signature(candidate: &Value) -> ValidationResult {
    verify_candidate(candidate).into()
}
