use tracing::{debug, warn};

use nodemetrics_codec::canonicalize;
use nodemetrics_schema::{Signature, SignableMetrics, WrappedMetrics};

use crate::{SignError, SigningProvider};

/// Signs a metrics record and wraps it together with its signature.
///
/// The record is validated, encoded canonically, and the canonical bytes are
/// signed with the provider's key. Signing with a key that does not belong to
/// the record's `ceramicPeerId` succeeds, but the result will not verify.
pub fn sign<P>(metrics: &SignableMetrics, signer: &P) -> Result<WrappedMetrics, SignError>
where
    P: SigningProvider + ?Sized,
{
    let canonical = canonicalize(metrics)?;

    let signer_peer_id = signer.peer_id();
    if signer_peer_id != metrics.ceramic_peer_id() {
        warn!(
            claimed = %metrics.ceramic_peer_id(),
            signer = %signer_peer_id,
            "Signing key does not belong to the claimed peer ID, record will fail verification"
        );
    }

    let signature = signer.sign_bytes(canonical.as_bytes())?;

    debug!(
        peer_id = %signer_peer_id,
        canonical_len = canonical.len(),
        signature_len = signature.len(),
        "Signed metrics record"
    );

    Ok(WrappedMetrics::new(
        metrics.clone(),
        Signature::new(signature),
    ))
}
