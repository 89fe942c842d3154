//! Consumer side of the attestation protocol.
//!
//! Records arrive from untrusted sources as JSON of unknown shape. They are
//! first checked against the contract ([`validate_metrics_structure`]), which is
//! cheap, then cryptographically ([`validate_metrics_signature`]): the signable
//! fields are re-encoded canonically and the attached signature is verified
//! against the public key embedded in the record's `ceramicPeerId`.
//!
//! Both validators return a [`ValidationResult`] and never fail, so that batches
//! of untrusted input can be processed without error-driven control flow.

mod error;
pub use error::{RejectionKind, VerificationError};

mod result;
pub use result::ValidationResult;

mod signature;
pub use signature::{
    extract_signable_data, validate_metrics_signature, verify_candidate, verify_metrics,
};

mod structure;
pub use structure::validate_metrics_structure;
