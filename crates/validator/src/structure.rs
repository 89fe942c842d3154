use serde_json::Value;

use nodemetrics_schema::validate_wrapped;

use crate::ValidationResult;

/// Checks a candidate against the wrapped-record contract, without touching the signature.
///
/// Meant as a cheap admission filter in front of [`crate::validate_metrics_signature`].
pub fn validate_metrics_structure(candidate: &Value) -> ValidationResult {
    validate_wrapped(candidate).into()
}
