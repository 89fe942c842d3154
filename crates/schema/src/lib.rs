//! Contract layer for attested node metrics.
//!
//! Declares the shape of a [`SignableMetrics`] record, of the signed
//! [`WrappedMetrics`] envelope, and the single canonical field order
//! ([`SIGNABLE_FIELDS`]) that every encoder of these records must walk.

mod environment;
pub use environment::Environment;

mod error;
pub use error::{StructuralError, TimestampError};

mod field;
pub use field::{Field, FieldValue, SIGNABLE_FIELDS};

mod metrics;
pub use metrics::{SignableMetrics, SignableMetricsBuilder};

mod timestamp;
pub use timestamp::{format_iso8601, now_iso8601, parse_iso8601};

mod validate;
pub use validate::{validate_signable, validate_wrapped, MAX_SAFE_INTEGER};

mod wrapped;
pub use wrapped::{Signature, WrappedMetrics};
