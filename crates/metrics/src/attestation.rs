use prometheus_client::encoding::EncodeLabelSet;

use nodemetrics_validator::RejectionKind;

use crate::{Counter, Family, SharedRegistry};

/// Label attached to rejected records.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RejectionLabel {
    reason: String,
}

impl From<RejectionKind> for RejectionLabel {
    fn from(kind: RejectionKind) -> Self {
        Self {
            reason: kind.as_str().to_string(),
        }
    }
}

/// Counters for records going through the attestation pipeline.
///
/// Cloning is cheap and all clones share the same counters.
#[derive(Clone, Debug, Default)]
pub struct AttestationMetrics {
    records_signed: Counter,
    records_accepted: Counter,
    records_rejected: Family<RejectionLabel, Counter>,
}

impl AttestationMetrics {
    pub const PREFIX: &'static str = "nodemetrics";

    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the counters and registers them under [`Self::PREFIX`].
    pub fn register(registry: &SharedRegistry) -> Self {
        let metrics = Self::new();

        registry.with_prefix(Self::PREFIX, |registry| {
            registry.register(
                "records_signed",
                "Records signed by this node",
                metrics.records_signed.clone(),
            );

            registry.register(
                "records_accepted",
                "Records that passed structural and signature validation",
                metrics.records_accepted.clone(),
            );

            registry.register(
                "records_rejected",
                "Records rejected during validation, by reason",
                metrics.records_rejected.clone(),
            );
        });

        metrics
    }

    pub fn record_signed(&self) {
        self.records_signed.inc();
    }

    pub fn record_accepted(&self) {
        self.records_accepted.inc();
    }

    pub fn record_rejected(&self, kind: RejectionKind) {
        self.records_rejected
            .get_or_create(&RejectionLabel::from(kind))
            .inc();
    }

    pub fn signed(&self) -> u64 {
        self.records_signed.get()
    }

    pub fn accepted(&self) -> u64 {
        self.records_accepted.get()
    }

    pub fn rejected(&self, kind: RejectionKind) -> u64 {
        self.records_rejected
            .get_or_create(&RejectionLabel::from(kind))
            .get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_reason() {
        let metrics = AttestationMetrics::new();

        metrics.record_signed();
        metrics.record_accepted();
        metrics.record_accepted();
        metrics.record_rejected(RejectionKind::SignatureMismatch);

        assert_eq!(metrics.signed(), 1);
        assert_eq!(metrics.accepted(), 2);
        assert_eq!(metrics.rejected(RejectionKind::SignatureMismatch), 1);
        assert_eq!(metrics.rejected(RejectionKind::Structural), 0);
    }

    #[test]
    fn clones_share_counters() {
        let metrics = AttestationMetrics::new();
        metrics.clone().record_rejected(RejectionKind::NoPublicKey);

        assert_eq!(metrics.rejected(RejectionKind::NoPublicKey), 1);
    }

    #[test]
    fn exports_with_prefix() {
        let registry = SharedRegistry::default();
        let metrics = AttestationMetrics::register(&registry);

        metrics.record_signed();
        metrics.record_rejected(RejectionKind::InvalidPeerId);

        let mut text = String::new();
        registry.export(&mut text).unwrap();

        assert!(text.contains("# TYPE nodemetrics_records_signed counter"));
        assert!(text.contains("nodemetrics_records_signed_total 1"));
        assert!(text.contains("nodemetrics_records_accepted_total 0"));
        assert!(text.contains(r#"nodemetrics_records_rejected_total{reason="invalid_peer_id"} 1"#));
    }
}
