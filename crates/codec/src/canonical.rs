use core::fmt;

use bytes::Bytes;
use serde::ser::{SerializeMap, Serializer};

use nodemetrics_schema::{validate_signable, SignableMetrics, SIGNABLE_FIELDS};

use crate::CodecError;

/// The deterministic encoding of a [`SignableMetrics`] record.
///
/// This is the exact input to signing and verification. It is derived on
/// demand and never persisted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Bytes);

impl CanonicalBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for CanonicalBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalBytes({})", String::from_utf8_lossy(&self.0))
    }
}

/// Encodes a record into its canonical bytes.
///
/// The encoding is a compact JSON object:
///
/// ```text
/// {"ipfsPeerId":"…","ceramicPeerId":"…","environment":"testnet","totalStreams":5,"totalPinnedCids":12,"collectedAt":"…"}
/// ```
///
/// - keys appear in the order of [`SIGNABLE_FIELDS`], never a container's iteration order
/// - no whitespace between tokens
/// - strings are UTF-8 with the minimal JSON escapes (`"`, `\`, and control characters)
/// - integers are plain decimal without sign, leading zeros or fraction
/// - the environment is written as its lowercase literal
///
/// The record is re-validated first, so this is safe to call on any value.
pub fn canonicalize(metrics: &SignableMetrics) -> Result<CanonicalBytes, CodecError> {
    metrics.validate()?;

    let mut buf = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::new(&mut buf);

    let mut map = (&mut serializer).serialize_map(Some(SIGNABLE_FIELDS.len()))?;
    for field in SIGNABLE_FIELDS {
        if let Some(value) = metrics.field(field) {
            map.serialize_entry(field.name(), &value)?;
        }
    }
    map.end()?;

    Ok(CanonicalBytes(Bytes::from(buf)))
}

/// Validates an untyped candidate and encodes it into its canonical bytes.
pub fn canonicalize_value(candidate: &serde_json::Value) -> Result<CanonicalBytes, CodecError> {
    let metrics = validate_signable(candidate)?;
    canonicalize(&metrics)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use nodemetrics_schema::{Environment, Field, StructuralError};

    use super::*;

    const VECTOR: &str = concat!(
        r#"{"ipfsPeerId":"QmIpfs","ceramicPeerId":"12D3KooWCeramic","environment":"testnet","#,
        r#""totalStreams":5,"totalPinnedCids":12,"collectedAt":"2024-01-01T00:00:00.000Z"}"#
    );

    fn metrics() -> SignableMetrics {
        SignableMetrics::builder()
            .ipfs_peer_id("QmIpfs")
            .ceramic_peer_id("12D3KooWCeramic")
            .environment(Environment::Testnet)
            .total_streams(5)
            .total_pinned_cids(12)
            .collected_at("2024-01-01T00:00:00.000Z")
            .build()
            .unwrap()
    }

    #[test]
    fn matches_fixed_vector() {
        let bytes = canonicalize(&metrics()).unwrap();
        assert_eq!(bytes.to_string(), VECTOR);
        assert_eq!(bytes.as_bytes(), VECTOR.as_bytes());
    }

    #[test]
    fn independent_of_construction_order() {
        let reordered = SignableMetrics::builder()
            .total_pinned_cids(12)
            .collected_at("2024-01-01T00:00:00.000Z")
            .environment(Environment::Testnet)
            .ipfs_peer_id("QmIpfs")
            .total_streams(5)
            .ceramic_peer_id("12D3KooWCeramic")
            .build()
            .unwrap();

        assert_eq!(
            canonicalize(&metrics()).unwrap(),
            canonicalize(&reordered).unwrap()
        );
    }

    #[test]
    fn independent_of_input_key_order() {
        let shuffled = json!({
            "collectedAt": "2024-01-01T00:00:00.000Z",
            "totalPinnedCids": 12,
            "environment": "testnet",
            "ceramicPeerId": "12D3KooWCeramic",
            "totalStreams": 5.0,
            "ipfsPeerId": "QmIpfs",
        });

        assert_eq!(canonicalize_value(&shuffled).unwrap().to_string(), VECTOR);
    }

    #[test]
    fn escapes_strings() {
        let metrics = metrics()
            .to_builder()
            .ipfs_peer_id("a\"b\\c\nd\u{1}é/")
            .build()
            .unwrap();

        let bytes = canonicalize(&metrics).unwrap();
        assert!(bytes
            .to_string()
            .starts_with(r#"{"ipfsPeerId":"a\"b\\c\nd\u0001é/","#));
    }

    #[test]
    fn rejects_invalid_candidates() {
        let err = canonicalize_value(&json!({ "ipfsPeerId": "QmIpfs" })).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Structural(StructuralError::MissingField(Field::CeramicPeerId))
        ));
    }

    #[test]
    fn deterministic_and_reparseable() {
        arbtest::arbtest(|u| {
            let ipfs: String = u.arbitrary()?;
            let ceramic: String = u.arbitrary()?;
            let streams = u.int_in_range(0..=nodemetrics_schema::MAX_SAFE_INTEGER)?;
            let pinned = u.int_in_range(0..=nodemetrics_schema::MAX_SAFE_INTEGER)?;
            let environment = *u.choose(&Environment::ALL)?;

            if ipfs.is_empty() || ceramic.is_empty() {
                return Ok(());
            }

            let forward = SignableMetrics::builder()
                .ipfs_peer_id(ipfs.clone())
                .ceramic_peer_id(ceramic.clone())
                .environment(environment)
                .total_streams(streams)
                .total_pinned_cids(pinned)
                .collected_at("2024-01-01T00:00:00.000Z")
                .build()
                .unwrap();

            let backward = SignableMetrics::builder()
                .collected_at("2024-01-01T00:00:00.000Z")
                .total_pinned_cids(pinned)
                .total_streams(streams)
                .environment(environment)
                .ceramic_peer_id(ceramic)
                .ipfs_peer_id(ipfs)
                .build()
                .unwrap();

            let bytes = canonicalize(&forward).unwrap();
            assert_eq!(bytes, canonicalize(&forward).unwrap());
            assert_eq!(bytes, canonicalize(&backward).unwrap());

            let value: serde_json::Value = serde_json::from_slice(bytes.as_bytes()).unwrap();
            assert_eq!(validate_signable(&value).unwrap(), forward);

            Ok(())
        });
    }
}
