use std::thread;

use libp2p_identity::Keypair;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use nodemetrics_codec::canonicalize;
use nodemetrics_schema::{Environment, SignableMetrics};
use nodemetrics_signing::{sign, SigningProvider};
use nodemetrics_validator::{
    validate_metrics_signature, validate_metrics_structure, verify_candidate, RejectionKind,
    ValidationResult,
};

fn keypair() -> Keypair {
    Keypair::ed25519_from_bytes([42u8; 32]).unwrap()
}

fn metrics(ceramic_peer_id: &str) -> SignableMetrics {
    SignableMetrics::builder()
        .ipfs_peer_id("QmYyQSo1c1Ym7orWxLYvCrM2EmxFTANf8wXmmE7DWjhx5N")
        .ceramic_peer_id(ceramic_peer_id)
        .environment(Environment::Testnet)
        .total_streams(5)
        .total_pinned_cids(12)
        .collected_at("2024-01-01T00:00:00.000Z")
        .build()
        .unwrap()
}

fn signed_value(keypair: &Keypair) -> Value {
    let wrapped = sign(&metrics(&keypair.peer_id()), keypair).unwrap();
    serde_json::to_value(&wrapped).unwrap()
}

#[test]
fn signed_record_validates() {
    let keypair = keypair();
    let value = signed_value(&keypair);

    assert_eq!(validate_metrics_structure(&value), ValidationResult::valid());
    assert_eq!(validate_metrics_signature(&value), ValidationResult::valid());
}

#[test]
fn reordered_construction_yields_identical_canonical_bytes() {
    let keypair = keypair();
    let peer_id = keypair.peer_id();

    let reordered = SignableMetrics::builder()
        .collected_at("2024-01-01T00:00:00.000Z")
        .environment(Environment::Testnet)
        .total_pinned_cids(12)
        .ceramic_peer_id(peer_id.as_str())
        .total_streams(5)
        .ipfs_peer_id("QmYyQSo1c1Ym7orWxLYvCrM2EmxFTANf8wXmmE7DWjhx5N")
        .build()
        .unwrap();

    assert_eq!(
        canonicalize(&metrics(&peer_id)).unwrap(),
        canonicalize(&reordered).unwrap()
    );

    // A signature made over one construction verifies for the other
    let wrapped = sign(&metrics(&peer_id), &keypair).unwrap();
    let mut value = serde_json::to_value(&reordered).unwrap();
    value["signature"] = serde_json::to_value(wrapped.signature()).unwrap();
    assert!(validate_metrics_signature(&value).is_valid());
}

#[test]
fn changed_field_invalidates_signature() {
    let keypair = keypair();
    let original = signed_value(&keypair);

    let tampered_fields = [
        ("totalStreams", json!(11)),
        ("totalPinnedCids", json!(13)),
        ("environment", json!("mainnet")),
        ("ipfsPeerId", json!("QmNnooDu7bfjPFoTZYxMNLWUQJyrVwtbZg5gBMjTezGAJN")),
        ("collectedAt", json!("2024-01-01T00:00:01.000Z")),
    ];

    for (field, replacement) in tampered_fields {
        let mut value = original.clone();
        value[field] = replacement;

        assert_eq!(
            validate_metrics_signature(&value),
            ValidationResult::invalid("Cryptographic signature verification failed"),
            "tampering with {field} went unnoticed"
        );
    }
}

#[test]
fn equivalent_timestamp_spelling_is_still_tampering() {
    let keypair = keypair();
    let mut value = signed_value(&keypair);
    value["collectedAt"] = json!("2024-01-01T00:00:00Z");

    assert!(!validate_metrics_signature(&value).is_valid());
}

#[test]
fn float_spelling_of_a_count_is_rejected() {
    let keypair = keypair();

    for literal in ["5.0", "5.0000000000000001"] {
        let mut value = signed_value(&keypair);
        value["totalStreams"] = serde_json::from_str(literal).unwrap();

        let expected = "totalStreams must be a non-negative integer";
        assert_eq!(validate_metrics_structure(&value).error(), Some(expected));
        assert_eq!(validate_metrics_signature(&value).error(), Some(expected));
    }
}

#[test]
fn flipped_signature_byte_invalidates_signature() {
    let keypair = keypair();
    let original = signed_value(&keypair);
    let length = original["signature"].as_array().unwrap().len();

    for index in 0..length {
        let mut value = original.clone();
        let byte = value["signature"][index].as_u64().unwrap();
        value["signature"][index] = json!(byte ^ 0x01);

        let err = verify_candidate(&value).unwrap_err();
        assert_eq!(err.kind(), RejectionKind::SignatureMismatch, "byte {index}");
    }
}

#[test]
fn arbitrary_bit_flips_are_detected() {
    let keypair = keypair();
    let original = signed_value(&keypair);

    arbtest::arbtest(|u| {
        let index = u.int_in_range(0usize..=63)?;
        let bit = u.int_in_range(0u32..=7)?;

        let mut value = original.clone();
        let byte = value["signature"][index].as_u64().unwrap();
        value["signature"][index] = json!(byte ^ (1 << bit));

        assert!(!validate_metrics_signature(&value).is_valid());
        Ok(())
    });
}

#[test]
fn signature_from_another_key_is_rejected() {
    let owner = keypair();
    let impostor = Keypair::ed25519_from_bytes([7u8; 32]).unwrap();

    let wrapped = sign(&metrics(&owner.peer_id()), &impostor).unwrap();
    let value = serde_json::to_value(&wrapped).unwrap();

    assert_eq!(
        validate_metrics_signature(&value),
        ValidationResult::invalid("Cryptographic signature verification failed")
    );
}

#[test]
fn swapping_in_the_impostor_peer_id_breaks_the_original_signature() {
    let owner = keypair();
    let impostor = Keypair::ed25519_from_bytes([7u8; 32]).unwrap();

    let mut value = signed_value(&owner);
    value["ceramicPeerId"] = json!(impostor.peer_id());

    assert!(!validate_metrics_signature(&value).is_valid());
}

#[test]
fn invalid_peer_id_is_surfaced() {
    let keypair = keypair();
    let mut value = signed_value(&keypair);
    value["ceramicPeerId"] = json!("not-a-peer-id");

    assert_eq!(
        validate_metrics_signature(&value),
        ValidationResult::invalid("Invalid peer ID format")
    );
    assert_eq!(
        verify_candidate(&value).unwrap_err().kind(),
        RejectionKind::InvalidPeerId
    );
}

#[test]
fn peer_id_without_inline_key_is_surfaced() {
    let keypair = Keypair::generate_ecdsa();
    let value = signed_value(&keypair);

    assert_eq!(
        validate_metrics_signature(&value),
        ValidationResult::invalid("Peer ID does not contain a public key")
    );
    assert_eq!(
        verify_candidate(&value).unwrap_err().kind(),
        RejectionKind::NoPublicKey
    );
}

#[test]
fn structural_errors_come_first() {
    let keypair = keypair();

    let mut value = signed_value(&keypair);
    value["environment"] = json!("devnet");
    let result = validate_metrics_signature(&value);
    assert!(result
        .error()
        .unwrap()
        .starts_with("environment must be one of: testnet, mainnet, local"));

    let mut value = signed_value(&keypair);
    value["signature"] = json!([256]);
    assert_eq!(
        validate_metrics_signature(&value).error(),
        Some("signature[0] must be an integer in [0, 255]")
    );

    let mut value = signed_value(&keypair);
    value.as_object_mut().unwrap().remove("collectedAt");
    assert_eq!(
        validate_metrics_signature(&value).error(),
        Some("Missing required field: collectedAt")
    );
}

#[test]
fn validation_runs_in_parallel() {
    let keypair = keypair();
    let valid = signed_value(&keypair);

    let mut invalid = valid.clone();
    invalid["totalStreams"] = json!(11);

    let handles = (0..8)
        .map(|i| {
            let value = if i % 2 == 0 {
                valid.clone()
            } else {
                invalid.clone()
            };

            thread::spawn(move || (i, validate_metrics_signature(&value).is_valid()))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (i, is_valid) = handle.join().unwrap();
        assert_eq!(is_valid, i % 2 == 0);
    }
}
