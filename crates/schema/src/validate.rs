use serde_json::{Map, Number, Value};

use crate::{
    parse_iso8601, Environment, Field, FieldValue, Signature, SignableMetrics, StructuralError,
    WrappedMetrics,
};

/// Largest integer every JSON implementation represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Checks a typed field value against its constraint.
pub(crate) fn check_value(field: Field, value: FieldValue<'_>) -> Result<(), StructuralError> {
    match value {
        FieldValue::Str(s) if s.is_empty() => Err(StructuralError::EmptyString(field)),
        FieldValue::Str(s) if field == Field::CollectedAt && parse_iso8601(s).is_none() => {
            Err(StructuralError::InvalidTimestamp {
                field,
                value: s.to_string(),
            })
        }
        FieldValue::UInt(n) if n > MAX_SAFE_INTEGER => Err(StructuralError::IntegerTooLarge(field)),
        FieldValue::Str(_) | FieldValue::Env(_) | FieldValue::UInt(_) => Ok(()),
    }
}

/// Validates an untyped candidate against the signable contract.
///
/// Fields are checked in canonical order and the first violation is returned.
/// Keys outside the contract are ignored.
pub fn validate_signable(input: &Value) -> Result<SignableMetrics, StructuralError> {
    let object = input.as_object().ok_or(StructuralError::NotAnObject)?;
    signable_from_object(object)
}

/// Validates an untyped candidate against the wrapped (signed) contract.
///
/// The signable fields are checked first, in canonical order, then `signature`.
pub fn validate_wrapped(input: &Value) -> Result<WrappedMetrics, StructuralError> {
    let object = input.as_object().ok_or(StructuralError::NotAnObject)?;
    let metrics = signable_from_object(object)?;

    let signature = required(object, Field::Signature)?
        .as_array()
        .ok_or(StructuralError::SignatureNotAnArray)?
        .iter()
        .enumerate()
        .map(|(index, byte)| {
            as_integer(byte)
                .and_then(|n| u8::try_from(n).ok())
                .ok_or(StructuralError::SignatureByteOutOfRange { index })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(WrappedMetrics::new(metrics, Signature::new(signature)))
}

fn signable_from_object(object: &Map<String, Value>) -> Result<SignableMetrics, StructuralError> {
    SignableMetrics::builder()
        .ipfs_peer_id(string(object, Field::IpfsPeerId)?)
        .ceramic_peer_id(string(object, Field::CeramicPeerId)?)
        .environment(string(object, Field::Environment)?.parse::<Environment>()?)
        .total_streams(integer(object, Field::TotalStreams)?)
        .total_pinned_cids(integer(object, Field::TotalPinnedCids)?)
        .collected_at(string(object, Field::CollectedAt)?)
        .build()
}

fn required(object: &Map<String, Value>, field: Field) -> Result<&Value, StructuralError> {
    match object.get(field.name()) {
        None | Some(Value::Null) => Err(StructuralError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn string(object: &Map<String, Value>, field: Field) -> Result<&str, StructuralError> {
    let s = required(object, field)?
        .as_str()
        .ok_or(StructuralError::NotAString(field))?;

    check_value(field, FieldValue::Str(s))?;
    Ok(s)
}

fn integer(object: &Map<String, Value>, field: Field) -> Result<u64, StructuralError> {
    let n = match required(object, field)?.as_number().map(number_as_integer) {
        Some(Ok(n)) => n,
        Some(Err(IntegerError::Overflow)) => return Err(StructuralError::IntegerTooLarge(field)),
        Some(Err(IntegerError::NotAnInteger)) | None => {
            return Err(StructuralError::NotANonNegativeInteger(field))
        }
    };

    check_value(field, FieldValue::UInt(n))?;
    Ok(n)
}

fn as_integer(value: &Value) -> Option<u64> {
    value.as_number().and_then(|n| number_as_integer(n).ok())
}

enum IntegerError {
    NotAnInteger,
    Overflow,
}

/// Accepts integer literals only. Literals with a fraction or exponent such as
/// `5.0` or `5e0` are rejected, since they do not survive as decimal text.
/// Whole numbers beyond `u64` overflow.
#[allow(clippy::cast_precision_loss)]
fn number_as_integer(number: &Number) -> Result<u64, IntegerError> {
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }

    match number.as_f64() {
        Some(f) if !number.is_i64() && f >= u64::MAX as f64 && f.fract() == 0.0 => {
            Err(IntegerError::Overflow)
        }
        _ => Err(IntegerError::NotAnInteger),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn signable() -> Value {
        json!({
            "ipfsPeerId": "QmIpfs",
            "ceramicPeerId": "12D3KooWCeramic",
            "environment": "testnet",
            "totalStreams": 5,
            "totalPinnedCids": 12,
            "collectedAt": "2024-01-01T00:00:00.000Z",
        })
    }

    fn wrapped(signature: Value) -> Value {
        let mut value = signable();
        value["signature"] = signature;
        value
    }

    #[test]
    fn accepts_valid_signable() {
        let metrics = validate_signable(&signable()).unwrap();
        assert_eq!(metrics.ipfs_peer_id(), "QmIpfs");
        assert_eq!(metrics.environment(), Environment::Testnet);
        assert_eq!(metrics.total_pinned_cids(), 12);
    }

    #[test]
    fn ignores_unknown_keys() {
        let mut value = signable();
        value["extra"] = json!("ignored");
        assert!(validate_signable(&value).is_ok());
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            validate_signable(&json!([1, 2, 3])).unwrap_err(),
            StructuralError::NotAnObject
        );
        assert_eq!(
            validate_wrapped(&json!("record")).unwrap_err(),
            StructuralError::NotAnObject
        );
    }

    #[test]
    fn rejects_unknown_environment() {
        let mut value = signable();
        value["environment"] = json!("devnet");

        let err = validate_signable(&value).unwrap_err();
        assert_eq!(err, StructuralError::UnknownEnvironment("devnet".into()));
        assert!(err
            .to_string()
            .starts_with("environment must be one of: testnet, mainnet, local"));
    }

    #[test]
    fn rejects_missing_and_null_fields() {
        let mut value = signable();
        value.as_object_mut().unwrap().remove("collectedAt");
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::MissingField(Field::CollectedAt)
        );

        let mut value = signable();
        value["totalStreams"] = Value::Null;
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::MissingField(Field::TotalStreams)
        );
    }

    #[test]
    fn first_failure_follows_canonical_order() {
        let value = json!({
            "collectedAt": "never",
            "environment": "devnet",
            "ipfsPeerId": "",
        });
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::EmptyString(Field::IpfsPeerId)
        );
    }

    #[test]
    fn rejects_wrong_types() {
        let mut value = signable();
        value["ceramicPeerId"] = json!(42);
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::NotAString(Field::CeramicPeerId)
        );

        let mut value = signable();
        value["totalStreams"] = json!("5");
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::NotANonNegativeInteger(Field::TotalStreams)
        );
    }

    #[test]
    fn integer_constraints() {
        for bad in [json!(-1), json!(1.5), json!(true)] {
            let mut value = signable();
            value["totalPinnedCids"] = bad;
            assert_eq!(
                validate_signable(&value).unwrap_err(),
                StructuralError::NotANonNegativeInteger(Field::TotalPinnedCids)
            );
        }

        for literal in ["12.0", "12e0", "5.0000000000000001"] {
            let mut value = signable();
            value["totalPinnedCids"] = serde_json::from_str(literal).unwrap();
            assert_eq!(
                validate_signable(&value).unwrap_err(),
                StructuralError::NotANonNegativeInteger(Field::TotalPinnedCids),
                "{literal}"
            );
        }

        let mut value = signable();
        value["totalStreams"] = serde_json::from_str("18446744073709551616").unwrap();
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::IntegerTooLarge(Field::TotalStreams)
        );

        let mut value = signable();
        value["totalPinnedCids"] = json!(MAX_SAFE_INTEGER + 1);
        assert_eq!(
            validate_signable(&value).unwrap_err(),
            StructuralError::IntegerTooLarge(Field::TotalPinnedCids)
        );
    }

    #[test]
    fn rejects_invalid_timestamp() {
        let mut value = signable();
        value["collectedAt"] = json!("2024-01-01");

        let err = validate_signable(&value).unwrap_err();
        assert_eq!(err.field(), Some(Field::CollectedAt));
        assert!(err.to_string().contains("ISO-8601"));
    }

    #[test]
    fn accepts_valid_wrapped() {
        let wrapped = validate_wrapped(&wrapped(json!([0, 1, 255]))).unwrap();
        assert_eq!(wrapped.signature().as_bytes(), &[0, 1, 255]);
        assert_eq!(wrapped.metrics().total_streams(), 5);
    }

    #[test]
    fn rejects_bad_signatures() {
        assert_eq!(
            validate_wrapped(&signable()).unwrap_err(),
            StructuralError::MissingField(Field::Signature)
        );
        assert_eq!(
            validate_wrapped(&wrapped(json!("AAEC"))).unwrap_err(),
            StructuralError::SignatureNotAnArray
        );
        assert_eq!(
            validate_wrapped(&wrapped(json!([256]))).unwrap_err(),
            StructuralError::SignatureByteOutOfRange { index: 0 }
        );
        assert_eq!(
            validate_wrapped(&wrapped(json!([1, 2, -3]))).unwrap_err(),
            StructuralError::SignatureByteOutOfRange { index: 2 }
        );
        assert_eq!(
            validate_wrapped(&wrapped(json!([1, "2"]))).unwrap_err(),
            StructuralError::SignatureByteOutOfRange { index: 1 }
        );
    }

    #[test]
    fn signable_errors_win_over_signature_errors() {
        let mut value = wrapped(json!([999]));
        value["environment"] = json!("devnet");
        assert_eq!(
            validate_wrapped(&value).unwrap_err(),
            StructuralError::UnknownEnvironment("devnet".into())
        );
    }

    #[test]
    fn arbitrary_bytes_are_accepted() {
        arbtest::arbtest(|u| {
            let bytes: Vec<u8> = u.arbitrary()?;
            let parsed = validate_wrapped(&wrapped(json!(bytes))).unwrap();
            assert_eq!(parsed.signature().as_bytes(), bytes.as_slice());
            Ok(())
        });
    }
}
