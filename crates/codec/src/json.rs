use bytes::Bytes;
use serde_json::Value;

use nodemetrics_schema::{validate_signable, validate_wrapped, SignableMetrics, WrappedMetrics};

use crate::{Codec, CodecError};

/// JSON codec for records at rest and on the wire.
///
/// Decoding validates the record structurally. This encoding carries no
/// ordering guarantee beyond what serialization happens to produce, so it must
/// never be used as signing input; use [`crate::canonicalize`] for that.
#[derive(Copy, Clone, Debug, Default)]
pub struct JsonCodec;

impl Codec<WrappedMetrics> for JsonCodec {
    type Error = CodecError;

    fn decode(&self, bytes: Bytes) -> Result<WrappedMetrics, Self::Error> {
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(validate_wrapped(&value)?)
    }

    fn encode(&self, msg: &WrappedMetrics) -> Result<Bytes, Self::Error> {
        Ok(Bytes::from(serde_json::to_vec(msg)?))
    }
}

impl Codec<SignableMetrics> for JsonCodec {
    type Error = CodecError;

    fn decode(&self, bytes: Bytes) -> Result<SignableMetrics, Self::Error> {
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(validate_signable(&value)?)
    }

    fn encode(&self, msg: &SignableMetrics) -> Result<Bytes, Self::Error> {
        Ok(Bytes::from(serde_json::to_vec(msg)?))
    }
}
