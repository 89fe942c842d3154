use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::{Field, SignableMetrics, StructuralError, SIGNABLE_FIELDS};

/// Raw signature bytes, serialized as an array of integers in `[0, 255]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// A signed metrics record, the unit that is transmitted and stored.
///
/// The signature only has meaning together with the canonical encoding of
/// [`WrappedMetrics::metrics`]; it is never checked on its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct WrappedMetrics {
    metrics: SignableMetrics,
    signature: Signature,
}

impl WrappedMetrics {
    pub fn new(metrics: SignableMetrics, signature: Signature) -> Self {
        Self { metrics, signature }
    }

    /// The signed fields.
    pub fn metrics(&self) -> &SignableMetrics {
        &self.metrics
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn into_parts(self) -> (SignableMetrics, Signature) {
        (self.metrics, self.signature)
    }
}

impl Serialize for WrappedMetrics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(SIGNABLE_FIELDS.len() + 1))?;
        self.metrics.serialize_fields(&mut map)?;
        map.serialize_entry(Field::Signature.name(), &self.signature)?;
        map.end()
    }
}

impl TryFrom<serde_json::Value> for WrappedMetrics {
    type Error = StructuralError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        crate::validate_wrapped(&value)
    }
}
