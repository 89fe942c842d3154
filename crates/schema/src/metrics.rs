use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::validate::check_value;
use crate::{Environment, Field, FieldValue, StructuralError, SIGNABLE_FIELDS};

/// A telemetry record as produced by a node, before signing.
///
/// Values of this type are always structurally valid: they can only be obtained
/// through [`SignableMetricsBuilder::build`] or through validating
/// deserialization. Fields are read-only; a changed record is a new record and
/// must be signed again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct SignableMetrics {
    ipfs_peer_id: String,
    ceramic_peer_id: String,
    environment: Environment,
    total_streams: u64,
    total_pinned_cids: u64,
    collected_at: String,
}

impl SignableMetrics {
    pub fn builder() -> SignableMetricsBuilder {
        SignableMetricsBuilder::default()
    }

    pub fn ipfs_peer_id(&self) -> &str {
        &self.ipfs_peer_id
    }

    /// The network identity of the node, from which the verification key is derived.
    pub fn ceramic_peer_id(&self) -> &str {
        &self.ceramic_peer_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn total_streams(&self) -> u64 {
        self.total_streams
    }

    pub fn total_pinned_cids(&self) -> u64 {
        self.total_pinned_cids
    }

    /// The collection time, exactly as it was supplied.
    pub fn collected_at(&self) -> &str {
        &self.collected_at
    }

    /// Returns the value of a signable field, or `None` for [`Field::Signature`].
    pub fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        let value = match field {
            Field::IpfsPeerId => FieldValue::Str(&self.ipfs_peer_id),
            Field::CeramicPeerId => FieldValue::Str(&self.ceramic_peer_id),
            Field::Environment => FieldValue::Env(self.environment),
            Field::TotalStreams => FieldValue::UInt(self.total_streams),
            Field::TotalPinnedCids => FieldValue::UInt(self.total_pinned_cids),
            Field::CollectedAt => FieldValue::Str(&self.collected_at),
            Field::Signature => return None,
        };

        Some(value)
    }

    /// Iterates over the signable fields in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, FieldValue<'_>)> + '_ {
        SIGNABLE_FIELDS
            .into_iter()
            .filter_map(move |field| self.field(field).map(|value| (field, value)))
    }

    /// Re-checks every field constraint.
    pub fn validate(&self) -> Result<(), StructuralError> {
        self.fields()
            .try_for_each(|(field, value)| check_value(field, value))
    }

    /// Returns a builder pre-populated with this record's fields.
    pub fn to_builder(&self) -> SignableMetricsBuilder {
        SignableMetricsBuilder {
            ipfs_peer_id: Some(self.ipfs_peer_id.clone()),
            ceramic_peer_id: Some(self.ceramic_peer_id.clone()),
            environment: Some(self.environment),
            total_streams: Some(self.total_streams),
            total_pinned_cids: Some(self.total_pinned_cids),
            collected_at: Some(self.collected_at.clone()),
        }
    }

    pub(crate) fn serialize_fields<M>(&self, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        for (field, value) in self.fields() {
            map.serialize_entry(field.name(), &value)?;
        }
        Ok(())
    }
}

impl Serialize for SignableMetrics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(SIGNABLE_FIELDS.len()))?;
        self.serialize_fields(&mut map)?;
        map.end()
    }
}

impl TryFrom<serde_json::Value> for SignableMetrics {
    type Error = StructuralError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        crate::validate_signable(&value)
    }
}

/// Builder for [`SignableMetrics`].
///
/// Setters may be called in any order; the resulting record does not depend on it.
#[derive(Clone, Debug, Default)]
pub struct SignableMetricsBuilder {
    ipfs_peer_id: Option<String>,
    ceramic_peer_id: Option<String>,
    environment: Option<Environment>,
    total_streams: Option<u64>,
    total_pinned_cids: Option<u64>,
    collected_at: Option<String>,
}

impl SignableMetricsBuilder {
    pub fn ipfs_peer_id(mut self, value: impl Into<String>) -> Self {
        self.ipfs_peer_id = Some(value.into());
        self
    }

    pub fn ceramic_peer_id(mut self, value: impl Into<String>) -> Self {
        self.ceramic_peer_id = Some(value.into());
        self
    }

    pub fn environment(mut self, value: Environment) -> Self {
        self.environment = Some(value);
        self
    }

    pub fn total_streams(mut self, value: u64) -> Self {
        self.total_streams = Some(value);
        self
    }

    pub fn total_pinned_cids(mut self, value: u64) -> Self {
        self.total_pinned_cids = Some(value);
        self
    }

    pub fn collected_at(mut self, value: impl Into<String>) -> Self {
        self.collected_at = Some(value.into());
        self
    }

    fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::IpfsPeerId => self.ipfs_peer_id.as_deref().map(FieldValue::Str),
            Field::CeramicPeerId => self.ceramic_peer_id.as_deref().map(FieldValue::Str),
            Field::Environment => self.environment.map(FieldValue::Env),
            Field::TotalStreams => self.total_streams.map(FieldValue::UInt),
            Field::TotalPinnedCids => self.total_pinned_cids.map(FieldValue::UInt),
            Field::CollectedAt => self.collected_at.as_deref().map(FieldValue::Str),
            Field::Signature => None,
        }
    }

    /// Checks every field in canonical order and builds the record.
    pub fn build(self) -> Result<SignableMetrics, StructuralError> {
        for field in SIGNABLE_FIELDS {
            let value = self.field(field).ok_or(StructuralError::MissingField(field))?;
            check_value(field, value)?;
        }

        let missing = StructuralError::MissingField;

        Ok(SignableMetrics {
            ipfs_peer_id: self.ipfs_peer_id.ok_or(missing(Field::IpfsPeerId))?,
            ceramic_peer_id: self.ceramic_peer_id.ok_or(missing(Field::CeramicPeerId))?,
            environment: self.environment.ok_or(missing(Field::Environment))?,
            total_streams: self.total_streams.ok_or(missing(Field::TotalStreams))?,
            total_pinned_cids: self.total_pinned_cids.ok_or(missing(Field::TotalPinnedCids))?,
            collected_at: self.collected_at.ok_or(missing(Field::CollectedAt))?,
        })
    }
}
