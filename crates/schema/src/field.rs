use core::fmt;

use serde::{Serialize, Serializer};

use crate::Environment;

/// A named field of a metrics record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Identity of the node's content-storage peer
    IpfsPeerId,
    /// Identity of the node's network peer, embeds the verification key
    CeramicPeerId,
    /// Network the node participates in
    Environment,
    /// Number of streams indexed by the node
    TotalStreams,
    /// Number of CIDs pinned by the node
    TotalPinnedCids,
    /// Collection time of the record
    CollectedAt,
    /// Signature over the canonical bytes, only present on wrapped records
    Signature,
}

/// The signable fields, in canonical order.
///
/// This is the only place where field order is declared. Canonical encoding,
/// wrapped-record serialization and structural validation all walk this array.
pub const SIGNABLE_FIELDS: [Field; 6] = [
    Field::IpfsPeerId,
    Field::CeramicPeerId,
    Field::Environment,
    Field::TotalStreams,
    Field::TotalPinnedCids,
    Field::CollectedAt,
];

impl Field {
    /// The key under which this field appears in serialized records.
    pub const fn name(self) -> &'static str {
        match self {
            Field::IpfsPeerId => "ipfsPeerId",
            Field::CeramicPeerId => "ceramicPeerId",
            Field::Environment => "environment",
            Field::TotalStreams => "totalStreams",
            Field::TotalPinnedCids => "totalPinnedCids",
            Field::CollectedAt => "collectedAt",
            Field::Signature => "signature",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed value of a single signable field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Env(Environment),
    UInt(u64),
}

impl Serialize for FieldValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::Env(env) => serializer.serialize_str(env.as_str()),
            FieldValue::UInt(n) => serializer.serialize_u64(*n),
        }
    }
}
