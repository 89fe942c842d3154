//! Encodings for node metrics records.
//!
//! [`canonicalize`] produces the exact bytes that get signed and verified.
//! [`JsonCodec`] moves records across the wire and in and out of storage.

use bytes::Bytes;

mod canonical;
pub use canonical::{canonicalize, canonicalize_value, CanonicalBytes};

mod error;
pub use error::CodecError;

mod json;
pub use json::JsonCodec;

/// Encodes and decodes values of type `T` to and from bytes.
pub trait Codec<T>: Send + Sync + 'static {
    type Error: core::error::Error + Send + Sync + 'static;

    fn decode(&self, bytes: Bytes) -> Result<T, Self::Error>;
    fn encode(&self, msg: &T) -> Result<Bytes, Self::Error>;
}
