//! Producer side of the attestation protocol.
//!
//! A node validates its [`SignableMetrics`], encodes them canonically and signs
//! the canonical bytes with its network identity key, yielding a
//! [`WrappedMetrics`] record ready to be published.

pub use libp2p_identity::{Keypair, PublicKey};
pub use nodemetrics_schema::{SignableMetrics, WrappedMetrics};

mod error;
pub use error::{KeyFileError, SignError};

mod key_file;
pub use key_file::NodeKeyFile;

mod provider;
pub use provider::SigningProvider;

mod sign;
pub use sign::sign;
