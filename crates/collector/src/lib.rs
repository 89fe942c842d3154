//! Both ends of the attestation pipeline.
//!
//! The [`Publisher`] runs on a node: it turns the node's counts into a signed
//! record and publishes it to a [`DocumentStore`](nodemetrics_store::DocumentStore).
//! The [`Collector`] runs on the consumer side: it reads every published
//! document, keeps the records whose signature checks out and quarantines the
//! rest.

mod error;
pub use error::{CollectError, PublishError};

mod publisher;
pub use publisher::{NodeCounts, Published, Publisher};

mod collector;
pub use collector::{Collector, IngestReport};
