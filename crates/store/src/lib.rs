//! Storage collaborators of the attestation pipeline.
//!
//! A [`DocumentStore`] holds published records as untrusted JSON documents,
//! grouped by model. A [`MetricsRowStore`] holds the records that passed
//! validation, plus the ones that did not, together with the reason.
//!
//! Both are traits so that the pipeline can run against a real backend or the
//! in-memory implementations provided here.

mod error;
pub use error::StoreError;

mod types;
pub use types::{
    CommitId, Cursor, Document, Page, PageRequest, QuarantinedRecord, RowId, StreamCommit,
    StreamId,
};

mod traits;
pub use traits::{DocumentStore, MetricsRowStore};

mod memory;
pub use memory::{MemoryDocumentStore, MemoryRowStore};

mod digest;
