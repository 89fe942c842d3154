use async_trait::async_trait;
use serde_json::Value;

use nodemetrics_schema::WrappedMetrics;

use crate::{
    CommitId, Document, Page, PageRequest, QuarantinedRecord, StoreError, StreamCommit, StreamId,
};

/// Append-only store of documents published by nodes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a new stream owned by `controller` under `model`.
    async fn create_instance(
        &self,
        controller: &str,
        content: Value,
        model: &str,
    ) -> Result<StreamCommit, StoreError>;

    /// Replaces the content of an existing stream, returning the new commit.
    async fn update_document(
        &self,
        stream_id: &StreamId,
        content: Value,
    ) -> Result<CommitId, StoreError>;

    /// Lists the latest version of every stream under `model`, in creation order.
    async fn query_by_model(
        &self,
        model: &str,
        request: PageRequest,
    ) -> Result<Page<Document>, StoreError>;
}

/// Store of validated records and of the ones that were turned away.
#[async_trait]
pub trait MetricsRowStore: Send + Sync {
    /// Inserts an accepted record.
    ///
    /// Returns `false` if the exact same record was already present.
    async fn insert(&self, record: WrappedMetrics) -> Result<bool, StoreError>;

    /// Lists accepted records in insertion order.
    async fn page(&self, request: PageRequest) -> Result<Page<WrappedMetrics>, StoreError>;

    /// Keeps a rejected record together with the reason it was rejected.
    async fn quarantine(&self, record: QuarantinedRecord) -> Result<(), StoreError>;

    /// Lists quarantined records in insertion order.
    async fn quarantined(
        &self,
        request: PageRequest,
    ) -> Result<Page<QuarantinedRecord>, StoreError>;
}
