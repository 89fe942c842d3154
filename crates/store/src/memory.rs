use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use nodemetrics_codec::{Codec, JsonCodec};
use nodemetrics_schema::WrappedMetrics;

use crate::digest::digest_hex;
use crate::{
    CommitId, Document, DocumentStore, MetricsRowStore, Page, PageRequest, QuarantinedRecord,
    RowId, StoreError, StreamCommit, StreamId,
};

fn encode(content: &Value) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(content).map_err(|e| StoreError::Encoding(e.to_string()))
}

#[derive(Debug, Default)]
struct Documents {
    streams: Vec<Document>,
    index: HashMap<StreamId, usize>,
}

/// In-memory document store.
///
/// Stream and commit identifiers are SHA3-256 digests of the content they
/// were created from, so they are stable across runs for the same inputs.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    state: Arc<RwLock<Documents>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.streams.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_instance(
        &self,
        controller: &str,
        content: Value,
        model: &str,
    ) -> Result<StreamCommit, StoreError> {
        let bytes = encode(&content)?;
        let mut state = self.state.write().await;

        // Same content published twice still makes two streams
        let sequence = (state.streams.len() as u64).to_be_bytes();
        let stream_id = StreamId::new(digest_hex(&[
            controller.as_bytes(),
            model.as_bytes(),
            &bytes,
            &sequence,
        ]));
        let commit_id = CommitId::new(digest_hex(&[stream_id.as_str().as_bytes(), &bytes]));

        debug!(%stream_id, %commit_id, %model, "Created document stream");

        let position = state.streams.len();
        state.index.insert(stream_id.clone(), position);
        state.streams.push(Document {
            stream_id: stream_id.clone(),
            commit_id: commit_id.clone(),
            controller: controller.to_string(),
            model: model.to_string(),
            content,
        });

        Ok(StreamCommit {
            stream_id,
            commit_id,
        })
    }

    async fn update_document(
        &self,
        stream_id: &StreamId,
        content: Value,
    ) -> Result<CommitId, StoreError> {
        let bytes = encode(&content)?;
        let mut state = self.state.write().await;

        let position = *state
            .index
            .get(stream_id)
            .ok_or_else(|| StoreError::StreamNotFound(stream_id.clone()))?;

        let document = &mut state.streams[position];
        let commit_id = CommitId::new(digest_hex(&[document.commit_id.as_str().as_bytes(), &bytes]));

        debug!(%stream_id, %commit_id, "Updated document stream");

        document.commit_id = commit_id.clone();
        document.content = content;

        Ok(commit_id)
    }

    async fn query_by_model(
        &self,
        model: &str,
        request: PageRequest,
    ) -> Result<Page<Document>, StoreError> {
        let state = self.state.read().await;
        let matching = state.streams.iter().filter(|doc| doc.model == model);

        Page::from_listing(matching, &request)
    }
}

#[derive(Debug, Default)]
struct Rows {
    accepted: Vec<Bytes>,
    ids: HashSet<RowId>,
    quarantined: Vec<QuarantinedRecord>,
}

/// In-memory row store, deduplicating accepted records by content digest.
///
/// Accepted records are kept in their [`JsonCodec`] wire form and decoded
/// again when paged out.
#[derive(Clone, Debug, Default)]
pub struct MemoryRowStore {
    state: Arc<RwLock<Rows>>,
    codec: JsonCodec,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of a record, derived from its wire form.
    pub fn row_id(record: &WrappedMetrics) -> Result<RowId, StoreError> {
        let bytes = encode_row(&JsonCodec, record)?;
        Ok(RowId::new(digest_hex(&[&bytes])))
    }

    pub async fn accepted_len(&self) -> usize {
        self.state.read().await.accepted.len()
    }

    pub async fn quarantined_len(&self) -> usize {
        self.state.read().await.quarantined.len()
    }
}

fn encode_row(codec: &JsonCodec, record: &WrappedMetrics) -> Result<Bytes, StoreError> {
    Codec::<WrappedMetrics>::encode(codec, record)
        .map_err(|e| StoreError::Encoding(e.to_string()))
}

#[async_trait]
impl MetricsRowStore for MemoryRowStore {
    async fn insert(&self, record: WrappedMetrics) -> Result<bool, StoreError> {
        let bytes = encode_row(&self.codec, &record)?;
        let id = RowId::new(digest_hex(&[&bytes]));
        let mut state = self.state.write().await;

        if !state.ids.insert(id.clone()) {
            debug!(row_id = %id, "Record already stored");
            return Ok(false);
        }

        debug!(row_id = %id, peer_id = %record.metrics().ceramic_peer_id(), "Stored record");
        state.accepted.push(bytes);

        Ok(true)
    }

    async fn page(&self, request: PageRequest) -> Result<Page<WrappedMetrics>, StoreError> {
        let state = self.state.read().await;

        Page::slice(&state.accepted, &request)?.try_map(|bytes| {
            Codec::<WrappedMetrics>::decode(&self.codec, bytes)
                .map_err(|e| StoreError::Decoding(e.to_string()))
        })
    }

    async fn quarantine(&self, record: QuarantinedRecord) -> Result<(), StoreError> {
        debug!(stream_id = %record.stream_id, error = %record.error, "Quarantined record");
        self.state.write().await.quarantined.push(record);
        Ok(())
    }

    async fn quarantined(
        &self,
        request: PageRequest,
    ) -> Result<Page<QuarantinedRecord>, StoreError> {
        let state = self.state.read().await;
        Page::slice(&state.quarantined, &request)
    }
}
