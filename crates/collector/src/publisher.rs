use tracing::info;

use nodemetrics_metrics::AttestationMetrics;
use nodemetrics_schema::{now_iso8601, Environment, SignableMetrics, WrappedMetrics};
use nodemetrics_signing::{sign, SigningProvider};
use nodemetrics_store::{DocumentStore, StreamCommit};

use crate::PublishError;

/// Counts reported by a node at collection time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub total_streams: u64,
    pub total_pinned_cids: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Published {
    pub stream: StreamCommit,
    pub record: WrappedMetrics,
}

/// Signs the node's metrics with its identity key and publishes them.
pub struct Publisher<S, P> {
    store: S,
    signer: P,
    model: String,
    metrics: AttestationMetrics,
}

impl<S, P> Publisher<S, P>
where
    S: DocumentStore,
    P: SigningProvider,
{
    pub fn new(store: S, signer: P, model: impl Into<String>, metrics: AttestationMetrics) -> Self {
        Self {
            store,
            signer,
            model: model.into(),
            metrics,
        }
    }

    /// Builds a record stamped with the current time, signs it and publishes it.
    ///
    /// The `ceramicPeerId` is always the signer's own peer identifier, so that
    /// the record verifies against the key that signed it.
    pub async fn publish(
        &self,
        ipfs_peer_id: &str,
        environment: Environment,
        counts: NodeCounts,
    ) -> Result<Published, PublishError> {
        let metrics = SignableMetrics::builder()
            .ipfs_peer_id(ipfs_peer_id)
            .ceramic_peer_id(self.signer.peer_id())
            .environment(environment)
            .total_streams(counts.total_streams)
            .total_pinned_cids(counts.total_pinned_cids)
            .collected_at(now_iso8601()?)
            .build()?;

        self.publish_record(&metrics).await
    }

    /// Signs and publishes an already built record.
    pub async fn publish_record(
        &self,
        metrics: &SignableMetrics,
    ) -> Result<Published, PublishError> {
        let record = sign(metrics, &self.signer)?;
        self.metrics.record_signed();

        let content = serde_json::to_value(&record)?;
        let stream = self
            .store
            .create_instance(metrics.ceramic_peer_id(), content, &self.model)
            .await?;

        info!(
            stream_id = %stream.stream_id,
            peer_id = %metrics.ceramic_peer_id(),
            model = %self.model,
            "Published metrics record"
        );

        Ok(Published { stream, record })
    }
}
