use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use nodemetrics_metrics::AttestationMetrics;
use nodemetrics_store::{Document, DocumentStore, MetricsRowStore, PageRequest, QuarantinedRecord};
use nodemetrics_validator::{verify_candidate, RejectionKind};

use crate::CollectError;

/// Outcome of one ingestion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Documents read from the store
    pub scanned: usize,
    /// Valid records newly inserted
    pub accepted: usize,
    /// Valid records that were already present
    pub duplicates: usize,
    /// Rejected records, by reason
    pub rejected: BTreeMap<RejectionKind, usize>,
}

impl IngestReport {
    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }
}

/// Reads every document published under a model, validates it and files it
/// as accepted or quarantined.
pub struct Collector<D, R> {
    documents: D,
    rows: R,
    model: String,
    page_size: usize,
    metrics: AttestationMetrics,
}

impl<D, R> Collector<D, R>
where
    D: DocumentStore,
    R: MetricsRowStore,
{
    pub fn new(
        documents: D,
        rows: R,
        model: impl Into<String>,
        page_size: usize,
        metrics: AttestationMetrics,
    ) -> Self {
        Self {
            documents,
            rows,
            model: model.into(),
            page_size: page_size.max(1),
            metrics,
        }
    }

    pub async fn ingest(&self) -> Result<IngestReport, CollectError> {
        let mut report = IngestReport::default();
        let mut request = Some(PageRequest::first(self.page_size));

        while let Some(req) = request {
            let page = self.documents.query_by_model(&self.model, req).await?;
            debug!(model = %self.model, documents = page.items.len(), "Fetched page");

            for document in page.items.iter() {
                self.ingest_document(document, &mut report).await?;
            }

            request = page.next(self.page_size);
        }

        info!(
            model = %self.model,
            scanned = report.scanned,
            accepted = report.accepted,
            duplicates = report.duplicates,
            rejected = report.total_rejected(),
            "Ingestion complete"
        );

        Ok(report)
    }

    async fn ingest_document(
        &self,
        document: &Document,
        report: &mut IngestReport,
    ) -> Result<(), CollectError> {
        report.scanned += 1;

        match verify_candidate(&document.content) {
            Ok(record) => {
                self.metrics.record_accepted();

                if self.rows.insert(record).await? {
                    report.accepted += 1;
                } else {
                    report.duplicates += 1;
                }
            }

            Err(e) => {
                let kind = e.kind();
                self.metrics.record_rejected(kind);
                *report.rejected.entry(kind).or_default() += 1;

                warn!(
                    stream_id = %document.stream_id,
                    controller = %document.controller,
                    reason = %kind,
                    error = %e,
                    "Rejected metrics record"
                );

                self.rows
                    .quarantine(QuarantinedRecord {
                        stream_id: document.stream_id.clone(),
                        content: document.content.clone(),
                        error: e.to_string(),
                    })
                    .await?;
            }
        }

        Ok(())
    }
}
