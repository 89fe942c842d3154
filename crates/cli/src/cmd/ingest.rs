use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{bail, Result, WrapErr};
use serde_json::{json, Value};

use nodemetrics_collector::{Collector, IngestReport};
use nodemetrics_config::CollectorConfig;
use nodemetrics_metrics::{AttestationMetrics, SharedRegistry};
use nodemetrics_store::{
    DocumentStore, MemoryDocumentStore, MemoryRowStore, MetricsRowStore, PageRequest,
};

use super::read_json;

const IMPORT_CONTROLLER: &str = "import";

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct IngestCmd {
    /// JSON file holding an array of published records (default: stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Override the page size from the configuration
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the attestation metrics after the report
    #[arg(long)]
    pub metrics: bool,
}

impl IngestCmd {
    pub async fn run(&self, config: &CollectorConfig) -> Result<()> {
        let input = read_json(self.input.as_deref())?;
        let Value::Array(records) = input else {
            bail!("Expected an array of records");
        };

        let registry = SharedRegistry::default();
        let metrics = AttestationMetrics::register(&registry);

        let page_size = self.page_size.unwrap_or(config.page_size);
        let output = ingest(records, &config.model, page_size, metrics).await?;

        println!(
            "{}",
            serde_json::to_string_pretty(&output).wrap_err("Failed to serialize report")?
        );

        if self.metrics {
            let mut text = String::new();
            registry
                .export(&mut text)
                .wrap_err("Failed to encode metrics")?;
            print!("{text}");
        }

        Ok(())
    }
}

/// Publishes `records` to an in-memory document store and runs a collector
/// over them, returning the report and the quarantined records.
pub async fn ingest(
    records: Vec<Value>,
    model: &str,
    page_size: usize,
    metrics: AttestationMetrics,
) -> Result<Value> {
    let documents = MemoryDocumentStore::new();
    let rows = MemoryRowStore::new();

    for record in records {
        documents
            .create_instance(IMPORT_CONTROLLER, record, model)
            .await?;
    }

    let collector = Collector::new(documents, rows.clone(), model, page_size, metrics);
    let report = collector.ingest().await?;

    let mut quarantined = Vec::new();
    let mut request = Some(PageRequest::first(page_size.max(1)));
    while let Some(req) = request {
        let page = rows.quarantined(req).await?;
        quarantined.extend(page.items.iter().map(|r| {
            json!({ "streamId": r.stream_id, "error": r.error })
        }));
        request = page.next(page_size.max(1));
    }

    Ok(json!({
        "report": report_json(&report),
        "quarantined": quarantined,
    }))
}

fn report_json(report: &IngestReport) -> Value {
    let rejected = report
        .rejected
        .iter()
        .map(|(kind, count)| (kind.as_str().to_string(), json!(count)))
        .collect::<serde_json::Map<_, _>>();

    json!({
        "scanned": report.scanned,
        "accepted": report.accepted,
        "duplicates": report.duplicates,
        "rejected": rejected,
    })
}
