use thiserror::Error;

use nodemetrics_schema::{StructuralError, TimestampError};
use nodemetrics_signing::SignError;
use nodemetrics_store::StoreError;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to build metrics record: {0}")]
    Build(#[from] StructuralError),

    #[error("Failed to stamp metrics record: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("Failed to sign metrics record: {0}")]
    Sign(#[from] SignError),

    #[error("Failed to encode metrics record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to publish metrics record: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Storage error during ingestion: {0}")]
    Store(#[from] StoreError),
}
