use nodemetrics_schema::StructuralError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid metrics record: {0}")]
    Structural(#[from] StructuralError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
