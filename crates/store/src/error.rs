use thiserror::Error;

use crate::StreamId;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Stream not found: {0}")]
    StreamNotFound(StreamId),

    #[error("Invalid cursor: {0:?}")]
    InvalidCursor(String),

    #[error("Page size must be at least 1")]
    EmptyPage,

    #[error("Failed to encode document: {0}")]
    Encoding(String),

    #[error("Failed to decode stored record: {0}")]
    Decoding(String),
}
