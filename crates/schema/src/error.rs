use thiserror::Error;

use crate::validate::MAX_SAFE_INTEGER;
use crate::Field;

/// A shape, type or range violation in a metrics record.
///
/// Every variant names the offending field, so the message alone is enough to
/// tell an operator what to fix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("Metrics record must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(Field),

    #[error("{0} must be a string")]
    NotAString(Field),

    #[error("{0} must be a non-empty string")]
    EmptyString(Field),

    #[error("{0} must be a non-negative integer")]
    NotANonNegativeInteger(Field),

    #[error("{0} must not exceed {max}", max = MAX_SAFE_INTEGER)]
    IntegerTooLarge(Field),

    #[error("environment must be one of: testnet, mainnet, local (got {0:?})")]
    UnknownEnvironment(String),

    #[error("{field} must be a valid ISO-8601 date-time (got {value:?})")]
    InvalidTimestamp { field: Field, value: String },

    #[error("signature must be an array of bytes")]
    SignatureNotAnArray,

    #[error("signature[{index}] must be an integer in [0, 255]")]
    SignatureByteOutOfRange { index: usize },
}

impl StructuralError {
    /// The field this error is attributed to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField(field)
            | Self::NotAString(field)
            | Self::EmptyString(field)
            | Self::NotANonNegativeInteger(field)
            | Self::IntegerTooLarge(field)
            | Self::InvalidTimestamp { field, .. } => Some(*field),
            Self::UnknownEnvironment(_) => Some(Field::Environment),
            Self::SignatureNotAnArray | Self::SignatureByteOutOfRange { .. } => {
                Some(Field::Signature)
            }
        }
    }
}

/// The current time could not be rendered as a timestamp.
#[derive(Debug, Error)]
#[error("Failed to format timestamp: {0}")]
pub struct TimestampError(#[from] time::error::Format);
