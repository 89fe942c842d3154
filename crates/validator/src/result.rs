use core::fmt::Display;

use serde::Serialize;

/// Terminal judgment on a candidate record.
///
/// Either valid with no error, or invalid with a message; never anything in between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Display) -> Self {
        Self {
            is_valid: false,
            error: Some(error.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T, E> From<Result<T, E>> for ValidationResult
where
    E: Display,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::valid(),
            Err(e) => Self::invalid(e),
        }
    }
}
