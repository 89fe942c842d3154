use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{bail, Result, WrapErr};
use serde_json::Value;
use tracing::{info, warn};

use nodemetrics_validator::{validate_metrics_signature, ValidationResult};

use super::read_json;

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct VerifyCmd {
    /// JSON file holding a record or an array of records (default: stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl VerifyCmd {
    pub fn run(&self) -> Result<()> {
        let input = read_json(self.input.as_deref())?;
        let results = validate_all(&input);

        for result in &results {
            let line = serde_json::to_string(result).wrap_err("Failed to serialize result")?;
            println!("{line}");
        }

        let invalid = results.iter().filter(|r| !r.is_valid()).count();
        if invalid > 0 {
            warn!(invalid, total = results.len(), "Some records failed validation");
            bail!("{invalid} of {} records failed validation", results.len());
        }

        info!(total = results.len(), "All records are valid");
        Ok(())
    }
}

/// Validates a single record, or every element of an array of records.
pub fn validate_all(input: &Value) -> Vec<ValidationResult> {
    match input {
        Value::Array(records) => records.iter().map(validate_metrics_signature).collect(),
        record => vec![validate_metrics_signature(record)],
    }
}
