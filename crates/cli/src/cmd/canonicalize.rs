use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};

use nodemetrics_codec::canonicalize_value;

use super::read_json;

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct CanonicalizeCmd {
    /// JSON file holding the record (default: stdin)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl CanonicalizeCmd {
    pub fn run(&self) -> Result<()> {
        let input = read_json(self.input.as_deref())?;
        let canonical = canonicalize_value(&input).wrap_err("Cannot canonicalize record")?;
        println!("{canonical}");
        Ok(())
    }
}
