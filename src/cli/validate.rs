//! Validation command for property inputs.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{load_config, print_json, CliError, CliResult, InputSource};
use crate::validation::{InputValidator, ValidationReport};

/// Check property inputs without computing a valuation
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Read inputs from a JSON or TOML file
    #[arg(short, long, value_name = "FILE", conflicts_with = "property")]
    pub input: Option<PathBuf>,

    /// Stored property name or id (defaults to the active property)
    #[arg(short, long, value_name = "NAME_OR_ID")]
    pub property: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ValidationResponse<'a> {
    name: &'a str,
    valid: bool,
    errors: &'a ValidationReport,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let source = InputSource {
            input: self.input.as_deref(),
            property: self.property.as_deref(),
        };
        let (name, inputs) = source.resolve(&config)?;
        let report = InputValidator::new().validate(&inputs);

        if self.json {
            print_json(&ValidationResponse {
                name: &name,
                valid: report.is_valid(),
                errors: &report,
            })?;
        } else if report.is_valid() {
            println!("✓ {}: all inputs are valid", name);
        } else {
            println!("✗ {}: validation failed", name);
            println!();
            print!("{}", report.format_message());
        }

        if !report.is_valid() {
            return Err(CliError::validation("Validation failed"));
        }
        Ok(())
    }
}
