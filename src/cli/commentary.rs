//! Narrative commentary command.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{load_config, CliError, CliResult, InputSource};
use crate::commentary::build_prompt;
use crate::validation::InputValidator;
use crate::valuation::ValuationEngine;

/// Ask a language model for commentary on a valuation
#[derive(Debug, Clone, Args)]
pub struct CommentaryArgs {
    /// Read inputs from a JSON or TOML file
    #[arg(short, long, value_name = "FILE", conflicts_with = "property")]
    pub input: Option<PathBuf>,

    /// Stored property name or id (defaults to the active property)
    #[arg(short, long, value_name = "NAME_OR_ID")]
    pub property: Option<String>,

    /// Print the prompt instead of sending it
    #[arg(long)]
    pub prompt_only: bool,
}

impl CommentaryArgs {
    /// Execute the commentary command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let source = InputSource {
            input: self.input.as_deref(),
            property: self.property.as_deref(),
        };
        let (_, inputs) = source.resolve(&config)?;

        let report = InputValidator::new().validate(&inputs);
        if !report.is_valid() {
            print!("{}", report.format_message());
            return Err(CliError::validation("Inputs are invalid"));
        }

        let tables = config.reference_tables();
        let result = ValuationEngine::new(&tables).compute(&inputs.to_valuation_input());

        if self.prompt_only {
            println!("{}", build_prompt(&inputs, &result));
            return Ok(());
        }

        request(&config, &inputs, &result)
    }
}

#[cfg(feature = "ai")]
fn request(
    config: &crate::config::Config,
    inputs: &crate::models::PropertyInputs,
    result: &crate::models::ValuationResult,
) -> CliResult<()> {
    use crate::commentary::{CommentaryClient, COMMENTARY_UNREACHABLE};

    let client = CommentaryClient::from_config(&config.commentary)
        .map_err(|e| CliError::validation(format!("{:#}", e)))?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io(format!("Failed to start async runtime: {}", e)))?;

    let text = runtime
        .block_on(client.generate(inputs, result))
        .map_err(|e| {
            tracing::warn!("Commentary request failed: {:#}", e);
            CliError::io(COMMENTARY_UNREACHABLE)
        })?;
    println!("{}", text);
    Ok(())
}

#[cfg(not(feature = "ai"))]
fn request(
    _config: &crate::config::Config,
    _inputs: &crate::models::PropertyInputs,
    _result: &crate::models::ValuationResult,
) -> CliResult<()> {
    Err(CliError::validation(
        "Commentary requests need the 'ai' feature; use --prompt-only",
    ))
}
