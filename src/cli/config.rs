//! Configuration management CLI commands.

use crate::cli::common::{parse_method, print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory holding the property store
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file replacing the built-in reference tables
    #[arg(long, value_name = "FILE")]
    reference_tables: Option<PathBuf>,

    /// Default total useful life for new properties (years)
    #[arg(long, value_name = "YEARS")]
    useful_life: Option<u32>,

    /// Default valuation method for new properties (asset, income, comparative)
    #[arg(long, value_name = "METHOD")]
    method: Option<String>,

    /// Commentary model name
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    config_file: String,
    data_dir: String,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {:#}", e)))?;
        let config_file = Config::config_file_path()
            .map_err(|e| CliError::io(format!("{:#}", e)))?;
        let data_dir = config
            .data_dir()
            .map_err(|e| CliError::io(format!("{:#}", e)))?;

        if self.json {
            print_json(&ConfigOutput {
                config_file: config_file.to_string_lossy().to_string(),
                data_dir: data_dir.to_string_lossy().to_string(),
                config: &config,
            })?;
        } else {
            output_human_readable(&config, &config_file, &data_dir);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.data_dir.is_none()
            && self.reference_tables.is_none()
            && self.useful_life.is_none()
            && self.method.is_none()
            && self.model.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --data-dir, --reference-tables, --useful-life, --method, or --model",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(dir) = &self.data_dir {
            std::fs::create_dir_all(dir).map_err(|e| {
                CliError::io(format!(
                    "Failed to create data directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            config.paths.data_dir = Some(dir.clone());
        }

        if let Some(path) = &self.reference_tables {
            crate::tables::ReferenceTables::load_from_file(path)
                .map_err(|e| CliError::validation(format!("{:#}", e)))?;
            config.paths.reference_tables = Some(path.clone());
        }

        if let Some(years) = self.useful_life {
            config.defaults.total_useful_life_years = years;
        }

        if let Some(method) = &self.method {
            config.defaults.method = parse_method(method)?;
        }

        if let Some(model) = &self.model {
            config.commentary.model.clone_from(model);
        }

        config.validate().map_err(|e| CliError::validation(e.to_string()))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {:#}", e)))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config, config_file: &std::path::Path, data_dir: &std::path::Path) {
    println!("ImmoKPA Configuration");
    println!("=====================");
    println!();
    println!("Config file: {}", config_file.display());
    println!();

    println!("Paths:");
    println!("  Data Directory: {}", data_dir.display());
    match &config.paths.reference_tables {
        Some(path) => println!("  Reference Tables: {}", path.display()),
        None => println!("  Reference Tables: (built-in)"),
    }
    println!();

    println!("Defaults:");
    println!(
        "  Useful Life: {} years",
        config.defaults.total_useful_life_years
    );
    println!("  Method: {}", config.defaults.method.key());
    println!();

    println!("Commentary:");
    println!("  Endpoint: {}", config.commentary.endpoint);
    println!("  Model: {}", config.commentary.model);
    println!(
        "  API Key Variable: {} ({})",
        config.commentary.api_key_env,
        if config.commentary.api_key().is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!();
}
