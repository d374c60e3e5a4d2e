//! Property store management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{load_config, open_store, print_json, read_inputs_file, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use crate::export::format_euro;
use crate::models::Property;
use crate::services::PropertyStore;

/// Manage stored properties
#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
enum PropertyCommand {
    /// List all properties
    List(ListArgs),
    /// Show a property's inputs
    Show(ShowArgs),
    /// Create a property and make it active
    Add(AddArgs),
    /// Rename a property
    Rename(RenameArgs),
    /// Delete a property
    Delete(TargetArgs),
    /// Make a property the active one
    Switch(TargetArgs),
    /// Replace a property's inputs from a file
    Import(ImportArgs),
}

/// List all properties
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Show a property's inputs
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Property name or id (defaults to the active property)
    #[arg(value_name = "NAME_OR_ID")]
    target: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Create a property
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Property name
    #[arg(value_name = "NAME")]
    name: String,

    /// Initial inputs from a JSON or TOML file
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
}

/// Rename a property
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Property name or id
    #[arg(value_name = "NAME_OR_ID")]
    target: String,

    /// New name
    #[arg(value_name = "NEW_NAME")]
    new_name: String,
}

/// Select a property
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Property name or id
    #[arg(value_name = "NAME_OR_ID")]
    target: String,
}

/// Replace a property's inputs
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Property name or id
    #[arg(value_name = "NAME_OR_ID")]
    target: String,

    /// JSON or TOML file with the new inputs
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

#[derive(Serialize, Debug)]
struct PropertyListOutput<'a> {
    active_property_id: Option<uuid::Uuid>,
    properties: &'a [Property],
}

impl PropertyArgs {
    /// Execute property subcommand
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let mut store = open_store(&config)?;

        match &self.command {
            PropertyCommand::List(args) => args.execute(&store),
            PropertyCommand::Show(args) => args.execute(&store),
            PropertyCommand::Add(args) => args.execute(&config, &mut store),
            PropertyCommand::Rename(args) => args.execute(&mut store),
            PropertyCommand::Delete(args) => {
                let id = find(&store, &args.target)?.id;
                let removed = store
                    .delete(id, config.default_inputs())
                    .map_err(store_error)?;
                println!("Deleted property '{}'", removed.name);
                if let Some(active) = store.active() {
                    println!("Active property: {}", active.name);
                }
                Ok(())
            }
            PropertyCommand::Switch(args) => {
                let property = find(&store, &args.target)?.clone();
                store.set_active(property.id).map_err(store_error)?;
                println!("Active property: {}", property.name);
                Ok(())
            }
            PropertyCommand::Import(args) => {
                let inputs = read_inputs_file(&args.file)?;
                let id = find(&store, &args.target)?.id;
                let updated = store.update_inputs(id, inputs).map_err(store_error)?;
                println!("Imported inputs into '{}'", updated.name);
                Ok(())
            }
        }
    }
}

impl ListArgs {
    fn execute(&self, store: &PropertyStore) -> CliResult<()> {
        if self.json {
            return print_json(&PropertyListOutput {
                active_property_id: store.active_id(),
                properties: store.list(),
            });
        }

        if store.is_empty() {
            println!(
                "No properties stored. Create one with '{} property add NAME'.",
                APP_BINARY_NAME
            );
            return Ok(());
        }

        for property in store.list() {
            let marker = if store.active_id() == Some(property.id) {
                "*"
            } else {
                " "
            };
            println!(
                "{} {}  {}  {}  {}",
                marker,
                property.id,
                property.name,
                property.inputs.method.key(),
                format_euro(property.inputs.purchase_price)
            );
        }
        Ok(())
    }
}

impl ShowArgs {
    fn execute(&self, store: &PropertyStore) -> CliResult<()> {
        let property = match &self.target {
            Some(target) => find(store, target)?,
            None => store
                .active()
                .ok_or_else(|| CliError::validation("No active property"))?,
        };

        if self.json {
            return print_json(property);
        }

        let inputs_toml = toml::to_string_pretty(&property.inputs)
            .map_err(|e| CliError::io(format!("Failed to serialize inputs: {}", e)))?;
        println!("{} ({})", property.name, property.id);
        println!("Updated: {}", property.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        println!();
        print!("{}", inputs_toml);
        Ok(())
    }
}

impl AddArgs {
    fn execute(&self, config: &Config, store: &mut PropertyStore) -> CliResult<()> {
        let inputs = match &self.input {
            Some(path) => read_inputs_file(path)?,
            None => config.default_inputs(),
        };
        let property = store.create(&self.name, inputs).map_err(store_error)?;
        println!("Created property '{}' ({})", property.name, property.id);
        Ok(())
    }
}

impl RenameArgs {
    fn execute(&self, store: &mut PropertyStore) -> CliResult<()> {
        let property = find(store, &self.target)?.clone();
        let renamed = store
            .rename(property.id, &self.new_name)
            .map_err(store_error)?;
        println!("Renamed '{}' to '{}'", property.name, renamed.name);
        Ok(())
    }
}

fn find<'a>(store: &'a PropertyStore, target: &str) -> CliResult<&'a Property> {
    store
        .find(target)
        .ok_or_else(|| CliError::validation(format!("Property not found: {}", target)))
}

fn store_error(e: anyhow::Error) -> CliError {
    CliError::validation(format!("{:#}", e))
}
