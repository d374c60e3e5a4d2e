//! Reference table inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{load_config, print_json, CliResult};
use crate::export::{format_decimal, format_euro};
use crate::models::{BuildingType, QUALITY_TIER_COUNT};
use crate::tables::{IndexResolution, ReferenceTables};

/// Inspect the reference tables in use
#[derive(Args, Debug)]
pub struct TablesArgs {
    #[command(subcommand)]
    command: TablesCommand,
}

#[derive(Subcommand, Debug)]
enum TablesCommand {
    /// Show the construction-price index or resolve a single year
    Index(IndexArgs),
    /// Show the baseline unit costs by building type and quality tier
    Costs(CostsArgs),
}

/// Show the construction-price index
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Resolve the index for this year
    #[arg(short, long, value_name = "YEAR")]
    year: Option<i32>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Show the unit-cost matrix
#[derive(Args, Debug)]
pub struct CostsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct IndexEntry {
    year: i32,
    value: f64,
}

#[derive(Serialize, Debug)]
struct CostRow {
    building_type: BuildingType,
    label: &'static str,
    costs: [f64; QUALITY_TIER_COUNT],
}

impl TablesArgs {
    /// Execute tables subcommand
    pub fn execute(&self) -> CliResult<()> {
        let tables = load_config()?.reference_tables();
        match &self.command {
            TablesCommand::Index(args) => args.execute(&tables),
            TablesCommand::Costs(args) => args.execute(&tables),
        }
    }
}

impl IndexArgs {
    fn execute(&self, tables: &ReferenceTables) -> CliResult<()> {
        if let Some(year) = self.year {
            let resolution = tables.price_index().resolve(year);
            if self.json {
                return print_json(&resolution);
            }
            print_resolution(&resolution);
            return Ok(());
        }

        let entries: Vec<IndexEntry> = tables
            .price_index()
            .iter()
            .map(|(year, value)| IndexEntry { year, value })
            .collect();
        if self.json {
            return print_json(&entries);
        }

        println!("Construction price index (2010 = 100)");
        for entry in entries.iter().rev() {
            println!("  {}  {:>6}", entry.year, format_decimal(entry.value));
        }
        Ok(())
    }
}

fn print_resolution(resolution: &IndexResolution) {
    match resolution.year {
        Some(year) if year == resolution.requested_year => {
            println!("{}: {}", year, format_decimal(resolution.value));
        }
        Some(year) => println!(
            "{}: {} (from table year {})",
            resolution.requested_year,
            format_decimal(resolution.value),
            year
        ),
        None => println!(
            "{}: {} (no table year, neutral default)",
            resolution.requested_year,
            format_decimal(resolution.value)
        ),
    }
}

impl CostsArgs {
    fn execute(&self, tables: &ReferenceTables) -> CliResult<()> {
        let rows: Vec<CostRow> = BuildingType::ALL
            .iter()
            .map(|building_type| CostRow {
                building_type: *building_type,
                label: building_type.display_name(),
                costs: *tables.unit_costs().costs(*building_type),
            })
            .collect();
        if self.json {
            return print_json(&rows);
        }

        println!("Baseline unit costs per m² (2010 prices), tiers 1-{}", QUALITY_TIER_COUNT);
        for row in &rows {
            let costs: Vec<String> = row.costs.iter().map(|cost| format_euro(*cost)).collect();
            println!("  {:<16} {}", row.building_type.key(), costs.join("  "));
        }
        Ok(())
    }
}
