//! Valuation command.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::common::{load_config, parse_method, print_json, CliError, CliResult, InputSource};
use crate::export::{format_decimal, format_euro, format_percent, render_report};
use crate::models::{MethodDetail, PropertyInputs, ValuationMethod, ValuationResult};
use crate::validation::{InputValidator, ValidationReport};
use crate::valuation::ValuationEngine;

/// Compute the land/building allocation of a purchase price
#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Read inputs from a JSON or TOML file
    #[arg(short, long, value_name = "FILE", conflicts_with = "property")]
    pub input: Option<PathBuf>,

    /// Stored property name or id (defaults to the active property)
    #[arg(short, long, value_name = "NAME_OR_ID")]
    pub property: Option<String>,

    /// Override the valuation method (asset, income, comparative)
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Output results as JSON
    #[arg(long, conflicts_with = "report")]
    pub json: bool,

    /// Print a Markdown report
    #[arg(long)]
    pub report: bool,
}

#[derive(Debug, Serialize)]
struct CalcOutput<'a> {
    name: &'a str,
    method: ValuationMethod,
    result: &'a ValuationResult,
}

#[derive(Debug, Serialize)]
struct InvalidOutput<'a> {
    valid: bool,
    errors: &'a ValidationReport,
}

impl CalcArgs {
    /// Execute the calc command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let source = InputSource {
            input: self.input.as_deref(),
            property: self.property.as_deref(),
        };
        let (name, mut inputs) = source.resolve(&config)?;
        if let Some(method) = &self.method {
            inputs.method = parse_method(method)?;
        }

        let report = InputValidator::new().validate(&inputs);
        if !report.is_valid() {
            if self.json {
                print_json(&InvalidOutput {
                    valid: false,
                    errors: &report,
                })?;
            } else {
                print!("{}", report.format_message());
            }
            return Err(CliError::validation("Inputs are invalid"));
        }

        let tables = config.reference_tables();
        let result = ValuationEngine::new(&tables).compute(&inputs.to_valuation_input());

        if self.json {
            print_json(&CalcOutput {
                name: &name,
                method: inputs.method,
                result: &result,
            })?;
        } else if self.report {
            print!("{}", render_report(&name, &inputs, &result));
        } else {
            print_summary(&name, &inputs, &result);
        }

        Ok(())
    }
}

fn print_summary(name: &str, inputs: &PropertyInputs, result: &ValuationResult) {
    println!("{} ({})", name, inputs.method.display_name());
    println!();
    println!("  Purchase price:     {}", format_euro(inputs.purchase_price));
    println!("  Land value:         {}", format_euro(result.land_value));
    println!("  Building value:     {}", format_euro(result.preliminary_building_value));
    println!("  Total value:        {}", format_euro(result.total_computed_value));
    println!(
        "  Building age:       {} years ({} remaining)",
        result.building_age_years, result.remaining_useful_life_years
    );

    match &result.method_detail {
        MethodDetail::AssetValue(detail) => println!(
            "  Price index:        {}",
            format_decimal(detail.construction_price_index)
        ),
        MethodDetail::IncomeValue(detail) => {
            println!("  Multiplier:         {}", format_decimal(detail.multiplier));
        }
        MethodDetail::ComparativeValue(detail) => {
            if detail.land_value_exceeds_total {
                println!("  ⚠ Land value exceeds the comparative total; building value is 0");
            }
        }
    }

    println!();
    println!("Allocation:");
    println!(
        "  Land:               {} ({})",
        format_euro(result.final_land_value),
        format_percent(result.land_share)
    );
    println!(
        "  Building:           {} ({})",
        format_euro(result.final_building_value),
        format_percent(result.building_share)
    );
    println!("  Annual depreciation: {}", format_euro(result.annual_depreciation));
    println!();
    println!("Optimized allocation (guidance only):");
    println!(
        "  Land:               {} ({})",
        format_euro(result.optimized_land_value),
        format_percent(result.optimized_land_share)
    );
    println!(
        "  Building:           {} ({})",
        format_euro(result.optimized_building_value),
        format_percent(result.optimized_building_share)
    );
}
