//! Shared test fixtures for engine, CLI and web tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use immokpa::models::{BuildingType, PropertyInputs, ValuationMethod};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Reference house: 500k price, 1995/2024, 800 m² at 320 €/m², full ownership.
pub fn reference_inputs(method: ValuationMethod) -> PropertyInputs {
    PropertyInputs {
        purchase_price: 500_000.0,
        construction_year: 1995,
        purchase_year: 2024,
        total_useful_life_years: 80,
        land_area_sqm: 800.0,
        land_value_rate_per_sqm: 320.0,
        ownership_numerator: Some(1000.0),
        ownership_denominator: Some(1000.0),
        method,
        living_area_sqm: 140.0,
        building_type: BuildingType::DetachedHouse,
        quality_tier: 3,
        regional_factor: 1.0,
        market_adjustment_factor: 1.0,
        garage_count: 1,
        monthly_net_cold_rent: 1500.0,
        unit_count: 1,
        capitalization_rate_percent: 4.5,
        comparative_value_per_sqm: 3500.0,
    }
}

/// Reference house without land value.
pub fn zero_land_inputs() -> PropertyInputs {
    PropertyInputs {
        land_value_rate_per_sqm: 0.0,
        ..reference_inputs(ValuationMethod::AssetValue)
    }
}

/// Writes inputs as JSON into `dir`.
pub fn write_inputs_json(dir: &Path, name: &str, inputs: &PropertyInputs) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    fs::write(&path, serde_json::to_string_pretty(inputs).unwrap()).unwrap();
    path
}

/// Writes inputs as TOML into `dir`.
pub fn write_inputs_toml(dir: &Path, name: &str, inputs: &PropertyInputs) -> PathBuf {
    let path = dir.join(format!("{}.toml", name));
    fs::write(&path, toml::to_string(inputs).unwrap()).unwrap();
    path
}

/// Path to the immokpa binary
pub fn immokpa_bin() -> String {
    std::env::var("CARGO_BIN_EXE_immokpa").unwrap_or_else(|_| "target/debug/immokpa".to_string())
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(immokpa_bin());
    cmd.env("IMMOKPA_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}
