//! End-to-end tests for `immokpa config` commands.

use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

fn run(args: &[&str], config_dir: &Path) -> Output {
    isolated_command(args, config_dir)
        .output()
        .expect("Failed to execute command")
}

fn show_json(config_dir: &Path) -> serde_json::Value {
    let output = run(&["config", "show", "--json"], config_dir);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Should parse JSON output")
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let config_dir = TempDir::new().unwrap();

    let json = show_json(config_dir.path());
    assert!(json["config_file"].as_str().unwrap().ends_with("config.toml"));
    assert_eq!(json["data_dir"], config_dir.path().to_str().unwrap());
    assert_eq!(json["defaults"]["total_useful_life_years"], 80);
    assert_eq!(json["defaults"]["method"], "asset_value");
    assert_eq!(json["commentary"]["model"], "gemini-2.5-flash");
    assert_eq!(json["commentary"]["api_key_env"], "GOOGLE_API_KEY");
}

#[test]
fn test_config_show_human() {
    let config_dir = TempDir::new().unwrap();

    let output = run(&["config", "show"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ImmoKPA Configuration"));
    assert!(stdout.contains("Reference Tables: (built-in)"));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_requires_an_option() {
    let config_dir = TempDir::new().unwrap();

    let output = run(&["config", "set"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one configuration option"));
}

#[test]
fn test_config_set_persists_defaults() {
    let config_dir = TempDir::new().unwrap();

    let output = run(
        &["config", "set", "--useful-life", "60", "--method", "comparative"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration updated successfully."));
    assert!(config_dir.path().join("config.toml").exists());

    let json = show_json(config_dir.path());
    assert_eq!(json["defaults"]["total_useful_life_years"], 60);
    assert_eq!(json["defaults"]["method"], "comparative_value");

    // New properties pick up the defaults
    run(&["property", "add", "Fresh"], config_dir.path());
    let output = run(&["property", "show", "Fresh", "--json"], config_dir.path());
    let property: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(property["inputs"]["total_useful_life_years"], 60);
    assert_eq!(property["inputs"]["method"], "comparative_value");
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let config_dir = TempDir::new().unwrap();

    let output = run(&["config", "set", "--useful-life", "0"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["config", "set", "--method", "guesswork"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid method"));

    let output = run(
        &["config", "set", "--reference-tables", "/nonexistent/tables.json"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_data_dir_moves_store() {
    let config_dir = TempDir::new().unwrap();
    let data_dir = config_dir.path().join("data");

    let output = run(
        &["config", "set", "--data-dir", data_dir.to_str().unwrap()],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(data_dir.is_dir());

    run(&["property", "add", "Stored elsewhere"], config_dir.path());
    assert!(data_dir.join("properties.json").exists());
}

#[test]
fn test_config_invalid_file_fails_to_load() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "[defaults\nbroken").unwrap();

    let output = run(&["config", "show"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}
