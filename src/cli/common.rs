//! Shared CLI plumbing: error type, exit codes and input resolution.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::constants::APP_BINARY_NAME;
use crate::models::{PropertyInputs, ValuationMethod};
use crate::services::PropertyStore;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Invalid input or arguments
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric code for `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Message printed to stderr
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// Invalid input or arguments (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Validation,
        }
    }

    /// File system or serialization failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Prints a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Loads the configuration.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {:#}", e)))
}

/// Opens the property store of the configured data directory.
pub fn open_store(config: &Config) -> CliResult<PropertyStore> {
    let dir = config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {:#}", e)))?;
    PropertyStore::open(&dir).map_err(|e| CliError::io(format!("{:#}", e)))
}

/// Reads property inputs from a JSON or TOML file (chosen by extension).
pub fn read_inputs_file(path: &Path) -> CliResult<PropertyInputs> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {}", path.display(), e)))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content)
            .map_err(|e| CliError::validation(format!("Invalid input file {}: {}", path.display(), e)))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| CliError::validation(format!("Invalid input file {}: {}", path.display(), e)))
    }
}

/// Parses a `--method` value.
pub fn parse_method(value: &str) -> CliResult<ValuationMethod> {
    value.parse().map_err(CliError::validation)
}

/// Where a command takes its inputs from.
#[derive(Debug, Clone, Copy)]
pub struct InputSource<'a> {
    /// Input file, wins over the property store
    pub input: Option<&'a Path>,
    /// Stored property name or id; the active property if absent
    pub property: Option<&'a str>,
}

impl InputSource<'_> {
    /// Resolves a display name and the inputs.
    pub fn resolve(&self, config: &Config) -> CliResult<(String, PropertyInputs)> {
        if let Some(path) = self.input {
            let name = path
                .file_stem()
                .map_or_else(|| "input".to_string(), |stem| stem.to_string_lossy().to_string());
            return Ok((name, read_inputs_file(path)?));
        }

        let store = open_store(config)?;
        let property = match self.property {
            Some(name_or_id) => store
                .find(name_or_id)
                .ok_or_else(|| CliError::validation(format!("Property not found: {}", name_or_id)))?,
            None => store.active().ok_or_else(|| {
                CliError::validation(format!(
                    "No active property. Use --input FILE or create one with '{} property add'",
                    APP_BINARY_NAME
                ))
            })?,
        };
        Ok((property.name.clone(), property.inputs.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_read_inputs_json_and_toml() {
        let temp_dir = TempDir::new().unwrap();
        let inputs = PropertyInputs::default();

        let json_path = temp_dir.path().join("villa.json");
        std::fs::write(&json_path, serde_json::to_string(&inputs).unwrap()).unwrap();
        assert_eq!(read_inputs_file(&json_path).unwrap(), inputs);

        let toml_path = temp_dir.path().join("villa.toml");
        std::fs::write(&toml_path, toml::to_string(&inputs).unwrap()).unwrap();
        assert_eq!(read_inputs_file(&toml_path).unwrap(), inputs);
    }

    #[test]
    fn test_read_inputs_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = read_inputs_file(&temp_dir.path().join("missing.json")).unwrap_err();
        assert_eq!(missing.exit_code, ExitCode::Io);

        let bad_path = temp_dir.path().join("bad.json");
        std::fs::write(&bad_path, "{\"purchase_price\": 1}").unwrap();
        let bad = read_inputs_file(&bad_path).unwrap_err();
        assert_eq!(bad.exit_code, ExitCode::Validation);
    }

    #[test]
    fn test_input_source_prefers_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("harbor-loft.json");
        std::fs::write(&path, serde_json::to_string(&PropertyInputs::default()).unwrap()).unwrap();

        let source = InputSource {
            input: Some(&path),
            property: Some("ignored"),
        };
        let (name, _) = source.resolve(&Config::new()).unwrap();
        assert_eq!(name, "harbor-loft");
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("income").unwrap(), ValuationMethod::IncomeValue);
        assert!(parse_method("guess").is_err());
    }
}
