//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and environment variable names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "ImmoKPA";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "immokpa";

/// Directory name used below the platform config directory.
pub const CONFIG_DIR_NAME: &str = "immokpa";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "IMMOKPA_CONFIG_DIR";

/// File name of the property store inside the data directory.
pub const PROPERTY_STORE_FILE: &str = "properties.json";

/// Name given to the property created when the store is empty.
pub const DEFAULT_PROPERTY_NAME: &str = "New property 1";
