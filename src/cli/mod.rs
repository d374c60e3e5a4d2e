//! CLI command handlers for ImmoKPA.
//!
//! Every subcommand of the `immokpa` binary lives in its own module with an
//! `Args` struct and an `execute` method returning [`CliResult`].

pub mod calc;
pub mod commentary;
pub mod common;
pub mod config;
pub mod property;
pub mod tables;
pub mod validate;

// Re-export types used by main.rs and tests
pub use calc::CalcArgs;
pub use commentary::CommentaryArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use property::PropertyArgs;
pub use tables::TablesArgs;
pub use validate::ValidateArgs;
