//! Presentation of valuation results.
//!
//! Number formatting follows German conventions and only affects display;
//! the engine works on unrounded values.

pub mod format;
pub mod report;

pub use format::{format_decimal, format_euro, format_percent};
pub use report::render_report;
