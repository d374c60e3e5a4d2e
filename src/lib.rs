//! ImmoKPA library
//!
//! Splits a real-estate purchase price into a land portion and a depreciable
//! building portion. The valuation engine supports the asset-value, income-value
//! and comparative-value methods and additionally suggests a rounded,
//! building-weighted alternative split.
//!
//! ```
//! use immokpa::models::PropertyInputs;
//! use immokpa::valuation;
//!
//! let result = valuation::compute(&PropertyInputs::default().to_valuation_input());
//! assert!((result.land_share + result.building_share - 1.0).abs() < 1e-9);
//! ```

pub mod cli;
pub mod commentary;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod services;
pub mod tables;
pub mod validation;
pub mod valuation;

#[cfg(feature = "web")]
pub mod web;
