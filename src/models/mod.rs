//! Data models for property inputs, valuation inputs, and results.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod building_type;
pub mod inputs;
pub mod property;
pub mod result;
pub mod valuation_input;

// Re-export all model types
pub use building_type::{
    quality_tier_label, BuildingType, BUILDING_TYPE_COUNT, QUALITY_TIER_COUNT,
};
pub use inputs::{PropertyInputs, ValuationMethod};
pub use property::Property;
pub use result::{
    AssetValueDetail, ComparativeValueDetail, IncomeValueDetail, MethodDetail, ValuationResult,
};
pub use valuation_input::{
    AssetValueParameters, ComparativeValueParameters, IncomeValueParameters, LandParameters,
    MethodParameters, OwnershipShare, ValuationInput,
};
