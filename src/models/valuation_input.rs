//! Typed engine input.
//!
//! One shared transaction/land part plus exactly one method payload.

use serde::{Deserialize, Serialize};

use super::building_type::BuildingType;
use super::inputs::ValuationMethod;

/// Co-ownership fraction (e.g., 120/1000 for a condominium share).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct OwnershipShare {
    /// Fraction numerator
    pub numerator: Option<f64>,
    /// Fraction denominator
    pub denominator: Option<f64>,
}

impl OwnershipShare {
    /// Full ownership (1/1).
    pub const FULL: Self = Self {
        numerator: Some(1.0),
        denominator: Some(1.0),
    };

    /// Returns the share as a ratio.
    ///
    /// Falls back to `1.0` when either part is absent or the denominator is zero.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        match (self.numerator, self.denominator) {
            (Some(numerator), Some(denominator)) if denominator != 0.0 => numerator / denominator,
            _ => 1.0,
        }
    }
}

/// Land parameters shared by all methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandParameters {
    /// Land area in square meters
    pub area_sqm: f64,
    /// Official land value per square meter
    pub value_rate_per_sqm: f64,
    /// Co-ownership fraction
    pub ownership: OwnershipShare,
}

/// Cost-approach parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetValueParameters {
    /// Living area in square meters
    pub living_area_sqm: f64,
    /// Row of the unit-cost table
    pub building_type: BuildingType,
    /// Quality tier (1..=5, clamped on lookup)
    pub quality_tier: u8,
    /// Regional construction cost factor
    pub regional_factor: f64,
    /// Market adjustment factor (informational only)
    pub market_adjustment_factor: f64,
    /// Number of garages
    pub garage_count: u32,
}

/// Capitalized-earnings parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeValueParameters {
    /// Monthly net cold rent
    pub monthly_net_cold_rent: f64,
    /// Number of residential units (at least one is assumed)
    pub unit_count: u32,
    /// Number of garages
    pub garage_count: u32,
    /// Living area in square meters (maintenance allowance basis)
    pub living_area_sqm: f64,
    /// Capitalization rate in percent
    pub capitalization_rate_percent: f64,
}

/// Market-comparable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparativeValueParameters {
    /// Living area in square meters
    pub living_area_sqm: f64,
    /// Comparable market value per square meter
    pub comparative_value_per_sqm: f64,
}

/// Method discriminator with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MethodParameters {
    /// Cost approach
    AssetValue(AssetValueParameters),
    /// Capitalized-earnings approach
    IncomeValue(IncomeValueParameters),
    /// Market-comparable approach
    ComparativeValue(ComparativeValueParameters),
}

/// Validated input for a single valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInput {
    /// Purchase price to allocate
    pub purchase_price: f64,
    /// Calendar year of completion
    pub construction_year: i32,
    /// Calendar year of purchase
    pub purchase_year: i32,
    /// Total assumed useful life in years
    pub total_useful_life_years: u32,
    /// Land parameters
    pub land: LandParameters,
    /// Active method and its parameters
    pub method: MethodParameters,
}

impl ValuationInput {
    /// Returns which method this input selects.
    #[must_use]
    pub const fn method_kind(&self) -> ValuationMethod {
        match self.method {
            MethodParameters::AssetValue(_) => ValuationMethod::AssetValue,
            MethodParameters::IncomeValue(_) => ValuationMethod::IncomeValue,
            MethodParameters::ComparativeValue(_) => ValuationMethod::ComparativeValue,
        }
    }
}
