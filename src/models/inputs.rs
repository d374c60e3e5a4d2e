//! Raw property inputs as entered by the user.
//!
//! `PropertyInputs` is the flat, form-shaped record that gets stored per
//! property and checked by the validator. Fields belonging to the inactive
//! valuation methods are kept so switching methods loses nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::building_type::BuildingType;
use super::valuation_input::{
    AssetValueParameters, ComparativeValueParameters, IncomeValueParameters, LandParameters,
    MethodParameters, OwnershipShare, ValuationInput,
};

/// Statutory valuation method used to split land and building value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    /// Cost approach: reconstruction cost minus age-based depreciation
    #[default]
    AssetValue,
    /// Capitalized-earnings approach
    IncomeValue,
    /// Market-comparable approach
    ComparativeValue,
}

impl ValuationMethod {
    /// All methods in display order.
    pub const ALL: [Self; 3] = [Self::AssetValue, Self::IncomeValue, Self::ComparativeValue];

    /// Returns the serialized key (e.g., "asset_value").
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::AssetValue => "asset_value",
            Self::IncomeValue => "income_value",
            Self::ComparativeValue => "comparative_value",
        }
    }

    /// Returns display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::AssetValue => "Asset-value method",
            Self::IncomeValue => "Income-value method",
            Self::ComparativeValue => "Comparative-value method",
        }
    }
}

impl fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ValuationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "asset_value" | "asset" => Ok(Self::AssetValue),
            "income_value" | "income" => Ok(Self::IncomeValue),
            "comparative_value" | "comparative" => Ok(Self::ComparativeValue),
            _ => Err(format!(
                "Invalid method '{}'. Must be 'asset', 'income', or 'comparative'",
                s
            )),
        }
    }
}

/// Raw inputs for one property.
///
/// The transaction and land fields are required when deserializing; every
/// method-specific field falls back to the default form value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInputs {
    /// Purchase price in EUR
    pub purchase_price: f64,
    /// Calendar year the building was completed
    pub construction_year: i32,
    /// Calendar year of the purchase
    pub purchase_year: i32,
    /// Total assumed useful life of the building in years
    #[serde(default = "default_total_useful_life_years")]
    pub total_useful_life_years: u32,
    /// Land area in square meters
    pub land_area_sqm: f64,
    /// Official land value per square meter in EUR
    pub land_value_rate_per_sqm: f64,
    /// Co-ownership fraction numerator
    #[serde(default)]
    pub ownership_numerator: Option<f64>,
    /// Co-ownership fraction denominator
    #[serde(default)]
    pub ownership_denominator: Option<f64>,
    /// Active valuation method
    pub method: ValuationMethod,

    /// Living area in square meters (all methods)
    #[serde(default = "default_living_area_sqm")]
    pub living_area_sqm: f64,
    /// Building type (asset value)
    #[serde(default)]
    pub building_type: BuildingType,
    /// Quality tier 1..=5 (asset value)
    #[serde(default = "default_quality_tier")]
    pub quality_tier: u8,
    /// Regional construction cost factor (asset value)
    #[serde(default = "default_factor")]
    pub regional_factor: f64,
    /// Market adjustment factor (asset value, informational)
    #[serde(default = "default_factor")]
    pub market_adjustment_factor: f64,
    /// Number of garages (asset and income value)
    #[serde(default = "default_garage_count")]
    pub garage_count: u32,

    /// Monthly net rent excluding heating and service charges (income value)
    #[serde(default = "default_monthly_net_cold_rent")]
    pub monthly_net_cold_rent: f64,
    /// Number of residential units (income value)
    #[serde(default = "default_unit_count")]
    pub unit_count: u32,
    /// Capitalization rate in percent (income value)
    #[serde(default = "default_capitalization_rate_percent")]
    pub capitalization_rate_percent: f64,

    /// Comparable market value per square meter of living area (comparative value)
    #[serde(default = "default_comparative_value_per_sqm")]
    pub comparative_value_per_sqm: f64,
}

fn default_total_useful_life_years() -> u32 {
    80
}

fn default_living_area_sqm() -> f64 {
    140.0
}

fn default_quality_tier() -> u8 {
    3
}

fn default_factor() -> f64 {
    1.0
}

fn default_garage_count() -> u32 {
    1
}

fn default_monthly_net_cold_rent() -> f64 {
    1500.0
}

fn default_unit_count() -> u32 {
    1
}

fn default_capitalization_rate_percent() -> f64 {
    4.5
}

fn default_comparative_value_per_sqm() -> f64 {
    3500.0
}

impl Default for PropertyInputs {
    fn default() -> Self {
        Self {
            purchase_price: 500_000.0,
            construction_year: 1995,
            purchase_year: 2024,
            total_useful_life_years: default_total_useful_life_years(),
            land_area_sqm: 800.0,
            land_value_rate_per_sqm: 320.0,
            ownership_numerator: Some(1000.0),
            ownership_denominator: Some(1000.0),
            method: ValuationMethod::default(),
            living_area_sqm: default_living_area_sqm(),
            building_type: BuildingType::default(),
            quality_tier: default_quality_tier(),
            regional_factor: default_factor(),
            market_adjustment_factor: default_factor(),
            garage_count: default_garage_count(),
            monthly_net_cold_rent: default_monthly_net_cold_rent(),
            unit_count: default_unit_count(),
            capitalization_rate_percent: default_capitalization_rate_percent(),
            comparative_value_per_sqm: default_comparative_value_per_sqm(),
        }
    }
}

impl PropertyInputs {
    /// Returns a copy with a different active method.
    #[must_use]
    pub fn with_method(mut self, method: ValuationMethod) -> Self {
        self.method = method;
        self
    }

    /// Builds the typed engine input for the active method.
    ///
    /// Only the fields of the active method are carried over.
    #[must_use]
    pub fn to_valuation_input(&self) -> ValuationInput {
        let method = match self.method {
            ValuationMethod::AssetValue => MethodParameters::AssetValue(AssetValueParameters {
                living_area_sqm: self.living_area_sqm,
                building_type: self.building_type,
                quality_tier: self.quality_tier,
                regional_factor: self.regional_factor,
                market_adjustment_factor: self.market_adjustment_factor,
                garage_count: self.garage_count,
            }),
            ValuationMethod::IncomeValue => MethodParameters::IncomeValue(IncomeValueParameters {
                monthly_net_cold_rent: self.monthly_net_cold_rent,
                unit_count: self.unit_count,
                garage_count: self.garage_count,
                living_area_sqm: self.living_area_sqm,
                capitalization_rate_percent: self.capitalization_rate_percent,
            }),
            ValuationMethod::ComparativeValue => {
                MethodParameters::ComparativeValue(ComparativeValueParameters {
                    living_area_sqm: self.living_area_sqm,
                    comparative_value_per_sqm: self.comparative_value_per_sqm,
                })
            }
        };

        ValuationInput {
            purchase_price: self.purchase_price,
            construction_year: self.construction_year,
            purchase_year: self.purchase_year,
            total_useful_life_years: self.total_useful_life_years,
            land: LandParameters {
                area_sqm: self.land_area_sqm,
                value_rate_per_sqm: self.land_value_rate_per_sqm,
                ownership: OwnershipShare {
                    numerator: self.ownership_numerator,
                    denominator: self.ownership_denominator,
                },
            },
            method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!(
            "asset".parse::<ValuationMethod>().unwrap(),
            ValuationMethod::AssetValue
        );
        assert_eq!(
            "income-value".parse::<ValuationMethod>().unwrap(),
            ValuationMethod::IncomeValue
        );
        assert_eq!(
            "Comparative".parse::<ValuationMethod>().unwrap(),
            ValuationMethod::ComparativeValue
        );
        assert!("market".parse::<ValuationMethod>().is_err());
    }

    #[test]
    fn test_minimal_json_fills_method_defaults() {
        let json = r#"{
            "purchase_price": 350000,
            "construction_year": 1980,
            "purchase_year": 2020,
            "land_area_sqm": 500,
            "land_value_rate_per_sqm": 200,
            "method": "comparative_value"
        }"#;
        let inputs: PropertyInputs = serde_json::from_str(json).unwrap();

        assert_eq!(inputs.total_useful_life_years, 80);
        assert_eq!(inputs.ownership_numerator, None);
        assert_eq!(inputs.quality_tier, 3);
        assert!((inputs.comparative_value_per_sqm - 3500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_purchase_price_is_rejected() {
        let json = r#"{
            "construction_year": 1980,
            "purchase_year": 2020,
            "land_area_sqm": 500,
            "land_value_rate_per_sqm": 200,
            "method": "asset_value"
        }"#;
        assert!(serde_json::from_str::<PropertyInputs>(json).is_err());
    }

    #[test]
    fn test_to_valuation_input_carries_active_method_only() {
        let inputs = PropertyInputs::default().with_method(ValuationMethod::IncomeValue);
        let input = inputs.to_valuation_input();

        match input.method {
            MethodParameters::IncomeValue(params) => {
                assert!((params.monthly_net_cold_rent - 1500.0).abs() < f64::EPSILON);
                assert_eq!(params.unit_count, 1);
                assert!((params.living_area_sqm - 140.0).abs() < f64::EPSILON);
            }
            other => panic!("Expected income parameters, got {:?}", other),
        }
        assert_eq!(input.method_kind(), ValuationMethod::IncomeValue);
        assert_eq!(input.land.ownership.numerator, Some(1000.0));
    }
}
