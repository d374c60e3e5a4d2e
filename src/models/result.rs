//! Valuation results and method-specific breakdowns.

use serde::{Deserialize, Serialize};

use super::inputs::ValuationMethod;

/// Intermediate figures of the asset-value (cost) method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetValueDetail {
    /// Construction-price index applied (base 2010 = 100)
    pub construction_price_index: f64,
    /// Table year the index was taken from, `None` if the neutral default applied
    pub index_year: Option<i32>,
    /// Baseline unit cost per square meter for type and tier
    pub base_unit_cost: f64,
    /// Index- and region-adjusted cost per square meter
    pub construction_cost_per_sqm: f64,
    /// Construction cost of the building
    pub building_construction_cost: f64,
    /// Construction cost of the garages
    pub garage_construction_cost: f64,
    /// Building plus garage construction cost
    pub total_construction_cost: f64,
    /// Age-based depreciation ratio in `[0, 1]`
    pub depreciation_ratio: f64,
    /// Depreciation amount in EUR
    pub depreciation_amount: f64,
    /// Land value plus depreciated building value
    pub preliminary_asset_value: f64,
    /// Preliminary asset value times the market adjustment factor.
    ///
    /// Informational only; the allocation uses the preliminary value.
    pub market_adjusted_value: f64,
}

/// Intermediate figures of the income-value method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeValueDetail {
    /// Twelve monthly rents
    pub annual_gross_rent: f64,
    /// Administrative allowance for units and garages
    pub management_cost: f64,
    /// Maintenance allowance per square meter applied for the building age
    pub maintenance_rate_per_sqm: f64,
    /// Maintenance allowance for living area and garages
    pub maintenance_cost: f64,
    /// Rent loss risk allowance
    pub vacancy_risk: f64,
    /// Sum of all operating cost allowances
    pub total_operating_cost: f64,
    /// Gross rent minus operating costs
    pub net_income: f64,
    /// Return on land value at the capitalization rate
    pub land_value_interest: f64,
    /// Net income attributable to the building (floored at zero)
    pub building_net_income: f64,
    /// Annuity multiplier over the remaining useful life
    pub multiplier: f64,
}

/// Intermediate figures of the comparative-value method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparativeValueDetail {
    /// Living area times comparable value per square meter
    pub total_comparative_value: f64,
    /// Land value is larger than the comparative total, building value floored at 0
    pub land_value_exceeds_total: bool,
}

/// Method-specific detail payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MethodDetail {
    /// Cost approach figures
    AssetValue(AssetValueDetail),
    /// Capitalized-earnings figures
    IncomeValue(IncomeValueDetail),
    /// Market-comparable figures
    ComparativeValue(ComparativeValueDetail),
}

impl MethodDetail {
    /// Returns which method produced this detail.
    #[must_use]
    pub const fn method(&self) -> ValuationMethod {
        match self {
            Self::AssetValue(_) => ValuationMethod::AssetValue,
            Self::IncomeValue(_) => ValuationMethod::IncomeValue,
            Self::ComparativeValue(_) => ValuationMethod::ComparativeValue,
        }
    }
}

/// Complete output of one valuation.
///
/// Recomputed from scratch for every input; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Effective co-ownership ratio
    pub ownership_share: f64,
    /// Land area attributable to the ownership share
    pub relevant_land_area_sqm: f64,
    /// Ownership-adjusted land value
    pub land_value: f64,
    /// Building value computed by the active method
    pub preliminary_building_value: f64,
    /// Total value the shares are computed against
    pub total_computed_value: f64,
    /// Land fraction of the total computed value
    pub land_share: f64,
    /// Building fraction of the total computed value
    pub building_share: f64,
    /// Purchase price times land share
    pub final_land_value: f64,
    /// Purchase price times building share
    pub final_building_value: f64,
    /// Basis for linear depreciation (equals the final building value)
    pub depreciation_basis: f64,
    /// Linear depreciation per year
    pub annual_depreciation: f64,
    /// Rounded alternative building value
    pub optimized_building_value: f64,
    /// Purchase price minus the optimized building value
    pub optimized_land_value: f64,
    /// Optimized building value as a fraction of the purchase price
    pub optimized_building_share: f64,
    /// Optimized land value as a fraction of the purchase price
    pub optimized_land_share: f64,
    /// Building age at purchase in years
    pub building_age_years: u32,
    /// Remaining useful life at purchase in years
    pub remaining_useful_life_years: u32,
    /// Method-specific breakdown
    pub method_detail: MethodDetail,
}
