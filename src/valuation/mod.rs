//! Valuation engine: maps one [`ValuationInput`] to one [`ValuationResult`].
//!
//! The pipeline is the same for every method:
//!
//! 1. land value for the owned plot fraction ([`land`])
//! 2. building age and remaining useful life ([`age`])
//! 3. preliminary building value and computed total by the selected method
//!    ([`asset`], [`income`], [`comparative`])
//! 4. proportional split of the purchase price ([`allocation`])
//! 5. rounded alternative split ([`optimization`])
//!
//! Computation is pure and synchronous. Degenerate arithmetic (zero totals,
//! zero land value, exhausted useful life) resolves to defined values instead
//! of errors; range checks on raw inputs live in [`crate::validation`].

pub mod age;
pub mod allocation;
pub mod asset;
pub mod comparative;
pub mod income;
pub mod land;
pub mod optimization;

use tracing::debug;

use crate::models::{MethodDetail, MethodParameters, ValuationInput, ValuationResult};
use crate::tables::ReferenceTables;

pub use age::BuildingAge;
pub use allocation::{Allocation, ANNUAL_DEPRECIATION_RATE};
pub use land::LandValuation;
pub use optimization::OptimizedAllocation;

/// Output of a single valuation method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodValuation {
    /// Building value before allocation
    pub preliminary_building_value: f64,
    /// Total the shares are computed against
    pub total_computed_value: f64,
    /// Method-specific intermediate figures
    pub detail: MethodDetail,
}

/// Valuation engine bound to a set of reference tables.
#[derive(Debug, Clone, Copy)]
pub struct ValuationEngine<'a> {
    tables: &'a ReferenceTables,
}

impl Default for ValuationEngine<'static> {
    fn default() -> Self {
        Self::new(ReferenceTables::builtin())
    }
}

impl<'a> ValuationEngine<'a> {
    /// Creates an engine reading from the given tables.
    #[must_use]
    pub const fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Reference tables in use.
    #[must_use]
    pub const fn tables(&self) -> &'a ReferenceTables {
        self.tables
    }

    /// Runs the full valuation pipeline.
    #[must_use]
    pub fn compute(&self, input: &ValuationInput) -> ValuationResult {
        let land = land::land_value(&input.land);
        let age = BuildingAge::from_years(
            input.construction_year,
            input.purchase_year,
            input.total_useful_life_years,
        );

        let method = match &input.method {
            MethodParameters::AssetValue(params) => {
                asset::value(params, self.tables, input.purchase_year, &age, land.land_value)
            }
            MethodParameters::IncomeValue(params) => income::value(params, &age, land.land_value),
            MethodParameters::ComparativeValue(params) => comparative::value(params, land.land_value),
        };

        let split = allocation::allocate(
            input.purchase_price,
            land.land_value,
            method.preliminary_building_value,
            method.total_computed_value,
        );
        let optimized = optimization::optimize(
            input.purchase_price,
            land.land_value,
            method.preliminary_building_value,
        );

        debug!(
            "Valuation ({}): land share {:.4}, building share {:.4}, optimized building {:.0}",
            input.method_kind(),
            split.land_share,
            split.building_share,
            optimized.building_value
        );

        ValuationResult {
            ownership_share: land.ownership_share,
            relevant_land_area_sqm: land.relevant_land_area_sqm,
            land_value: land.land_value,
            preliminary_building_value: method.preliminary_building_value,
            total_computed_value: method.total_computed_value,
            land_share: split.land_share,
            building_share: split.building_share,
            final_land_value: split.final_land_value,
            final_building_value: split.final_building_value,
            depreciation_basis: split.final_building_value,
            annual_depreciation: split.annual_depreciation,
            optimized_building_value: optimized.building_value,
            optimized_land_value: optimized.land_value,
            optimized_building_share: optimized.building_share,
            optimized_land_share: optimized.land_share,
            building_age_years: age.age_years,
            remaining_useful_life_years: age.remaining_useful_life_years,
            method_detail: method.detail,
        }
    }
}

/// Computes a valuation against the built-in reference tables.
#[must_use]
pub fn compute(input: &ValuationInput) -> ValuationResult {
    ValuationEngine::default().compute(input)
}
