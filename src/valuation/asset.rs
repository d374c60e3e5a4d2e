//! Asset-value method (cost approach).
//!
//! The building is valued at its index-adjusted replacement cost less
//! linear age depreciation.

use tracing::debug;

use super::age::BuildingAge;
use super::MethodValuation;
use crate::models::{AssetValueDetail, AssetValueParameters, MethodDetail};
use crate::tables::ReferenceTables;

/// Flat baseline construction cost per garage (2010 prices).
pub const GARAGE_BASE_COST: f64 = 9000.0;

/// Values the building with the cost approach.
#[must_use]
pub fn value(
    params: &AssetValueParameters,
    tables: &ReferenceTables,
    purchase_year: i32,
    age: &BuildingAge,
    land_value: f64,
) -> MethodValuation {
    let index = tables.price_index().resolve(purchase_year);
    let index_factor = index.value / 100.0;
    let base_unit_cost = tables
        .unit_costs()
        .unit_cost(params.building_type, params.quality_tier);

    let construction_cost_per_sqm = base_unit_cost * index_factor * params.regional_factor;
    let building_construction_cost = construction_cost_per_sqm * params.living_area_sqm;
    let garage_construction_cost =
        GARAGE_BASE_COST * f64::from(params.garage_count) * index_factor * params.regional_factor;
    let total_construction_cost = building_construction_cost + garage_construction_cost;

    let depreciation_ratio = age.depreciation_ratio();
    let depreciation_amount = total_construction_cost * depreciation_ratio;
    let preliminary_building_value = (total_construction_cost - depreciation_amount).max(0.0);
    let preliminary_asset_value = land_value + preliminary_building_value;

    debug!(
        "Asset value: construction cost {:.2}, depreciation {:.2}, building {:.2}",
        total_construction_cost, depreciation_amount, preliminary_building_value
    );

    MethodValuation {
        preliminary_building_value,
        total_computed_value: preliminary_asset_value,
        detail: MethodDetail::AssetValue(AssetValueDetail {
            construction_price_index: index.value,
            index_year: index.year,
            base_unit_cost,
            construction_cost_per_sqm,
            building_construction_cost,
            garage_construction_cost,
            total_construction_cost,
            depreciation_ratio,
            depreciation_amount,
            preliminary_asset_value,
            market_adjusted_value: preliminary_asset_value * params.market_adjustment_factor,
        }),
    }
}
