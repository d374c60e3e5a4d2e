//! Rounded alternative allocation skewed toward the building.
//!
//! The building:land ratio is inflated by a fixed factor, capped, and the
//! resulting building value rounded to whole thousands. This is directional
//! guidance, not a statutory valuation method.

/// Ratio used when the land value is zero or negative.
pub const ZERO_LAND_RATIO: f64 = 999.0;

/// Factor applied to the building:land ratio.
pub const RATIO_UPLIFT: f64 = 1.15;

/// Upper bound of the optimized building share.
pub const MAX_BUILDING_SHARE: f64 = 0.99;

/// Granularity the optimized building value is rounded to.
pub const ROUNDING_STEP: f64 = 1000.0;

/// Optimized split of the purchase price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizedAllocation {
    /// Building share after uplift and cap, before rounding
    pub target_building_share: f64,
    /// Building value rounded to [`ROUNDING_STEP`]
    pub building_value: f64,
    /// Purchase price minus the rounded building value
    pub land_value: f64,
    /// Rounded building value over purchase price
    pub building_share: f64,
    /// Land remainder over purchase price
    pub land_share: f64,
}

/// Computes the optimized allocation from the method's land and building values.
#[must_use]
pub fn optimize(purchase_price: f64, land_value: f64, preliminary_building_value: f64) -> OptimizedAllocation {
    let ratio = if land_value > 0.0 {
        preliminary_building_value / land_value
    } else {
        ZERO_LAND_RATIO
    };
    let adjusted_ratio = ratio * RATIO_UPLIFT;
    let target_building_share = (adjusted_ratio / (1.0 + adjusted_ratio)).min(MAX_BUILDING_SHARE);

    let building_value = (purchase_price * target_building_share / ROUNDING_STEP).round() * ROUNDING_STEP;
    let land_value = purchase_price - building_value;
    let (building_share, land_share) = if purchase_price > 0.0 {
        (building_value / purchase_price, land_value / purchase_price)
    } else {
        (0.0, 0.0)
    };

    OptimizedAllocation {
        target_building_share,
        building_value,
        land_value,
        building_share,
        land_share,
    }
}
