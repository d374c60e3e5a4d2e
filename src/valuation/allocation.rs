//! Splits the purchase price into land and building portions.

/// Fixed linear depreciation rate applied to the building portion.
pub const ANNUAL_DEPRECIATION_RATE: f64 = 0.02;

/// Land/building split of a purchase price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    /// Land fraction of the computed total
    pub land_share: f64,
    /// Building fraction of the computed total
    pub building_share: f64,
    /// Purchase price times land share
    pub final_land_value: f64,
    /// Purchase price times building share
    pub final_building_value: f64,
    /// Linear depreciation per year on the building portion
    pub annual_depreciation: f64,
}

/// Allocates the purchase price in proportion to the computed land and building values.
///
/// Both shares are 0 when the computed total is not positive.
#[must_use]
pub fn allocate(
    purchase_price: f64,
    land_value: f64,
    preliminary_building_value: f64,
    total_computed_value: f64,
) -> Allocation {
    let (land_share, building_share) = if total_computed_value > 0.0 {
        (
            land_value / total_computed_value,
            preliminary_building_value / total_computed_value,
        )
    } else {
        (0.0, 0.0)
    };
    let final_building_value = purchase_price * building_share;

    Allocation {
        land_share,
        building_share,
        final_land_value: purchase_price * land_share,
        final_building_value,
        annual_depreciation: final_building_value * ANNUAL_DEPRECIATION_RATE,
    }
}
