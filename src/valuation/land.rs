//! Ownership-adjusted land value, shared by all methods.

use crate::models::LandParameters;

/// Land value for the owned fraction of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandValuation {
    /// Effective ownership ratio
    pub ownership_share: f64,
    /// Plot area attributable to the ownership share
    pub relevant_land_area_sqm: f64,
    /// Relevant area times the land value rate
    pub land_value: f64,
}

/// Computes the ownership-adjusted land value.
///
/// Areas and rates are taken as given; range checks belong to validation.
#[must_use]
pub fn land_value(land: &LandParameters) -> LandValuation {
    let ownership_share = land.ownership.ratio();
    let relevant_land_area_sqm = land.area_sqm * ownership_share;

    LandValuation {
        ownership_share,
        relevant_land_area_sqm,
        land_value: relevant_land_area_sqm * land.value_rate_per_sqm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OwnershipShare;

    fn land(area_sqm: f64, rate: f64, ownership: OwnershipShare) -> LandParameters {
        LandParameters {
            area_sqm,
            value_rate_per_sqm: rate,
            ownership,
        }
    }

    #[test]
    fn test_full_ownership() {
        let result = land_value(&land(800.0, 320.0, OwnershipShare::FULL));
        assert!((result.relevant_land_area_sqm - 800.0).abs() < 1e-9);
        assert!((result.land_value - 256_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_condominium_share() {
        let share = OwnershipShare {
            numerator: Some(85.0),
            denominator: Some(1000.0),
        };
        let result = land_value(&land(1200.0, 500.0, share));
        assert!((result.ownership_share - 0.085).abs() < 1e-12);
        assert!((result.relevant_land_area_sqm - 102.0).abs() < 1e-9);
        assert!((result.land_value - 51_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_fraction_counts_as_full() {
        let share = OwnershipShare {
            numerator: Some(85.0),
            denominator: None,
        };
        let result = land_value(&land(500.0, 100.0, share));
        assert!((result.ownership_share - 1.0).abs() < f64::EPSILON);
        assert!((result.land_value - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rate_gives_zero_land_value() {
        let result = land_value(&land(800.0, 0.0, OwnershipShare::FULL));
        assert_eq!(result.land_value, 0.0);
    }
}
