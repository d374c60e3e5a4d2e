//! Income-value method (capitalized earnings).

use tracing::debug;

use super::age::BuildingAge;
use super::MethodValuation;
use crate::models::{IncomeValueDetail, IncomeValueParameters, MethodDetail};

/// Yearly administrative allowance per residential unit.
pub const MANAGEMENT_COST_PER_UNIT: f64 = 360.0;

/// Yearly administrative allowance per garage.
pub const MANAGEMENT_COST_PER_GARAGE: f64 = 45.0;

/// Yearly maintenance allowance per garage.
pub const MAINTENANCE_COST_PER_GARAGE: f64 = 100.0;

/// Share of gross rent set aside for vacancy and rent loss.
pub const VACANCY_RISK_RATE: f64 = 0.02;

/// Maintenance allowance per square meter of living area for a building age.
#[must_use]
pub const fn maintenance_rate_per_sqm(age_years: u32) -> f64 {
    match age_years {
        0..=21 => 11.0,
        22..=32 => 14.0,
        _ => 18.0,
    }
}

/// Present value factor of a yearly payment over `years` at `rate`.
///
/// A zero rate degenerates to the plain number of years. Negative rates and
/// an exhausted useful life give 0.
#[must_use]
pub fn annuity_multiplier(rate: f64, years: u32) -> f64 {
    if rate > 0.0 && years > 0 {
        let qn = (1.0 + rate).powf(f64::from(years));
        (qn - 1.0) / (qn * rate)
    } else if rate == 0.0 {
        f64::from(years)
    } else {
        0.0
    }
}

/// Values the building by capitalizing its share of the net rental income.
#[must_use]
pub fn value(params: &IncomeValueParameters, age: &BuildingAge, land_value: f64) -> MethodValuation {
    let annual_gross_rent = params.monthly_net_cold_rent * 12.0;
    let garages = f64::from(params.garage_count);

    let management_cost =
        MANAGEMENT_COST_PER_UNIT * f64::from(params.unit_count.max(1)) + MANAGEMENT_COST_PER_GARAGE * garages;
    let maintenance_rate = maintenance_rate_per_sqm(age.age_years);
    let maintenance_cost =
        maintenance_rate * params.living_area_sqm + MAINTENANCE_COST_PER_GARAGE * garages;
    let vacancy_risk = annual_gross_rent * VACANCY_RISK_RATE;
    let total_operating_cost = management_cost + maintenance_cost + vacancy_risk;
    let net_income = annual_gross_rent - total_operating_cost;

    let rate = params.capitalization_rate_percent / 100.0;
    let land_value_interest = land_value * rate;
    let building_net_income = (net_income - land_value_interest).max(0.0);
    let multiplier = annuity_multiplier(rate, age.remaining_useful_life_years);
    let preliminary_building_value = building_net_income * multiplier;

    debug!(
        "Income value: net income {:.2}, building share {:.2}, multiplier {:.4}",
        net_income, building_net_income, multiplier
    );

    MethodValuation {
        preliminary_building_value,
        total_computed_value: land_value + preliminary_building_value,
        detail: MethodDetail::IncomeValue(IncomeValueDetail {
            annual_gross_rent,
            management_cost,
            maintenance_rate_per_sqm: maintenance_rate,
            maintenance_cost,
            vacancy_risk,
            total_operating_cost,
            net_income,
            land_value_interest,
            building_net_income,
            multiplier,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> IncomeValueParameters {
        IncomeValueParameters {
            monthly_net_cold_rent: 1500.0,
            unit_count: 1,
            garage_count: 1,
            living_area_sqm: 140.0,
            capitalization_rate_percent: 4.5,
        }
    }

    fn detail(valuation: &MethodValuation) -> IncomeValueDetail {
        match valuation.detail {
            MethodDetail::IncomeValue(detail) => detail,
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_maintenance_rate_boundaries() {
        assert_eq!(maintenance_rate_per_sqm(0), 11.0);
        assert_eq!(maintenance_rate_per_sqm(21), 11.0);
        assert_eq!(maintenance_rate_per_sqm(22), 14.0);
        assert_eq!(maintenance_rate_per_sqm(32), 14.0);
        assert_eq!(maintenance_rate_per_sqm(33), 18.0);
    }

    #[test]
    fn test_annuity_multiplier_cases() {
        assert!((annuity_multiplier(0.045, 51) - 19.867_950_027_312_03).abs() < 1e-9);
        assert_eq!(annuity_multiplier(0.0, 30), 30.0);
        assert_eq!(annuity_multiplier(0.045, 0), 0.0);
        assert_eq!(annuity_multiplier(-0.01, 30), 0.0);
    }

    #[test]
    fn test_reference_rental() {
        let age = BuildingAge::from_years(1995, 2024, 80);
        let valuation = value(&params(), &age, 256_000.0);
        let detail = detail(&valuation);

        assert!((detail.annual_gross_rent - 18_000.0).abs() < 1e-9);
        assert!((detail.management_cost - 405.0).abs() < 1e-9);
        assert!((detail.maintenance_cost - 2060.0).abs() < 1e-9);
        assert!((detail.total_operating_cost - 2825.0).abs() < 1e-9);
        assert!((detail.net_income - 15_175.0).abs() < 1e-9);
        assert!((detail.land_value_interest - 11_520.0).abs() < 1e-9);
        assert!((detail.building_net_income - 3655.0).abs() < 1e-9);
        assert!((valuation.preliminary_building_value - 72_617.357).abs() < 1e-2);
        assert!((valuation.total_computed_value - 328_617.357).abs() < 1e-2);
    }

    #[test]
    fn test_zero_units_counts_as_one() {
        let age = BuildingAge::from_years(2000, 2024, 80);
        let one = value(&params(), &age, 0.0);
        let zero = value(
            &IncomeValueParameters {
                unit_count: 0,
                ..params()
            },
            &age,
            0.0,
        );
        assert_eq!(detail(&one).management_cost, detail(&zero).management_cost);
    }

    #[test]
    fn test_land_interest_above_net_income_floors_building_at_zero() {
        let age = BuildingAge::from_years(1995, 2024, 80);
        let valuation = value(&params(), &age, 1_000_000.0);
        assert_eq!(detail(&valuation).building_net_income, 0.0);
        assert_eq!(valuation.preliminary_building_value, 0.0);
        assert!((valuation.total_computed_value - 1_000_000.0).abs() < 1e-9);
    }
}
