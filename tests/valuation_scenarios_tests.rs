//! End-to-end valuation scenarios and engine invariants.

use immokpa::models::{MethodDetail, PropertyInputs, ValuationMethod, ValuationResult};
use immokpa::validation::InputValidator;
use immokpa::valuation::{self, ValuationEngine};

mod fixtures;
use fixtures::{reference_inputs, zero_land_inputs};

fn compute(inputs: &PropertyInputs) -> ValuationResult {
    valuation::compute(&inputs.to_valuation_input())
}

fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_asset_value_reference_house() {
    let result = compute(&reference_inputs(ValuationMethod::AssetValue));

    assert_close(result.land_value, 256_000.0, 1e-9, "land value");
    let detail = match result.method_detail {
        MethodDetail::AssetValue(detail) => detail,
        other => panic!("unexpected detail: {:?}", other),
    };
    assert_close(detail.construction_price_index, 183.3, 1e-9, "index");
    assert_close(detail.base_unit_cost, 845.0, 1e-9, "unit cost");
    assert_close(detail.total_construction_cost, 233_340.9, 1e-6, "construction cost");
    assert_close(detail.depreciation_amount, 84_586.08, 0.01, "depreciation");
    assert_close(result.preliminary_building_value, 148_754.82, 0.01, "building value");
    assert_close(result.total_computed_value, 404_754.82, 0.01, "total");
    assert_close(result.land_share, 0.6325, 1e-4, "land share");
    assert_close(result.building_share, 0.3675, 1e-4, "building share");
    assert_close(result.final_land_value, 316_240.83, 0.01, "final land");
    assert_close(result.final_building_value, 183_759.17, 0.01, "final building");
    assert_close(result.annual_depreciation, 3675.18, 0.01, "annual depreciation");
}

#[test]
fn test_comparative_value_reference_house() {
    let result = compute(&reference_inputs(ValuationMethod::ComparativeValue));

    assert_close(result.total_computed_value, 490_000.0, 1e-9, "total");
    assert_close(result.preliminary_building_value, 234_000.0, 1e-9, "building value");
    assert_close(result.land_share, 0.522_449, 1e-6, "land share");
    assert_close(result.building_share, 0.477_551, 1e-6, "building share");
}

#[test]
fn test_income_value_reference_rental() {
    let result = compute(&reference_inputs(ValuationMethod::IncomeValue));

    let detail = match result.method_detail {
        MethodDetail::IncomeValue(detail) => detail,
        other => panic!("unexpected detail: {:?}", other),
    };
    assert_close(detail.annual_gross_rent, 18_000.0, 1e-9, "gross rent");
    assert_close(detail.total_operating_cost, 2825.0, 1e-9, "operating cost");
    assert_close(detail.net_income, 15_175.0, 1e-9, "net income");
    assert_close(detail.land_value_interest, 11_520.0, 1e-9, "land interest");
    assert_close(detail.building_net_income, 3655.0, 1e-9, "building income");
    assert_close(detail.multiplier, 19.868, 1e-3, "multiplier");
    assert_eq!(result.remaining_useful_life_years, 51);
    assert_close(result.preliminary_building_value, 72_617.36, 0.01, "building value");
    assert_close(result.total_computed_value, 328_617.36, 0.01, "total");
    assert_close(result.land_share, 0.779, 1e-3, "land share");
    assert_close(result.building_share, 0.221, 1e-3, "building share");
}

#[test]
fn test_optimization_on_reference_house() {
    let result = compute(&reference_inputs(ValuationMethod::AssetValue));
    assert_eq!(result.optimized_building_value, 200_000.0);
    assert_eq!(result.optimized_land_value, 300_000.0);
    assert_close(result.optimized_building_share, 0.4, 1e-12, "optimized share");
}

#[test]
fn test_zero_land_value_uses_sentinel_ratio() {
    let result = compute(&zero_land_inputs());
    assert_eq!(result.land_value, 0.0);
    assert_eq!(result.land_share, 0.0);
    assert_close(result.building_share, 1.0, 1e-12, "building share");
    assert_eq!(result.optimized_building_value, 495_000.0);
    assert_eq!(result.optimized_land_value, 5000.0);
    assert!(result.optimized_building_share <= 0.99);
}

#[test]
fn test_purchase_before_construction_clamps_age() {
    let mut inputs = reference_inputs(ValuationMethod::AssetValue);
    inputs.construction_year = 2024;
    inputs.purchase_year = 2020;
    let result = compute(&inputs);

    assert_eq!(result.building_age_years, 0);
    assert_eq!(result.remaining_useful_life_years, 80);
    match result.method_detail {
        MethodDetail::AssetValue(detail) => assert_eq!(detail.depreciation_ratio, 0.0),
        other => panic!("unexpected detail: {:?}", other),
    }

    // Validation still rejects this combination before it reaches the engine
    let report = InputValidator::with_reference_year(2024).validate(&inputs);
    assert!(report.error_for("purchase_year").is_some());
}

#[test]
fn test_condominium_share_reduces_land() {
    let mut inputs = reference_inputs(ValuationMethod::AssetValue);
    inputs.ownership_numerator = Some(250.0);
    let result = compute(&inputs);
    assert_close(result.ownership_share, 0.25, 1e-12, "ownership");
    assert_close(result.relevant_land_area_sqm, 200.0, 1e-9, "area");
    assert_close(result.land_value, 64_000.0, 1e-9, "land value");
}

// ============================================================================
// Invariants
// ============================================================================

fn sample_inputs() -> Vec<PropertyInputs> {
    let mut samples = Vec::new();
    for method in ValuationMethod::ALL {
        for (construction_year, purchase_year) in [(1960, 2024), (1995, 2024), (2020, 2023), (1900, 2025)] {
            for rate in [0.0, 120.0, 900.0] {
                let mut inputs = reference_inputs(method);
                inputs.construction_year = construction_year;
                inputs.purchase_year = purchase_year;
                inputs.land_value_rate_per_sqm = rate;
                samples.push(inputs);
            }
        }
    }
    samples
}

#[test]
fn test_shares_and_finals_are_consistent() {
    for inputs in sample_inputs() {
        let result = compute(&inputs);
        let sum = result.land_share + result.building_share;

        if result.total_computed_value > 0.0 && result.land_value <= result.total_computed_value {
            assert_close(sum, 1.0, 1e-9, "share sum");
            assert_close(
                result.final_land_value + result.final_building_value,
                inputs.purchase_price,
                1e-6,
                "final sum",
            );
        }
        assert!(result.land_share >= 0.0 && result.building_share >= 0.0);
        assert!(result.preliminary_building_value >= 0.0);
        assert_eq!(result.depreciation_basis, result.final_building_value);
        assert_close(
            result.annual_depreciation,
            result.final_building_value * 0.02,
            1e-9,
            "annual depreciation",
        );
    }
}

#[test]
fn test_optimized_values_are_whole_thousands_summing_to_price() {
    for inputs in sample_inputs() {
        let result = compute(&inputs);
        assert_eq!(result.optimized_building_value % 1000.0, 0.0);
        assert_eq!(
            result.optimized_building_value + result.optimized_land_value,
            inputs.purchase_price
        );
        assert!(result.optimized_building_value <= inputs.purchase_price * 0.99 + 500.0);
    }
}

#[test]
fn test_remaining_life_never_negative_and_age_consistent() {
    for inputs in sample_inputs() {
        let result = compute(&inputs);
        let expected_age = (inputs.purchase_year - inputs.construction_year).max(0) as u32;
        assert_eq!(result.building_age_years, expected_age);
        assert_eq!(
            result.remaining_useful_life_years,
            inputs.total_useful_life_years.saturating_sub(expected_age)
        );
    }
}

#[test]
fn test_market_adjustment_is_informational() {
    let base = reference_inputs(ValuationMethod::AssetValue);
    let mut adjusted = base.clone();
    adjusted.market_adjustment_factor = 0.8;

    let base_result = compute(&base);
    let adjusted_result = compute(&adjusted);
    assert_eq!(base_result.land_share, adjusted_result.land_share);
    assert_eq!(base_result.final_building_value, adjusted_result.final_building_value);

    match adjusted_result.method_detail {
        MethodDetail::AssetValue(detail) => assert_close(
            detail.market_adjusted_value,
            adjusted_result.total_computed_value * 0.8,
            1e-6,
            "market adjusted value",
        ),
        other => panic!("unexpected detail: {:?}", other),
    }
}

#[test]
fn test_comparative_land_above_total_is_surfaced() {
    let mut inputs = reference_inputs(ValuationMethod::ComparativeValue);
    inputs.comparative_value_per_sqm = 1000.0;
    let result = compute(&inputs);

    assert_eq!(result.preliminary_building_value, 0.0);
    assert!(result.land_share > 1.0);
    match result.method_detail {
        MethodDetail::ComparativeValue(detail) => assert!(detail.land_value_exceeds_total),
        other => panic!("unexpected detail: {:?}", other),
    }
}

#[test]
fn test_engine_results_are_reproducible_across_threads() {
    let inputs = reference_inputs(ValuationMethod::IncomeValue).to_valuation_input();
    let expected = ValuationEngine::default().compute(&inputs);

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || valuation::compute(&inputs)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
