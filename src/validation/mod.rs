//! Range checks on raw property inputs.
//!
//! The valuation engine assumes its input passed these checks. Violations are
//! collected per field so forms and API clients can show them next to the
//! offending input.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{PropertyInputs, ValuationMethod, QUALITY_TIER_COUNT};

/// Earliest accepted construction or purchase year.
pub const MIN_YEAR: i32 = 1800;

/// Upper bound of the purchase price.
pub const MAX_PURCHASE_PRICE: f64 = 100_000_000.0;

/// Upper bound of the plot area.
pub const MAX_LAND_AREA_SQM: f64 = 1_000_000.0;

/// Upper bound of the land value rate and the comparative value per square meter.
pub const MAX_VALUE_PER_SQM: f64 = 100_000.0;

/// Upper bound of the living area.
pub const MAX_LIVING_AREA_SQM: f64 = 10_000.0;

/// Upper bound of the monthly rent.
pub const MAX_MONTHLY_RENT: f64 = 1_000_000.0;

/// Upper bound of the total useful life.
pub const MAX_USEFUL_LIFE_YEARS: u32 = 200;

/// Accepted capitalization rates in percent.
pub const CAPITALIZATION_RATE_RANGE: (f64, f64) = (0.1, 20.0);

/// Field-keyed validation failures.
///
/// Serializes as a plain `{field: message}` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    /// Message per field key, first failure wins
    pub errors: BTreeMap<String, String>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a failure unless the field already has one.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Message for a field, if it failed.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Formats the report as a numbered list for terminal output.
    #[must_use]
    pub fn format_message(&self) -> String {
        if self.errors.is_empty() {
            return "All inputs are valid".to_string();
        }

        let mut message = format!("{} invalid inputs:\n", self.errors.len());
        for (idx, (field, error)) in self.errors.iter().enumerate() {
            message.push_str(&format!("  {}. {}: {}\n", idx + 1, field, error));
        }
        message
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

/// Checks [`PropertyInputs`] against the accepted ranges.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    reference_year: i32,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputValidator {
    /// Creates a validator using the current calendar year as reference.
    #[must_use]
    pub fn new() -> Self {
        Self::with_reference_year(chrono::Local::now().year())
    }

    /// Creates a validator with a fixed reference year.
    #[must_use]
    pub const fn with_reference_year(reference_year: i32) -> Self {
        Self { reference_year }
    }

    /// Year construction may not exceed.
    #[must_use]
    pub const fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Validates all fields relevant to the selected method.
    #[must_use]
    pub fn validate(&self, inputs: &PropertyInputs) -> ValidationReport {
        let mut report = ValidationReport::new();

        check_range(
            &mut report,
            "purchase_price",
            inputs.purchase_price,
            Bound::Exclusive(0.0),
            MAX_PURCHASE_PRICE,
        );
        self.check_years(&mut report, inputs);

        if inputs.total_useful_life_years == 0 || inputs.total_useful_life_years > MAX_USEFUL_LIFE_YEARS {
            report.add_error(
                "total_useful_life_years",
                format!("Must be between 1 and {} years", MAX_USEFUL_LIFE_YEARS),
            );
        }

        check_range(
            &mut report,
            "land_area_sqm",
            inputs.land_area_sqm,
            Bound::Exclusive(0.0),
            MAX_LAND_AREA_SQM,
        );
        check_range(
            &mut report,
            "land_value_rate_per_sqm",
            inputs.land_value_rate_per_sqm,
            Bound::Inclusive(0.0),
            MAX_VALUE_PER_SQM,
        );
        check_ownership(&mut report, inputs.ownership_numerator, inputs.ownership_denominator);
        check_range(
            &mut report,
            "living_area_sqm",
            inputs.living_area_sqm,
            Bound::Exclusive(0.0),
            MAX_LIVING_AREA_SQM,
        );

        match inputs.method {
            ValuationMethod::AssetValue => check_asset_fields(&mut report, inputs),
            ValuationMethod::IncomeValue => {
                check_range(
                    &mut report,
                    "monthly_net_cold_rent",
                    inputs.monthly_net_cold_rent,
                    Bound::Exclusive(0.0),
                    MAX_MONTHLY_RENT,
                );
                let (min, max) = CAPITALIZATION_RATE_RANGE;
                check_range(
                    &mut report,
                    "capitalization_rate_percent",
                    inputs.capitalization_rate_percent,
                    Bound::Inclusive(min),
                    max,
                );
            }
            ValuationMethod::ComparativeValue => check_range(
                &mut report,
                "comparative_value_per_sqm",
                inputs.comparative_value_per_sqm,
                Bound::Exclusive(0.0),
                MAX_VALUE_PER_SQM,
            ),
        }

        report
    }

    fn check_years(&self, report: &mut ValidationReport, inputs: &PropertyInputs) {
        if !(MIN_YEAR..=self.reference_year).contains(&inputs.construction_year) {
            report.add_error(
                "construction_year",
                format!("Must be between {} and {}", MIN_YEAR, self.reference_year),
            );
        }

        let latest_purchase = self.reference_year.saturating_add(1);
        if !(MIN_YEAR..=latest_purchase).contains(&inputs.purchase_year) {
            report.add_error(
                "purchase_year",
                format!("Must be between {} and {}", MIN_YEAR, latest_purchase),
            );
        } else if inputs.purchase_year < inputs.construction_year {
            report.add_error(
                "purchase_year",
                "Purchase year cannot be before the construction year",
            );
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

fn check_range(report: &mut ValidationReport, field: &str, value: f64, min: Bound, max: f64) {
    if !value.is_finite() {
        report.add_error(field, "Must be a finite number");
        return;
    }

    let (in_range, lower) = match min {
        Bound::Inclusive(min) => (value >= min && value <= max, format!("at least {}", min)),
        Bound::Exclusive(min) => (value > min && value <= max, format!("greater than {}", min)),
    };
    if !in_range {
        report.add_error(field, format!("Must be {} and at most {}", lower, max));
    }
}

fn check_ownership(report: &mut ValidationReport, numerator: Option<f64>, denominator: Option<f64>) {
    let (Some(numerator), Some(denominator)) = (numerator, denominator) else {
        report.add_error("ownership", "Both ownership numerator and denominator are required");
        return;
    };

    if !numerator.is_finite() || !denominator.is_finite() {
        report.add_error("ownership", "Ownership parts must be finite numbers");
    } else if numerator <= 0.0 || denominator <= 0.0 {
        report.add_error("ownership", "Ownership parts must be greater than 0");
    } else if numerator > denominator {
        report.add_error("ownership", "Ownership numerator cannot exceed the denominator");
    }
}

fn check_asset_fields(report: &mut ValidationReport, inputs: &PropertyInputs) {
    if !(1..=QUALITY_TIER_COUNT).contains(&usize::from(inputs.quality_tier)) {
        report.add_error(
            "quality_tier",
            format!("Must be between 1 and {}", QUALITY_TIER_COUNT),
        );
    }
    for (field, value) in [
        ("regional_factor", inputs.regional_factor),
        ("market_adjustment_factor", inputs.market_adjustment_factor),
    ] {
        if !value.is_finite() {
            report.add_error(field, "Must be a finite number");
        } else if value <= 0.0 {
            report.add_error(field, "Must be greater than 0");
        }
    }
}
