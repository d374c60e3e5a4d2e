//! Comparative-value method (market comparables, residual building value).

use tracing::{debug, warn};

use super::MethodValuation;
use crate::models::{ComparativeValueDetail, ComparativeValueParameters, MethodDetail};

/// Values the property from comparable sales and treats the building as the residual.
#[must_use]
pub fn value(params: &ComparativeValueParameters, land_value: f64) -> MethodValuation {
    let total_comparative_value = params.living_area_sqm * params.comparative_value_per_sqm;
    let land_value_exceeds_total = land_value > total_comparative_value;
    let preliminary_building_value = (total_comparative_value - land_value).max(0.0);

    if land_value_exceeds_total {
        warn!(
            "Land value {:.2} exceeds comparative total {:.2}; building value floored at 0",
            land_value, total_comparative_value
        );
    } else {
        debug!(
            "Comparative value: total {:.2}, building {:.2}",
            total_comparative_value, preliminary_building_value
        );
    }

    MethodValuation {
        preliminary_building_value,
        total_computed_value: total_comparative_value,
        detail: MethodDetail::ComparativeValue(ComparativeValueDetail {
            total_comparative_value,
            land_value_exceeds_total,
        }),
    }
}
