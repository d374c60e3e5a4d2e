//! Markdown valuation report.

use std::fmt::Write as _;

use super::format::{format_decimal, format_euro, format_percent};
use crate::models::{
    quality_tier_label, AssetValueDetail, ComparativeValueDetail, IncomeValueDetail, MethodDetail,
    PropertyInputs, ValuationResult,
};

/// Renders a complete Markdown report for one property.
///
/// Sections: inputs, land value, method breakdown, allocation, depreciation
/// and the optimized allocation.
#[must_use]
pub fn render_report(name: &str, inputs: &PropertyInputs, result: &ValuationResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Purchase Price Allocation: {}\n", name);
    let _ = writeln!(output, "- **Valuation method:** {}", inputs.method.display_name());
    let _ = writeln!(output, "- **Purchase price:** {}", format_euro(inputs.purchase_price));
    let _ = writeln!(
        output,
        "- **Construction / purchase year:** {} / {}",
        inputs.construction_year, inputs.purchase_year
    );
    let _ = writeln!(
        output,
        "- **Building age:** {} years (remaining useful life {} of {} years)",
        result.building_age_years, result.remaining_useful_life_years, inputs.total_useful_life_years
    );
    output.push('\n');

    output.push_str("## Land Value\n");
    let _ = writeln!(
        output,
        "- **Ownership share:** {}",
        format_percent(result.ownership_share)
    );
    let _ = writeln!(
        output,
        "- **Relevant land area:** {} m²",
        format_decimal(result.relevant_land_area_sqm)
    );
    let _ = writeln!(
        output,
        "- **Land value rate:** {} per m²",
        format_euro(inputs.land_value_rate_per_sqm)
    );
    let _ = writeln!(output, "- **Land value:** {}", format_euro(result.land_value));
    output.push('\n');

    match &result.method_detail {
        MethodDetail::AssetValue(detail) => render_asset(&mut output, inputs, detail),
        MethodDetail::IncomeValue(detail) => render_income(&mut output, detail),
        MethodDetail::ComparativeValue(detail) => render_comparative(&mut output, detail),
    }
    let _ = writeln!(
        output,
        "- **Building value:** {}",
        format_euro(result.preliminary_building_value)
    );
    let _ = writeln!(
        output,
        "- **Total computed value:** {}",
        format_euro(result.total_computed_value)
    );
    output.push('\n');

    output.push_str("## Allocation\n");
    output.push_str("| | Share | Amount |\n|---|---:|---:|\n");
    let _ = writeln!(
        output,
        "| Land | {} | {} |",
        format_percent(result.land_share),
        format_euro(result.final_land_value)
    );
    let _ = writeln!(
        output,
        "| Building | {} | {} |",
        format_percent(result.building_share),
        format_euro(result.final_building_value)
    );
    output.push('\n');

    output.push_str("## Depreciation\n");
    let _ = writeln!(
        output,
        "- **Depreciation basis:** {}",
        format_euro(result.depreciation_basis)
    );
    let _ = writeln!(
        output,
        "- **Annual depreciation (2 %):** {}",
        format_euro(result.annual_depreciation)
    );
    output.push('\n');

    output.push_str("## Optimized Allocation\n");
    output.push_str(
        "_Directional guidance only: the building ratio is raised by 15 % and rounded to whole thousands. \
         This is not a statutory valuation._\n\n",
    );
    let _ = writeln!(
        output,
        "- **Building:** {} ({})",
        format_euro(result.optimized_building_value),
        format_percent(result.optimized_building_share)
    );
    let _ = writeln!(
        output,
        "- **Land:** {} ({})",
        format_euro(result.optimized_land_value),
        format_percent(result.optimized_land_share)
    );

    output
}

fn render_asset(output: &mut String, inputs: &PropertyInputs, detail: &AssetValueDetail) {
    output.push_str("## Asset Value\n");
    let _ = writeln!(
        output,
        "- **Building type:** {}",
        inputs.building_type.display_name()
    );
    let _ = writeln!(
        output,
        "- **Quality tier:** {}",
        quality_tier_label(inputs.quality_tier).unwrap_or("unknown")
    );
    let index_source = match detail.index_year {
        Some(year) => format!("table year {}", year),
        None => "neutral default".to_string(),
    };
    let _ = writeln!(
        output,
        "- **Construction price index:** {} ({})",
        format_decimal(detail.construction_price_index),
        index_source
    );
    let _ = writeln!(
        output,
        "- **Construction cost per m²:** {}",
        format_euro(detail.construction_cost_per_sqm)
    );
    let _ = writeln!(
        output,
        "- **Construction cost (building + garages):** {} + {} = {}",
        format_euro(detail.building_construction_cost),
        format_euro(detail.garage_construction_cost),
        format_euro(detail.total_construction_cost)
    );
    let _ = writeln!(
        output,
        "- **Depreciation:** {} ({})",
        format_euro(detail.depreciation_amount),
        format_percent(detail.depreciation_ratio)
    );
    let _ = writeln!(
        output,
        "- **Market-adjusted value (informational):** {}",
        format_euro(detail.market_adjusted_value)
    );
}

fn render_income(output: &mut String, detail: &IncomeValueDetail) {
    output.push_str("## Income Value\n");
    let _ = writeln!(
        output,
        "- **Annual gross rent:** {}",
        format_euro(detail.annual_gross_rent)
    );
    let _ = writeln!(
        output,
        "- **Operating costs:** {} (management {}, maintenance {} at {} per m², vacancy risk {})",
        format_euro(detail.total_operating_cost),
        format_euro(detail.management_cost),
        format_euro(detail.maintenance_cost),
        format_euro(detail.maintenance_rate_per_sqm),
        format_euro(detail.vacancy_risk)
    );
    let _ = writeln!(output, "- **Net income:** {}", format_euro(detail.net_income));
    let _ = writeln!(
        output,
        "- **Land value interest:** {}",
        format_euro(detail.land_value_interest)
    );
    let _ = writeln!(
        output,
        "- **Building net income:** {}",
        format_euro(detail.building_net_income)
    );
    let _ = writeln!(output, "- **Multiplier:** {}", format_decimal(detail.multiplier));
}

fn render_comparative(output: &mut String, detail: &ComparativeValueDetail) {
    output.push_str("## Comparative Value\n");
    let _ = writeln!(
        output,
        "- **Comparative total:** {}",
        format_euro(detail.total_comparative_value)
    );
    if detail.land_value_exceeds_total {
        output.push_str(
            "- **Warning:** the land value exceeds the comparative total; the building value is set to 0.\n",
        );
    }
}
