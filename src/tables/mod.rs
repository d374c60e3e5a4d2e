//! Reference tables for the cost approach.
//!
//! Two read-only tables back the asset-value method:
//!
//! - a sparse construction-price index by calendar year (base 2010 = 100)
//! - a baseline unit-cost matrix by building type and quality tier
//!
//! The built-in tables are created once per process and shared. A JSON file
//! with the same shape can replace them (see [`ReferenceTables::load_from_file`]).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::models::{BuildingType, BUILDING_TYPE_COUNT, QUALITY_TIER_COUNT};

/// Oldest year the backward index search will reach.
pub const INDEX_FLOOR_YEAR: i32 = 1960;

/// Index value used when no table year can be resolved.
pub const NEUTRAL_INDEX: f64 = 100.0;

/// Built-in construction-price index (year, value).
const BUILTIN_PRICE_INDEX: [(i32, f64); 25] = [
    (2025, 187.2),
    (2024, 183.3),
    (2023, 177.9),
    (2022, 164.0),
    (2021, 141.0),
    (2020, 136.0),
    (2019, 132.0),
    (2018, 127.0),
    (2017, 122.0),
    (2016, 118.0),
    (2015, 114.0),
    (2014, 112.0),
    (2013, 110.0),
    (2012, 108.0),
    (2011, 104.0),
    (2010, 100.0),
    (2009, 98.0),
    (2008, 97.0),
    (2005, 87.0),
    (2000, 84.0),
    (1995, 80.0),
    (1990, 70.0),
    (1980, 55.0),
    (1970, 35.0),
    (1960, 20.0),
];

/// Built-in baseline unit costs (EUR/sqm, 2010 prices) in `BuildingType::ALL` order.
const BUILTIN_UNIT_COSTS: [[f64; QUALITY_TIER_COUNT]; BUILDING_TYPE_COUNT] = [
    [660.0, 735.0, 845.0, 1020.0, 1275.0],
    [635.0, 705.0, 810.0, 975.0, 1215.0],
    [545.0, 605.0, 695.0, 840.0, 1050.0],
    [710.0, 820.0, 960.0, 1100.0, 1350.0],
    [810.0, 940.0, 1100.0, 1250.0, 1500.0],
    [680.0, 780.0, 900.0, 1050.0, 1300.0],
    [850.0, 1000.0, 1150.0, 1300.0, 1600.0],
];

static BUILTIN: OnceLock<ReferenceTables> = OnceLock::new();

/// Outcome of resolving the index for a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexResolution {
    /// Year that was asked for
    pub requested_year: i32,
    /// Table year the value came from, `None` if the neutral default applied
    pub year: Option<i32>,
    /// Index value to apply
    pub value: f64,
}

impl IndexResolution {
    /// Returns true if the neutral default was used.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.year.is_none()
    }
}

/// Sparse construction-price index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstructionPriceIndex {
    values: BTreeMap<i32, f64>,
}

impl ConstructionPriceIndex {
    /// Creates an index from (year, value) pairs.
    pub fn new(entries: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            values: entries.into_iter().collect(),
        }
    }

    /// Exact lookup without fallback.
    #[must_use]
    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Iterates entries in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.values.iter().map(|(year, value)| (*year, *value))
    }

    /// Number of published years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolves the index value for a year.
    ///
    /// Uses the latest published year not after `year`, searching no further
    /// back than [`INDEX_FLOOR_YEAR`]. If nothing matches, [`NEUTRAL_INDEX`]
    /// is returned. Years before the floor only match exactly.
    #[must_use]
    pub fn resolve(&self, year: i32) -> IndexResolution {
        let found = if year >= INDEX_FLOOR_YEAR {
            self.values.range(INDEX_FLOOR_YEAR..=year).next_back()
        } else {
            self.values.get_key_value(&year)
        };

        let resolution = match found {
            Some((key, value)) => IndexResolution {
                requested_year: year,
                year: Some(*key),
                value: *value,
            },
            None => IndexResolution {
                requested_year: year,
                year: None,
                value: NEUTRAL_INDEX,
            },
        };

        debug!(
            "Construction price index for {}: {} (table year {:?})",
            year, resolution.value, resolution.year
        );

        resolution
    }
}

/// Baseline unit costs by building type and quality tier.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCostTable {
    costs: [[f64; QUALITY_TIER_COUNT]; BUILDING_TYPE_COUNT],
}

impl UnitCostTable {
    /// Returns the five tier costs of a building type.
    #[must_use]
    pub const fn costs(&self, building_type: BuildingType) -> &[f64; QUALITY_TIER_COUNT] {
        &self.costs[building_type.index()]
    }

    /// Returns the unit cost for a 1-based quality tier.
    ///
    /// Out-of-range tiers are clamped to the nearest valid tier.
    #[must_use]
    pub fn unit_cost(&self, building_type: BuildingType, quality_tier: u8) -> f64 {
        let tier_index = usize::from(quality_tier.saturating_sub(1)).min(QUALITY_TIER_COUNT - 1);
        self.costs(building_type)[tier_index]
    }

    /// Builds a table from a keyed map; every building type must be present.
    fn from_map(map: &BTreeMap<BuildingType, [f64; QUALITY_TIER_COUNT]>) -> Result<Self> {
        let mut costs = [[0.0; QUALITY_TIER_COUNT]; BUILDING_TYPE_COUNT];
        for building_type in BuildingType::ALL {
            let row = map.get(&building_type).with_context(|| {
                format!("Unit costs missing for building type '{}'", building_type)
            })?;
            if row.iter().any(|cost| !cost.is_finite() || *cost <= 0.0) {
                anyhow::bail!(
                    "Unit costs for building type '{}' must be positive numbers",
                    building_type
                );
            }
            costs[building_type.index()] = *row;
        }
        Ok(Self { costs })
    }

    fn to_map(&self) -> BTreeMap<BuildingType, [f64; QUALITY_TIER_COUNT]> {
        BuildingType::ALL
            .iter()
            .map(|t| (*t, self.costs[t.index()]))
            .collect()
    }
}

/// File schema for reference table overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReferenceTablesFile {
    construction_price_index: BTreeMap<i32, f64>,
    unit_costs: BTreeMap<BuildingType, [f64; QUALITY_TIER_COUNT]>,
}

/// Read-only reference data for the valuation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    price_index: ConstructionPriceIndex,
    unit_costs: UnitCostTable,
}

impl ReferenceTables {
    /// Returns the process-wide built-in tables.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| Self {
            price_index: ConstructionPriceIndex::new(BUILTIN_PRICE_INDEX),
            unit_costs: UnitCostTable {
                costs: BUILTIN_UNIT_COSTS,
            },
        })
    }

    /// Parses tables from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ReferenceTablesFile =
            serde_json::from_str(json).context("Failed to parse reference tables JSON")?;

        if file.construction_price_index.is_empty() {
            anyhow::bail!("Construction price index must contain at least one year");
        }
        if let Some((year, _)) = file
            .construction_price_index
            .iter()
            .find(|(_, value)| !value.is_finite() || **value <= 0.0)
        {
            anyhow::bail!("Construction price index for {} must be a positive number", year);
        }

        Ok(Self {
            price_index: ConstructionPriceIndex {
                values: file.construction_price_index,
            },
            unit_costs: UnitCostTable::from_map(&file.unit_costs)?,
        })
    }

    /// Loads tables from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context(format!(
            "Failed to read reference tables file: {}",
            path.display()
        ))?;
        Self::from_json(&content).context(format!(
            "Invalid reference tables file: {}",
            path.display()
        ))
    }

    /// Serializes the tables in the override file format.
    pub fn to_json(&self) -> Result<String> {
        let file = ReferenceTablesFile {
            construction_price_index: self.price_index.values.clone(),
            unit_costs: self.unit_costs.to_map(),
        };
        serde_json::to_string_pretty(&file).context("Failed to serialize reference tables")
    }

    /// Construction-price index.
    #[must_use]
    pub const fn price_index(&self) -> &ConstructionPriceIndex {
        &self.price_index
    }

    /// Baseline unit-cost matrix.
    #[must_use]
    pub const fn unit_costs(&self) -> &UnitCostTable {
        &self.unit_costs
    }
}
