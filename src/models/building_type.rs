//! Building types and quality tiers used as keys into the unit-cost table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of quality tiers per building type (cheapest to most luxurious).
pub const QUALITY_TIER_COUNT: usize = 5;

/// Number of building types in the unit-cost table.
pub const BUILDING_TYPE_COUNT: usize = 7;

/// Building type, selecting a row of the baseline unit-cost matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    /// Detached single- or two-family house
    #[default]
    DetachedHouse,
    /// Semi-detached house or end-of-terrace house
    SemiDetached,
    /// Mid-terrace house
    MidTerrace,
    /// Condominium in a building with fewer than six units
    CondoSmall,
    /// Condominium in a building with more than six units
    CondoLarge,
    /// Multi-family rental building
    MultiFamily,
    /// Office or administrative building
    Office,
}

impl BuildingType {
    /// All building types in table order.
    pub const ALL: [Self; BUILDING_TYPE_COUNT] = [
        Self::DetachedHouse,
        Self::SemiDetached,
        Self::MidTerrace,
        Self::CondoSmall,
        Self::CondoLarge,
        Self::MultiFamily,
        Self::Office,
    ];

    /// Returns the serialized key (e.g., "detached_house").
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::DetachedHouse => "detached_house",
            Self::SemiDetached => "semi_detached",
            Self::MidTerrace => "mid_terrace",
            Self::CondoSmall => "condo_small",
            Self::CondoLarge => "condo_large",
            Self::MultiFamily => "multi_family",
            Self::Office => "office",
        }
    }

    /// Returns display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::DetachedHouse => "Detached single/two-family house",
            Self::SemiDetached => "Semi-detached / end-of-terrace house",
            Self::MidTerrace => "Mid-terrace house",
            Self::CondoSmall => "Condominium (< 6 units)",
            Self::CondoLarge => "Condominium (> 6 units)",
            Self::MultiFamily => "Multi-family rental building",
            Self::Office => "Office / administrative building",
        }
    }

    /// Position of this type in [`BuildingType::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::DetachedHouse => 0,
            Self::SemiDetached => 1,
            Self::MidTerrace => 2,
            Self::CondoSmall => 3,
            Self::CondoLarge => 4,
            Self::MultiFamily => 5,
            Self::Office => 6,
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BuildingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.key() == normalized)
            .ok_or_else(|| {
                let keys: Vec<&str> = Self::ALL.iter().map(BuildingType::key).collect();
                format!(
                    "Unknown building type '{}'. Expected one of: {}",
                    s,
                    keys.join(", ")
                )
            })
    }
}

/// Returns the display label of a quality tier (1-based), if in range.
#[must_use]
pub const fn quality_tier_label(tier: u8) -> Option<&'static str> {
    match tier {
        1 => Some("1 - Very simple (makeshift construction)"),
        2 => Some("2 - Simple (pre-1950 standard, no central heating)"),
        3 => Some("3 - Medium (standard construction)"),
        4 => Some("4 - Upscale (good fittings)"),
        5 => Some("5 - Luxury"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (idx, building_type) in BuildingType::ALL.iter().enumerate() {
            assert_eq!(building_type.index(), idx);
        }
    }

    #[test]
    fn test_from_str_accepts_keys_and_dashes() {
        assert_eq!(
            "detached_house".parse::<BuildingType>().unwrap(),
            BuildingType::DetachedHouse
        );
        assert_eq!(
            "Condo-Large".parse::<BuildingType>().unwrap(),
            BuildingType::CondoLarge
        );
        assert!("castle".parse::<BuildingType>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&BuildingType::MultiFamily).unwrap();
        assert_eq!(json, "\"multi_family\"");
        let parsed: BuildingType = serde_json::from_str("\"office\"").unwrap();
        assert_eq!(parsed, BuildingType::Office);
    }

    #[test]
    fn test_quality_tier_labels() {
        assert!(quality_tier_label(0).is_none());
        assert!(quality_tier_label(3).unwrap().contains("Medium"));
        assert!(quality_tier_label(6).is_none());
    }
}
