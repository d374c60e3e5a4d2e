//! Building age and remaining useful life.

/// Age figures at the time of purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingAge {
    /// Whole years between construction and purchase
    pub age_years: u32,
    /// Total useful life minus age, floored at zero
    pub remaining_useful_life_years: u32,
    /// Total assumed useful life
    pub total_useful_life_years: u32,
}

impl BuildingAge {
    /// Derives age and remaining life from the year fields.
    ///
    /// A purchase year before the construction year yields age 0.
    #[must_use]
    pub fn from_years(construction_year: i32, purchase_year: i32, total_useful_life_years: u32) -> Self {
        let age_years = u32::try_from(purchase_year.saturating_sub(construction_year)).unwrap_or(0);

        Self {
            age_years,
            remaining_useful_life_years: total_useful_life_years.saturating_sub(age_years),
            total_useful_life_years,
        }
    }

    /// Share of the useful life already consumed, clamped to `[0, 1]`.
    ///
    /// A zero total useful life counts as fully depreciated.
    #[must_use]
    pub fn depreciation_ratio(&self) -> f64 {
        if self.total_useful_life_years == 0 {
            return 1.0;
        }
        (f64::from(self.age_years) / f64::from(self.total_useful_life_years)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_age() {
        let age = BuildingAge::from_years(1995, 2024, 80);
        assert_eq!(age.age_years, 29);
        assert_eq!(age.remaining_useful_life_years, 51);
        assert!((age.depreciation_ratio() - 0.3625).abs() < 1e-12);
    }

    #[test]
    fn test_purchase_before_construction_clamps_to_zero() {
        let age = BuildingAge::from_years(2024, 2020, 80);
        assert_eq!(age.age_years, 0);
        assert_eq!(age.remaining_useful_life_years, 80);
        assert_eq!(age.depreciation_ratio(), 0.0);
    }

    #[test]
    fn test_age_beyond_useful_life() {
        let age = BuildingAge::from_years(1900, 2024, 80);
        assert_eq!(age.age_years, 124);
        assert_eq!(age.remaining_useful_life_years, 0);
        assert!((age.depreciation_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_useful_life_is_fully_depreciated() {
        let age = BuildingAge::from_years(2020, 2024, 0);
        assert_eq!(age.remaining_useful_life_years, 0);
        assert!((age.depreciation_ratio() - 1.0).abs() < f64::EPSILON);

        let new_building = BuildingAge::from_years(2024, 2024, 0);
        assert!((new_building.depreciation_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let age = BuildingAge::from_years(i32::MIN, i32::MAX, 80);
        assert_eq!(age.remaining_useful_life_years, 0);
        let age = BuildingAge::from_years(i32::MAX, i32::MIN, 80);
        assert_eq!(age.age_years, 0);
    }
}
