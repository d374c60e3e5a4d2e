//! Stored property records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::inputs::PropertyInputs;

/// Maximum length of a property name.
pub const MAX_PROPERTY_NAME_LEN: usize = 100;

/// A named property with its valuation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Opaque identifier
    pub id: Uuid,
    /// Display name, unique case-insensitively within a store
    pub name: String,
    /// Raw inputs for this property
    pub inputs: PropertyInputs,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Creates a new property with a fresh id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or too long.
    pub fn new(name: &str, inputs: PropertyInputs) -> anyhow::Result<Self> {
        let name = Self::normalize_name(name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            inputs,
            created_at: now,
            updated_at: now,
        })
    }

    /// Trims and checks a property name.
    pub fn normalize_name(name: &str) -> anyhow::Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Property name cannot be empty");
        }
        if trimmed.chars().count() > MAX_PROPERTY_NAME_LEN {
            anyhow::bail!(
                "Property name cannot exceed {} characters",
                MAX_PROPERTY_NAME_LEN
            );
        }
        Ok(trimmed.to_string())
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Marks the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let property = Property::new("  Lakeside Villa ", PropertyInputs::default()).unwrap();
        assert_eq!(property.name, "Lakeside Villa");
        assert_eq!(property.created_at, property.updated_at);
    }

    #[test]
    fn test_new_rejects_blank_and_long_names() {
        assert!(Property::new("   ", PropertyInputs::default()).is_err());
        let long_name = "x".repeat(MAX_PROPERTY_NAME_LEN + 1);
        assert!(Property::new(&long_name, PropertyInputs::default()).is_err());
    }

    #[test]
    fn test_has_name_is_case_insensitive() {
        let property = Property::new("Lakeside Villa", PropertyInputs::default()).unwrap();
        assert!(property.has_name("lakeside villa"));
        assert!(property.has_name(" LAKESIDE VILLA "));
        assert!(!property.has_name("Lakeside"));
    }
}
