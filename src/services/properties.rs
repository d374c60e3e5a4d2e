//! Persistent property store.
//!
//! All properties live in a single `properties.json` in the data directory
//! together with the id of the active property. Every mutation is written
//! back immediately using a temp file + rename.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::constants::{DEFAULT_PROPERTY_NAME, PROPERTY_STORE_FILE};
use crate::models::{Property, PropertyInputs};

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    properties: Vec<Property>,
    #[serde(default)]
    active_property_id: Option<Uuid>,
}

/// Named properties with an active selection, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    path: PathBuf,
    data: StoreFile,
}

impl PropertyStore {
    /// Opens the store in `dir`. A missing file yields an empty store.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(PROPERTY_STORE_FILE);

        let data = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read property store: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse property store: {}", path.display()))?
        } else {
            StoreFile::default()
        };

        Ok(Self { path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All properties in creation order.
    #[must_use]
    pub fn list(&self) -> &[Property] {
        &self.data.properties
    }

    /// Returns true if the store holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.properties.is_empty()
    }

    /// Looks up a property by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Property> {
        self.data.properties.iter().find(|p| p.id == id)
    }

    /// Looks up a property by id or case-insensitive name.
    #[must_use]
    pub fn find(&self, name_or_id: &str) -> Option<&Property> {
        if let Ok(id) = Uuid::parse_str(name_or_id.trim()) {
            if let Some(property) = self.get(id) {
                return Some(property);
            }
        }
        self.data.properties.iter().find(|p| p.has_name(name_or_id))
    }

    /// Currently active property.
    #[must_use]
    pub fn active(&self) -> Option<&Property> {
        self.data.active_property_id.and_then(|id| self.get(id))
    }

    /// Id of the active property.
    #[must_use]
    pub const fn active_id(&self) -> Option<Uuid> {
        self.data.active_property_id
    }

    /// Makes a property the active one.
    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        self.require(id)?;
        self.data.active_property_id = Some(id);
        self.save()?;
        info!("Switched active property to {}", id);
        Ok(())
    }

    /// Creates a property and makes it active.
    pub fn create(&mut self, name: &str, inputs: PropertyInputs) -> Result<Property> {
        let property = Property::new(name, inputs)?;
        self.ensure_unique_name(&property.name, None)?;

        self.data.active_property_id = Some(property.id);
        self.data.properties.push(property.clone());
        self.save()?;

        info!("Created property '{}' ({})", property.name, property.id);
        Ok(property)
    }

    /// Renames a property.
    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<Property> {
        let name = Property::normalize_name(name)?;
        self.ensure_unique_name(&name, Some(id))?;

        let property = self.require_mut(id)?;
        property.name = name;
        property.touch();
        let renamed = property.clone();
        self.save()?;

        info!("Renamed property {} to '{}'", id, renamed.name);
        Ok(renamed)
    }

    /// Replaces the inputs of a property.
    pub fn update_inputs(&mut self, id: Uuid, inputs: PropertyInputs) -> Result<Property> {
        let property = self.require_mut(id)?;
        property.inputs = inputs;
        property.touch();
        let updated = property.clone();
        self.save()?;

        info!("Updated inputs of property '{}'", updated.name);
        Ok(updated)
    }

    /// Deletes a property.
    ///
    /// If it was active, the first remaining property becomes active. The
    /// store is never left empty: deleting the last property creates the
    /// default property from `default_inputs`.
    pub fn delete(&mut self, id: Uuid, default_inputs: PropertyInputs) -> Result<Property> {
        let idx = self
            .data
            .properties
            .iter()
            .position(|p| p.id == id)
            .with_context(|| format!("Property not found: {}", id))?;
        let removed = self.data.properties.remove(idx);

        if self.data.active_property_id == Some(id) {
            self.data.active_property_id = self.data.properties.first().map(|p| p.id);
        }

        info!("Deleted property '{}' ({})", removed.name, removed.id);

        if self.is_empty() {
            self.create(DEFAULT_PROPERTY_NAME, default_inputs)?;
        } else {
            self.save()?;
        }
        Ok(removed)
    }

    /// Creates the default property if the store is empty.
    ///
    /// Also repairs a dangling active id. Returns the active property.
    pub fn ensure_default(&mut self, inputs: PropertyInputs) -> Result<Property> {
        if self.is_empty() {
            return self.create(DEFAULT_PROPERTY_NAME, inputs);
        }

        if let Some(active) = self.active() {
            return Ok(active.clone());
        }

        let first = self.data.properties[0].clone();
        self.set_active(first.id)?;
        Ok(first)
    }

    fn require(&self, id: Uuid) -> Result<&Property> {
        self.get(id)
            .with_context(|| format!("Property not found: {}", id))
    }

    fn require_mut(&mut self, id: Uuid) -> Result<&mut Property> {
        self.data
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .with_context(|| format!("Property not found: {}", id))
    }

    fn ensure_unique_name(&self, name: &str, exclude: Option<Uuid>) -> Result<()> {
        let taken = self
            .data
            .properties
            .iter()
            .any(|p| Some(p.id) != exclude && p.has_name(name));
        if taken {
            anyhow::bail!("A property named '{}' already exists", name);
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }

        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize property store")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp property store: {}", temp_path.display())
        })?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename temp property store to: {}", self.path.display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> PropertyStore {
        PropertyStore::open(dir.path()).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = open_store(&temp_dir);
        assert!(store.is_empty());
        assert!(store.active().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_create_makes_active_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let first = store.create("Lakeside Villa", PropertyInputs::default()).unwrap();
        let second = store.create(" City Flat ", PropertyInputs::default()).unwrap();
        assert_eq!(second.name, "City Flat");
        assert_eq!(store.active_id(), Some(second.id));

        let reopened = open_store(&temp_dir);
        assert_eq!(reopened.list().len(), 2);
        assert_eq!(reopened.list()[0].id, first.id);
        assert_eq!(reopened.active_id(), Some(second.id));
        assert!(!temp_dir.path().join("properties.json.tmp").exists());
    }

    #[test]
    fn test_create_rejects_duplicate_names() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        store.create("Lakeside Villa", PropertyInputs::default()).unwrap();

        let err = store
            .create("LAKESIDE VILLA", PropertyInputs::default())
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(store.create("   ", PropertyInputs::default()).is_err());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_find_by_name_or_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        let property = store.create("Lakeside Villa", PropertyInputs::default()).unwrap();

        assert_eq!(store.find("lakeside villa").map(|p| p.id), Some(property.id));
        assert_eq!(
            store.find(&property.id.to_string()).map(|p| p.id),
            Some(property.id)
        );
        assert!(store.find("Harbor Loft").is_none());
    }

    #[test]
    fn test_rename_allows_own_name_case_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        let villa = store.create("Lakeside Villa", PropertyInputs::default()).unwrap();
        store.create("City Flat", PropertyInputs::default()).unwrap();

        let renamed = store.rename(villa.id, "LAKESIDE villa").unwrap();
        assert_eq!(renamed.name, "LAKESIDE villa");
        assert!(renamed.updated_at >= villa.updated_at);

        assert!(store.rename(villa.id, "city flat").is_err());
        assert!(store.rename(Uuid::new_v4(), "Other").is_err());
    }

    #[test]
    fn test_update_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        let property = store.create("Lakeside Villa", PropertyInputs::default()).unwrap();

        let mut inputs = PropertyInputs::default();
        inputs.purchase_price = 650_000.0;
        store.update_inputs(property.id, inputs).unwrap();

        let reopened = open_store(&temp_dir);
        assert_eq!(reopened.get(property.id).unwrap().inputs.purchase_price, 650_000.0);
    }

    #[test]
    fn test_delete_active_falls_back_to_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        let first = store.create("First", PropertyInputs::default()).unwrap();
        let second = store.create("Second", PropertyInputs::default()).unwrap();

        store.delete(second.id, PropertyInputs::default()).unwrap();
        assert_eq!(store.active_id(), Some(first.id));
        assert!(store.delete(second.id, PropertyInputs::default()).is_err());
    }

    #[test]
    fn test_delete_last_property_recreates_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        let only = store.create("Only", PropertyInputs::default()).unwrap();

        let mut inputs = PropertyInputs::default();
        inputs.total_useful_life_years = 60;
        store.delete(only.id, inputs).unwrap();

        assert_eq!(store.list().len(), 1);
        let active = store.active().unwrap();
        assert_eq!(active.name, DEFAULT_PROPERTY_NAME);
        assert_ne!(active.id, only.id);
        assert_eq!(active.inputs.total_useful_life_years, 60);

        let reopened = open_store(&temp_dir);
        assert_eq!(reopened.active_id(), Some(active.id));
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        let first = store.create("First", PropertyInputs::default()).unwrap();
        let second = store.create("Second", PropertyInputs::default()).unwrap();

        store.delete(first.id, PropertyInputs::default()).unwrap();
        assert_eq!(store.active_id(), Some(second.id));
    }

    #[test]
    fn test_ensure_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);

        let created = store.ensure_default(PropertyInputs::default()).unwrap();
        assert_eq!(created.name, DEFAULT_PROPERTY_NAME);

        let again = store.ensure_default(PropertyInputs::default()).unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_set_active_unknown_id_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_store(&temp_dir);
        assert!(store.set_active(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_open_corrupt_file_fails_with_context() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROPERTY_STORE_FILE), "not json").unwrap();
        let err = PropertyStore::open(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse property store"));
    }
}
