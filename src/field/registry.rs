//! Output field registry.
//!
//! Downstream components (output writers, analysis, coupling) discover
//! the engine's arrays by stable name through this registry. Each entry
//! carries the metadata an output layer needs: units, a human-readable
//! long name, the fill value marking inactive layers, and the shape
//! (horizontal location plus vertical extent).
//!
//! Duplicate and unknown names are recoverable [`RegistryError`]s so a
//! caller can probe for a field without tearing the run down.

use std::collections::BTreeMap;

use crate::error::RegistryError;

/// Horizontal location a field lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldLocation {
    /// Cell (column) centers.
    Cell,
    /// Edge midpoints.
    Edge,
    /// Vertices.
    Vertex,
}

/// Vertical extent of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalExtent {
    /// One value per layer.
    Mid,
    /// One value per layer interface (layers + 1).
    Interface,
    /// No vertical dimension.
    None,
}

/// Metadata describing one registered field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    /// Stable lookup name.
    pub name: String,
    /// Units string, CF style ("Pa", "m", "m2 s-2").
    pub units: String,
    /// Human-readable description.
    pub long_name: String,
    /// Value marking inactive layers.
    pub fill_value: f64,
    /// Horizontal location.
    pub location: FieldLocation,
    /// Vertical extent.
    pub vertical: VerticalExtent,
}

impl FieldDef {
    /// Create a cell-centered field definition.
    pub fn cell(
        name: impl Into<String>,
        units: impl Into<String>,
        long_name: impl Into<String>,
        fill_value: f64,
        vertical: VerticalExtent,
    ) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            long_name: long_name.into(),
            fill_value,
            location: FieldLocation::Cell,
            vertical,
        }
    }
}

/// Name-to-definition registry of engine outputs.
///
/// Iteration order is the sorted name order, so listings are stable
/// across runs.
#[derive(Clone, Debug, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<String, FieldDef>,
}

impl FieldRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field definition.
    ///
    /// # Errors
    /// [`RegistryError::DuplicateField`] if the name is taken.
    pub fn register(&mut self, def: FieldDef) -> Result<(), RegistryError> {
        if self.fields.contains_key(&def.name) {
            return Err(RegistryError::DuplicateField(def.name));
        }
        self.fields.insert(def.name.clone(), def);
        Ok(())
    }

    /// Remove a field by name.
    ///
    /// # Errors
    /// [`RegistryError::UnknownField`] if no such field exists.
    pub fn unregister(&mut self, name: &str) -> Result<FieldDef, RegistryError> {
        self.fields
            .remove(name)
            .ok_or_else(|| RegistryError::UnknownField(name.to_string()))
    }

    /// Look up a field definition.
    pub fn get(&self, name: &str) -> Result<&FieldDef, RegistryError> {
        self.fields
            .get(name)
            .ok_or_else(|| RegistryError::UnknownField(name.to_string()))
    }

    /// Whether a field with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Remove every field.
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressure_def() -> FieldDef {
        FieldDef::cell(
            "pressure_interface",
            "Pa",
            "pressure at layer interfaces",
            9.96920996838687e+36,
            VerticalExtent::Interface,
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut reg = FieldRegistry::new();
        reg.register(pressure_def()).unwrap();

        let def = reg.get("pressure_interface").unwrap();
        assert_eq!(def.units, "Pa");
        assert_eq!(def.vertical, VerticalExtent::Interface);
        assert!(reg.contains("pressure_interface"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg = FieldRegistry::new();
        reg.register(pressure_def()).unwrap();
        let err = reg.register(pressure_def()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateField("pressure_interface".to_string())
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unknown_lookup() {
        let reg = FieldRegistry::new();
        let err = reg.get("z_mid").unwrap_err();
        assert_eq!(err, RegistryError::UnknownField("z_mid".to_string()));
    }

    #[test]
    fn test_unregister() {
        let mut reg = FieldRegistry::new();
        reg.register(pressure_def()).unwrap();
        let def = reg.unregister("pressure_interface").unwrap();
        assert_eq!(def.name, "pressure_interface");
        assert!(reg.is_empty());

        let err = reg.unregister("pressure_interface").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownField(_)));
    }

    #[test]
    fn test_names_sorted() {
        let mut reg = FieldRegistry::new();
        for name in ["z_mid", "pressure_mid", "geopotential_mid"] {
            reg.register(FieldDef::cell(
                name,
                "1",
                name,
                0.0,
                VerticalExtent::Mid,
            ))
            .unwrap();
        }
        let names: Vec<_> = reg.names().collect();
        assert_eq!(names, vec!["geopotential_mid", "pressure_mid", "z_mid"]);
    }
}
