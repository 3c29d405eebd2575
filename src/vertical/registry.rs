//! Named-instance lifecycle.
//!
//! A model run can carry several vertical coordinates at once, for
//! example the main pseudo-height coordinate plus a diagnostic
//! pressure coordinate. [`VertCoordRegistry`] owns them all, keyed by
//! name, and keeps the output [`FieldRegistry`] consistent: creating an
//! instance registers its fields, erasing it removes them.
//!
//! The registry is an explicit context object passed to whoever needs
//! it. There is no global state.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{RegistryError, VertCoordError};
use crate::field::FieldRegistry;
use crate::mesh::ColumnMesh;
use crate::vertical::store::{VertCoord, VertCoordOptions};

/// Owning registry of named [`VertCoord`] instances.
#[derive(Clone, Debug, Default)]
pub struct VertCoordRegistry {
    coords: BTreeMap<String, VertCoord>,
}

impl VertCoordRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a named instance and register its fields.
    ///
    /// Returns a mutable handle to the freshly created instance.
    ///
    /// # Errors
    /// [`RegistryError::DuplicateInstance`] if the name is taken,
    /// [`RegistryError::DuplicateField`] if a field name collides, or
    /// any construction error from [`VertCoord::new`]. On error the
    /// registry and the field registry are unchanged.
    pub fn create(
        &mut self,
        name: &str,
        mesh: &ColumnMesh,
        options: VertCoordOptions,
        fields: &mut FieldRegistry,
    ) -> Result<&mut VertCoord, VertCoordError> {
        match self.coords.entry(name.to_string()) {
            Entry::Occupied(_) => {
                Err(RegistryError::DuplicateInstance(name.to_string()).into())
            }
            Entry::Vacant(slot) => {
                let coord = VertCoord::new(name, mesh, options)?;
                coord.register_fields(fields)?;
                Ok(slot.insert(coord))
            }
        }
    }

    /// Look up an instance.
    ///
    /// # Errors
    /// [`RegistryError::UnknownInstance`] if no such name exists.
    pub fn get(&self, name: &str) -> Result<&VertCoord, RegistryError> {
        self.coords
            .get(name)
            .ok_or_else(|| RegistryError::UnknownInstance(name.to_string()))
    }

    /// Look up an instance for mutation.
    ///
    /// # Errors
    /// [`RegistryError::UnknownInstance`] if no such name exists.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut VertCoord, RegistryError> {
        self.coords
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownInstance(name.to_string()))
    }

    /// Drop an instance and unregister its fields.
    ///
    /// # Errors
    /// [`RegistryError::UnknownInstance`] if no such name exists.
    pub fn erase(&mut self, name: &str, fields: &mut FieldRegistry) -> Result<(), RegistryError> {
        let coord = self
            .coords
            .remove(name)
            .ok_or_else(|| RegistryError::UnknownInstance(name.to_string()))?;
        coord.unregister_fields(fields);
        Ok(())
    }

    /// Drop every instance and unregister all their fields.
    pub fn clear(&mut self, fields: &mut FieldRegistry) {
        for (_, coord) in std::mem::take(&mut self.coords) {
            coord.unregister_fields(fields);
        }
    }

    /// Instance names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.coords.keys().map(String::as_str)
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the registry holds no instances.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh() -> ColumnMesh {
        ColumnMesh::single_column(4, 25.0)
    }

    #[test]
    fn test_create_and_get() {
        let mesh = mesh();
        let mut coords = VertCoordRegistry::new();
        let mut fields = FieldRegistry::new();

        let vc = coords
            .create("default", &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();
        assert_eq!(vc.n_layers, 4);

        assert_eq!(coords.len(), 1);
        assert!(coords.get("default").is_ok());
        assert_eq!(fields.len(), 6);
        assert!(fields.contains("z_mid"));
    }

    #[test]
    fn test_duplicate_instance_rejected() {
        let mesh = mesh();
        let mut coords = VertCoordRegistry::new();
        let mut fields = FieldRegistry::new();

        coords
            .create("default", &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();
        let err = coords
            .create("default", &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap_err();

        assert!(matches!(
            err,
            VertCoordError::Registry(RegistryError::DuplicateInstance(_))
        ));
        // Nothing was re-registered.
        assert_eq!(coords.len(), 1);
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn test_unknown_instance() {
        let coords = VertCoordRegistry::new();
        let err = coords.get("missing").unwrap_err();
        assert_eq!(err, RegistryError::UnknownInstance("missing".to_string()));
    }

    #[test]
    fn test_get_mut_allows_compute() {
        let mesh = mesh();
        let mut coords = VertCoordRegistry::new();
        let mut fields = FieldRegistry::new();
        coords
            .create("default", &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();

        let vc = coords.get_mut("default").unwrap();
        vc.compute_target_thickness(&[1.0]).unwrap();
        assert!(vc.layer_thickness_pstar.get(0, 0) > 25.0);
    }

    #[test]
    fn test_erase_unregisters_fields() {
        let mesh = mesh();
        let mut coords = VertCoordRegistry::new();
        let mut fields = FieldRegistry::new();

        coords
            .create("default", &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();
        coords
            .create("abyssal", &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();
        assert_eq!(fields.len(), 12);

        coords.erase("abyssal", &mut fields).unwrap();
        assert_eq!(coords.len(), 1);
        assert_eq!(fields.len(), 6);
        assert!(!fields.contains("z_mid_abyssal"));
        assert!(fields.contains("z_mid"));

        let err = coords.erase("abyssal", &mut fields).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownInstance(_)));
    }

    #[test]
    fn test_clear_removes_everything() {
        let mesh = mesh();
        let mut coords = VertCoordRegistry::new();
        let mut fields = FieldRegistry::new();

        for name in ["default", "mid_depth", "abyssal"] {
            coords
                .create(name, &mesh, VertCoordOptions::default(), &mut fields)
                .unwrap();
        }
        assert_eq!(coords.len(), 3);
        assert_eq!(fields.len(), 18);

        coords.clear(&mut fields);
        assert!(coords.is_empty());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let mesh = mesh();
        let mut coords = VertCoordRegistry::new();
        let mut fields = FieldRegistry::new();

        for name in ["zeta", "alpha", "mid"] {
            coords
                .create(name, &mesh, VertCoordOptions::default(), &mut fields)
                .unwrap();
        }
        let names: Vec<_> = coords.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
