//! Integration tests for the instance and field registries.
//!
//! These tests verify:
//! 1. Named instance lifecycle: create, look up, erase, clear
//! 2. Field registration following the instance (suffix rules, atomicity)
//! 3. Failed creation leaving both registries untouched
//! 4. Compute access through the registry

use vc_rs::{
    ColumnMesh, ConstantSpecVol, FieldRegistry, LayerArray, RegistryError, VertCoordError,
    VertCoordOptions, VertCoordRegistry, VerticalExtent, DEFAULT_INSTANCE,
};

/// Number of arrays each instance registers.
const FIELDS_PER_INSTANCE: usize = 6;

fn shelf_mesh() -> ColumnMesh {
    ColumnMesh::planar_hex(2, 2, 5, 8.0)
}

/// Test creating the default instance and looking it up.
#[test]
fn test_create_and_lookup_default() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    coords
        .create(DEFAULT_INSTANCE, &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap();

    assert_eq!(coords.len(), 1);
    let vc = coords.get(DEFAULT_INSTANCE).unwrap();
    assert_eq!(vc.n_cells, 4);
    assert_eq!(vc.n_layers, 5);

    // The default instance registers unsuffixed names.
    assert_eq!(fields.len(), FIELDS_PER_INSTANCE);
    assert!(fields.contains("pressure_interface"));
    assert!(fields.contains("z_mid"));
    let def = fields.get("z_interface").unwrap();
    assert_eq!(def.units, "m");
    assert_eq!(def.vertical, VerticalExtent::Interface);
}

/// Test that named instances suffix their field names.
#[test]
fn test_named_instances_suffix_fields() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    coords
        .create(DEFAULT_INSTANCE, &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap();
    coords
        .create("abyssal", &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap();

    assert_eq!(coords.len(), 2);
    assert_eq!(fields.len(), 2 * FIELDS_PER_INSTANCE);
    assert!(fields.contains("z_mid"));
    assert!(fields.contains("z_mid_abyssal"));
    assert!(!fields.contains("z_mid_default"));

    let names: Vec<_> = coords.names().collect();
    assert_eq!(names, vec!["abyssal", "default"]);
}

/// Test duplicate instance names being rejected cleanly.
#[test]
fn test_duplicate_instance_rejected() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    coords
        .create("main", &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap();
    let err = coords
        .create("main", &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap_err();

    assert!(matches!(
        err,
        VertCoordError::Registry(RegistryError::DuplicateInstance(name)) if name == "main"
    ));
    assert_eq!(coords.len(), 1);
    assert_eq!(fields.len(), FIELDS_PER_INSTANCE);
}

/// Test that a field-name collision aborts creation without side effects.
///
/// Field registration is all-or-nothing: when one of the six names is
/// already claimed, no instance is stored and no field is inserted.
#[test]
fn test_field_collision_rolls_back_creation() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    // Claim one of the names instance "shadow" would register.
    fields
        .register(vc_rs::FieldDef::cell(
            "z_mid_shadow",
            "m",
            "unrelated diagnostic",
            0.0,
            VerticalExtent::Mid,
        ))
        .unwrap();

    let err = coords
        .create("shadow", &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap_err();

    assert!(matches!(
        err,
        VertCoordError::Registry(RegistryError::DuplicateField(name)) if name == "z_mid_shadow"
    ));
    assert!(coords.is_empty());
    assert_eq!(fields.len(), 1, "only the preexisting field should remain");
}

/// Test that invalid options leave both registries untouched.
#[test]
fn test_invalid_options_leave_registries_clean() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    let err = coords
        .create(
            "main",
            &mesh,
            VertCoordOptions::default().with_chunk_width(0),
            &mut fields,
        )
        .unwrap_err();

    assert!(matches!(err, VertCoordError::InvalidConfig(_)));
    assert!(coords.is_empty());
    assert!(fields.is_empty());
}

/// Test unknown-instance lookups.
#[test]
fn test_unknown_instance_lookup() {
    let mut coords = VertCoordRegistry::new();

    let err = coords.get("missing").unwrap_err();
    assert_eq!(err, RegistryError::UnknownInstance("missing".to_string()));
    let err = coords.get_mut("missing").unwrap_err();
    assert_eq!(err, RegistryError::UnknownInstance("missing".to_string()));
}

/// Test running a full step through registry access.
#[test]
fn test_compute_through_registry() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();
    coords
        .create(DEFAULT_INSTANCE, &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap();

    let thickness = LayerArray::filled(mesh.n_cells, mesh.n_layers, 8.0);
    let temperature = LayerArray::filled(mesh.n_cells, mesh.n_layers, 8.0);
    let salinity = LayerArray::filled(mesh.n_cells, mesh.n_layers, 34.0);
    let surface_pressure = vec![0.0; mesh.n_cells];
    let eos = ConstantSpecVol::reference();

    let vc = coords.get_mut(DEFAULT_INSTANCE).unwrap();
    vc.update(&thickness, &temperature, &salinity, &surface_pressure, None, &eos)
        .unwrap();

    // Results visible through the shared lookup, host mirror included.
    let vc = coords.get(DEFAULT_INSTANCE).unwrap();
    for c in 0..mesh.n_cells {
        assert_eq!(vc.z_interface.get(c, mesh.n_layers), -40.0);
        assert_eq!(vc.host.z_interface.get(c, mesh.n_layers), -40.0);
    }
}

/// Test erasing one instance while others keep their fields.
#[test]
fn test_erase_releases_fields() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    for name in [DEFAULT_INSTANCE, "middle", "deep"] {
        coords
            .create(name, &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();
    }
    assert_eq!(fields.len(), 3 * FIELDS_PER_INSTANCE);

    coords.erase("middle", &mut fields).unwrap();
    assert_eq!(coords.len(), 2);
    assert_eq!(fields.len(), 2 * FIELDS_PER_INSTANCE);
    assert!(!fields.contains("z_mid_middle"));
    assert!(fields.contains("z_mid_deep"));
    assert!(fields.contains("z_mid"));

    let err = coords.erase("middle", &mut fields).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownInstance(_)));

    // The erased name is free for reuse.
    coords
        .create("middle", &mesh, VertCoordOptions::default(), &mut fields)
        .unwrap();
    assert_eq!(fields.len(), 3 * FIELDS_PER_INSTANCE);
}

/// Test clearing every instance and its fields at once.
#[test]
fn test_clear_empties_both_registries() {
    let mesh = shelf_mesh();
    let mut coords = VertCoordRegistry::new();
    let mut fields = FieldRegistry::new();

    for name in [DEFAULT_INSTANCE, "barotropic", "diagnostic"] {
        coords
            .create(name, &mesh, VertCoordOptions::default(), &mut fields)
            .unwrap();
    }

    coords.clear(&mut fields);
    assert!(coords.is_empty());
    assert!(fields.is_empty());
}
