//! # vc-rs
//!
//! A pseudo-height vertical coordinate engine for layered
//! unstructured-mesh ocean models.
//!
//! This crate provides the per-column building blocks of an arbitrary
//! Lagrangian-Eulerian vertical coordinate:
//! - Active layer ranges resolved over cells, edges, and vertices
//! - Hydrostatic pressure integration (surface down)
//! - Interface and mid-layer height integration (seafloor up)
//! - Mid-layer geopotential with optional tidal potential
//! - Weighted target-thickness redistribution
//! - Named coordinate instances with an output field registry
//!
//! Columns are independent, so every phase parallelizes over cells
//! (`parallel` feature) and the redistribution kernel vectorizes
//! (`simd` feature) without changing a single bit of the results.

pub mod eos;
pub mod error;
pub mod field;
pub mod forcing;
pub mod mesh;
pub mod types;
pub mod vertical;

// Re-export main types for convenience
pub use eos::{ConstantSpecVol, LinearSpecVol, SpecificVolume, GRAVITY, RHO_0, SPEC_VOL_0};
pub use error::{RegistryError, VertCoordError};
pub use field::{
    FieldDef, FieldLocation, FieldRegistry, LayerArray, VerticalExtent, FILL_VALUE_F64,
};
pub use forcing::{TidalConstituent, TidalForcing};
pub use mesh::ColumnMesh;
pub use types::{CellIndex, EdgeIndex, LayerIndex, LayerRange, VertexIndex};
pub use vertical::{
    ActiveRanges, HostMirror, MovementWeightType, ScanStep, VertCoord, VertCoordDiagnostics,
    VertCoordOptions, VertCoordRegistry, DEFAULT_INSTANCE,
    compute_geopotential, compute_pressure, compute_target_thickness, compute_z_height,
    movement_weights, redistribute_layers_scalar, scan_bottom_up, scan_surface_down,
};

#[cfg(feature = "parallel")]
pub use vertical::{
    compute_geopotential_parallel, compute_pressure_parallel, compute_target_thickness_parallel,
    compute_z_height_parallel,
};
#[cfg(feature = "simd")]
pub use vertical::{compute_target_thickness_simd, redistribute_layers};
