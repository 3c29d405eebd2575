//! The vertical coordinate engine.
//!
//! Everything here operates on independent columns over the horizontal
//! mesh. The phases of one coordinate step, in their required order:
//!
//! 1. [`active_range`] resolves per-cell layer windows into edge and
//!    vertex windows (once, at construction).
//! 2. [`pressure`] integrates hydrostatic pressure downward from the
//!    surface.
//! 3. The equation of state ([`crate::eos`]) converts temperature,
//!    salinity, and the fresh mid-layer pressure into specific volume.
//! 4. [`height`] integrates interface and mid-layer heights upward from
//!    the seafloor.
//! 5. [`geopotential`] scales mid-layer height by gravity and adds the
//!    tidal potential.
//!
//! [`target_thickness`] redistributes column perturbations on demand,
//! independent of the step above. [`scan`] carries the running-total
//! primitive under both integration directions. [`store`] ties the
//! phases to owned per-instance state, and [`registry`] manages named
//! instances.
//!
//! Every phase comes as a serial function plus a `_parallel` twin
//! behind the `parallel` feature; results are bitwise identical for
//! any thread count.
//!
//! # Example
//!
//! ```
//! use vc_rs::eos::ConstantSpecVol;
//! use vc_rs::field::{FieldRegistry, LayerArray};
//! use vc_rs::mesh::ColumnMesh;
//! use vc_rs::vertical::{VertCoordOptions, VertCoordRegistry};
//!
//! let mesh = ColumnMesh::planar_hex(4, 4, 10, 5.0);
//! let mut coords = VertCoordRegistry::new();
//! let mut fields = FieldRegistry::new();
//! let vc = coords
//!     .create("default", &mesh, VertCoordOptions::default(), &mut fields)
//!     .unwrap();
//!
//! let thickness = LayerArray::filled(mesh.n_cells, mesh.n_layers, 5.0);
//! let temperature = LayerArray::filled(mesh.n_cells, mesh.n_layers, 8.0);
//! let salinity = LayerArray::filled(mesh.n_cells, mesh.n_layers, 34.0);
//! let surface_pressure = vec![0.0; mesh.n_cells];
//!
//! vc.update(
//!     &thickness,
//!     &temperature,
//!     &salinity,
//!     &surface_pressure,
//!     None,
//!     &ConstantSpecVol::reference(),
//! )
//! .unwrap();
//!
//! // Deepest interface sits at the seafloor.
//! assert_eq!(vc.z_interface.get(0, 10), -50.0);
//! // Output fields are discoverable by name.
//! assert!(fields.contains("z_interface"));
//! ```

pub mod active_range;
pub mod diagnostics;
pub mod geopotential;
pub mod height;
pub mod pressure;
pub mod registry;
pub mod scan;
pub mod store;
pub mod target_thickness;

pub use active_range::ActiveRanges;
pub use diagnostics::VertCoordDiagnostics;
pub use geopotential::compute_geopotential;
pub use height::compute_z_height;
pub use pressure::compute_pressure;
pub use registry::VertCoordRegistry;
pub use scan::{scan_bottom_up, scan_surface_down, ScanStep};
pub use store::{HostMirror, VertCoord, VertCoordOptions, DEFAULT_INSTANCE};
pub use target_thickness::{
    compute_target_thickness, movement_weights, redistribute_layers_scalar, MovementWeightType,
};

#[cfg(feature = "parallel")]
pub use geopotential::compute_geopotential_parallel;
#[cfg(feature = "parallel")]
pub use height::compute_z_height_parallel;
#[cfg(feature = "parallel")]
pub use pressure::compute_pressure_parallel;
#[cfg(feature = "parallel")]
pub use target_thickness::compute_target_thickness_parallel;

#[cfg(feature = "simd")]
pub use target_thickness::{compute_target_thickness_simd, redistribute_layers};
