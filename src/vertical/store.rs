//! The per-instance vertical coordinate state.
//!
//! A [`VertCoord`] owns everything one mesh partition needs to run the
//! coordinate phases: the static column geometry captured at
//! construction (bottom depth, reference thickness, resolved active
//! ranges, materialized movement weights) and the computed arrays the
//! phases overwrite in place each step. Arrays are allocated once and
//! never reallocated; inactive entries keep the fill value for the
//! lifetime of the instance.
//!
//! The compute arrays are paired with a host mirror. Compute methods
//! write only the compute arrays; [`VertCoord::sync_host`] copies them
//! into the mirror in one explicit step, and host-side consumers (the
//! field registry view, output writers) read the mirror only. This
//! keeps the hand-off point visible when the compute side runs on an
//! accelerator or a worker pool.
//!
//! A full model step is [`VertCoord::update`]: pressure with the
//! coordinate's reference density, equation of state at the fresh
//! mid-layer pressure, height, geopotential, then one host sync.
//! Target thickness is computed on demand between steps.

use crate::eos::{SpecificVolume, GRAVITY, RHO_0, SPEC_VOL_0};
use crate::error::{RegistryError, VertCoordError};
use crate::field::{FieldDef, FieldRegistry, LayerArray, VerticalExtent, FILL_VALUE_F64};
use crate::mesh::ColumnMesh;
use crate::vertical::active_range::ActiveRanges;
use crate::vertical::target_thickness::{movement_weights, MovementWeightType};
use crate::vertical::{geopotential, height, pressure, target_thickness};

/// Instance name that registers fields without a suffix.
pub const DEFAULT_INSTANCE: &str = "default";

/// Base names of the computed arrays, in registration order.
const FIELD_BASES: [&str; 6] = [
    "pressure_interface",
    "pressure_mid",
    "z_interface",
    "z_mid",
    "geopotential_mid",
    "layer_thickness_pstar",
];

/// Tunable parameters for one vertical coordinate instance.
#[derive(Debug, Clone)]
pub struct VertCoordOptions {
    /// How column perturbations spread over active layers.
    pub movement_weight_type: MovementWeightType,
    /// Block size for the elementwise redistribution phase. Performance
    /// only, never affects results.
    pub chunk_width: usize,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Thickness-to-height conversion constant. `1/ρ₀` for
    /// pseudo-height thickness, `gravity` for pressure-unit thickness.
    pub g_effective: f64,
    /// Reference density of the coordinate (kg/m³).
    pub rho_0: f64,
    /// Value marking inactive entries in every computed array.
    pub fill_value: f64,
}

impl Default for VertCoordOptions {
    fn default() -> Self {
        Self {
            movement_weight_type: MovementWeightType::default(),
            chunk_width: 8,
            gravity: GRAVITY,
            g_effective: SPEC_VOL_0,
            rho_0: RHO_0,
            fill_value: FILL_VALUE_F64,
        }
    }
}

impl VertCoordOptions {
    /// Options with the standard pseudo-height defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement weight policy.
    pub fn with_movement_weight_type(mut self, weight_type: MovementWeightType) -> Self {
        self.movement_weight_type = weight_type;
        self
    }

    /// Set the redistribution chunk width.
    pub fn with_chunk_width(mut self, chunk_width: usize) -> Self {
        self.chunk_width = chunk_width;
        self
    }

    /// Set the gravitational acceleration.
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the thickness-to-height conversion constant.
    pub fn with_g_effective(mut self, g_effective: f64) -> Self {
        self.g_effective = g_effective;
        self
    }

    /// Set the reference density.
    pub fn with_rho_0(mut self, rho_0: f64) -> Self {
        self.rho_0 = rho_0;
        self
    }

    /// Set the fill value for inactive entries.
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    fn validate(&self) -> Result<(), VertCoordError> {
        if self.chunk_width == 0 {
            return Err(VertCoordError::InvalidConfig(
                "chunk_width must be at least 1".to_string(),
            ));
        }
        if !(self.gravity > 0.0) {
            return Err(VertCoordError::InvalidConfig(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if !(self.g_effective > 0.0) {
            return Err(VertCoordError::InvalidConfig(format!(
                "g_effective must be positive, got {}",
                self.g_effective
            )));
        }
        if !(self.rho_0 > 0.0) {
            return Err(VertCoordError::InvalidConfig(format!(
                "rho_0 must be positive, got {}",
                self.rho_0
            )));
        }
        Ok(())
    }
}

/// Host-side snapshot of the computed arrays.
///
/// Refreshed only by [`VertCoord::sync_host`]; between syncs it holds
/// the values of the previous sync.
#[derive(Clone, Debug)]
pub struct HostMirror {
    pub pressure_interface: LayerArray,
    pub pressure_mid: LayerArray,
    pub z_interface: LayerArray,
    pub z_mid: LayerArray,
    pub geopotential_mid: LayerArray,
    pub layer_thickness_pstar: LayerArray,
}

/// One named vertical coordinate instance.
#[derive(Clone, Debug)]
pub struct VertCoord {
    /// Instance name, also the field name suffix for non-default
    /// instances.
    pub name: String,
    pub n_cells: usize,
    pub n_layers: usize,
    /// Options fixed at construction.
    pub options: VertCoordOptions,

    /// Resting depth per cell, positive down (m).
    pub bottom_depth: Vec<f64>,
    /// Reference layer thickness per cell and layer (m).
    pub ref_layer_thickness: LayerArray,
    /// Materialized movement weights.
    pub movement_weights: LayerArray,
    /// Active ranges for cells, edges, and vertices.
    pub ranges: ActiveRanges,

    /// Pressure at layer interfaces (Pa).
    pub pressure_interface: LayerArray,
    /// Pressure at mid layer (Pa).
    pub pressure_mid: LayerArray,
    /// Height of layer interfaces (m).
    pub z_interface: LayerArray,
    /// Height of mid layer (m).
    pub z_mid: LayerArray,
    /// Geopotential at mid layer (m²/s²).
    pub geopotential_mid: LayerArray,
    /// Target layer thickness after redistribution.
    pub layer_thickness_pstar: LayerArray,

    /// Host-side snapshot, refreshed by [`VertCoord::sync_host`].
    pub host: HostMirror,

    /// Constant reference density profile for the pressure phase of
    /// [`VertCoord::update`].
    ref_density: LayerArray,
    /// Specific volume scratch, overwritten by the EOS each update.
    spec_vol: LayerArray,
}

impl VertCoord {
    /// Build a named instance over a column mesh.
    ///
    /// Resolves active ranges, materializes movement weights, and
    /// allocates every computed array at the fill value.
    ///
    /// # Errors
    /// [`VertCoordError::InvalidConfig`] for bad options,
    /// [`VertCoordError::InvalidLayerRange`] if the mesh carries an
    /// invalid active window.
    pub fn new(
        name: impl Into<String>,
        mesh: &ColumnMesh,
        options: VertCoordOptions,
    ) -> Result<Self, VertCoordError> {
        options.validate()?;
        let ranges = ActiveRanges::resolve(mesh)?;

        let n_cells = mesh.n_cells;
        let n_layers = mesh.n_layers;
        let fill = options.fill_value;

        let movement_weights =
            movement_weights(&ranges.cell, n_layers, options.movement_weight_type);
        let ref_layer_thickness =
            LayerArray::from_data(mesh.ref_layer_thickness.clone(), n_cells, n_layers);

        let pressure_interface = LayerArray::filled(n_cells, n_layers + 1, fill);
        let pressure_mid = LayerArray::filled(n_cells, n_layers, fill);
        let z_interface = LayerArray::filled(n_cells, n_layers + 1, fill);
        let z_mid = LayerArray::filled(n_cells, n_layers, fill);
        let geopotential_mid = LayerArray::filled(n_cells, n_layers, fill);
        let layer_thickness_pstar = LayerArray::filled(n_cells, n_layers, fill);

        let host = HostMirror {
            pressure_interface: pressure_interface.clone(),
            pressure_mid: pressure_mid.clone(),
            z_interface: z_interface.clone(),
            z_mid: z_mid.clone(),
            geopotential_mid: geopotential_mid.clone(),
            layer_thickness_pstar: layer_thickness_pstar.clone(),
        };

        Ok(Self {
            name: name.into(),
            n_cells,
            n_layers,
            ref_density: LayerArray::filled(n_cells, n_layers, options.rho_0),
            spec_vol: LayerArray::filled(n_cells, n_layers, fill),
            options,
            bottom_depth: mesh.bottom_depth.clone(),
            ref_layer_thickness,
            movement_weights,
            ranges,
            pressure_interface,
            pressure_mid,
            z_interface,
            z_mid,
            geopotential_mid,
            layer_thickness_pstar,
            host,
        })
    }

    fn check_mid(&self, field: &'static str, array: &LayerArray) -> Result<(), VertCoordError> {
        let expected = self.n_cells * self.n_layers;
        if array.n_columns != self.n_cells || array.n_per_column != self.n_layers {
            return Err(VertCoordError::dimension_mismatch(field, expected, array.len()));
        }
        Ok(())
    }

    fn check_cells(&self, field: &'static str, values: &[f64]) -> Result<(), VertCoordError> {
        if values.len() != self.n_cells {
            return Err(VertCoordError::dimension_mismatch(
                field,
                self.n_cells,
                values.len(),
            ));
        }
        Ok(())
    }

    /// Integrate pressure downward with an explicit density field.
    ///
    /// [`VertCoord::update`] calls the same kernels with the
    /// coordinate's constant reference density; this entry point exists
    /// for configurations that carry full in-situ density.
    pub fn compute_pressure(
        &mut self,
        layer_thickness: &LayerArray,
        density: &LayerArray,
        surface_pressure: &[f64],
    ) -> Result<(), VertCoordError> {
        self.check_mid("layer_thickness", layer_thickness)?;
        self.check_mid("density", density)?;
        self.check_cells("surface_pressure", surface_pressure)?;

        // Use parallel versions when the feature is enabled.
        #[cfg(feature = "parallel")]
        pressure::compute_pressure_parallel(
            &self.ranges.cell,
            layer_thickness,
            density,
            surface_pressure,
            self.options.gravity,
            &mut self.pressure_interface,
            &mut self.pressure_mid,
        );
        #[cfg(not(feature = "parallel"))]
        pressure::compute_pressure(
            &self.ranges.cell,
            layer_thickness,
            density,
            surface_pressure,
            self.options.gravity,
            &mut self.pressure_interface,
            &mut self.pressure_mid,
        );
        Ok(())
    }

    /// Integrate interface and mid-layer height upward.
    ///
    /// `spec_vol` is the specific volume at mid-layer pressure, so the
    /// pressure phase and the equation of state must already have run
    /// for the same thickness field.
    pub fn compute_z_height(
        &mut self,
        layer_thickness: &LayerArray,
        spec_vol: &LayerArray,
    ) -> Result<(), VertCoordError> {
        self.check_mid("layer_thickness", layer_thickness)?;
        self.check_mid("spec_vol", spec_vol)?;

        #[cfg(feature = "parallel")]
        height::compute_z_height_parallel(
            &self.ranges.cell,
            layer_thickness,
            spec_vol,
            &self.bottom_depth,
            self.options.g_effective,
            &mut self.z_interface,
            &mut self.z_mid,
        );
        #[cfg(not(feature = "parallel"))]
        height::compute_z_height(
            &self.ranges.cell,
            layer_thickness,
            spec_vol,
            &self.bottom_depth,
            self.options.g_effective,
            &mut self.z_interface,
            &mut self.z_mid,
        );
        Ok(())
    }

    /// Evaluate mid-layer geopotential from the current `z_mid`.
    pub fn compute_geopotential(
        &mut self,
        tidal_potential: Option<&[f64]>,
    ) -> Result<(), VertCoordError> {
        if let Some(tide) = tidal_potential {
            self.check_cells("tidal_potential", tide)?;
        }

        #[cfg(feature = "parallel")]
        geopotential::compute_geopotential_parallel(
            &self.ranges.cell,
            &self.z_mid,
            tidal_potential,
            self.options.gravity,
            &mut self.geopotential_mid,
        );
        #[cfg(not(feature = "parallel"))]
        geopotential::compute_geopotential(
            &self.ranges.cell,
            &self.z_mid,
            tidal_potential,
            self.options.gravity,
            &mut self.geopotential_mid,
        );
        Ok(())
    }

    /// Redistribute a per-column thickness perturbation into target
    /// layer thickness.
    ///
    /// Call [`VertCoord::sync_host`] afterwards when host-side
    /// consumers need the refreshed values.
    ///
    /// # Errors
    /// [`VertCoordError::ZeroMovementWeight`] if a column has no
    /// weighted reference mass to absorb its perturbation.
    pub fn compute_target_thickness(
        &mut self,
        total_perturbation: &[f64],
    ) -> Result<(), VertCoordError> {
        self.check_cells("total_perturbation", total_perturbation)?;

        #[cfg(feature = "parallel")]
        target_thickness::compute_target_thickness_parallel(
            &self.ranges.cell,
            &self.ref_layer_thickness,
            &self.movement_weights,
            total_perturbation,
            self.options.chunk_width,
            &mut self.layer_thickness_pstar,
        )?;
        #[cfg(not(feature = "parallel"))]
        target_thickness::compute_target_thickness(
            &self.ranges.cell,
            &self.ref_layer_thickness,
            &self.movement_weights,
            total_perturbation,
            self.options.chunk_width,
            &mut self.layer_thickness_pstar,
        )?;
        Ok(())
    }

    /// Run one full coordinate step.
    ///
    /// Pressure with the coordinate's constant reference density, the
    /// equation of state at the fresh mid-layer pressure, height,
    /// geopotential, then one host sync. Idempotent for identical
    /// inputs.
    pub fn update(
        &mut self,
        layer_thickness: &LayerArray,
        temperature: &LayerArray,
        salinity: &LayerArray,
        surface_pressure: &[f64],
        tidal_potential: Option<&[f64]>,
        eos: &dyn SpecificVolume,
    ) -> Result<(), VertCoordError> {
        self.check_mid("layer_thickness", layer_thickness)?;
        self.check_mid("temperature", temperature)?;
        self.check_mid("salinity", salinity)?;
        self.check_cells("surface_pressure", surface_pressure)?;
        if let Some(tide) = tidal_potential {
            self.check_cells("tidal_potential", tide)?;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let n_mid = self.n_layers;
            pressure::compute_pressure_parallel(
                &self.ranges.cell,
                layer_thickness,
                &self.ref_density,
                surface_pressure,
                self.options.gravity,
                &mut self.pressure_interface,
                &mut self.pressure_mid,
            );

            let ranges = &self.ranges.cell;
            let pressure_mid = &self.pressure_mid.data;
            self.spec_vol
                .data
                .par_chunks_mut(n_mid)
                .enumerate()
                .for_each(|(c, nu)| {
                    eos.fill_column(
                        ranges[c],
                        &temperature.data[c * n_mid..(c + 1) * n_mid],
                        &salinity.data[c * n_mid..(c + 1) * n_mid],
                        &pressure_mid[c * n_mid..(c + 1) * n_mid],
                        nu,
                    );
                });

            height::compute_z_height_parallel(
                &self.ranges.cell,
                layer_thickness,
                &self.spec_vol,
                &self.bottom_depth,
                self.options.g_effective,
                &mut self.z_interface,
                &mut self.z_mid,
            );
            geopotential::compute_geopotential_parallel(
                &self.ranges.cell,
                &self.z_mid,
                tidal_potential,
                self.options.gravity,
                &mut self.geopotential_mid,
            );
        }

        #[cfg(not(feature = "parallel"))]
        {
            pressure::compute_pressure(
                &self.ranges.cell,
                layer_thickness,
                &self.ref_density,
                surface_pressure,
                self.options.gravity,
                &mut self.pressure_interface,
                &mut self.pressure_mid,
            );

            for c in 0..self.n_cells {
                eos.fill_column(
                    self.ranges.cell[c],
                    temperature.column(c),
                    salinity.column(c),
                    self.pressure_mid.column(c),
                    self.spec_vol.column_mut(c),
                );
            }

            height::compute_z_height(
                &self.ranges.cell,
                layer_thickness,
                &self.spec_vol,
                &self.bottom_depth,
                self.options.g_effective,
                &mut self.z_interface,
                &mut self.z_mid,
            );
            geopotential::compute_geopotential(
                &self.ranges.cell,
                &self.z_mid,
                tidal_potential,
                self.options.gravity,
                &mut self.geopotential_mid,
            );
        }

        self.sync_host();
        Ok(())
    }

    /// Copy every computed array into the host mirror.
    pub fn sync_host(&mut self) {
        self.host.pressure_interface.copy_from(&self.pressure_interface);
        self.host.pressure_mid.copy_from(&self.pressure_mid);
        self.host.z_interface.copy_from(&self.z_interface);
        self.host.z_mid.copy_from(&self.z_mid);
        self.host.geopotential_mid.copy_from(&self.geopotential_mid);
        self.host
            .layer_thickness_pstar
            .copy_from(&self.layer_thickness_pstar);
    }

    /// Registered name of one computed array for this instance.
    ///
    /// The default instance uses the base name unchanged; every other
    /// instance appends `_{name}`.
    pub fn field_name(&self, base: &str) -> String {
        if self.name == DEFAULT_INSTANCE {
            base.to_string()
        } else {
            format!("{base}_{}", self.name)
        }
    }

    fn field_defs(&self) -> Vec<FieldDef> {
        let fill = self.options.fill_value;
        FIELD_BASES
            .iter()
            .map(|&base| {
                let (units, long_name, vertical) = match base {
                    "pressure_interface" => {
                        ("Pa", "pressure at layer interfaces", VerticalExtent::Interface)
                    }
                    "pressure_mid" => ("Pa", "pressure at layer midpoints", VerticalExtent::Mid),
                    "z_interface" => ("m", "height of layer interfaces", VerticalExtent::Interface),
                    "z_mid" => ("m", "height of layer midpoints", VerticalExtent::Mid),
                    "geopotential_mid" => {
                        ("m2 s-2", "geopotential at layer midpoints", VerticalExtent::Mid)
                    }
                    _ => ("m", "target layer thickness", VerticalExtent::Mid),
                };
                FieldDef::cell(self.field_name(base), units, long_name, fill, vertical)
            })
            .collect()
    }

    /// Register every computed array with an output field registry.
    ///
    /// Registers all six fields or none: a name collision is detected
    /// before anything is inserted.
    ///
    /// # Errors
    /// [`RegistryError::DuplicateField`] if another instance already
    /// claimed one of the names.
    pub fn register_fields(&self, registry: &mut FieldRegistry) -> Result<(), VertCoordError> {
        let defs = self.field_defs();
        for def in &defs {
            if registry.contains(&def.name) {
                return Err(RegistryError::DuplicateField(def.name.clone()).into());
            }
        }
        for def in defs {
            registry.register(def)?;
        }
        Ok(())
    }

    /// Remove this instance's fields from an output field registry.
    ///
    /// Names that were never registered are skipped.
    pub fn unregister_fields(&self, registry: &mut FieldRegistry) {
        for base in FIELD_BASES {
            let _ = registry.unregister(&self.field_name(base));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::ConstantSpecVol;
    use approx::assert_relative_eq;

    fn mesh_3x1() -> ColumnMesh {
        ColumnMesh::planar_hex(3, 1, 5, 10.0)
    }

    fn uniform_inputs(
        mesh: &ColumnMesh,
        dz: f64,
    ) -> (LayerArray, LayerArray, LayerArray, Vec<f64>) {
        let n_cells = mesh.n_cells;
        let n_layers = mesh.n_layers;
        let thickness = LayerArray::filled(n_cells, n_layers, dz);
        let temperature = LayerArray::filled(n_cells, n_layers, 8.0);
        let salinity = LayerArray::filled(n_cells, n_layers, 34.0);
        let surface_pressure = vec![0.0; n_cells];
        (thickness, temperature, salinity, surface_pressure)
    }

    #[test]
    fn test_new_initializes_to_fill() {
        let mesh = mesh_3x1();
        let vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();

        assert_eq!(vc.n_cells, 3);
        assert_eq!(vc.n_layers, 5);
        assert!(vc
            .pressure_interface
            .data
            .iter()
            .all(|&v| v == FILL_VALUE_F64));
        assert!(vc.host.z_mid.data.iter().all(|&v| v == FILL_VALUE_F64));
    }

    #[test]
    fn test_options_validation() {
        let mesh = mesh_3x1();
        let err = VertCoord::new(
            "default",
            &mesh,
            VertCoordOptions::default().with_chunk_width(0),
        )
        .unwrap_err();
        assert!(matches!(err, VertCoordError::InvalidConfig(_)));

        let err = VertCoord::new(
            "default",
            &mesh,
            VertCoordOptions::default().with_rho_0(-1.0),
        )
        .unwrap_err();
        assert!(matches!(err, VertCoordError::InvalidConfig(_)));
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let mesh = mesh_3x1();
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();

        let wrong = LayerArray::filled(2, 5, 1.0);
        let density = LayerArray::filled(3, 5, RHO_0);
        let err = vc
            .compute_pressure(&wrong, &density, &[0.0; 3])
            .unwrap_err();
        assert!(matches!(
            err,
            VertCoordError::DimensionMismatch {
                field: "layer_thickness",
                ..
            }
        ));
    }

    #[test]
    fn test_update_runs_all_phases_and_syncs() {
        let mesh = mesh_3x1();
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();
        let (thickness, temperature, salinity, surface_pressure) = uniform_inputs(&mesh, 10.0);
        let eos = ConstantSpecVol::reference();

        vc.update(&thickness, &temperature, &salinity, &surface_pressure, None, &eos)
            .unwrap();

        let g = vc.options.gravity;
        for c in 0..vc.n_cells {
            // Surface interface at the surface pressure.
            assert_eq!(vc.pressure_interface.get(c, 0), 0.0);
            // Bottom interface carries the full column load.
            let expected_bottom = g * RHO_0 * 50.0;
            assert_relative_eq!(
                vc.pressure_interface.get(c, 5),
                expected_bottom,
                max_relative = 1e-13
            );
            // Reference column: heights recover nominal thickness.
            assert_eq!(vc.z_interface.get(c, 5), -50.0);
            assert_relative_eq!(vc.z_interface.get(c, 0), 0.0, epsilon = 1e-10);
            // Geopotential is g * z_mid with no tide.
            for k in 0..vc.n_layers {
                assert_relative_eq!(
                    vc.geopotential_mid.get(c, k),
                    g * vc.z_mid.get(c, k),
                    max_relative = 1e-14
                );
            }
            // Host mirror matches after the sync inside update.
            assert_eq!(vc.host.pressure_interface.get(c, 5), vc.pressure_interface.get(c, 5));
            assert_eq!(vc.host.z_mid.get(c, 2), vc.z_mid.get(c, 2));
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let mesh = mesh_3x1();
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();
        let (thickness, temperature, salinity, surface_pressure) = uniform_inputs(&mesh, 10.0);
        let eos = ConstantSpecVol::reference();

        vc.update(&thickness, &temperature, &salinity, &surface_pressure, None, &eos)
            .unwrap();
        let first_p = vc.pressure_interface.clone();
        let first_z = vc.z_interface.clone();

        vc.update(&thickness, &temperature, &salinity, &surface_pressure, None, &eos)
            .unwrap();
        assert_eq!(vc.pressure_interface, first_p);
        assert_eq!(vc.z_interface, first_z);
    }

    #[test]
    fn test_tidal_potential_shifts_geopotential() {
        let mesh = mesh_3x1();
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();
        let (thickness, temperature, salinity, surface_pressure) = uniform_inputs(&mesh, 10.0);
        let eos = ConstantSpecVol::reference();

        vc.update(&thickness, &temperature, &salinity, &surface_pressure, None, &eos)
            .unwrap();
        let unforced = vc.geopotential_mid.clone();

        let tide = vec![1.5; 3];
        vc.update(
            &thickness,
            &temperature,
            &salinity,
            &surface_pressure,
            Some(&tide),
            &eos,
        )
        .unwrap();

        for c in 0..3 {
            for k in 0..5 {
                assert_relative_eq!(
                    vc.geopotential_mid.get(c, k) - unforced.get(c, k),
                    1.5,
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_sync_host_is_explicit() {
        let mesh = mesh_3x1();
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();

        vc.compute_target_thickness(&[1.0, 2.0, 3.0]).unwrap();
        // Mirror still holds fill until the explicit sync.
        assert_eq!(vc.host.layer_thickness_pstar.get(0, 0), FILL_VALUE_F64);
        assert_ne!(vc.layer_thickness_pstar.get(0, 0), FILL_VALUE_F64);

        vc.sync_host();
        assert_eq!(
            vc.host.layer_thickness_pstar,
            vc.layer_thickness_pstar,
        );
    }

    #[test]
    fn test_target_thickness_conserves_column_totals() {
        let mesh = mesh_3x1();
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();
        let delta = [2.0, -1.0, 0.5];

        vc.compute_target_thickness(&delta).unwrap();

        for c in 0..3 {
            let total: f64 = vc.ranges.cell[c]
                .iter()
                .map(|k| vc.layer_thickness_pstar.get(c, k))
                .sum();
            assert_relative_eq!(total, 50.0 + delta[c], max_relative = 1e-13);
        }
    }

    #[test]
    fn test_field_registration_default_instance() {
        let mesh = mesh_3x1();
        let vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();
        let mut registry = FieldRegistry::new();

        vc.register_fields(&mut registry).unwrap();
        assert_eq!(registry.len(), 6);
        assert!(registry.contains("pressure_interface"));
        assert!(registry.contains("z_mid"));
        assert_eq!(registry.get("geopotential_mid").unwrap().units, "m2 s-2");

        vc.unregister_fields(&mut registry);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_field_registration_named_instance() {
        let mesh = mesh_3x1();
        let vc = VertCoord::new("barotropic", &mesh, VertCoordOptions::default()).unwrap();
        let mut registry = FieldRegistry::new();

        vc.register_fields(&mut registry).unwrap();
        assert!(registry.contains("pressure_interface_barotropic"));
        assert!(!registry.contains("pressure_interface"));

        // A second instance with the same name collides.
        let other = VertCoord::new("barotropic", &mesh, VertCoordOptions::default()).unwrap();
        let err = other.register_fields(&mut registry).unwrap_err();
        assert!(matches!(err, VertCoordError::Registry(_)));
    }

    #[test]
    fn test_pressure_unit_configuration() {
        // Thickness carried in Pa: g_effective = g recovers meters.
        let mesh = mesh_3x1();
        let g = GRAVITY;
        let options = VertCoordOptions::default().with_g_effective(g);
        let mut vc = VertCoord::new("pressure_coord", &mesh, options).unwrap();

        let dp = g * RHO_0 * 10.0;
        let thickness = LayerArray::filled(3, 5, dp);
        let nu = LayerArray::filled(3, 5, SPEC_VOL_0);

        vc.compute_z_height(&thickness, &nu).unwrap();

        for c in 0..3 {
            assert_eq!(vc.z_interface.get(c, 5), -50.0);
            assert_relative_eq!(vc.z_interface.get(c, 0), 0.0, epsilon = 1e-9);
        }
    }
}
