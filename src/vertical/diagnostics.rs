//! Runtime diagnostics for a vertical coordinate instance.
//!
//! Summarizes the computed arrays for monitoring and debugging:
//! active-entry counts, pressure and height bounds over the active
//! window, pressure monotonicity violations, and target thickness
//! bounds. Reads the compute arrays directly, so it reflects the state
//! after the most recent compute calls whether or not the host mirror
//! has been synced.

use crate::vertical::store::VertCoord;

/// Diagnostic quantities for one vertical coordinate instance.
#[derive(Clone, Debug)]
pub struct VertCoordDiagnostics {
    /// Instance name.
    pub name: String,
    /// Number of columns.
    pub n_cells: usize,
    /// Number of layers.
    pub n_layers: usize,
    /// Total active (cell, layer) entries.
    pub n_active: usize,
    /// Shallowest active layer index over all columns.
    pub k_min_global: usize,
    /// Deepest active layer index over all columns.
    pub k_max_global: usize,
    /// Minimum interface pressure over active entries (Pa).
    pub min_pressure: f64,
    /// Maximum interface pressure over active entries (Pa).
    pub max_pressure: f64,
    /// Minimum interface height over active entries (m).
    pub min_z: f64,
    /// Maximum interface height over active entries (m).
    pub max_z: f64,
    /// Interfaces where pressure decreases downward.
    pub pressure_violations: usize,
    /// Thinnest target layer over active entries.
    pub min_target_thickness: f64,
    /// Thickest target layer over active entries.
    pub max_target_thickness: f64,
}

impl VertCoordDiagnostics {
    /// Compute all diagnostics from the instance's current arrays.
    pub fn compute(vc: &VertCoord) -> Self {
        let mut n_active = 0;
        let mut k_min_global = vc.n_layers;
        let mut k_max_global = 0;
        let mut min_pressure = f64::MAX;
        let mut max_pressure = f64::MIN;
        let mut min_z = f64::MAX;
        let mut max_z = f64::MIN;
        let mut pressure_violations = 0;
        let mut min_target = f64::MAX;
        let mut max_target = f64::MIN;

        for c in 0..vc.n_cells {
            let range = vc.ranges.cell[c];
            n_active += range.len();
            if range.k_min < k_min_global {
                k_min_global = range.k_min;
            }
            if range.k_max > k_max_global {
                k_max_global = range.k_max;
            }

            for k in range.interfaces() {
                let p = vc.pressure_interface.get(c, k);
                if p < min_pressure {
                    min_pressure = p;
                }
                if p > max_pressure {
                    max_pressure = p;
                }
                let z = vc.z_interface.get(c, k);
                if z < min_z {
                    min_z = z;
                }
                if z > max_z {
                    max_z = z;
                }
            }

            for k in range.iter() {
                if vc.pressure_interface.get(c, k + 1) < vc.pressure_interface.get(c, k) {
                    pressure_violations += 1;
                }
                let h = vc.layer_thickness_pstar.get(c, k);
                if h < min_target {
                    min_target = h;
                }
                if h > max_target {
                    max_target = h;
                }
            }
        }

        // Empty mesh: report zeros instead of sentinels.
        if n_active == 0 {
            k_min_global = 0;
            min_pressure = 0.0;
            max_pressure = 0.0;
            min_z = 0.0;
            max_z = 0.0;
            min_target = 0.0;
            max_target = 0.0;
        }

        Self {
            name: vc.name.clone(),
            n_cells: vc.n_cells,
            n_layers: vc.n_layers,
            n_active,
            k_min_global,
            k_max_global,
            min_pressure,
            max_pressure,
            min_z,
            max_z,
            pressure_violations,
            min_target_thickness: min_target,
            max_target_thickness: max_target,
        }
    }

    /// Format diagnostics as a single-line summary.
    pub fn summary_line(&self) -> String {
        format!(
            "{}: active={} k=[{},{}] P=[{:.3e},{:.3e}] z=[{:.2},{:.2}] viol={}",
            self.name,
            self.n_active,
            self.k_min_global,
            self.k_max_global,
            self.min_pressure,
            self.max_pressure,
            self.min_z,
            self.max_z,
            self.pressure_violations
        )
    }

    /// Print a multi-line summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Vertical Coordinate: {} ===", self.name);
        println!(
            "Columns:  {} x {} layers, {} active entries (k {}..={})",
            self.n_cells, self.n_layers, self.n_active, self.k_min_global, self.k_max_global
        );
        println!(
            "Pressure: [{:.6e}, {:.6e}] Pa, {} monotonicity violations",
            self.min_pressure, self.max_pressure, self.pressure_violations
        );
        println!("Height:   [{:.4}, {:.4}] m", self.min_z, self.max_z);
        println!(
            "Target h: [{:.4}, {:.4}] m",
            self.min_target_thickness, self.max_target_thickness
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::ConstantSpecVol;
    use crate::field::LayerArray;
    use crate::mesh::ColumnMesh;
    use crate::vertical::store::VertCoordOptions;

    fn updated_coord() -> VertCoord {
        let mesh = ColumnMesh::planar_hex(2, 2, 6, 5.0);
        let mut vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();
        let thickness = LayerArray::filled(vc.n_cells, vc.n_layers, 5.0);
        let temperature = LayerArray::filled(vc.n_cells, vc.n_layers, 8.0);
        let salinity = LayerArray::filled(vc.n_cells, vc.n_layers, 34.0);
        let surf = vec![0.0; vc.n_cells];
        vc.update(
            &thickness,
            &temperature,
            &salinity,
            &surf,
            None,
            &ConstantSpecVol::reference(),
        )
        .unwrap();
        vc.compute_target_thickness(&vec![1.0; vc.n_cells]).unwrap();
        vc
    }

    #[test]
    fn test_counts_and_bounds() {
        let vc = updated_coord();
        let diag = VertCoordDiagnostics::compute(&vc);

        assert_eq!(diag.n_cells, 4);
        assert_eq!(diag.n_layers, 6);
        assert_eq!(diag.n_active, 4 * 6);
        assert_eq!(diag.k_min_global, 0);
        assert_eq!(diag.k_max_global, 5);

        // Hydrostatic column, zero surface pressure.
        assert_eq!(diag.min_pressure, 0.0);
        assert!(diag.max_pressure > 0.0);
        assert_eq!(diag.pressure_violations, 0);

        // Heights span seafloor to surface.
        assert_eq!(diag.min_z, -30.0);
        assert!(diag.max_z.abs() < 1e-9);
    }

    #[test]
    fn test_target_thickness_bounds() {
        let vc = updated_coord();
        let diag = VertCoordDiagnostics::compute(&vc);

        // 5 m layers absorbing +1 m over 30 m: each becomes 5 * 31/30.
        let expected = 5.0 * (31.0 / 30.0);
        assert!((diag.min_target_thickness - expected).abs() < 1e-12);
        assert!((diag.max_target_thickness - expected).abs() < 1e-12);
    }

    #[test]
    fn test_summary_line_contents() {
        let vc = updated_coord();
        let diag = VertCoordDiagnostics::compute(&vc);
        let line = diag.summary_line();

        assert!(line.contains("default"));
        assert!(line.contains("active=24"));
        assert!(line.contains("viol=0"));
    }

    #[test]
    fn test_partial_windows_shrink_counts() {
        let mut mesh = ColumnMesh::planar_hex(2, 1, 8, 10.0);
        mesh.set_active_range(0, 2, 5).unwrap();
        let vc = VertCoord::new("default", &mesh, VertCoordOptions::default()).unwrap();

        let diag = VertCoordDiagnostics::compute(&vc);
        assert_eq!(diag.n_active, 4 + 8);
        assert_eq!(diag.k_min_global, 0);
        assert_eq!(diag.k_max_global, 7);
    }
}
