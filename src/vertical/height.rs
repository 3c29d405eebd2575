//! Interface and mid-layer height integration.
//!
//! Heights accumulate upward from the seafloor through each column's
//! active window:
//!
//! - Z_int(k_max+1) = -bottom depth
//! - Z_int(k) = Z_int(k+1) + ν(k) h(k) / g_eff
//! - Z_mid(k) = ½ (Z_int(k) + Z_int(k+1))
//!
//! `g_eff` converts prognostic layer thickness into geometric meters.
//! With pseudo-height thickness it is the reference specific volume
//! 1/ρ₀, so a layer at reference density contributes exactly its
//! nominal thickness; with pressure-unit thickness it is g. Specific
//! volume ν comes from the equation of state evaluated at mid-layer
//! pressure, so the pressure phase must already have run.
//!
//! Heights are negative below the resting sea surface. Interfaces are
//! strictly increasing upward whenever thickness and specific volume
//! are positive.

use crate::field::LayerArray;
use crate::types::LayerRange;
use crate::vertical::scan::scan_bottom_up;

/// Integrate one column.
fn height_column(
    range: LayerRange,
    thickness: &[f64],
    spec_vol: &[f64],
    bottom_depth: f64,
    g_effective: f64,
    z_int: &mut [f64],
    z_mid: &mut [f64],
) {
    scan_bottom_up(
        range,
        -bottom_depth,
        |k| spec_vol[k] * thickness[k] / g_effective,
        |step| {
            z_int[step.k + 1] = step.before;
            z_mid[step.k] = 0.5 * (step.before + step.after);
            if step.is_final {
                z_int[step.k] = step.after;
            }
        },
    );
}

/// Compute interface and mid-layer height for every column.
///
/// # Arguments
/// * `cell_ranges` - active window per cell
/// * `layer_thickness` - mid-shaped prognostic thickness
/// * `spec_vol` - mid-shaped specific volume (m³/kg)
/// * `bottom_depth` - per-cell resting depth, positive down (m)
/// * `g_effective` - thickness-to-height conversion constant
/// * `z_interface` - interface-shaped output (m)
/// * `z_mid` - mid-shaped output (m)
pub fn compute_z_height(
    cell_ranges: &[LayerRange],
    layer_thickness: &LayerArray,
    spec_vol: &LayerArray,
    bottom_depth: &[f64],
    g_effective: f64,
    z_interface: &mut LayerArray,
    z_mid: &mut LayerArray,
) {
    let n_cells = cell_ranges.len();
    debug_assert_eq!(layer_thickness.n_columns, n_cells);
    debug_assert_eq!(spec_vol.n_columns, n_cells);
    debug_assert_eq!(bottom_depth.len(), n_cells);
    debug_assert_eq!(z_interface.n_per_column, layer_thickness.n_per_column + 1);
    debug_assert_eq!(z_mid.n_per_column, layer_thickness.n_per_column);

    for c in 0..n_cells {
        height_column(
            cell_ranges[c],
            layer_thickness.column(c),
            spec_vol.column(c),
            bottom_depth[c],
            g_effective,
            z_interface.column_mut(c),
            z_mid.column_mut(c),
        );
    }
}

/// Parallel version of [`compute_z_height`].
///
/// Columns distribute over threads; each keeps its sequential upward
/// scan, so results match the serial version bitwise.
#[cfg(feature = "parallel")]
pub fn compute_z_height_parallel(
    cell_ranges: &[LayerRange],
    layer_thickness: &LayerArray,
    spec_vol: &LayerArray,
    bottom_depth: &[f64],
    g_effective: f64,
    z_interface: &mut LayerArray,
    z_mid: &mut LayerArray,
) {
    use rayon::prelude::*;

    let n_mid = layer_thickness.n_per_column;
    let n_int = n_mid + 1;
    debug_assert_eq!(layer_thickness.n_columns, cell_ranges.len());
    debug_assert_eq!(z_interface.n_per_column, n_int);

    z_interface
        .data
        .par_chunks_mut(n_int)
        .zip(z_mid.data.par_chunks_mut(n_mid))
        .enumerate()
        .for_each(|(c, (z_int, z_mid))| {
            height_column(
                cell_ranges[c],
                &layer_thickness.data[c * n_mid..(c + 1) * n_mid],
                &spec_vol.data[c * n_mid..(c + 1) * n_mid],
                bottom_depth[c],
                g_effective,
                z_int,
                z_mid,
            );
        });
}
