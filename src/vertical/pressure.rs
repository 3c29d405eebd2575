//! Hydrostatic pressure integration.
//!
//! Pressure accumulates downward from the surface through each column's
//! active window:
//!
//! - P_int(k_min) = surface pressure (atmosphere plus sea ice load)
//! - P_int(k+1) = P_int(k) + g ρ(k) h(k)
//! - P_mid(k) = ½ (P_int(k) + P_int(k+1))
//!
//! Pressure runs before every other phase of a step: the equation of
//! state consumes P_mid when producing the specific volume the height
//! integral needs. In the Boussinesq pseudo-height configuration ρ is
//! the constant reference density, so P is a pure mass-load diagnostic.
//!
//! Interfaces are non-decreasing downward whenever density is positive.
//! Entries outside the active window are never touched.
//!
//! # Units
//!
//! Thickness in meters, density in kg/m³, pressure in Pa.

use crate::field::LayerArray;
use crate::types::LayerRange;
use crate::vertical::scan::scan_surface_down;

/// Integrate one column.
fn pressure_column(
    range: LayerRange,
    thickness: &[f64],
    density: &[f64],
    surface_pressure: f64,
    g: f64,
    p_int: &mut [f64],
    p_mid: &mut [f64],
) {
    scan_surface_down(
        range,
        surface_pressure,
        |k| g * density[k] * thickness[k],
        |step| {
            p_int[step.k] = step.before;
            p_mid[step.k] = 0.5 * (step.before + step.after);
            if step.is_final {
                p_int[step.k + 1] = step.after;
            }
        },
    );
}

/// Compute interface and mid-layer pressure for every column.
///
/// # Arguments
/// * `cell_ranges` - active window per cell
/// * `layer_thickness` - mid-shaped thickness (m)
/// * `density` - mid-shaped in-situ or reference density (kg/m³)
/// * `surface_pressure` - per-cell surface load (Pa)
/// * `g` - gravitational acceleration (m/s²)
/// * `pressure_interface` - interface-shaped output (Pa)
/// * `pressure_mid` - mid-shaped output (Pa)
pub fn compute_pressure(
    cell_ranges: &[LayerRange],
    layer_thickness: &LayerArray,
    density: &LayerArray,
    surface_pressure: &[f64],
    g: f64,
    pressure_interface: &mut LayerArray,
    pressure_mid: &mut LayerArray,
) {
    let n_cells = cell_ranges.len();
    debug_assert_eq!(layer_thickness.n_columns, n_cells);
    debug_assert_eq!(surface_pressure.len(), n_cells);
    debug_assert_eq!(
        pressure_interface.n_per_column,
        layer_thickness.n_per_column + 1
    );
    debug_assert_eq!(pressure_mid.n_per_column, layer_thickness.n_per_column);

    for c in 0..n_cells {
        pressure_column(
            cell_ranges[c],
            layer_thickness.column(c),
            density.column(c),
            surface_pressure[c],
            g,
            pressure_interface.column_mut(c),
            pressure_mid.column_mut(c),
        );
    }
}

/// Parallel version of [`compute_pressure`].
///
/// Columns are independent, so the outer loop distributes over threads;
/// each column keeps its strictly sequential scan and the result is
/// identical to the serial version for any thread count.
#[cfg(feature = "parallel")]
pub fn compute_pressure_parallel(
    cell_ranges: &[LayerRange],
    layer_thickness: &LayerArray,
    density: &LayerArray,
    surface_pressure: &[f64],
    g: f64,
    pressure_interface: &mut LayerArray,
    pressure_mid: &mut LayerArray,
) {
    use rayon::prelude::*;

    let n_mid = layer_thickness.n_per_column;
    let n_int = n_mid + 1;
    debug_assert_eq!(layer_thickness.n_columns, cell_ranges.len());
    debug_assert_eq!(pressure_interface.n_per_column, n_int);

    pressure_interface
        .data
        .par_chunks_mut(n_int)
        .zip(pressure_mid.data.par_chunks_mut(n_mid))
        .enumerate()
        .for_each(|(c, (p_int, p_mid))| {
            pressure_column(
                cell_ranges[c],
                &layer_thickness.data[c * n_mid..(c + 1) * n_mid],
                &density.data[c * n_mid..(c + 1) * n_mid],
                surface_pressure[c],
                g,
                p_int,
                p_mid,
            );
        });
}
