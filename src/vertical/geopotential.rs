//! Mid-layer geopotential.
//!
//! Φ(k) = g z_mid(k) + Φ_tide, with Φ_tide the per-cell tidal plus
//! self-attraction potential (already in m²/s²) or zero when no tidal
//! forcing is active. Purely elementwise over the active window, no
//! cross-layer dependency.

use crate::field::LayerArray;
use crate::types::LayerRange;

fn geopotential_column(
    range: LayerRange,
    z_mid: &[f64],
    tidal: f64,
    g: f64,
    phi: &mut [f64],
) {
    for k in range.iter() {
        phi[k] = g * z_mid[k] + tidal;
    }
}

/// Compute mid-layer geopotential for every column.
///
/// `tidal_potential` is an optional per-cell potential (m²/s²); pass
/// `None` for an unforced run.
pub fn compute_geopotential(
    cell_ranges: &[LayerRange],
    z_mid: &LayerArray,
    tidal_potential: Option<&[f64]>,
    g: f64,
    geopotential_mid: &mut LayerArray,
) {
    let n_cells = cell_ranges.len();
    debug_assert_eq!(z_mid.n_columns, n_cells);
    debug_assert_eq!(geopotential_mid.n_per_column, z_mid.n_per_column);
    if let Some(tide) = tidal_potential {
        debug_assert_eq!(tide.len(), n_cells);
    }

    for c in 0..n_cells {
        let tidal = tidal_potential.map_or(0.0, |t| t[c]);
        geopotential_column(
            cell_ranges[c],
            z_mid.column(c),
            tidal,
            g,
            geopotential_mid.column_mut(c),
        );
    }
}

/// Parallel version of [`compute_geopotential`].
#[cfg(feature = "parallel")]
pub fn compute_geopotential_parallel(
    cell_ranges: &[LayerRange],
    z_mid: &LayerArray,
    tidal_potential: Option<&[f64]>,
    g: f64,
    geopotential_mid: &mut LayerArray,
) {
    use rayon::prelude::*;

    let n_mid = z_mid.n_per_column;
    debug_assert_eq!(z_mid.n_columns, cell_ranges.len());
    debug_assert_eq!(geopotential_mid.n_per_column, n_mid);

    geopotential_mid
        .data
        .par_chunks_mut(n_mid)
        .enumerate()
        .for_each(|(c, phi)| {
            let tidal = tidal_potential.map_or(0.0, |t| t[c]);
            geopotential_column(
                cell_ranges[c],
                &z_mid.data[c * n_mid..(c + 1) * n_mid],
                tidal,
                g,
                phi,
            );
        });
}
