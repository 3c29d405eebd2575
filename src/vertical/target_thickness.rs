//! Target layer thickness redistribution.
//!
//! Given a per-column total thickness perturbation ΔH (for example the
//! change in sea surface height over a barotropic step), the solver
//! distributes it across the column's active layers according to the
//! configured movement weights:
//!
//! - sum_wh = Σ w(k) h_ref(k) over the active range
//! - pstar(k) = h_ref(k) + (w(k) h_ref(k) / sum_wh) · ΔH
//!
//! Column sums of `pstar` recover Σ h_ref + ΔH up to rounding, and no
//! thickness is ever placed in an inactive layer. A column whose
//! weighted reference mass vanishes cannot absorb any perturbation, so
//! `sum_wh == 0` is a fatal error.
//!
//! The redistribution is elementwise, so phase 2 is chunked over k in
//! `chunk_width` blocks for vectorization. Chunk width is purely a
//! performance knob: the scalar and SIMD kernels both evaluate
//! `fma(w·h_ref, ΔH/sum_wh, h_ref)`, so every chunk width and every
//! lane width produces bit-identical output.

use std::fmt;
use std::str::FromStr;

use crate::error::VertCoordError;
use crate::field::LayerArray;
use crate::types::LayerRange;

#[cfg(feature = "simd")]
use pulp::{Arch, Simd, WithSimd};

/// How a column perturbation is spread over its active layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementWeightType {
    /// Weight 1 on every active layer. Each layer absorbs a share of
    /// the perturbation proportional to its reference thickness.
    #[default]
    Uniform,
    /// Weight 1 on the top active layer only. The full perturbation
    /// lands in the surface layer and the interior keeps its reference
    /// thickness.
    Fixed,
}

impl MovementWeightType {
    /// Configuration string for this policy.
    pub fn name(&self) -> &'static str {
        match self {
            MovementWeightType::Uniform => "uniform",
            MovementWeightType::Fixed => "fixed",
        }
    }
}

impl FromStr for MovementWeightType {
    type Err = VertCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(MovementWeightType::Uniform),
            "fixed" => Ok(MovementWeightType::Fixed),
            _ => Err(VertCoordError::UnknownWeightPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for MovementWeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Materialize the per-layer movement weights for every column.
///
/// Weights are 0 outside the active range; inside it they follow the
/// policy. Computed once at construction, the solver itself is
/// policy-independent.
pub fn movement_weights(
    cell_ranges: &[LayerRange],
    n_layers: usize,
    weight_type: MovementWeightType,
) -> LayerArray {
    let mut weights = LayerArray::new_mid(cell_ranges.len(), n_layers);
    for (c, range) in cell_ranges.iter().enumerate() {
        match weight_type {
            MovementWeightType::Uniform => {
                for k in range.iter() {
                    weights.set(c, k, 1.0);
                }
            }
            MovementWeightType::Fixed => {
                weights.set(c, range.k_min, 1.0);
            }
        }
    }
    weights
}

// ============================================================================
// Scalar reference kernel (always available)
// ============================================================================

/// Redistribute one chunk: `pstar[i] = fma(w[i]·h_ref[i], scale, h_ref[i])`.
///
/// This is the reference implementation the SIMD version must match
/// bitwise.
pub fn redistribute_layers_scalar(w: &[f64], h_ref: &[f64], scale: f64, pstar: &mut [f64]) {
    debug_assert_eq!(w.len(), h_ref.len());
    debug_assert_eq!(w.len(), pstar.len());

    for i in 0..pstar.len() {
        pstar[i] = (w[i] * h_ref[i]).mul_add(scale, h_ref[i]);
    }
}

// ============================================================================
// SIMD implementation (feature-gated)
// ============================================================================

#[cfg(feature = "simd")]
mod simd_impl {
    use super::*;

    /// Vectorized chunk redistribution.
    ///
    /// Head lanes compute `fma(w·h, scale, h)` with vector FMA, the
    /// scalar tail uses `f64::mul_add`, so every element matches the
    /// scalar kernel bitwise.
    #[inline]
    pub fn redistribute_layers_simd_inner<S: Simd>(
        simd: S,
        w: &[f64],
        h_ref: &[f64],
        scale: f64,
        pstar: &mut [f64],
    ) {
        let scale_splat = simd.f64s_splat(scale);

        let (w_head, w_tail) = S::f64s_as_simd(w);
        let (h_head, h_tail) = S::f64s_as_simd(h_ref);
        let (out_head, out_tail) = S::f64s_as_mut_simd(pstar);

        for ((w_v, h_v), out_v) in w_head.iter().zip(h_head.iter()).zip(out_head.iter_mut()) {
            let wh = simd.f64s_mul(*w_v, *h_v);
            *out_v = simd.f64s_mul_add(wh, scale_splat, *h_v);
        }

        for ((w_val, h_val), out_val) in w_tail.iter().zip(h_tail.iter()).zip(out_tail.iter_mut())
        {
            *out_val = (w_val * h_val).mul_add(scale, *h_val);
        }
    }
}

/// Redistribute one chunk with automatic SIMD dispatch.
#[cfg(feature = "simd")]
pub fn redistribute_layers(w: &[f64], h_ref: &[f64], scale: f64, pstar: &mut [f64]) {
    struct Impl<'a> {
        w: &'a [f64],
        h_ref: &'a [f64],
        scale: f64,
        pstar: &'a mut [f64],
    }

    impl WithSimd for Impl<'_> {
        type Output = ();

        #[inline(always)]
        fn with_simd<S: Simd>(self, simd: S) -> Self::Output {
            simd_impl::redistribute_layers_simd_inner(
                simd, self.w, self.h_ref, self.scale, self.pstar,
            );
        }
    }

    Arch::new().dispatch(Impl {
        w,
        h_ref,
        scale,
        pstar,
    });
}

// ============================================================================
// Column solver
// ============================================================================

/// Weighted reference mass of one column's active range.
fn column_weight_sum(range: LayerRange, w: &[f64], h_ref: &[f64]) -> f64 {
    let mut sum_wh = 0.0;
    for k in range.iter() {
        sum_wh += w[k] * h_ref[k];
    }
    sum_wh
}

fn target_thickness_column(
    cell: usize,
    range: LayerRange,
    w: &[f64],
    h_ref: &[f64],
    delta_h: f64,
    chunk_width: usize,
    pstar: &mut [f64],
) -> Result<(), VertCoordError> {
    let sum_wh = column_weight_sum(range, w, h_ref);
    if sum_wh == 0.0 {
        return Err(VertCoordError::ZeroMovementWeight { cell });
    }
    let scale = delta_h / sum_wh;

    let hi = range.k_max + 1;
    let mut start = range.k_min;
    while start < hi {
        let end = (start + chunk_width).min(hi);
        redistribute_layers_scalar(
            &w[start..end],
            &h_ref[start..end],
            scale,
            &mut pstar[start..end],
        );
        start = end;
    }
    Ok(())
}

#[cfg(feature = "simd")]
fn target_thickness_column_simd(
    cell: usize,
    range: LayerRange,
    w: &[f64],
    h_ref: &[f64],
    delta_h: f64,
    chunk_width: usize,
    pstar: &mut [f64],
) -> Result<(), VertCoordError> {
    let sum_wh = column_weight_sum(range, w, h_ref);
    if sum_wh == 0.0 {
        return Err(VertCoordError::ZeroMovementWeight { cell });
    }
    let scale = delta_h / sum_wh;

    let hi = range.k_max + 1;
    let mut start = range.k_min;
    while start < hi {
        let end = (start + chunk_width).min(hi);
        redistribute_layers(&w[start..end], &h_ref[start..end], scale, &mut pstar[start..end]);
        start = end;
    }
    Ok(())
}

/// Compute target layer thickness for every column.
///
/// # Arguments
/// * `cell_ranges` - active window per cell
/// * `ref_thickness` - mid-shaped reference thickness h_ref
/// * `weights` - mid-shaped movement weights (from [`movement_weights`])
/// * `total_perturbation` - per-cell ΔH to absorb
/// * `chunk_width` - block size for the elementwise phase
/// * `pstar` - mid-shaped output
///
/// # Errors
/// [`VertCoordError::ZeroMovementWeight`] if any column's weighted
/// reference mass is zero.
pub fn compute_target_thickness(
    cell_ranges: &[LayerRange],
    ref_thickness: &LayerArray,
    weights: &LayerArray,
    total_perturbation: &[f64],
    chunk_width: usize,
    pstar: &mut LayerArray,
) -> Result<(), VertCoordError> {
    let n_cells = cell_ranges.len();
    debug_assert!(chunk_width >= 1);
    debug_assert_eq!(ref_thickness.n_columns, n_cells);
    debug_assert_eq!(weights.n_columns, n_cells);
    debug_assert_eq!(total_perturbation.len(), n_cells);
    debug_assert_eq!(pstar.n_per_column, ref_thickness.n_per_column);

    for c in 0..n_cells {
        target_thickness_column(
            c,
            cell_ranges[c],
            weights.column(c),
            ref_thickness.column(c),
            total_perturbation[c],
            chunk_width,
            pstar.column_mut(c),
        )?;
    }
    Ok(())
}

/// Parallel version of [`compute_target_thickness`].
///
/// Stops at the first failing column; which error surfaces when several
/// columns fail is unspecified.
#[cfg(feature = "parallel")]
pub fn compute_target_thickness_parallel(
    cell_ranges: &[LayerRange],
    ref_thickness: &LayerArray,
    weights: &LayerArray,
    total_perturbation: &[f64],
    chunk_width: usize,
    pstar: &mut LayerArray,
) -> Result<(), VertCoordError> {
    use rayon::prelude::*;

    let n_mid = ref_thickness.n_per_column;
    debug_assert!(chunk_width >= 1);
    debug_assert_eq!(ref_thickness.n_columns, cell_ranges.len());
    debug_assert_eq!(pstar.n_per_column, n_mid);

    pstar
        .data
        .par_chunks_mut(n_mid)
        .enumerate()
        .try_for_each(|(c, out)| {
            target_thickness_column(
                c,
                cell_ranges[c],
                &weights.data[c * n_mid..(c + 1) * n_mid],
                &ref_thickness.data[c * n_mid..(c + 1) * n_mid],
                total_perturbation[c],
                chunk_width,
                out,
            )
        })
}

/// SIMD version of [`compute_target_thickness`].
///
/// Produces bit-identical results to the scalar version.
#[cfg(feature = "simd")]
pub fn compute_target_thickness_simd(
    cell_ranges: &[LayerRange],
    ref_thickness: &LayerArray,
    weights: &LayerArray,
    total_perturbation: &[f64],
    chunk_width: usize,
    pstar: &mut LayerArray,
) -> Result<(), VertCoordError> {
    let n_cells = cell_ranges.len();
    debug_assert!(chunk_width >= 1);
    debug_assert_eq!(ref_thickness.n_columns, n_cells);
    debug_assert_eq!(pstar.n_per_column, ref_thickness.n_per_column);

    for c in 0..n_cells {
        target_thickness_column_simd(
            c,
            cell_ranges[c],
            weights.column(c),
            ref_thickness.column(c),
            total_perturbation[c],
            chunk_width,
            pstar.column_mut(c),
        )?;
    }
    Ok(())
}
