//! Sequential column scan primitive.
//!
//! Both vertical integrals (pressure downward, height upward) are prefix
//! sums over one column's active window. The scan walks the window in a
//! fixed direction and hands the visitor both the running total before
//! and after each layer's increment, plus a flag marking the last layer,
//! so the terminal interface value falls out of the same pass instead of
//! a second sweep.
//!
//! Accumulation is strictly sequential in layer order. Results therefore
//! never depend on thread count or on how columns are batched; only the
//! horizontal loop around the scan is ever parallel.

use crate::types::LayerRange;

/// One step of a column scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanStep {
    /// Layer index being accumulated.
    pub k: usize,
    /// Running total before this layer's increment. For a downward scan
    /// this is the prefix at interface `k`; upward, at interface `k + 1`.
    pub before: f64,
    /// Running total after this layer's increment.
    pub after: f64,
    /// Whether this is the last layer of the window.
    pub is_final: bool,
}

/// Scan a column from the surface down.
///
/// Visits layers `k_min..=k_max` in order. `increment(k)` supplies layer
/// k's contribution; `visit` observes every step. Returns the terminal
/// total (the prefix at interface `k_max + 1`).
#[inline]
pub fn scan_surface_down<I, V>(range: LayerRange, seed: f64, mut increment: I, mut visit: V) -> f64
where
    I: FnMut(usize) -> f64,
    V: FnMut(ScanStep),
{
    let mut acc = seed;
    for k in range.iter() {
        let before = acc;
        acc += increment(k);
        visit(ScanStep {
            k,
            before,
            after: acc,
            is_final: k == range.k_max,
        });
    }
    acc
}

/// Scan a column from the bottom up.
///
/// Visits layers `k_max..=k_min` in reverse order. `before` is the
/// prefix at interface `k + 1`, `after` at interface `k`. Returns the
/// terminal total (the prefix at interface `k_min`).
#[inline]
pub fn scan_bottom_up<I, V>(range: LayerRange, seed: f64, mut increment: I, mut visit: V) -> f64
where
    I: FnMut(usize) -> f64,
    V: FnMut(ScanStep),
{
    let mut acc = seed;
    for k in range.iter().rev() {
        let before = acc;
        acc += increment(k);
        visit(ScanStep {
            k,
            before,
            after: acc,
            is_final: k == range.k_min,
        });
    }
    acc
}
