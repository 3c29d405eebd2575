//! Active layer range of a water column.
//!
//! Each column is active over an inclusive index window `[k_min, k_max]`:
//! `k_min` is the shallowest active layer (0 unless ice shelves or similar
//! depress the surface), `k_max` the deepest (limited by bathymetry).
//! Layers outside the window hold fill values and are never computed.
//!
//! Edge and vertex bounds are derived from adjacent cells with the two
//! reductions [`LayerRange::shallower`] and [`LayerRange::deeper`]; both
//! yield a valid range whenever their inputs are valid, so derived bounds
//! never need re-validation.

use std::fmt;

/// Inclusive active layer range `[k_min, k_max]` of one column.
///
/// # Convention
///
/// Layer indices increase downward from the surface. The range is
/// **inclusive at both ends**: a single-layer column has `k_min == k_max`
/// and still owns two interfaces (`k_min` and `k_min + 1`).
///
/// # Example
///
/// ```
/// use vc_rs::types::LayerRange;
///
/// let range = LayerRange::new(2, 5);
/// assert_eq!(range.len(), 4);
/// assert!(range.contains(3));
/// assert!(!range.contains(6));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerRange {
    /// Shallowest active layer (inclusive).
    pub k_min: usize,
    /// Deepest active layer (inclusive).
    pub k_max: usize,
}

impl LayerRange {
    /// Create a new active range.
    ///
    /// # Panics
    ///
    /// Debug-panics if the range is inverted. Untrusted ranges go through
    /// mesh or resolver validation, which reports a proper error instead.
    #[inline]
    pub fn new(k_min: usize, k_max: usize) -> Self {
        debug_assert!(
            k_min <= k_max,
            "inverted layer range: k_min={} > k_max={}",
            k_min,
            k_max
        );
        Self { k_min, k_max }
    }

    /// Number of active layers (at least 1 for a valid range).
    #[inline]
    pub fn len(self) -> usize {
        self.k_max - self.k_min + 1
    }

    /// A valid range is never empty; this exists for clippy symmetry.
    #[inline]
    pub fn is_empty(self) -> bool {
        false
    }

    /// Whether the column has exactly one active layer.
    #[inline]
    pub fn is_single_layer(self) -> bool {
        self.k_min == self.k_max
    }

    /// Whether layer `k` is inside the active window.
    #[inline]
    pub fn contains(self, k: usize) -> bool {
        k >= self.k_min && k <= self.k_max
    }

    /// Whether the range is consistent with a column of `n_layers` layers.
    #[inline]
    pub fn is_valid_for(self, n_layers: usize) -> bool {
        self.k_min <= self.k_max && self.k_max < n_layers
    }

    /// Iterate over active layer indices, surface to bottom.
    #[inline]
    pub fn iter(self) -> impl DoubleEndedIterator<Item = usize> {
        self.k_min..=self.k_max
    }

    /// Iterate over active interface indices, `k_min` through `k_max + 1`.
    ///
    /// Even a single-layer column yields two interfaces.
    #[inline]
    pub fn interfaces(self) -> impl DoubleEndedIterator<Item = usize> {
        self.k_min..=self.k_max + 1
    }

    /// Reduce two ranges toward the surface: both bounds take the minimum.
    ///
    /// Used for edge/vertex *top* bounds: the result spans only layers
    /// every adjacent cell can see from above.
    #[inline]
    pub fn shallower(a: Self, b: Self) -> Self {
        Self {
            k_min: a.k_min.min(b.k_min),
            k_max: a.k_max.min(b.k_max),
        }
    }

    /// Reduce two ranges toward the bottom: both bounds take the maximum.
    ///
    /// Used for edge/vertex *bottom* bounds: the result spans every layer
    /// any adjacent cell reaches.
    #[inline]
    pub fn deeper(a: Self, b: Self) -> Self {
        Self {
            k_min: a.k_min.max(b.k_min),
            k_max: a.k_max.max(b.k_max),
        }
    }
}

impl fmt::Display for LayerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.k_min, self.k_max)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_contains() {
        let r = LayerRange::new(2, 5);
        assert_eq!(r.len(), 4);
        assert!(r.contains(2));
        assert!(r.contains(5));
        assert!(!r.contains(1));
        assert!(!r.contains(6));
    }

    #[test]
    fn test_single_layer_has_two_interfaces() {
        let r = LayerRange::new(3, 3);
        assert!(r.is_single_layer());
        assert_eq!(r.len(), 1);
        let ifaces: Vec<_> = r.interfaces().collect();
        assert_eq!(ifaces, vec![3, 4]);
    }

    #[test]
    fn test_iter_order() {
        let r = LayerRange::new(1, 4);
        let layers: Vec<_> = r.iter().collect();
        assert_eq!(layers, vec![1, 2, 3, 4]);
        let reversed: Vec<_> = r.iter().rev().collect();
        assert_eq!(reversed, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_shallower_deeper_reductions() {
        // Worked example: cells with [0, 3] and [1, 4].
        let a = LayerRange::new(0, 3);
        let b = LayerRange::new(1, 4);

        let top = LayerRange::shallower(a, b);
        assert_eq!(top, LayerRange::new(0, 3));

        let bot = LayerRange::deeper(a, b);
        assert_eq!(bot, LayerRange::new(1, 4));
    }

    #[test]
    fn test_reductions_preserve_validity() {
        // Disjoint-looking windows still reduce to valid ranges.
        let a = LayerRange::new(0, 1);
        let b = LayerRange::new(4, 9);

        let top = LayerRange::shallower(a, b);
        assert!(top.k_min <= top.k_max, "shallower produced {top}");
        assert_eq!(top, LayerRange::new(0, 1));

        let bot = LayerRange::deeper(a, b);
        assert!(bot.k_min <= bot.k_max, "deeper produced {bot}");
        assert_eq!(bot, LayerRange::new(4, 9));
    }

    #[test]
    fn test_is_valid_for() {
        assert!(LayerRange::new(0, 9).is_valid_for(10));
        assert!(!LayerRange::new(0, 10).is_valid_for(10));
        let inverted = LayerRange { k_min: 5, k_max: 2 };
        assert!(!inverted.is_valid_for(10));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LayerRange::new(2, 7)), "[2, 7]");
    }
}
