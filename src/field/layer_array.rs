//! Flat cell-major storage for per-column layered fields.
//!
//! Every field the engine reads or writes is a dense `cells × vertical`
//! array with one contiguous run per column:
//! `data[cell * n_per_column + k]`. Mid-layer fields have
//! `n_per_column = n_layers`; interface fields have `n_layers + 1`.
//!
//! The contiguous-per-column layout keeps each column's scan in cache and
//! lets parallel drivers hand out disjoint `&mut` column slices.

/// Dense per-column layered field.
///
/// One struct serves both vertical shapes; constructors name the shape so
/// call sites stay readable.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerArray {
    /// Values in cell-major layout.
    pub data: Vec<f64>,
    /// Number of columns.
    pub n_columns: usize,
    /// Vertical extent per column (layers, or layers + 1 for interfaces).
    pub n_per_column: usize,
}

impl LayerArray {
    /// Create a mid-layer field (`n_layers` values per column), zeroed.
    pub fn new_mid(n_columns: usize, n_layers: usize) -> Self {
        Self {
            data: vec![0.0; n_columns * n_layers],
            n_columns,
            n_per_column: n_layers,
        }
    }

    /// Create an interface field (`n_layers + 1` values per column), zeroed.
    pub fn new_interface(n_columns: usize, n_layers: usize) -> Self {
        Self {
            data: vec![0.0; n_columns * (n_layers + 1)],
            n_columns,
            n_per_column: n_layers + 1,
        }
    }

    /// Create a field of either shape initialized to `value`.
    pub fn filled(n_columns: usize, n_per_column: usize, value: f64) -> Self {
        Self {
            data: vec![value; n_columns * n_per_column],
            n_columns,
            n_per_column,
        }
    }

    /// Wrap existing cell-major data.
    pub fn from_data(data: Vec<f64>, n_columns: usize, n_per_column: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            n_columns * n_per_column,
            "Data size mismatch: expected {}, got {}",
            n_columns * n_per_column,
            data.len()
        );
        Self {
            data,
            n_columns,
            n_per_column,
        }
    }

    /// Get the value at column `c`, vertical index `k`.
    #[inline(always)]
    pub fn get(&self, c: usize, k: usize) -> f64 {
        debug_assert!(c < self.n_columns && k < self.n_per_column);
        self.data[c * self.n_per_column + k]
    }

    /// Set the value at column `c`, vertical index `k`.
    #[inline(always)]
    pub fn set(&mut self, c: usize, k: usize, value: f64) {
        debug_assert!(c < self.n_columns && k < self.n_per_column);
        self.data[c * self.n_per_column + k] = value;
    }

    /// Direct slice access to one column.
    #[inline(always)]
    pub fn column(&self, c: usize) -> &[f64] {
        let start = c * self.n_per_column;
        &self.data[start..start + self.n_per_column]
    }

    /// Mutable slice access to one column.
    #[inline(always)]
    pub fn column_mut(&mut self, c: usize) -> &mut [f64] {
        let start = c * self.n_per_column;
        &mut self.data[start..start + self.n_per_column]
    }

    /// Fill all values with a constant.
    pub fn fill(&mut self, value: f64) {
        for v in &mut self.data {
            *v = value;
        }
    }

    /// Copy from another field of identical shape.
    pub fn copy_from(&mut self, other: &Self) {
        assert_eq!(self.data.len(), other.data.len());
        self.data.copy_from_slice(&other.data);
    }

    /// Maximum absolute value across the field.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// Total number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
