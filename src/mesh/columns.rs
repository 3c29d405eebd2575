//! Horizontal column mesh for layered vertical-coordinate computation.
//!
//! The mesh is the product of an upstream domain decomposition: an
//! unstructured set of cells (water columns), the edges between exactly
//! two cells, and the vertices shared by a variable number of cells
//! (three or more on production Voronoi meshes, fewer on hand-built test
//! meshes). The vertical dimension is a fixed count of layers; each
//! column is active over an inclusive window `[k_min, k_max]`.
//!
//! The mesh carries only what the vertical-coordinate engine consumes:
//! connectivity, bathymetry, the reference layer thickness profile, the
//! active windows, and optional cell coordinates for forcing evaluation.
//! It is read-only after construction; halo cells are assumed already
//! present and filled by the decomposition.
//!
//! Layer convention: index 0 at the surface, increasing downward. Layer k
//! lies between interfaces k (above) and k+1 (below).

use crate::error::VertCoordError;
use crate::types::LayerRange;

/// Static horizontal mesh plus per-column vertical configuration.
///
/// All arrays are indexed by raw `usize` entity indices; the strongly
/// typed indices in [`crate::types`] convert via `as_usize()`.
#[derive(Clone, Debug)]
pub struct ColumnMesh {
    /// Number of cells (columns).
    pub n_cells: usize,
    /// Number of edges.
    pub n_edges: usize,
    /// Number of vertices.
    pub n_vertices: usize,
    /// Number of vertical layers.
    pub n_layers: usize,

    /// The two cells adjacent to each edge: `cells_on_edge[e] = [c0, c1]`.
    pub cells_on_edge: Vec<[usize; 2]>,

    /// Cells sharing each vertex: `cells_on_vertex[v]` lists the adjacent
    /// cell indices. Degree varies per vertex.
    pub cells_on_vertex: Vec<Vec<usize>>,

    /// Resting depth of the bottom below the reference surface, in meters
    /// (positive down): `bottom_depth[c]`.
    pub bottom_depth: Vec<f64>,

    /// Reference layer thickness in coordinate units, cell-major:
    /// `ref_layer_thickness[c * n_layers + k]`.
    pub ref_layer_thickness: Vec<f64>,

    /// Shallowest active layer per cell.
    pub k_min: Vec<usize>,
    /// Deepest active layer per cell (inclusive).
    pub k_max: Vec<usize>,

    /// Cell longitude in radians (zero unless set; used by tidal forcing).
    pub lon_cell: Vec<f64>,
    /// Cell latitude in radians (zero unless set; used by tidal forcing).
    pub lat_cell: Vec<f64>,
}

impl ColumnMesh {
    /// Create a mesh from raw decomposition output, validating every
    /// invariant the engine later relies on.
    ///
    /// # Arguments
    /// * `n_layers` - vertical layer count (≥ 1)
    /// * `cells_on_edge` - two adjacent cells per edge
    /// * `cells_on_vertex` - adjacent cells per vertex (≥ 1 each)
    /// * `bottom_depth` - positive resting depth per cell, meters
    /// * `ref_layer_thickness` - cell-major `[n_cells * n_layers]` profile
    /// * `k_min`, `k_max` - inclusive active window per cell
    ///
    /// # Errors
    /// Returns [`VertCoordError`] if any array extent disagrees with the
    /// entity counts, any connectivity entry names a nonexistent cell,
    /// any vertex touches no cell, any depth is non-positive or
    /// non-finite, or any cell's window is inverted or out of bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n_layers: usize,
        cells_on_edge: Vec<[usize; 2]>,
        cells_on_vertex: Vec<Vec<usize>>,
        bottom_depth: Vec<f64>,
        ref_layer_thickness: Vec<f64>,
        k_min: Vec<usize>,
        k_max: Vec<usize>,
    ) -> Result<Self, VertCoordError> {
        let n_cells = bottom_depth.len();
        let mesh = Self {
            n_cells,
            n_edges: cells_on_edge.len(),
            n_vertices: cells_on_vertex.len(),
            n_layers,
            cells_on_edge,
            cells_on_vertex,
            bottom_depth,
            ref_layer_thickness,
            k_min,
            k_max,
            lon_cell: vec![0.0; n_cells],
            lat_cell: vec![0.0; n_cells],
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check every structural invariant. Called by [`ColumnMesh::new`];
    /// callers that mutate public fields directly can re-run it.
    pub fn validate(&self) -> Result<(), VertCoordError> {
        if self.n_layers == 0 {
            return Err(VertCoordError::InvalidConfig(
                "mesh needs at least one vertical layer".to_string(),
            ));
        }
        if self.bottom_depth.len() != self.n_cells {
            return Err(VertCoordError::dimension_mismatch(
                "bottom_depth",
                self.n_cells,
                self.bottom_depth.len(),
            ));
        }
        if self.ref_layer_thickness.len() != self.n_cells * self.n_layers {
            return Err(VertCoordError::dimension_mismatch(
                "ref_layer_thickness",
                self.n_cells * self.n_layers,
                self.ref_layer_thickness.len(),
            ));
        }
        if self.k_min.len() != self.n_cells {
            return Err(VertCoordError::dimension_mismatch(
                "k_min",
                self.n_cells,
                self.k_min.len(),
            ));
        }
        if self.k_max.len() != self.n_cells {
            return Err(VertCoordError::dimension_mismatch(
                "k_max",
                self.n_cells,
                self.k_max.len(),
            ));
        }
        if self.lon_cell.len() != self.n_cells || self.lat_cell.len() != self.n_cells {
            return Err(VertCoordError::dimension_mismatch(
                "lon_cell/lat_cell",
                self.n_cells,
                self.lon_cell.len().min(self.lat_cell.len()),
            ));
        }

        for (e, cells) in self.cells_on_edge.iter().enumerate() {
            for &c in cells {
                if c >= self.n_cells {
                    return Err(VertCoordError::InvalidConnectivity(format!(
                        "edge {e} references cell {c}, but the mesh has {} cells",
                        self.n_cells
                    )));
                }
            }
        }
        for (v, cells) in self.cells_on_vertex.iter().enumerate() {
            if cells.is_empty() {
                return Err(VertCoordError::InvalidConnectivity(format!(
                    "vertex {v} touches no cell"
                )));
            }
            for &c in cells {
                if c >= self.n_cells {
                    return Err(VertCoordError::InvalidConnectivity(format!(
                        "vertex {v} references cell {c}, but the mesh has {} cells",
                        self.n_cells
                    )));
                }
            }
        }

        for c in 0..self.n_cells {
            let depth = self.bottom_depth[c];
            if !(depth.is_finite() && depth > 0.0) {
                return Err(VertCoordError::InvalidConfig(format!(
                    "bottom_depth of cell {c} must be positive and finite, got {depth}"
                )));
            }
            if self.k_min[c] > self.k_max[c] || self.k_max[c] >= self.n_layers {
                return Err(VertCoordError::InvalidLayerRange {
                    cell: c,
                    k_min: self.k_min[c],
                    k_max: self.k_max[c],
                    n_layers: self.n_layers,
                });
            }
        }
        Ok(())
    }

    /// Active layer window of cell `c`.
    #[inline]
    pub fn layer_range(&self, c: usize) -> LayerRange {
        LayerRange::new(self.k_min[c], self.k_max[c])
    }

    /// Reference thickness of layer `k` in cell `c`.
    #[inline]
    pub fn ref_thickness(&self, c: usize, k: usize) -> f64 {
        debug_assert!(c < self.n_cells && k < self.n_layers);
        self.ref_layer_thickness[c * self.n_layers + k]
    }

    /// Full reference thickness column of cell `c`.
    #[inline]
    pub fn ref_thickness_column(&self, c: usize) -> &[f64] {
        &self.ref_layer_thickness[c * self.n_layers..(c + 1) * self.n_layers]
    }

    /// Cells adjacent to vertex `v`.
    #[inline]
    pub fn cells_at_vertex(&self, v: usize) -> &[usize] {
        &self.cells_on_vertex[v]
    }

    /// Override one cell's active window, revalidating the bounds.
    ///
    /// # Errors
    /// [`VertCoordError::InvalidConnectivity`] if the cell does not
    /// exist; [`VertCoordError::InvalidLayerRange`] if the window is
    /// inverted or exceeds the layer count.
    pub fn set_active_range(
        &mut self,
        cell: usize,
        k_min: usize,
        k_max: usize,
    ) -> Result<(), VertCoordError> {
        if cell >= self.n_cells {
            return Err(VertCoordError::InvalidConnectivity(format!(
                "cell {cell} does not exist, the mesh has {} cells",
                self.n_cells
            )));
        }
        if k_min > k_max || k_max >= self.n_layers {
            return Err(VertCoordError::InvalidLayerRange {
                cell,
                k_min,
                k_max,
                n_layers: self.n_layers,
            });
        }
        self.k_min[cell] = k_min;
        self.k_max[cell] = k_max;
        Ok(())
    }

    /// Set cell coordinates (radians) for forcing evaluation.
    pub fn with_coordinates(mut self, lon_cell: Vec<f64>, lat_cell: Vec<f64>) -> Self {
        assert_eq!(lon_cell.len(), self.n_cells, "lon_cell length mismatch");
        assert_eq!(lat_cell.len(), self.n_cells, "lat_cell length mismatch");
        self.lon_cell = lon_cell;
        self.lat_cell = lat_cell;
        self
    }

    // =========================================================================
    // Test mesh builders
    // =========================================================================

    /// One isolated column with `n_layers` layers of uniform thickness
    /// `dz`. No edges, no vertices. Bottom depth is the resting column
    /// height `n_layers * dz`.
    pub fn single_column(n_layers: usize, dz: f64) -> Self {
        Self::fan_like(1, n_layers, dz, Vec::new(), Vec::new())
    }

    /// Two columns sharing one edge and one (degree-2) vertex.
    pub fn column_pair(n_layers: usize, dz: f64) -> Self {
        Self::fan_like(2, n_layers, dz, vec![[0, 1]], vec![vec![0, 1]])
    }

    /// `n_cells` columns arranged around one shared hub vertex, with an
    /// edge between each consecutive pair (wrapping). The hub has degree
    /// `n_cells`, so this exercises variable vertex degree.
    ///
    /// # Panics
    /// Panics if `n_cells < 3`.
    pub fn cell_fan(n_cells: usize, n_layers: usize, dz: f64) -> Self {
        assert!(n_cells >= 3, "a fan needs at least three cells");
        let edges = (0..n_cells).map(|i| [i, (i + 1) % n_cells]).collect();
        let hub = (0..n_cells).collect();
        Self::fan_like(n_cells, n_layers, dz, edges, vec![hub])
    }

    /// Offset-row lattice of `nx * ny` cells, brick-wall style: every
    /// other row is shifted by half a cell, so interior vertices are
    /// shared by exactly three cells. Uniform thickness `dz` per layer.
    ///
    /// # Panics
    /// Panics if `nx` or `ny` is zero.
    pub fn planar_hex(nx: usize, ny: usize, n_layers: usize, dz: f64) -> Self {
        assert!(nx > 0 && ny > 0, "need at least one cell in each direction");
        let n_cells = nx * ny;
        let cell = |i: usize, j: usize| j * nx + i;

        let mut edges = Vec::new();
        for j in 0..ny {
            for i in 0..nx.saturating_sub(1) {
                edges.push([cell(i, j), cell(i + 1, j)]);
            }
        }
        // Rows shifted right on even rows: cell (i, j) overlaps (i, j+1)
        // and, depending on parity, one horizontal neighbor of it.
        for j in 0..ny.saturating_sub(1) {
            for i in 0..nx {
                edges.push([cell(i, j), cell(i, j + 1)]);
                if j % 2 == 0 {
                    if i + 1 < nx {
                        edges.push([cell(i, j), cell(i + 1, j + 1)]);
                    }
                } else if i > 0 {
                    edges.push([cell(i, j), cell(i - 1, j + 1)]);
                }
            }
        }

        // Interior triple points: two side-by-side cells in row j plus the
        // one cell in row j+1 overlapping both.
        let mut vertices: Vec<Vec<usize>> = Vec::new();
        for j in 0..ny.saturating_sub(1) {
            for i in 0..nx.saturating_sub(1) {
                let third = if j % 2 == 0 { i + 1 } else { i };
                vertices.push(vec![cell(i, j), cell(i + 1, j), cell(third, j + 1)]);
            }
        }
        // Single-row meshes still get degree-2 vertices between neighbors.
        if ny == 1 {
            for i in 0..nx.saturating_sub(1) {
                vertices.push(vec![cell(i, 0), cell(i + 1, 0)]);
            }
        }

        Self::fan_like(n_cells, n_layers, dz, edges, vertices)
    }

    /// Shared assembly for the uniform test builders.
    fn fan_like(
        n_cells: usize,
        n_layers: usize,
        dz: f64,
        cells_on_edge: Vec<[usize; 2]>,
        cells_on_vertex: Vec<Vec<usize>>,
    ) -> Self {
        assert!(n_layers > 0, "need at least one layer");
        assert!(dz > 0.0, "layer thickness must be positive");
        let mesh = Self {
            n_cells,
            n_edges: cells_on_edge.len(),
            n_vertices: cells_on_vertex.len(),
            n_layers,
            cells_on_edge,
            cells_on_vertex,
            bottom_depth: vec![n_layers as f64 * dz; n_cells],
            ref_layer_thickness: vec![dz; n_cells * n_layers],
            k_min: vec![0; n_cells],
            k_max: vec![n_layers - 1; n_cells],
            lon_cell: vec![0.0; n_cells],
            lat_cell: vec![0.0; n_cells],
        };
        debug_assert!(mesh.validate().is_ok());
        mesh
    }
}

// =============================================================================
// Tests
// =============================================================================
