//! Active layer bound resolution for cells, edges, and vertices.
//!
//! Cells own their active windows; edges and vertices derive theirs from
//! the adjacent cells once at construction, and the result is immutable
//! afterward. Two derived bounds exist per entity:
//!
//! - *top* bounds ([`LayerRange::shallower`] fold): the window every
//!   adjacent cell spans, used where a flux must be defined on all sides
//! - *bottom* bounds ([`LayerRange::deeper`] fold): the union-reaching
//!   window, used where any adjacent cell contributes
//!
//! For an edge between cells with windows [0, 3] and [1, 4] this gives
//! top [0, 3] and bottom [1, 4].

use crate::error::VertCoordError;
use crate::mesh::ColumnMesh;
use crate::types::LayerRange;

/// Resolved active windows for every mesh entity.
#[derive(Clone, Debug)]
pub struct ActiveRanges {
    /// Per-cell window, validated copy of the mesh configuration.
    pub cell: Vec<LayerRange>,
    /// Per-edge window from the shallower fold over both cells.
    pub edge_top: Vec<LayerRange>,
    /// Per-edge window from the deeper fold over both cells.
    pub edge_bot: Vec<LayerRange>,
    /// Per-vertex window from the shallower fold over all cells.
    pub vertex_top: Vec<LayerRange>,
    /// Per-vertex window from the deeper fold over all cells.
    pub vertex_bot: Vec<LayerRange>,
}

impl ActiveRanges {
    /// Resolve all windows from a validated mesh.
    pub fn resolve(mesh: &ColumnMesh) -> Result<Self, VertCoordError> {
        let cell: Vec<LayerRange> = (0..mesh.n_cells)
            .map(|c| LayerRange {
                k_min: mesh.k_min[c],
                k_max: mesh.k_max[c],
            })
            .collect();
        Self::resolve_from_parts(
            mesh.n_layers,
            cell,
            &mesh.cells_on_edge,
            &mesh.cells_on_vertex,
        )
    }

    /// Resolve from raw cell windows and connectivity.
    ///
    /// Re-checks the cell windows and the connectivity: this path can be
    /// fed data that did not pass through mesh construction.
    ///
    /// # Errors
    /// [`VertCoordError::InvalidLayerRange`] for any inverted or
    /// out-of-bounds cell window;
    /// [`VertCoordError::InvalidConnectivity`] if an edge or vertex
    /// names a cell that does not exist, or a vertex touches no cell.
    pub fn resolve_from_parts(
        n_layers: usize,
        cell: Vec<LayerRange>,
        cells_on_edge: &[[usize; 2]],
        cells_on_vertex: &[Vec<usize>],
    ) -> Result<Self, VertCoordError> {
        for (c, range) in cell.iter().enumerate() {
            if !range.is_valid_for(n_layers) {
                return Err(VertCoordError::InvalidLayerRange {
                    cell: c,
                    k_min: range.k_min,
                    k_max: range.k_max,
                    n_layers,
                });
            }
        }

        let n_cells = cell.len();
        for (e, cells) in cells_on_edge.iter().enumerate() {
            for &c in cells {
                if c >= n_cells {
                    return Err(VertCoordError::InvalidConnectivity(format!(
                        "edge {e} references cell {c}, but only {n_cells} cell windows were given"
                    )));
                }
            }
        }
        for (v, cells) in cells_on_vertex.iter().enumerate() {
            if cells.is_empty() {
                return Err(VertCoordError::InvalidConnectivity(format!(
                    "vertex {v} touches no cell"
                )));
            }
            for &c in cells {
                if c >= n_cells {
                    return Err(VertCoordError::InvalidConnectivity(format!(
                        "vertex {v} references cell {c}, but only {n_cells} cell windows were given"
                    )));
                }
            }
        }

        let mut edge_top = Vec::with_capacity(cells_on_edge.len());
        let mut edge_bot = Vec::with_capacity(cells_on_edge.len());
        for &[c0, c1] in cells_on_edge {
            edge_top.push(LayerRange::shallower(cell[c0], cell[c1]));
            edge_bot.push(LayerRange::deeper(cell[c0], cell[c1]));
        }

        let mut vertex_top = Vec::with_capacity(cells_on_vertex.len());
        let mut vertex_bot = Vec::with_capacity(cells_on_vertex.len());
        for cells in cells_on_vertex {
            let first = cell[cells[0]];
            let top = cells[1..]
                .iter()
                .fold(first, |acc, &c| LayerRange::shallower(acc, cell[c]));
            let bot = cells[1..]
                .iter()
                .fold(first, |acc, &c| LayerRange::deeper(acc, cell[c]));
            vertex_top.push(top);
            vertex_bot.push(bot);
        }

        Ok(Self {
            cell,
            edge_top,
            edge_bot,
            vertex_top,
            vertex_bot,
        })
    }

    /// Number of cells covered.
    pub fn n_cells(&self) -> usize {
        self.cell.len()
    }
}
