//! Mesh representation.
//!
//! Provides the horizontal column mesh consumed by the vertical
//! coordinate engine:
//! - unstructured cell/edge/vertex connectivity (edges join exactly two
//!   cells, vertices join a variable number)
//! - bathymetry and the reference layer thickness profile
//! - per-cell active layer windows
//! - uniform test mesh builders (single column, pair, fan, offset-row
//!   lattice)

mod columns;

pub use columns::ColumnMesh;
