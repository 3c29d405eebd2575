//! Strongly-typed domain types for safer APIs.
//!
//! This module provides newtypes and small structured types so that
//! per-entity arrays and layer windows cannot be mixed up.
//!
//! # Design Philosophy
//!
//! - **Newtypes prevent mix-ups**: `CellIndex(3)` vs `EdgeIndex(3)` are distinct types
//! - **Inclusive ranges are explicit**: [`LayerRange`] carries both bounds, never a length
//! - **Zero-cost abstractions**: all index newtypes are `#[repr(transparent)]`
//!
//! # Example
//!
//! ```
//! use vc_rs::types::{CellIndex, LayerIndex, LayerRange};
//!
//! // Indices that can't be swapped by accident
//! let cell = CellIndex::new(12);
//! let layer = LayerIndex::new(4);
//! assert_eq!(format!("{cell} {layer}"), "C12 K4");
//!
//! // The active window of a column, inclusive at both ends
//! let range = LayerRange::new(0, 3);
//! assert_eq!(range.len(), 4);
//! assert_eq!(range.interfaces().count(), 5);
//! ```

mod indices;
mod layer_range;

pub use indices::{CellIndex, EdgeIndex, LayerIndex, VertexIndex};
pub use layer_range::LayerRange;
