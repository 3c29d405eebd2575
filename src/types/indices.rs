//! Strongly-typed index newtypes.
//!
//! These types prevent mixing up different kinds of mesh indices
//! (cell vs edge vs vertex vs layer). A layer index addresses the
//! vertical; the other three address horizontal mesh entities.

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// Convert to usize.
            #[inline]
            pub const fn as_usize(self) -> usize {
                self.0
            }

            /// Create an iterator over [0, n) indices.
            pub fn iter(n: usize) -> impl Iterator<Item = $name> + ExactSizeIterator {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        // Allow using as array index
        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }
    };
}

define_index!(
    /// Horizontal cell index.
    ///
    /// Identifies one water column of the mesh. All per-column arrays
    /// (bottom depth, layer thickness, pressure) are addressed by it.
    ///
    /// # Example
    ///
    /// ```
    /// use vc_rs::types::CellIndex;
    ///
    /// let cell = CellIndex::new(42);
    /// assert_eq!(cell.get(), 42);
    /// ```
    CellIndex,
    "C"
);

define_index!(
    /// Horizontal edge index.
    ///
    /// Identifies the interface between exactly two cells. Active layer
    /// bounds on edges are derived from the two adjacent cells.
    ///
    /// # Example
    ///
    /// ```
    /// use vc_rs::types::EdgeIndex;
    ///
    /// let edge = EdgeIndex::new(10);
    /// assert_eq!(edge.get(), 10);
    /// ```
    EdgeIndex,
    "E"
);

define_index!(
    /// Horizontal vertex index.
    ///
    /// Identifies a mesh vertex shared by a variable number of cells
    /// (three or more on production Voronoi meshes).
    ///
    /// # Example
    ///
    /// ```
    /// use vc_rs::types::VertexIndex;
    ///
    /// let vertex = VertexIndex::new(3);
    /// assert_eq!(vertex.get(), 3);
    /// ```
    VertexIndex,
    "V"
);

define_index!(
    /// Vertical layer index.
    ///
    /// Layer 0 is at the surface; indices increase downward. Layer k is
    /// bounded by interfaces k (above) and k+1 (below).
    ///
    /// # Example
    ///
    /// ```
    /// use vc_rs::types::LayerIndex;
    ///
    /// let layer = LayerIndex::new(5);
    /// assert_eq!(layer.get(), 5);
    /// ```
    LayerIndex,
    "K"
);

// =============================================================================
// Tests
// =============================================================================
