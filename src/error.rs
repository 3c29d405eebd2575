//! Error types for vertical-coordinate construction and computation.
//!
//! Two layers of failure exist and are kept apart deliberately:
//!
//! - [`VertCoordError`]: fatal configuration or input errors. A model step
//!   cannot proceed past these (an inverted layer range, a column whose
//!   movement weights sum to zero, mismatched array extents). They surface
//!   at construction or on the first compute call.
//! - [`RegistryError`]: name-lookup failures on the instance and field
//!   registries (duplicate or unknown names). These are ordinary caller
//!   errors and are always recoverable.

use thiserror::Error;

/// Fatal errors from vertical-coordinate setup or compute phases.
#[derive(Debug, Error)]
pub enum VertCoordError {
    /// A cell's active layer range is inverted or exceeds the layer count.
    #[error(
        "Invalid active layer range for cell {cell}: k_min={k_min}, k_max={k_max}, n_layers={n_layers}"
    )]
    InvalidLayerRange {
        cell: usize,
        k_min: usize,
        k_max: usize,
        n_layers: usize,
    },

    /// A column's movement weights sum to zero over its active range, so the
    /// target-thickness redistribution is undefined there.
    #[error("Movement weights sum to zero over the active range of cell {cell}")]
    ZeroMovementWeight { cell: usize },

    /// The configured movement weight policy name is not recognized.
    #[error("Unknown movement weight policy: {0:?} (expected \"uniform\" or \"fixed\")")]
    UnknownWeightPolicy(String),

    /// An input array's extent does not match the mesh.
    #[error("Dimension mismatch for {field}: expected {expected}, got {actual}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Mesh connectivity refers to an entity that does not exist.
    #[error("Invalid mesh connectivity: {0}")]
    InvalidConnectivity(String),

    /// A configuration value is out of its physical domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A named-instance or field-registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Recoverable name-lookup errors from the instance and field registries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// An instance with this name already exists.
    #[error("Vertical coordinate instance already exists: {0:?}")]
    DuplicateInstance(String),

    /// No instance with this name exists.
    #[error("Unknown vertical coordinate instance: {0:?}")]
    UnknownInstance(String),

    /// A field with this name is already registered.
    #[error("Field already registered: {0:?}")]
    DuplicateField(String),

    /// No field with this name is registered.
    #[error("Unknown field: {0:?}")]
    UnknownField(String),
}

impl VertCoordError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(field: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            field,
            expected,
            actual,
        }
    }
}
