//! Field storage and the output field registry.
//!
//! [`LayerArray`] is the dense cell-major container every computed field
//! uses; [`FieldRegistry`] is the name-to-metadata catalog downstream
//! consumers query to discover those fields.

mod layer_array;
mod registry;

pub use layer_array::LayerArray;
pub use registry::{FieldDef, FieldLocation, FieldRegistry, VerticalExtent};

/// Default fill value for inactive entries, the netCDF default
/// `_FillValue` for double precision.
pub const FILL_VALUE_F64: f64 = 9.96920996838687e+36;
