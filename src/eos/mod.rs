//! Equation-of-state boundary.
//!
//! The engine never computes thermodynamics itself; it consumes specific
//! volume through the [`SpecificVolume`] trait, evaluated at the
//! mid-layer pressures of the current step. Two reference
//! implementations cover testing and simple configurations.

mod specific_volume;

pub use specific_volume::{
    ConstantSpecVol, LinearSpecVol, SpecificVolume, GRAVITY, RHO_0, SPEC_VOL_0,
};
