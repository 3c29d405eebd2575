//! External forcing inputs.
//!
//! Currently the equilibrium tidal potential, which feeds the additive
//! per-cell term of the geopotential phase.

mod tidal;

pub use tidal::{TidalConstituent, TidalForcing};
