//! Specific volume of seawater.
//!
//! The vertical coordinate works with specific volume ν = 1/ρ (m³/kg)
//! rather than density: the height integral accumulates ν·h directly, so
//! no division appears in the inner loop. The actual thermodynamics live
//! outside this crate; the engine only needs the pointwise contract
//! captured by [`SpecificVolume`], evaluated at mid-layer pressure from
//! the preceding pressure phase.
//!
//! # Units
//!
//! - Temperature: °C
//! - Salinity: PSU
//! - Pressure: Pa
//! - Specific volume: m³/kg
//!
//! # Norwegian Coast Context
//!
//! Typical coastal densities of 1020-1028 kg/m³ give specific volumes of
//! 9.73e-4 to 9.80e-4 m³/kg. Fjord surface layers freshened by river
//! input sit at the high end; Atlantic inflow water at the low end.
//!
//! Range clipping of out-of-bound temperature or salinity is the
//! caller's responsibility; implementations evaluate what they are
//! given.

use crate::types::LayerRange;

/// Reference density for seawater (kg/m³).
///
/// Used for the Boussinesq pseudo-height coordinate: layer thickness is
/// carried in units where ρ₀ is the conversion to mass load.
pub const RHO_0: f64 = 1025.0;

/// Reference specific volume 1/ρ₀ (m³/kg).
pub const SPEC_VOL_0: f64 = 1.0 / RHO_0;

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.80665;

/// Pointwise specific volume contract.
///
/// Implementations must be pure in their arguments so column evaluation
/// can run from any thread.
pub trait SpecificVolume: Send + Sync {
    /// Specific volume ν(T, S, p) in m³/kg.
    ///
    /// # Arguments
    /// * `temperature` - Temperature in °C
    /// * `salinity` - Salinity in PSU
    /// * `pressure` - Pressure in Pa
    fn specific_volume(&self, temperature: f64, salinity: f64, pressure: f64) -> f64;

    /// Short identifier for diagnostics.
    fn name(&self) -> &'static str;

    /// Evaluate one column over its active range.
    ///
    /// Slices are full columns (`n_layers` long); entries outside
    /// `range` are left untouched.
    fn fill_column(
        &self,
        range: LayerRange,
        temperature: &[f64],
        salinity: &[f64],
        pressure_mid: &[f64],
        spec_vol: &mut [f64],
    ) {
        for k in range.iter() {
            spec_vol[k] = self.specific_volume(temperature[k], salinity[k], pressure_mid[k]);
        }
    }
}

/// Fixed specific volume, independent of state.
///
/// The workhorse for closed-form verification: with
/// `ConstantSpecVol::reference()` the pseudo-height thickness maps one
/// to one onto geometric thickness.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSpecVol(pub f64);

impl ConstantSpecVol {
    /// Reference specific volume 1/ρ₀.
    pub fn reference() -> Self {
        Self(SPEC_VOL_0)
    }
}

impl SpecificVolume for ConstantSpecVol {
    #[inline]
    fn specific_volume(&self, _temperature: f64, _salinity: f64, _pressure: f64) -> f64 {
        self.0
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

/// Linear specific volume around a reference state.
///
/// ν = ν₀ · (1 + α(T - T₀) - β(S - S₀) - γ·p)
///
/// First-order consistent with the linear density
/// ρ = ρ₀ · (1 - α(T - T₀) + β(S - S₀)): warming expands, salting and
/// pressure contract.
#[derive(Clone, Debug)]
pub struct LinearSpecVol {
    /// Reference specific volume (m³/kg)
    pub svol_0: f64,
    /// Reference temperature (°C)
    pub t_0: f64,
    /// Reference salinity (PSU)
    pub s_0: f64,
    /// Thermal expansion coefficient (1/°C)
    pub alpha: f64,
    /// Haline contraction coefficient (1/PSU)
    pub beta: f64,
    /// Compressibility (1/Pa)
    pub gamma_p: f64,
}

impl Default for LinearSpecVol {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearSpecVol {
    /// Create a linear EOS with typical Norwegian coast parameters.
    ///
    /// Reference state: T₀ = 8°C, S₀ = 34 PSU, ρ₀ = 1026 kg/m³
    pub fn new() -> Self {
        Self {
            svol_0: 1.0 / 1026.0,
            t_0: 8.0,
            s_0: 34.0,
            alpha: 1.7e-4,   // Typical thermal expansion at 8°C
            beta: 7.6e-4,    // Typical haline contraction
            gamma_p: 4.6e-10, // Seawater compressibility
        }
    }

    /// Create with custom reference state and coefficients.
    pub fn with_params(
        svol_0: f64,
        t_0: f64,
        s_0: f64,
        alpha: f64,
        beta: f64,
        gamma_p: f64,
    ) -> Self {
        Self {
            svol_0,
            t_0,
            s_0,
            alpha,
            beta,
            gamma_p,
        }
    }
}

impl SpecificVolume for LinearSpecVol {
    #[inline]
    fn specific_volume(&self, temperature: f64, salinity: f64, pressure: f64) -> f64 {
        self.svol_0
            * (1.0 + self.alpha * (temperature - self.t_0)
                - self.beta * (salinity - self.s_0)
                - self.gamma_p * pressure)
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_spec_vol() {
        let eos = ConstantSpecVol::reference();
        assert_eq!(eos.specific_volume(8.0, 34.0, 1.0e5), SPEC_VOL_0);
        assert_eq!(eos.specific_volume(-2.0, 0.0, 0.0), SPEC_VOL_0);
        assert_eq!(eos.name(), "constant");
    }

    #[test]
    fn test_linear_at_reference_state() {
        let eos = LinearSpecVol::new();
        let v = eos.specific_volume(8.0, 34.0, 0.0);
        assert_relative_eq!(v, 1.0 / 1026.0, max_relative = 1e-14);
    }

    #[test]
    fn test_linear_responds_correctly() {
        let eos = LinearSpecVol::new();
        let v_ref = eos.specific_volume(8.0, 34.0, 0.0);

        // Warmer water expands
        assert!(eos.specific_volume(12.0, 34.0, 0.0) > v_ref);
        // Saltier water contracts
        assert!(eos.specific_volume(8.0, 35.0, 0.0) < v_ref);
        // Pressure contracts
        assert!(eos.specific_volume(8.0, 34.0, 1.0e7) < v_ref);
    }

    #[test]
    fn test_linear_magnitude_reasonable() {
        let eos = LinearSpecVol::new();
        // Across the coastal envelope specific volume stays near 1/1025
        for (t, s) in [(4.0, 25.0), (8.0, 34.0), (18.0, 35.0)] {
            let v = eos.specific_volume(t, s, 0.0);
            assert!(
                (9.5e-4..=1.01e-3).contains(&v),
                "specific volume {v} out of seawater range for T={t}, S={s}"
            );
        }
    }

    #[test]
    fn test_fill_column_respects_active_range() {
        let eos = ConstantSpecVol(2.0e-3);
        let range = LayerRange::new(1, 2);
        let t = vec![8.0; 4];
        let s = vec![34.0; 4];
        let p = vec![0.0; 4];
        let mut out = vec![-1.0; 4];

        eos.fill_column(range, &t, &s, &p, &mut out);

        assert_eq!(out, vec![-1.0, 2.0e-3, 2.0e-3, -1.0]);
    }
}
