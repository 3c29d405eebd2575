//! Equilibrium tidal potential forcing.
//!
//! The gravitational pull of moon and sun enters the geopotential as an
//! additive per-cell term. The equilibrium tide formula:
//!
//! Φ(λ, φ, t) = g Σᵢ fᵢ Aᵢ Gᵢ(φ) cos(ωᵢt + mᵢλ + φᵢ)
//!
//! where:
//! - Aᵢ = catalog amplitude for constituent i (meters)
//! - fᵢ = Love reduction factor (1 + k - h) for the elastic Earth
//! - Gᵢ(φ) = latitude factor (cos²φ semidiurnal, sin 2φ diurnal)
//! - ωᵢ = angular frequency, mᵢ = wavenumber
//! - λ = longitude, φ = latitude (radians)
//!
//! The factor g converts the equilibrium elevation to geopotential units
//! (m²/s²), matching what the geopotential phase adds to g·z.
//!
//! # Norwegian Coast Context
//!
//! At 60°N the semidiurnal latitude factor cos²φ is 0.25, yet M2 still
//! dominates (outer-coast amplitudes near 1 m) through resonant
//! amplification on the shelf.
//!
//! # References
//!
//! - Doodson (1921): Harmonic development of tide-generating potential
//! - Pugh & Woodworth (2014): Sea-Level Science

use std::f64::consts::PI;

use crate::eos::GRAVITY;

/// One harmonic constituent of the tide-generating potential.
#[derive(Clone, Debug)]
pub struct TidalConstituent {
    /// Name of the constituent (e.g., "M2", "K1")
    pub name: &'static str,
    /// Amplitude (meters)
    pub amplitude: f64,
    /// Period (seconds)
    pub period: f64,
    /// Phase (radians)
    pub phase: f64,
    /// Love number reduction factor: (1 + k - h) ≈ 0.69 for most constituents
    pub love_factor: f64,
    /// Wavenumber m in the harmonic expansion
    /// - m = 2 for semidiurnal (M2, S2, N2)
    /// - m = 1 for diurnal (K1, O1, P1)
    /// - m = 0 for long-period (Mf, Mm)
    pub wavenumber: i32,
}

impl TidalConstituent {
    /// Create a new constituent.
    pub fn new(
        name: &'static str,
        amplitude: f64,
        period: f64,
        phase: f64,
        love_factor: f64,
        wavenumber: i32,
    ) -> Self {
        Self {
            name,
            amplitude,
            period,
            phase,
            love_factor,
            wavenumber,
        }
    }

    /// Angular frequency ω = 2π/T.
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI / self.period
    }

    /// Latitude factor G(φ) and its kind per wavenumber.
    #[inline]
    fn latitude_factor(&self, lat: f64) -> f64 {
        match self.wavenumber {
            2 => lat.cos().powi(2),
            1 => (2.0 * lat).sin(),
            0 => (3.0 * lat.cos().powi(2) - 1.0) / 2.0,
            _ => 1.0,
        }
    }

    /// Principal lunar semidiurnal (M2) constituent.
    ///
    /// Period ≈ 12.42 hours, the dominant constituent in most locations.
    pub fn m2(amplitude: f64, phase: f64) -> Self {
        Self::new("M2", amplitude, 12.42 * 3600.0, phase, 0.69, 2)
    }

    /// Principal solar semidiurnal (S2) constituent.
    ///
    /// Period = 12 hours exactly.
    pub fn s2(amplitude: f64, phase: f64) -> Self {
        Self::new("S2", amplitude, 12.0 * 3600.0, phase, 0.69, 2)
    }

    /// Larger lunar elliptic semidiurnal (N2) constituent.
    ///
    /// Period ≈ 12.66 hours.
    pub fn n2(amplitude: f64, phase: f64) -> Self {
        Self::new("N2", amplitude, 12.66 * 3600.0, phase, 0.69, 2)
    }

    /// Lunar diurnal (K1) constituent.
    ///
    /// Period ≈ 23.93 hours.
    pub fn k1(amplitude: f64, phase: f64) -> Self {
        Self::new("K1", amplitude, 23.93 * 3600.0, phase, 0.69, 1)
    }

    /// Principal lunar diurnal (O1) constituent.
    ///
    /// Period ≈ 25.82 hours.
    pub fn o1(amplitude: f64, phase: f64) -> Self {
        Self::new("O1", amplitude, 25.82 * 3600.0, phase, 0.69, 1)
    }
}

/// Tidal potential evaluator over the cells of a mesh.
///
/// # Example
///
/// ```
/// use vc_rs::forcing::{TidalConstituent, TidalForcing};
///
/// let forcing = TidalForcing::new(vec![TidalConstituent::m2(1.0, 0.0)]);
///
/// // Equilibrium geopotential at 60°N, 5°E, t = 0
/// let lon = 5.0_f64.to_radians();
/// let lat = 60.0_f64.to_radians();
/// let phi = forcing.potential_at(0.0, lon, lat);
/// assert!(phi.abs() < 9.81 * 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct TidalForcing {
    /// Harmonic constituents, superposed linearly.
    pub constituents: Vec<TidalConstituent>,
    /// Gravity used to convert equilibrium elevation to geopotential.
    pub g: f64,
}

impl TidalForcing {
    /// Create a forcing from constituents with standard gravity.
    pub fn new(constituents: Vec<TidalConstituent>) -> Self {
        Self {
            constituents,
            g: GRAVITY,
        }
    }

    /// Override the gravity constant.
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Equilibrium tidal geopotential (m²/s²) at one point.
    ///
    /// # Arguments
    /// * `time` - Time in seconds
    /// * `lon` - Longitude in radians
    /// * `lat` - Latitude in radians
    pub fn potential_at(&self, time: f64, lon: f64, lat: f64) -> f64 {
        let mut phi = 0.0;
        for c in &self.constituents {
            let omega = c.angular_frequency();
            let phase = omega * time + c.wavenumber as f64 * lon + c.phase;
            phi += c.love_factor * c.amplitude * c.latitude_factor(lat) * phase.cos();
        }
        self.g * phi
    }

    /// Evaluate the potential for every cell into `potential`.
    ///
    /// # Panics
    /// Panics if the slice lengths disagree.
    pub fn evaluate(&self, time: f64, lon: &[f64], lat: &[f64], potential: &mut [f64]) {
        assert_eq!(lon.len(), potential.len(), "lon length mismatch");
        assert_eq!(lat.len(), potential.len(), "lat length mismatch");
        for (i, phi) in potential.iter_mut().enumerate() {
            *phi = self.potential_at(time, lon[i], lat[i]);
        }
    }

    /// Number of constituents.
    pub fn n_constituents(&self) -> usize {
        self.constituents.len()
    }
}
