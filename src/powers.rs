//! Reflected and transmitted power fractions at an interface.
//!
//! Reflectance is the square of the reflection amplitude coefficient.
//! Transmittance also carries the ratio of the normal components of the
//! energy flux on either side, `(n2 cos θt) / (n1 cos θi)`. For a lossless
//! interface the two sum to one.

use std::fmt;

use pyo3::prelude::*;
use serde::Serialize;

/// Fractions of the incident power that are reflected and transmitted.
#[pyclass(get_all)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Powers {
    pub reflectance: f32,
    pub transmittance: f32,
}

impl Powers {
    /// All power is reflected back into the incident medium.
    pub fn total_internal_reflection() -> Self {
        Self {
            reflectance: 1.0,
            transmittance: 0.0,
        }
    }

    /// Converts Fresnel amplitude coefficients `r` and `t` into powers.
    ///
    /// A coefficient that is exactly zero yields a power of exactly zero so
    /// that no floating point noise leaks into the flux ratio.
    pub fn from_amplitudes(r: f32, t: f32, n1: f32, n2: f32, theta_i: f32, theta_t: f32) -> Self {
        let reflectance = if r == 0.0 { 0.0 } else { r.powi(2) };
        let transmittance = if t == 0.0 {
            0.0
        } else {
            (n2 * theta_t.cos()) / (n1 * theta_i.cos()) * t.powi(2)
        };
        Self {
            reflectance,
            transmittance,
        }
    }

    /// Sum of reflected and transmitted power. Should be unity.
    pub fn total(&self) -> f32 {
        self.reflectance + self.transmittance
    }
}

impl fmt::Display for Powers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Powers:")?;
        writeln!(f, "  Reflectance:      {:.6}", self.reflectance)?;
        writeln!(f, "  Transmittance:    {:.6}", self.transmittance)?;
        writeln!(f, "  Total:            {:.6}", self.total())
    }
}
