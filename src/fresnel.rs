//! Fresnel equations for a planar dielectric interface.
//!
//! The amplitude coefficients for both polarizations are returned together as
//! a diagonal matrix: the (0, 0) entry is the coefficient for an electric field
//! parallel to the plane of incidence, the (1, 1) entry for a field
//! perpendicular to it. [`Polarization::select`] picks the one in use.

use nalgebra::{Matrix2, Vector2};
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Orientation of the electric field relative to the plane of incidence.
#[pyclass(eq, eq_int)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    Parallel,
    #[default]
    Perpendicular,
}

impl Polarization {
    /// Picks the coefficient for this polarization from a Fresnel matrix.
    pub fn select(&self, fresnel: &Matrix2<f32>) -> f32 {
        match self {
            Polarization::Parallel => fresnel[(0, 0)],
            Polarization::Perpendicular => fresnel[(1, 1)],
        }
    }

    pub fn is_parallel(&self) -> bool {
        matches!(self, Polarization::Parallel)
    }
}

impl From<bool> for Polarization {
    fn from(parallel: bool) -> Self {
        if parallel {
            Polarization::Parallel
        } else {
            Polarization::Perpendicular
        }
    }
}

/// Computes the Fresnel reflection amplitude coefficients.
///
/// # Example
/// ```rust
/// use optics::fresnel::{self, Polarization};
///
/// let fresnel = fresnel::refl(1.0, 1.52, 0.0, 0.0);
/// let r = Polarization::Perpendicular.select(&fresnel);
/// assert!((r + 0.2063).abs() < 1e-3);
/// ```
pub fn refl(n1: f32, n2: f32, theta_i: f32, theta_t: f32) -> Matrix2<f32> {
    let cti = theta_i.cos();
    let ctt = theta_t.cos();
    let f11 = (n2 * cti - n1 * ctt) / (n1 * ctt + n2 * cti);
    let f22 = (n1 * cti - n2 * ctt) / (n1 * cti + n2 * ctt);
    Matrix2::from_diagonal(&Vector2::new(f11, f22))
}

/// Computes the Fresnel transmission amplitude coefficients.
pub fn refr(n1: f32, n2: f32, theta_i: f32, theta_t: f32) -> Matrix2<f32> {
    let cti = theta_i.cos();
    let ctt = theta_t.cos();
    let f11 = (2.0 * n1 * cti) / (n1 * ctt + n2 * cti);
    let f22 = (2.0 * n1 * cti) / (n1 * cti + n2 * ctt);
    Matrix2::from_diagonal(&Vector2::new(f11, f22))
}
