//! Reflection and refraction of a light ray at a planar interface.
//!
//! An [`OpticsModel`] holds the incident angle, the refractive indices of the
//! two media and the polarization of the incident light. Everything else is
//! derived on demand:
//! - the transmitted angle from Snell's law
//! - the critical angle for total internal reflection
//! - reflectance and transmittance from the Fresnel equations
//! - the end points of the incident, reflected and transmitted rays
//!
//! # Geometry
//!
//! The interface lies in the xz-plane with its normal along +y. Every ray
//! starts at the origin and ends on the unit circle in the xy-plane. Angles are
//! measured from the normal, so the end point for an angle `a` is
//! `(sin a, cos a, 0)`. The incident ray is mirrored to the -x side of the
//! normal and the transmitted ray to the -y side of the interface.

use std::f32::consts::PI;

use log::debug;
use nalgebra::Point3;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::DomainError;
use crate::fresnel::{self, Polarization};
use crate::medium::Medium;
use crate::powers::Powers;
use crate::snell;

/// Largest incident angle accepted by the model, in degrees.
pub const MAX_INCIDENT_ANGLE: f32 = 90.0;

/// An incident angle known to lie in `[0, 90]` degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct IncidentAngle(f32);

impl IncidentAngle {
    pub fn from_degrees(degrees: f32) -> Result<Self, DomainError> {
        if (0.0..=MAX_INCIDENT_ANGLE).contains(&degrees) {
            Ok(Self(degrees))
        } else {
            Err(DomainError::AngleOutOfRange { degrees })
        }
    }

    pub fn degrees(&self) -> f32 {
        self.0
    }

    pub fn radians(&self) -> f32 {
        self.0.to_radians()
    }
}

impl TryFrom<f32> for IncidentAngle {
    type Error = DomainError;

    fn try_from(degrees: f32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

/// A straight ray segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl Ray {
    fn from_origin(end: Point3<f32>) -> Self {
        Self {
            start: Point3::origin(),
            end,
        }
    }
}

/// The three rays at the interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rays {
    pub incident: Ray,
    pub reflected: Ray,
    /// Coincides with the reflected ray under total internal reflection.
    pub transmitted: Ray,
}

/// Calculation state for a ray crossing the interface between two media.
#[pyclass]
#[derive(Debug, Clone, PartialEq)]
pub struct OpticsModel {
    incident_angle: IncidentAngle,
    incident_index: f32,
    transmitted_index: f32,
    polarization: Polarization,
}

impl OpticsModel {
    /// Creates a new model.
    ///
    /// Fails if `incident_angle` (in degrees) is outside `[0, 90]`. The
    /// refractive indices are taken as given.
    pub fn new(
        incident_angle: f32,
        incident_index: f32,
        transmitted_index: f32,
        polarization: Polarization,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            incident_angle: IncidentAngle::from_degrees(incident_angle)?,
            incident_index,
            transmitted_index,
            polarization,
        })
    }

    /// Creates a new model for a ray going from `incident` into `transmitted`.
    pub fn from_media(
        incident_angle: f32,
        incident: Medium,
        transmitted: Medium,
        polarization: Polarization,
    ) -> Result<Self, DomainError> {
        Self::new(
            incident_angle,
            incident.index(),
            transmitted.index(),
            polarization,
        )
    }

    /// Updates the incident angle, in degrees.
    ///
    /// An out of range value is rejected and the previous angle is kept.
    pub fn set_incident_angle(&mut self, degrees: f32) -> Result<(), DomainError> {
        self.incident_angle = IncidentAngle::from_degrees(degrees)?;
        debug!("incident angle set to {} degrees", degrees);
        Ok(())
    }

    pub fn incident_angle_degrees(&self) -> f32 {
        self.incident_angle.degrees()
    }

    /// Incident angle in radians.
    pub fn incident_angle(&self) -> f32 {
        self.incident_angle.radians()
    }

    pub fn incident_index(&self) -> f32 {
        self.incident_index
    }

    pub fn transmitted_index(&self) -> f32 {
        self.transmitted_index
    }

    pub fn polarization(&self) -> Polarization {
        self.polarization
    }

    /// Transmitted angle in radians, from Snell's law.
    ///
    /// Returns `None` at or beyond the critical angle, where no light is
    /// transmitted.
    pub fn transmitted_angle(&self) -> Option<f32> {
        if self.is_total_internal_reflection() {
            return None;
        }
        snell::get_theta_t(
            self.incident_angle(),
            self.incident_index,
            self.transmitted_index,
        )
    }

    /// Critical angle in radians, or `π/2` if the ray is not travelling into a
    /// lower index medium.
    pub fn critical_angle(&self) -> f32 {
        snell::critical_angle(self.incident_index, self.transmitted_index)
    }

    pub fn is_total_internal_reflection(&self) -> bool {
        self.incident_angle() >= self.critical_angle()
    }

    /// Reflectance and transmittance from the Fresnel equations.
    pub fn powers(&self) -> Powers {
        let Some(theta_t) = self.transmitted_angle() else {
            return Powers::total_internal_reflection();
        };
        let (n1, n2) = (self.incident_index, self.transmitted_index);
        let theta_i = self.incident_angle();

        let r = self
            .polarization
            .select(&fresnel::refl(n1, n2, theta_i, theta_t));
        let t = self
            .polarization
            .select(&fresnel::refr(n1, n2, theta_i, theta_t));

        Powers::from_amplitudes(r, t, n1, n2, theta_i, theta_t)
    }

    /// Start and end points of the incident, reflected and transmitted rays.
    pub fn rays(&self) -> Rays {
        let reflected_end = ray_position(self.incident_angle());
        let mut incident_end = reflected_end;
        incident_end.x *= -1.0;

        let transmitted_end = match self.transmitted_angle() {
            Some(theta_t) => {
                let mut end = ray_position(theta_t);
                end.y *= -1.0;
                end
            }
            None => reflected_end,
        };

        Rays {
            incident: Ray::from_origin(incident_end),
            reflected: Ray::from_origin(reflected_end),
            transmitted: Ray::from_origin(transmitted_end),
        }
    }

    /// The surface normal through the origin, as a line between two points.
    pub fn normal() -> Ray {
        let end = ray_position(PI);
        Ray {
            start: Point3::new(-end.x, -end.y, -end.z),
            end,
        }
    }
}

/// End point of a unit ray from the origin at `angle` radians from the normal.
pub fn ray_position(angle: f32) -> Point3<f32> {
    Point3::new((PI / 2.0 - angle).cos(), (PI / 2.0 - angle).sin(), 0.0)
}

fn to_py_err(err: DomainError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn point_to_vec(point: &Point3<f32>) -> Vec<f32> {
    vec![point.x, point.y, point.z]
}

fn ray_to_vec(ray: &Ray) -> (Vec<f32>, Vec<f32>) {
    (point_to_vec(&ray.start), point_to_vec(&ray.end))
}

#[pymethods]
impl OpticsModel {
    #[new]
    #[pyo3(signature = (incident_angle, incident_index, transmitted_index, parallel=false))]
    fn py_new(
        incident_angle: f32,
        incident_index: f32,
        transmitted_index: f32,
        parallel: bool,
    ) -> PyResult<Self> {
        OpticsModel::new(
            incident_angle,
            incident_index,
            transmitted_index,
            Polarization::from(parallel),
        )
        .map_err(to_py_err)
    }

    /// Incident angle in radians.
    #[getter(incident_angle)]
    fn py_incident_angle(&self) -> f32 {
        self.incident_angle()
    }

    /// Set the incident angle in degrees.
    #[setter(incident_angle)]
    fn py_set_incident_angle(&mut self, degrees: f32) -> PyResult<()> {
        self.set_incident_angle(degrees).map_err(to_py_err)
    }

    #[getter(incident_index)]
    fn py_incident_index(&self) -> f32 {
        self.incident_index
    }

    #[getter(transmitted_index)]
    fn py_transmitted_index(&self) -> f32 {
        self.transmitted_index
    }

    #[getter(parallel)]
    fn py_parallel(&self) -> bool {
        self.polarization.is_parallel()
    }

    /// Transmitted angle in radians, or None under total internal reflection.
    #[getter(transmitted_angle)]
    fn py_transmitted_angle(&self) -> Option<f32> {
        self.transmitted_angle()
    }

    #[getter(critical_angle)]
    fn py_critical_angle(&self) -> f32 {
        self.critical_angle()
    }

    /// Reflectance, transmittance.
    #[getter(irradiance)]
    fn py_irradiance(&self) -> (f32, f32) {
        let powers = self.powers();
        (powers.reflectance, powers.transmittance)
    }

    /// Incident, reflected and transmitted ray start and end positions.
    #[getter(rays)]
    #[allow(clippy::type_complexity)]
    fn py_rays(&self) -> [(Vec<f32>, Vec<f32>); 3] {
        let rays = self.rays();
        [
            ray_to_vec(&rays.incident),
            ray_to_vec(&rays.reflected),
            ray_to_vec(&rays.transmitted),
        ]
    }

    #[staticmethod]
    #[pyo3(name = "ray_position")]
    fn py_ray_position(angle: f32) -> Vec<f32> {
        point_to_vec(&ray_position(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn model(angle: f32, n1: f32, n2: f32, polarization: Polarization) -> OpticsModel {
        OpticsModel::new(angle, n1, n2, polarization).unwrap()
    }

    #[test]
    fn angle_bounds() {
        assert!(OpticsModel::new(0.0, 1.0, 1.5, Polarization::Perpendicular).is_ok());
        assert!(OpticsModel::new(90.0, 1.0, 1.5, Polarization::Perpendicular).is_ok());
        assert_eq!(
            OpticsModel::new(91.0, 1.0, 1.5, Polarization::Perpendicular).unwrap_err(),
            DomainError::AngleOutOfRange { degrees: 91.0 }
        );
        assert_eq!(
            OpticsModel::new(-1.0, 1.0, 1.5, Polarization::Perpendicular).unwrap_err(),
            DomainError::AngleOutOfRange { degrees: -1.0 }
        );
        assert!(IncidentAngle::from_degrees(f32::NAN).is_err());
    }

    #[test]
    fn rejected_update_keeps_previous_angle() {
        let mut optics = model(30.0, 1.0, 1.52, Polarization::Perpendicular);
        assert!(optics.set_incident_angle(120.0).is_err());
        assert_eq!(optics.incident_angle_degrees(), 30.0);
        optics.set_incident_angle(45.0).unwrap();
        assert_eq!(optics.incident_angle_degrees(), 45.0);
        assert_abs_diff_eq!(optics.incident_angle(), PI / 4.0);
    }

    #[test]
    fn matched_media() {
        let optics = model(0.0, 1.33, 1.33, Polarization::Perpendicular);
        let powers = optics.powers();
        assert_eq!(powers.reflectance, 0.0);
        assert_abs_diff_eq!(powers.transmittance, 1.0, epsilon = 1e-6);
        assert_eq!(optics.critical_angle(), FRAC_PI_2);
    }

    #[test]
    fn air_to_glass_perpendicular() {
        let optics = model(50.0, 1.0, 1.52, Polarization::Perpendicular);
        assert_abs_diff_eq!(
            optics.transmitted_angle().unwrap().to_degrees(),
            30.263,
            epsilon = 1e-2
        );
        assert_eq!(optics.critical_angle(), FRAC_PI_2);
        let powers = optics.powers();
        assert_abs_diff_eq!(powers.reflectance, 0.117396, epsilon = 1e-4);
        assert_abs_diff_eq!(powers.total(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn air_to_glass_parallel() {
        let optics = model(50.0, 1.0, 1.52, Polarization::Parallel);
        let powers = optics.powers();
        assert_abs_diff_eq!(powers.reflectance, 0.003790, epsilon = 1e-4);
        assert_abs_diff_eq!(powers.total(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn glass_to_air_total_internal_reflection() {
        let optics = model(50.0, 1.52, 1.0, Polarization::Perpendicular);
        assert_abs_diff_eq!(optics.critical_angle().to_degrees(), 41.14, epsilon = 1e-2);
        assert!(optics.is_total_internal_reflection());
        assert_eq!(optics.transmitted_angle(), None);
        assert_eq!(optics.powers(), Powers::total_internal_reflection());
    }

    #[test]
    fn water_to_air_below_critical() {
        let optics = model(30.0, 1.33, 1.0, Polarization::Perpendicular);
        assert!(!optics.is_total_internal_reflection());
        assert_abs_diff_eq!(
            optics.transmitted_angle().unwrap().to_degrees(),
            41.682,
            epsilon = 1e-2
        );
        assert_abs_diff_eq!(optics.powers().reflectance, 0.045494, epsilon = 1e-4);
    }

    #[test]
    fn normal_incidence_ignores_polarization() {
        let perp = model(0.0, 1.0, 1.52, Polarization::Perpendicular);
        let par = model(0.0, 1.0, 1.52, Polarization::Parallel);
        assert_eq!(perp.transmitted_angle(), Some(0.0));
        assert_abs_diff_eq!(perp.powers().reflectance, par.powers().reflectance, epsilon = 1e-7);
        assert_abs_diff_eq!(perp.powers().reflectance, 0.04258, epsilon = 1e-5);
    }

    #[test]
    fn grazing_incidence_reflects_everything() {
        let optics = model(90.0, 1.0, 1.52, Polarization::Perpendicular);
        assert!(optics.is_total_internal_reflection());
        assert_eq!(optics.powers(), Powers::total_internal_reflection());
    }

    #[test]
    fn rays_at_normal_incidence() {
        let rays = model(0.0, 1.0, 1.52, Polarization::Perpendicular).rays();
        for ray in [rays.incident, rays.reflected, rays.transmitted] {
            assert_eq!(ray.start, Point3::origin());
            assert_abs_diff_eq!(ray.end.x, 0.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(rays.incident.end.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rays.reflected.end.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rays.transmitted.end.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn rays_are_mirrored() {
        let rays = model(50.0, 1.0, 1.52, Polarization::Perpendicular).rays();
        assert_abs_diff_eq!(rays.reflected.end.x, 0.766044, epsilon = 1e-5);
        assert_abs_diff_eq!(rays.reflected.end.y, 0.642788, epsilon = 1e-5);
        assert_abs_diff_eq!(rays.incident.end.x, -0.766044, epsilon = 1e-5);
        assert_abs_diff_eq!(rays.incident.end.y, 0.642788, epsilon = 1e-5);
        assert_abs_diff_eq!(rays.transmitted.end.x, 0.503977, epsilon = 1e-5);
        assert_abs_diff_eq!(rays.transmitted.end.y, -0.863717, epsilon = 1e-5);
    }

    #[test]
    fn transmitted_ray_follows_reflected_under_tir() {
        let rays = model(60.0, 2.42, 1.0, Polarization::Parallel).rays();
        assert_eq!(rays.transmitted, rays.reflected);
    }

    #[test]
    fn normal_line() {
        let normal = OpticsModel::normal();
        assert_abs_diff_eq!(normal.end.y, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(normal.start.y, 1.0, epsilon = 1e-6);
    }
}
