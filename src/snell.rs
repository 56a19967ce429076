//! Snell's law for a planar interface between two lossless media.
//!
//! Angles are measured from the surface normal, in radians. Beyond the
//! critical angle there is no real transmitted angle, which is reported as
//! `None` rather than as a NaN.

use std::f32::consts::FRAC_PI_2;

#[cfg(test)]
mod tests {

    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normal_incidence_same_media() {
        let theta_t = get_theta_t(0.0, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(theta_t, 0.0);
    }

    #[test]
    fn normal_incidence() {
        let theta_t = get_theta_t(0.0, 1.0, 1.31).unwrap();
        assert_abs_diff_eq!(theta_t, 0.0, epsilon = f32::EPSILON);
    }

    #[test]
    fn angle30_incidence() {
        let theta_i = 30.0_f32.to_radians();
        let theta_t = get_theta_t(theta_i, 1.0, 1.31).unwrap();
        assert_abs_diff_eq!(theta_t, 0.3916126, epsilon = 1e-3);
    }

    #[test]
    fn air_to_glass_50() {
        let theta_t = get_theta_t(50.0_f32.to_radians(), 1.0, 1.52).unwrap();
        assert_abs_diff_eq!(theta_t.to_degrees(), 30.26, epsilon = 0.05);
    }

    #[test]
    fn beyond_critical_has_no_real_angle() {
        assert!(get_theta_t(50.0_f32.to_radians(), 1.52, 1.0).is_none());
        assert!(get_theta_t(89.0_f32.to_radians(), 2.42, 1.33).is_none());
    }

    #[test]
    fn critical_angle_dense_to_rare() {
        let critical = critical_angle(1.52, 1.0);
        assert_abs_diff_eq!(critical.to_degrees(), 41.14, epsilon = 0.01);
    }

    #[test]
    fn no_critical_angle_rare_to_dense() {
        assert_eq!(critical_angle(1.0, 1.52), FRAC_PI_2);
        assert_eq!(critical_angle(1.33, 1.33), FRAC_PI_2);
    }
}

/// Computes the transmitted angle for a ray incident at `theta_i`.
///
/// Returns `None` when `n1 / n2 * sin(theta_i)` exceeds unity, ie. the ray is
/// totally internally reflected.
pub fn get_theta_t(theta_i: f32, n1: f32, n2: f32) -> Option<f32> {
    if n1 == n2 {
        return Some(theta_i);
    }

    let theta_t = (n1 / n2 * theta_i.sin()).asin();

    if theta_t.is_nan() {
        None
    } else {
        Some(theta_t)
    }
}

/// Incident angle beyond which total internal reflection occurs.
///
/// Only a ray travelling into a lower index medium has a critical angle. In
/// every other case `π/2` is returned, which no valid incident angle exceeds.
pub fn critical_angle(n1: f32, n2: f32) -> f32 {
    if n1 > n2 {
        (n2 / n1).asin()
    } else {
        FRAC_PI_2
    }
}
