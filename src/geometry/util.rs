//! Utility functions.

#![allow(dead_code)]
use crate::geometry::*;
use crate::pbrt::*;

/// Returns a direction (x, y, z) for spherical coordinates (θ, Ø).
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Ø.
#[inline]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(sin_theta * cos(phi), sin_theta * sin(phi), cos_theta)
}

/// Return the spherical angle θ for a given vector, measured from the z-axis
/// of the local frame. The vector is assumed to be a unit vector; no
/// normalization is performed.
///
/// * `v` - The vector.
#[inline]
pub fn spherical_theta(v: &Vector3f) -> Float {
    clamp(v.z, -1.0, 1.0).acos()
}

/// Return the spherical angle Ø for a given vector, measured in the tangent
/// plane from the x-axis of the local frame. The result lies in [0, 2π).
///
/// * `v` - The vector.
#[inline]
pub fn spherical_phi(v: &Vector3f) -> Float {
    let p = atan2(v.y, v.x);
    if p < 0.0 {
        p + TWO_PI
    } else {
        p
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn theta_of_poles() {
        assert_eq!(spherical_theta(&Vector3f::new(0.0, 0.0, 1.0)), 0.0);
        assert_eq!(spherical_theta(&Vector3f::new(0.0, 0.0, -1.0)), PI);
    }

    #[test]
    fn phi_wraps_into_positive_range() {
        // A direction in the -y half plane comes back in (π, 2π).
        let phi = spherical_phi(&Vector3f::new(0.0, -1.0, 0.0));
        assert!((phi - 3.0 * PI_OVER_TWO).abs() < 1e-6);
    }

    prop_compose! {
        fn unit_vector3()(theta in 0.0..std::f32::consts::PI, phi in 0.0..std::f32::consts::TAU) -> Vector3f {
            spherical_direction(theta.sin(), theta.cos(), phi)
        }
    }

    proptest! {
        #[test]
        fn spherical_angles_round_trip(v in unit_vector3()) {
            let theta = spherical_theta(&v);
            let phi = spherical_phi(&v);
            let d = spherical_direction(sin(theta), cos(theta), phi);
            prop_assert!((d - v).length() < 1e-3);
        }

        #[test]
        fn phi_in_range(v in unit_vector3()) {
            let phi = spherical_phi(&v);
            prop_assert!((0.0..TWO_PI + 1e-6).contains(&phi));
        }

        #[test]
        fn theta_in_range(v in unit_vector3()) {
            let theta = spherical_theta(&v);
            prop_assert!((0.0..=PI).contains(&theta));
        }
    }
}
