//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;

mod measured_btf;

// Re-export
pub use measured_btf::*;

/// Returns the cosine of the angle θ measured from the given direction to the
/// z-axis of the local shading frame.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns the absolute value of the cosine of the angle θ measured from the
/// given direction to the z-axis of the local shading frame.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns true if two vectors lie in the same hemisphere of the local
/// shading frame.
///
/// * `w`  - First vector.
/// * `wp` - Second vector.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cos_theta_is_z() {
        let w = Vector3f::new(0.48, 0.6, 0.64);
        assert_eq!(cos_theta(&w), 0.64);
        assert_eq!(abs_cos_theta(&Vector3f::new(0.0, 0.0, -1.0)), 1.0);
    }

    #[test]
    fn hemisphere_test() {
        let up = Vector3f::new(0.1, 0.2, 0.9);
        let down = Vector3f::new(0.1, 0.2, -0.9);
        assert!(same_hemisphere(&up, &up));
        assert!(!same_hemisphere(&up, &down));
    }
}
