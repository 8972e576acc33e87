//! UV mapping and wrapping.

use crate::geometry::*;
use crate::pbrt::*;
use std::fmt;
use std::str::FromStr;

/// Wrapping convention for texture coordinates that leave [0, 1] after the
/// UV transform.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum WrapMode {
    /// Repeat the texture. No folding happens in `UvMapping`; coordinates
    /// pass through unchanged and the lookup table's own wrap behavior
    /// governs.
    #[default]
    Repeat,

    /// Reflect the texture at every integer boundary. Coordinates are folded
    /// into [0, 1] before the lookup.
    Mirror,
}

impl FromStr for WrapMode {
    type Err = String;

    /// Parse a wrap mode name. Unrecognized names are a configuration error.
    ///
    /// * `s` - The wrap mode name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repeat" => Ok(Self::Repeat),
            "mirror" => Ok(Self::Mirror),
            _ => Err(format!("invalid wrap mode '{s}'")),
        }
    }
}

impl fmt::Display for WrapMode {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repeat => write!(f, "repeat"),
            Self::Mirror => write!(f, "mirror"),
        }
    }
}

/// Folds a coordinate into [0, 1] by triangle-wave reflection: the result is
/// the distance to the nearest even integer. Periodic with period 2 and
/// correct for negative inputs.
///
/// * `x` - The coordinate.
#[inline]
fn mirror_coord(x: Float) -> Float {
    let t = x - 2.0 * (x * 0.5).floor();
    if t > 1.0 {
        2.0 - t
    } else {
        t
    }
}

/// Maps surface UV coordinates into the lookup table's domain: a 2-D affine
/// transform followed by the wrap policy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UvMapping {
    /// The UV transformation.
    to_uv: Transform2,

    /// The wrapping convention.
    wrap_mode: WrapMode,
}

impl UvMapping {
    /// Create a new `UvMapping`.
    ///
    /// * `to_uv`     - The UV transformation.
    /// * `wrap_mode` - The wrapping convention.
    pub fn new(to_uv: Transform2, wrap_mode: WrapMode) -> Self {
        Self { to_uv, wrap_mode }
    }

    /// Returns the wrapping convention.
    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    /// Returns the mapped (u, v) coordinates for a surface point.
    ///
    /// * `uv` - The surface UV coordinates.
    pub fn map(&self, uv: &Point2f) -> Point2f {
        let p = self.to_uv.transform_point(uv);
        match self.wrap_mode {
            WrapMode::Repeat => p,
            WrapMode::Mirror => Point2f::new(mirror_coord(p.x), mirror_coord(p.y)),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn parse_wrap_mode() {
        assert_eq!("repeat".parse::<WrapMode>(), Ok(WrapMode::Repeat));
        assert_eq!("mirror".parse::<WrapMode>(), Ok(WrapMode::Mirror));
        assert!("clamp".parse::<WrapMode>().is_err());
        assert_eq!(WrapMode::default(), WrapMode::Repeat);
    }

    #[test]
    fn mirror_reflects_each_period() {
        let m = UvMapping::new(Transform2::default(), WrapMode::Mirror);
        let p = m.map(&Point2f::new(1.25, 0.25));
        assert!(approx_eq!(f32, p.x, 0.75, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.y, 0.25, epsilon = 1e-6));
    }

    #[test]
    fn mirror_handles_negative_coordinates() {
        let m = UvMapping::new(Transform2::default(), WrapMode::Mirror);
        let p = m.map(&Point2f::new(-0.25, -1.75));
        assert!(approx_eq!(f32, p.x, 0.25, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.y, 0.25, epsilon = 1e-6));
    }

    #[test]
    fn repeat_defers_folding_to_the_table() {
        let m = UvMapping::new(Transform2::default(), WrapMode::Repeat);
        let p = m.map(&Point2f::new(1.5, -0.5));
        assert_eq!(p, Point2f::new(1.5, -0.5));

        // Same input under mirror lands inside [0, 1] and differs.
        let m = UvMapping::new(Transform2::default(), WrapMode::Mirror);
        let p = m.map(&Point2f::new(1.5, -0.5));
        assert_eq!(p, Point2f::new(0.5, 0.5));
    }

    #[test]
    fn transform_applies_before_wrap() {
        let m = UvMapping::new(Transform2::scale(2.0, 2.0), WrapMode::Mirror);
        let p = m.map(&Point2f::new(0.75, 0.25));
        assert!(approx_eq!(f32, p.x, 0.5, epsilon = 1e-6));
        assert!(approx_eq!(f32, p.y, 0.5, epsilon = 1e-6));
    }

    proptest! {
        #[test]
        fn mirror_lies_in_unit_interval(x in -16.0..16.0f32, y in -16.0..16.0f32) {
            let m = UvMapping::new(Transform2::default(), WrapMode::Mirror);
            let p = m.map(&Point2f::new(x, y));
            prop_assert!((0.0..=1.0).contains(&p.x));
            prop_assert!((0.0..=1.0).contains(&p.y));
        }

        #[test]
        fn mirror_is_periodic_in_even_offsets(x in -4.0..4.0f32, y in -4.0..4.0f32, k in -4..4i32) {
            let m = UvMapping::new(Transform2::default(), WrapMode::Mirror);
            let p = m.map(&Point2f::new(x, y));
            let offset = 2.0 * k as Float;
            let q = m.map(&Point2f::new(x + offset, y + offset));
            prop_assert!((p.x - q.x).abs() < 1e-4);
            prop_assert!((p.y - q.y).abs() < 1e-4);
        }
    }
}
