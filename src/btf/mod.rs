//! Measured BTF data access.
//!
//! The angle/position lookup table is an external collaborator: it is built
//! once from a measured-data archive by a loader (file format and angular
//! interpolation are its business, not ours) and then queried read-only from
//! many shading threads. This module owns the narrow contract to that table
//! and the photometric decoding of its raw samples.

use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

mod mapping;

// Re-export
pub use mapping::*;

/// Exponent used to undo the display gamma baked into captured images.
pub const INV_GAMMA_EXPONENT: Float = 2.2;

/// A raw, unnormalized 3-channel sample returned by the lookup table.
///
/// Channels are stored in the table's native BGR order; the captured archives
/// store OpenCV-style images. `decode_raw` reverses them into RGB.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RawSample {
    /// Blue, green, red channel values in the table's native scale.
    pub bgr: [Float; 3],
}

impl RawSample {
    /// Create a new `RawSample` from native-order channel values.
    ///
    /// * `bgr` - Blue, green, red channel values.
    pub fn new(bgr: [Float; 3]) -> Self {
        Self { bgr }
    }
}

/// Interface to the measured angle/position lookup table.
///
/// All four angles are in radians; (u, v) are post-transform, post-wrap
/// coordinates in the table's native domain. Implementations interpolate
/// across the captured angular samples internally (typically inverse
/// angular-distance weighting controlled by a power parameter fixed at
/// construction) and must tolerate concurrent read-only queries.
pub trait BtfTable {
    /// Returns the raw pixel value for the given light/view angles and
    /// surface position.
    ///
    /// * `theta_l` - Polar angle of the light direction.
    /// * `phi_l`   - Azimuthal angle of the light direction.
    /// * `theta_v` - Polar angle of the view direction.
    /// * `phi_v`   - Azimuthal angle of the view direction.
    /// * `u`       - Surface u-coordinate.
    /// * `v`       - Surface v-coordinate.
    fn eval(
        &self,
        theta_l: Float,
        phi_l: Float,
        theta_v: Float,
        phi_v: Float,
        u: Float,
        v: Float,
    ) -> RawSample;

    /// Returns the native full-scale channel value of the source data used
    /// to normalize raw samples. Captured archives are 8-bit images.
    fn full_scale(&self) -> Float {
        255.0
    }
}

/// Atomic reference counted `BtfTable` shared across shading threads.
pub type ArcBtfTable = Arc<dyn BtfTable + Send + Sync>;

/// A table that returns the same raw value everywhere; useful for tests and
/// debugging renders.
#[derive(Copy, Clone, Debug)]
pub struct ConstantBtf {
    /// The raw value returned for every query.
    value: RawSample,
}

impl ConstantBtf {
    /// Create a new `ConstantBtf`.
    ///
    /// * `value` - The raw value to return for every query.
    pub fn new(value: RawSample) -> Self {
        Self { value }
    }
}

impl BtfTable for ConstantBtf {
    /// Returns the constant raw value regardless of angles and position.
    fn eval(
        &self,
        _theta_l: Float,
        _phi_l: Float,
        _theta_v: Float,
        _phi_v: Float,
        _u: Float,
        _v: Float,
    ) -> RawSample {
        self.value
    }
}

/// Decode a raw table sample into normalized RGB reflectance.
///
/// Divides by the table's full-scale value, applies the reflectance scale,
/// clamps to [0, 1], optionally undoes the capture gamma and reverses the
/// native BGR channel order.
///
/// * `raw`             - The raw sample.
/// * `full_scale`      - Native full-scale channel value of the source data.
/// * `reflectance`     - Reflectance scale factor.
/// * `apply_inv_gamma` - Whether to apply inverse gamma correction.
pub fn decode_raw(
    raw: &RawSample,
    full_scale: Float,
    reflectance: Float,
    apply_inv_gamma: bool,
) -> Spectrum {
    let [b, g, r] = raw.bgr;
    let mut rgb = Spectrum::from_rgb(&[r, g, b]);

    rgb = (rgb / full_scale * reflectance).clamp(0.0, 1.0);

    if apply_inv_gamma {
        rgb = rgb.pow(INV_GAMMA_EXPONENT);
    }

    rgb
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
