//! Material

use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Stores combinations of reflection models.
pub type BxDFType = u8;

/// Types of BSDF models.
pub const BSDF_NONE: BxDFType = 0;
pub const BSDF_REFLECTION: BxDFType = 1 << 0;
pub const BSDF_TRANSMISSION: BxDFType = 1 << 1;
pub const BSDF_DIFFUSE: BxDFType = 1 << 2;
pub const BSDF_GLOSSY: BxDFType = 1 << 3;
pub const BSDF_SPECULAR: BxDFType = 1 << 4;
pub const BSDF_ALL: BxDFType =
    BSDF_DIFFUSE | BSDF_GLOSSY | BSDF_SPECULAR | BSDF_REFLECTION | BSDF_TRANSMISSION;

/// Capability filter supplied by the integrator: the set of reflection lobes
/// it currently wants evaluated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BsdfContext {
    /// Requested lobes.
    pub type_mask: BxDFType,
}

impl BsdfContext {
    /// Create a new `BsdfContext`.
    ///
    /// * `type_mask` - Requested lobes.
    pub fn new(type_mask: BxDFType) -> Self {
        Self { type_mask }
    }

    /// Returns true if all the given lobe flags are requested.
    ///
    /// * `t` - The lobe flags to test.
    pub fn is_enabled(&self, t: BxDFType) -> bool {
        self.type_mask & t == t
    }
}

impl Default for BsdfContext {
    /// Returns a context with every lobe requested.
    fn default() -> Self {
        Self::new(BSDF_ALL)
    }
}

/// Result of a stochastic direction draw. The default value, with a black
/// sample value and a zero PDF, is the invalid/disabled record.
#[derive(Copy, Clone, Debug, Default)]
pub struct BsdfSample {
    /// The sample value, already divided by the cosine of the sampled
    /// direction for importance-sampling throughput.
    pub f: Spectrum,

    /// The value of the PDF for the sampled direction.
    pub pdf: Float,

    /// The sampled outgoing direction.
    pub wo: Vector3f,

    /// Relative index of refraction over the surface boundary.
    pub eta: Float,

    /// The type of lobe that was sampled.
    pub sampled_type: BxDFType,
}

impl BsdfSample {
    /// Create a new `BsdfSample`.
    ///
    /// * `f`            - The sample value.
    /// * `pdf`          - The value of the PDF.
    /// * `wo`           - The sampled outgoing direction.
    /// * `eta`          - Relative index of refraction over the boundary.
    /// * `sampled_type` - The type of lobe that was sampled.
    pub fn new(f: Spectrum, pdf: Float, wo: Vector3f, eta: Float, sampled_type: BxDFType) -> Self {
        Self {
            f,
            pdf,
            wo,
            eta,
            sampled_type,
        }
    }

    /// Returns true if the record holds a usable sample.
    pub fn is_valid(&self) -> bool {
        self.pdf > 0.0
    }
}

/// Material trait: the per-shading-sample contract consumed by the
/// renderer's integrator. Directions are unit vectors in the local shading
/// frame (z is the surface normal); implementations must be safe to call
/// concurrently from many shading threads.
pub trait Material {
    /// Draw an outgoing direction for the given incident direction with a
    /// known probability density.
    ///
    /// * `ctx`    - The integrator's capability filter.
    /// * `wi`     - Incident direction.
    /// * `uv`     - Surface UV coordinates.
    /// * `u`      - The 2D uniform random values.
    /// * `active` - Whether this query should be computed; inactive queries
    ///              return the invalid record without faulting.
    fn sample_f(
        &self,
        ctx: &BsdfContext,
        wi: &Vector3f,
        uv: &Point2f,
        u: &Point2f,
        active: bool,
    ) -> BsdfSample;

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `ctx`    - The integrator's capability filter.
    /// * `wi`     - Incident direction.
    /// * `wo`     - Outgoing direction.
    /// * `uv`     - Surface UV coordinates.
    /// * `active` - Whether this query should be computed.
    fn f(
        &self,
        ctx: &BsdfContext,
        wi: &Vector3f,
        wo: &Vector3f,
        uv: &Point2f,
        active: bool,
    ) -> Spectrum;

    /// Returns the probability density the sampling strategy assigns to the
    /// given pair of directions.
    ///
    /// * `ctx`    - The integrator's capability filter.
    /// * `wi`     - Incident direction.
    /// * `wo`     - Outgoing direction.
    /// * `active` - Whether this query should be computed.
    fn pdf(&self, ctx: &BsdfContext, wi: &Vector3f, wo: &Vector3f, active: bool) -> Float;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material + Send + Sync>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
