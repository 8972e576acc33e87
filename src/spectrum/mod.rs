//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Default to using `RGBSpectrum` for rendering; measured BTF captures are
/// stored as 3-channel images.
pub type Spectrum = RGBSpectrum;
