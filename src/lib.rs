//! Measured BTF reflectance model.
//!
//! Evaluates and importance-samples reflectance from measured bidirectional
//! texture function (BTF) data: angle- and position-indexed image captures
//! of a real material. The lookup table itself (archive decoding, angular
//! interpolation) sits behind the [`btf::BtfTable`] trait; this crate owns
//! the direction parameterization, UV mapping, photometric decoding and the
//! sample/eval/pdf contract consumed by a renderer's integrator.

#[macro_use]
extern crate log;

// Re-export.
pub mod btf;
pub mod geometry;
pub mod material;
pub mod pbrt;
pub mod reflection;
pub mod sampling;
pub mod spectrum;
