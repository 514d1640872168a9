//! Noise generation for terrain.
//!
//! Seeded gradient noise plus the octave compositors built on top of it.
//! Everything here is immutable after construction and safe to share
//! across sampling threads.

pub mod cellular;
pub mod fractal;
pub mod gradient;

pub use fractal::{FractalCompositor, FractalField, FractalKind, DEFAULT_LACUNARITY};
pub use gradient::{GradientNoise, PermutationTable};
