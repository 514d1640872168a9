//! Terrasynth library - procedural heightfield terrain from layered gradient noise

pub mod cli;
pub mod error;
pub mod export;
pub mod noise;
pub mod params;
pub mod terrain;

pub use error::TerrainError;
pub use params::TerrainParameters;
pub use terrain::{HeightfieldSynthesizer, Mesh, ParameterHistory, TerrainSession, Vertex};

/// Seed used by [`synthesize_terrain`]
pub const DEFAULT_SEED: u32 = 123;

/// Build a terrain mesh from `params` with the default noise seed.
///
/// Use [`HeightfieldSynthesizer`] directly to pick another seed.
pub fn synthesize_terrain(params: TerrainParameters) -> Result<Mesh, TerrainError> {
    HeightfieldSynthesizer::new(DEFAULT_SEED).synthesize(&params)
}
