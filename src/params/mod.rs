//! Parameter definitions with documented ranges and defaults.

mod export;
mod terrain;

pub use export::ExportConfig;
pub use terrain::{
    LayerStack, NoiseDetail, ParameterField, TerrainParameters, MAX_AMPLITUDE, MAX_FREQUENCY,
    MAX_OCTAVES, MAX_VERTICES,
};
