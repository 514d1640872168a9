//! Terrain mesh synthesis: heightfield sampling, triangulation, normals
//! and the undo-aware regeneration session.

pub mod heightfield;
pub mod history;
pub mod mesh;
pub mod normals;
pub mod session;

pub use heightfield::HeightfieldSynthesizer;
pub use history::ParameterHistory;
pub use mesh::{Mesh, Vertex};
pub use normals::{NormalEstimate, NormalEstimator};
pub use session::{Phase, TerrainSession};
