//! Image export configuration.

use std::path::PathBuf;

/// Output settings for heightmap and noise preview images
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output PNG path
    pub output: PathBuf,

    /// Preview image side length (pixels); heightmaps use the grid size instead
    pub size: u32,

    /// Noise coordinates advanced per pixel in previews
    pub frequency: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("heightmap.png"),
            size: 256,
            frequency: 0.05,
        }
    }
}

impl ExportConfig {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }
}
