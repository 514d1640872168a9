//! Grayscale image output for heightfields and noise previews.

use std::path::Path;

use image::{GrayImage, ImageResult, Luma};
use noise::NoiseFn;

use crate::params::ExportConfig;
use crate::terrain::Mesh;

/// Render mesh heights as a `width x height` image, min height black, max white.
///
/// A flat mesh renders mid-gray.
pub fn heightmap_image(mesh: &Mesh) -> GrayImage {
    let mut img = GrayImage::new(mesh.width, mesh.height);
    let Some((lo, hi)) = mesh.height_range() else {
        return img;
    };
    let span = hi - lo;

    for z in 0..mesh.height {
        for x in 0..mesh.width {
            let h = mesh.vertex(x, z).map_or(lo, |v| v.position[1]);
            let t = if span > 0.0 { (h - lo) / span } else { 0.5 };
            img.put_pixel(x, z, Luma([to_gray(f64::from(t))]));
        }
    }

    img
}

/// Sample a [0, 1] noise field on a square pixel grid
pub fn noise_image<N>(noise: &N, config: &ExportConfig) -> GrayImage
where
    N: NoiseFn<f64, 2>,
{
    let mut img = GrayImage::new(config.size, config.size);
    for y in 0..config.size {
        for x in 0..config.size {
            let nx = f64::from(x) * config.frequency;
            let ny = f64::from(y) * config.frequency;
            img.put_pixel(x, y, Luma([to_gray(noise.get([nx, ny]))]));
        }
    }
    img
}

pub fn save_heightmap(mesh: &Mesh, path: &Path) -> ImageResult<()> {
    heightmap_image(mesh).save(path)
}

fn to_gray(t: f64) -> u8 {
    (t * 255.0).round().clamp(0.0, 255.0) as u8
}
