//! Heightfield sampling and grid triangulation.

use rayon::prelude::*;

use super::mesh::{Mesh, Vertex};
use super::normals::{NormalEstimator, UP};
use crate::error::TerrainError;
use crate::noise::FractalCompositor;
use crate::params::{LayerStack, NoiseDetail, TerrainParameters};

/// Builds terrain meshes from one noise field.
///
/// Holds no per-call state, so one synthesizer can serve any number of
/// regenerations (including concurrent ones).
#[derive(Clone, Debug)]
pub struct HeightfieldSynthesizer {
    fractal: FractalCompositor,
}

impl HeightfieldSynthesizer {
    pub fn new(seed: u32) -> Self {
        Self {
            fractal: FractalCompositor::with_seed(seed),
        }
    }

    pub fn from_compositor(fractal: FractalCompositor) -> Self {
        Self { fractal }
    }

    pub fn compositor(&self) -> &FractalCompositor {
        &self.fractal
    }

    /// Validate `params`, then build the full mesh with normals.
    ///
    /// Nothing is sampled if validation fails.
    pub fn synthesize(&self, params: &TerrainParameters) -> Result<Mesh, TerrainError> {
        let mut mesh = self.triangulate(params)?;
        log::debug!("estimating normals for {} triangles", mesh.triangle_count());
        NormalEstimator::apply(&mut mesh);
        Ok(mesh)
    }

    /// Validate `params`, then sample heights and build the index buffer.
    ///
    /// Every normal is left at [`UP`]; run [`NormalEstimator::apply`] to
    /// finish the mesh.
    pub fn triangulate(&self, params: &TerrainParameters) -> Result<Mesh, TerrainError> {
        params.validate()?;

        let width = params.width;
        let height = params.height;
        log::debug!("synthesizing {}x{} heightfield", width, height);

        Ok(Mesh {
            vertices: self.sample_vertices(params),
            indices: grid_indices(width, height),
            width,
            height,
            degenerate_faces: 0,
        })
    }

    /// Height at normalized planar coordinates (grid spans [-0.5, 0.5]).
    ///
    /// Each layer calls the classic fractal with its own octave loop; the
    /// two loops share an octave count.
    pub fn height_at(&self, x_pos: f64, z_pos: f64, layering: &LayerStack, detail: &NoiseDetail) -> f64 {
        let mut height = 0.0;
        let mut amplitude = layering.base_amplitude;
        let mut frequency = layering.base_frequency;

        for _ in 0..layering.layers {
            height += amplitude
                * self.fractal.classic2(
                    x_pos * frequency,
                    z_pos * frequency,
                    detail.octaves,
                    detail.persistence,
                );
            amplitude *= layering.persistence;
            frequency *= layering.lacunarity;
        }

        height
    }

    fn sample_vertices(&self, params: &TerrainParameters) -> Vec<Vertex> {
        let width = params.width as usize;
        let scale = grid_scale(params.width, params.height);
        let u_step = 1.0 / (params.width - 1) as f64;
        let v_step = 1.0 / (params.height - 1) as f64;
        let layering = params.layering();
        let detail = params.noise_detail();

        let blank = Vertex {
            position: [0.0; 3],
            uv: [0.0; 2],
            normal: UP,
        };
        let mut vertices = vec![blank; params.vertex_count()];

        // Rows are independent; each row writes only its own slice
        vertices
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(z, row)| {
                let z_pos = z as f64 * scale - 0.5;
                for (x, vertex) in row.iter_mut().enumerate() {
                    let x_pos = x as f64 * scale - 0.5;
                    let y = self.height_at(x_pos, z_pos, &layering, &detail);
                    vertex.position = [x_pos as f32, y as f32, z_pos as f32];
                    vertex.uv = [(x as f64 * u_step) as f32, (z as f64 * v_step) as f32];
                }
            });

        vertices
    }
}

/// Uniform grid spacing: the longer side spans exactly [-0.5, 0.5]
pub fn grid_scale(width: u32, height: u32) -> f64 {
    1.0 / (width.max(height) - 1) as f64
}

/// Two triangles per cell: (tl, bl, tr) and (tr, bl, br), row-major.
pub fn grid_indices(width: u32, height: u32) -> Vec<u32> {
    let cells = (width.saturating_sub(1) as usize) * (height.saturating_sub(1) as usize);
    let mut indices = Vec::with_capacity(cells * 6);

    for z in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let top_left = z * width + x;
            let top_right = top_left + 1;
            let bottom_left = top_left + width;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }

    indices
}
