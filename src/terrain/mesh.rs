//! Heightfield mesh buffers.

use bytemuck::{Pod, Zeroable};

/// Vertex data for terrain mesh (position + UV coordinates + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

/// Triangulated heightfield.
///
/// Vertices are row-major (`index = z * width + x`); two triangles per cell.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub width: u32,
    pub height: u32,
    /// Zero-area faces skipped during normal estimation
    pub degenerate_faces: usize,
}

impl Mesh {
    /// Vertex at grid cell `(x, z)`; `None` outside the grid
    pub fn vertex(&self, x: u32, z: u32) -> Option<&Vertex> {
        if x >= self.width || z >= self.height {
            return None;
        }
        self.vertices.get(z as usize * self.width as usize + x as usize)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex heights in grid order
    pub fn heights(&self) -> Vec<f32> {
        self.vertices.iter().map(|v| v.position[1]).collect()
    }

    /// (min, max) height, or `None` for an empty mesh
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.position[1]).fold(None, |acc, h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
