//! Per-vertex normals from face-normal accumulation.
//!
//! Every incident face contributes its unit normal with equal weight,
//! regardless of triangle area.

use glam::Vec3;
use rayon::prelude::*;

use super::mesh::Mesh;

/// Normal used when a vertex has no usable incident face
pub const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// Squared cross-product length below which a face counts as zero-area
const DEGENERATE_EPSILON: f32 = 1e-20;

/// Result of one estimation pass
#[derive(Debug, Clone, PartialEq)]
pub struct NormalEstimate {
    pub normals: Vec<[f32; 3]>,
    /// Faces with (near) zero area; they contribute nothing
    pub degenerate_faces: usize,
    /// Vertices whose accumulator summed to zero and fell back to [`UP`]
    pub fallback_vertices: usize,
}

pub struct NormalEstimator;

impl NormalEstimator {
    /// Estimate normals for `mesh` from its positions and indices.
    pub fn estimate(mesh: &Mesh) -> NormalEstimate {
        let positions: Vec<Vec3> = mesh
            .vertices
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .collect();
        Self::estimate_positions(&positions, &mesh.indices)
    }

    /// Estimate normals for raw positions and a triangle list.
    ///
    /// Face normals are computed in parallel; accumulation into vertices
    /// happens only after every face is done.
    pub fn estimate_positions(positions: &[Vec3], indices: &[u32]) -> NormalEstimate {
        let face_normals: Vec<Option<Vec3>> = indices
            .par_chunks_exact(3)
            .map(|tri| {
                let v0 = positions[tri[0] as usize];
                let v1 = positions[tri[1] as usize];
                let v2 = positions[tri[2] as usize];
                face_normal(v0, v1, v2)
            })
            .collect();

        let mut accumulators = vec![Vec3::ZERO; positions.len()];
        let mut degenerate_faces = 0;
        for (tri, normal) in indices.chunks_exact(3).zip(&face_normals) {
            match normal {
                Some(n) => {
                    for &i in tri {
                        accumulators[i as usize] += *n;
                    }
                }
                None => degenerate_faces += 1,
            }
        }

        let mut fallback_vertices = 0;
        let normals = accumulators
            .into_iter()
            .map(|acc| match acc.try_normalize() {
                Some(n) => n.to_array(),
                None => {
                    fallback_vertices += 1;
                    UP
                }
            })
            .collect();

        if degenerate_faces > 0 {
            log::warn!(
                "{} degenerate faces skipped during normal estimation ({} vertices fell back to up)",
                degenerate_faces,
                fallback_vertices
            );
        }

        NormalEstimate {
            normals,
            degenerate_faces,
            fallback_vertices,
        }
    }

    /// Estimate and write normals into the mesh vertices
    pub fn apply(mesh: &mut Mesh) {
        let estimate = Self::estimate(mesh);
        for (vertex, normal) in mesh.vertices.iter_mut().zip(&estimate.normals) {
            vertex.normal = *normal;
        }
        mesh.degenerate_faces = estimate.degenerate_faces;
    }
}

/// Unit normal of triangle (v0, v1, v2), or `None` for a zero-area face
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let cross = (v1 - v0).cross(v2 - v0);
    if cross.length_squared() <= DEGENERATE_EPSILON {
        return None;
    }
    cross.try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_grid_faces_up() {
        // Winding used by the heightfield: (x,z), (x,z+1), (x+1,z)
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let indices = [0, 2, 1, 1, 2, 3];
        let estimate = NormalEstimator::estimate_positions(&positions, &indices);
        for n in &estimate.normals {
            assert!((Vec3::from_array(*n) - Vec3::Y).length() < 1e-6);
        }
        assert_eq!(estimate.degenerate_faces, 0);
        assert_eq!(estimate.fallback_vertices, 0);
    }

    #[test]
    fn test_accumulation_is_unweighted() {
        // One tiny and one large face share vertex 0; the average ignores area
        let positions = [
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 0.01),
            Vec3::new(0.01, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
        ];
        // First face points +Y, second points +X
        let indices = [0, 1, 2, 0, 3, 4];
        let estimate = NormalEstimator::estimate_positions(&positions, &indices);
        let n = Vec3::from_array(estimate.normals[0]);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((n - expected).length() < 1e-5, "got {:?}", n);
    }

    #[test]
    fn test_degenerate_faces_fall_back_to_up() {
        let positions = [Vec3::ONE; 3];
        let indices = [0, 1, 2];
        let estimate = NormalEstimator::estimate_positions(&positions, &indices);
        assert_eq!(estimate.degenerate_faces, 1);
        assert_eq!(estimate.fallback_vertices, 3);
        assert!(estimate.normals.iter().all(|n| *n == UP));
    }

    #[test]
    fn test_unreferenced_vertex_gets_up() {
        let positions = [
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        let estimate = NormalEstimator::estimate_positions(&positions, &[0, 1, 2]);
        assert_eq!(estimate.normals[3], UP);
        assert_eq!(estimate.degenerate_faces, 0);
        assert_eq!(estimate.fallback_vertices, 1);
    }
}
