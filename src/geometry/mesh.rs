//! Indexed triangle meshes on the CPU.
//!
//! Source geometry arrives as flat attribute arrays (the shape OBJ
//! loaders produce) and is kept indexed until decomposition de-indexes
//! it into per-fragment triangle soup.

use cgmath::{InnerSpace, Vector2, Vector3};

use super::bounds::Aabb;

/// An indexed triangle mesh with optional normal and UV attributes.
///
/// Normals and UVs are either empty or exactly one entry per position;
/// mixed-length attribute arrays are rejected at construction.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    pub positions: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Builds a mesh from flat attribute arrays.
    ///
    /// # Arguments
    /// * `positions` - x/y/z triples, three floats per vertex
    /// * `normals` - x/y/z triples, empty when the source has none
    /// * `uvs` - u/v pairs, empty when the source has none
    /// * `indices` - triangle list, three indices per triangle
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, uvs: Vec<f32>, indices: Vec<u32>) -> Self {
        let vertex_count = positions.len() / 3;

        let positions: Vec<Vector3<f32>> = positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();

        // Attribute arrays that do not line up with positions are dropped
        // rather than propagated half-valid.
        let normals: Vec<Vector3<f32>> = if normals.len() == vertex_count * 3 {
            normals
                .chunks_exact(3)
                .map(|n| Vector3::new(n[0], n[1], n[2]))
                .collect()
        } else {
            Vec::new()
        };

        let uvs: Vec<Vector2<f32>> = if uvs.len() == vertex_count * 2 {
            uvs.chunks_exact(2)
                .map(|t| Vector2::new(t[0], t[1]))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Bounding box of all vertex positions.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Fills in smooth vertex normals from face normals when the source
    /// carried none.
    pub fn ensure_normals(&mut self) {
        if self.has_normals() || self.positions.is_empty() {
            return;
        }
        self.normals = compute_vertex_normals(&self.positions, &self.indices);
    }
}

/// Averages area-weighted face normals onto each referenced vertex.
pub fn compute_vertex_normals(positions: &[Vector3<f32>], indices: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); positions.len()];

    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let edge1 = positions[i1] - positions[i0];
        let edge2 = positions[i2] - positions[i0];
        let face_normal = edge1.cross(edge2);

        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in &mut normals {
        let length = normal.magnitude();
        if length > 0.0 {
            *normal /= length;
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_arrays_round_trip() {
        let mesh = TriangleMesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        );
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.has_normals());
        assert!(mesh.has_uvs());
        assert_eq!(mesh.positions[1], Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_mismatched_attributes_dropped() {
        let mesh = TriangleMesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.5, 0.5],
            vec![0, 1, 2],
        );
        assert!(!mesh.has_normals());
        assert!(!mesh.has_uvs());
    }

    #[test]
    fn test_computed_normals_point_up_for_ccw_ground_triangle() {
        let mut mesh = TriangleMesh::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            Vec::new(),
            Vec::new(),
            vec![0, 1, 2],
        );
        mesh.ensure_normals();
        assert!(mesh.has_normals());
        for normal in &mesh.normals {
            assert!((normal.z - 1.0).abs() < 1e-6);
        }
    }
}
