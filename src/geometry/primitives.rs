//! # Procedural Tile Geometry
//!
//! Generates city-block tile meshes procedurally so demos and tests can
//! run without model assets. Blocks are extruded along +Z (the model
//! up-axis) with deterministic pseudo-varying heights.

use super::mesh::TriangleMesh;

/// Generates an axis-aligned block from z=0 up to z=height.
///
/// Returns a mesh with 24 vertices (4 per face) carrying outward
/// normals and per-face UVs, matching the layout a triangulated OBJ
/// export would produce.
pub fn generate_block(min_x: f32, min_y: f32, width: f32, depth: f32, height: f32) -> TriangleMesh {
    let (x0, y0, z0) = (min_x, min_y, 0.0);
    let (x1, y1, z1) = (min_x + width, min_y + depth, height);

    // Four corners per face, counter-clockwise seen from outside.
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z (roof)
        (
            [0.0, 0.0, 1.0],
            [[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]],
        ),
        // -Z (ground)
        (
            [0.0, 0.0, -1.0],
            [[x0, y1, z0], [x1, y1, z0], [x1, y0, z0], [x0, y0, z0]],
        ),
        // +X
        (
            [1.0, 0.0, 0.0],
            [[x1, y0, z0], [x1, y1, z0], [x1, y1, z1], [x1, y0, z1]],
        ),
        // -X
        (
            [-1.0, 0.0, 0.0],
            [[x0, y1, z0], [x0, y0, z0], [x0, y0, z1], [x0, y1, z1]],
        ),
        // +Y
        (
            [0.0, 1.0, 0.0],
            [[x1, y1, z0], [x0, y1, z0], [x0, y1, z1], [x1, y1, z1]],
        ),
        // -Y
        (
            [0.0, -1.0, 0.0],
            [[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]],
        ),
    ];

    let mut positions = Vec::with_capacity(24 * 3);
    let mut normals = Vec::with_capacity(24 * 3);
    let mut uvs = Vec::with_capacity(24 * 2);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in &faces {
        let base = (positions.len() / 3) as u32;
        for (i, corner) in corners.iter().enumerate() {
            positions.extend_from_slice(corner);
            normals.extend_from_slice(normal);
            let (u, v) = match i {
                0 => (0.0, 0.0),
                1 => (1.0, 0.0),
                2 => (1.0, 1.0),
                _ => (0.0, 1.0),
            };
            uvs.push(u);
            uvs.push(v);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    TriangleMesh::new(positions, normals, uvs, indices)
}

/// Generates a city tile: a `blocks_x` by `blocks_y` arrangement of
/// extruded blocks with deterministic pseudo-varying heights.
///
/// The same arguments always produce the same mesh, so tests can rely
/// on exact fragment counts and heights.
pub fn generate_city_tile(
    blocks_x: usize,
    blocks_y: usize,
    block_size: f32,
    max_height: f32,
) -> TriangleMesh {
    let gap = block_size * 0.25;
    let pitch = block_size + gap;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..blocks_y {
        for ix in 0..blocks_x {
            let height = max_height * block_height_factor(ix, iy);
            let block = generate_block(
                ix as f32 * pitch,
                iy as f32 * pitch,
                block_size,
                block_size,
                height,
            );

            let base = (positions.len() / 3) as u32;
            for p in &block.positions {
                positions.extend_from_slice(&[p.x, p.y, p.z]);
            }
            for n in &block.normals {
                normals.extend_from_slice(&[n.x, n.y, n.z]);
            }
            for t in &block.uvs {
                uvs.extend_from_slice(&[t.x, t.y]);
            }
            indices.extend(block.indices.iter().map(|i| i + base));
        }
    }

    TriangleMesh::new(positions, normals, uvs, indices)
}

/// Deterministic height factor in (0, 1], varying per block cell.
fn block_height_factor(ix: usize, iy: usize) -> f32 {
    let v = (ix as f32 * 12.9898 + iy as f32 * 78.233).sin() * 43758.547;
    let f = v.fract().abs();
    0.1 + 0.9 * f
}
