//! Spatial decomposition of source meshes into fragments.
//!
//! A source mesh is bucketed over a small 2D grid spanning its X/Y
//! bounding box: every triangle lands in the cell containing its
//! centroid, and each non-empty cell becomes one fragment.

use std::sync::Arc;

use cgmath::{Vector2, Vector3};
use log::debug;

use super::{Fragment, FragmentGeometry};
use crate::assets::MaterialRecord;
use crate::geometry::TriangleMesh;

/// Grid resolution used for tile decomposition.
pub const GRID_RESOLUTION: usize = 4;

/// Thickness assigned to every fragment's base pedestal.
const BASE_THICKNESS: f32 = 0.1;

#[derive(Default)]
struct CellBuffer {
    positions: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    uvs: Vec<Vector2<f32>>,
}

/// Decomposes a source mesh into per-cell fragments.
///
/// Triangles are bucketed by centroid into a `grid_resolution` square
/// grid over the mesh's X/Y bounding box (cell lookup clamped so
/// floating-point overflow at the far edge stays in bounds). Normals
/// and UVs are carried along per triangle when the source has them.
/// Saliency is each cell's Z extent normalized against the tallest
/// cell of this mesh; a mesh with no vertical extent gets all zeros.
///
/// A mesh with zero triangles produces no fragments. A degenerate
/// (zero-area) bounding box routes everything into a single cell.
pub fn decompose(
    mesh: &TriangleMesh,
    material: Arc<MaterialRecord>,
    grid_resolution: usize,
) -> Vec<Fragment> {
    if mesh.triangle_count() == 0 {
        return Vec::new();
    }

    let grid = grid_resolution.max(1);
    let bbox = mesh.bounding_box();
    let cell_w = (bbox.max.x - bbox.min.x) / grid as f32;
    let cell_h = (bbox.max.y - bbox.min.y) / grid as f32;

    let has_normals = mesh.has_normals();
    let has_uvs = mesh.has_uvs();

    let mut cells: Vec<CellBuffer> = (0..grid * grid).map(|_| CellBuffer::default()).collect();

    for triangle in mesh.triangles() {
        let p0 = mesh.positions[triangle[0] as usize];
        let p1 = mesh.positions[triangle[1] as usize];
        let p2 = mesh.positions[triangle[2] as usize];
        let centroid = (p0 + p1 + p2) / 3.0;

        let gx = cell_index(centroid.x - bbox.min.x, cell_w, grid);
        let gy = cell_index(centroid.y - bbox.min.y, cell_h, grid);
        let cell = &mut cells[gy * grid + gx];

        for &index in &triangle {
            let index = index as usize;
            cell.positions.push(mesh.positions[index]);
            if has_normals {
                cell.normals.push(mesh.normals[index]);
            }
            if has_uvs {
                cell.uvs.push(mesh.uvs[index]);
            }
        }
    }

    // Build geometry for the occupied cells and find the tallest one.
    let occupied: Vec<FragmentGeometry> = cells
        .into_iter()
        .filter(|cell| !cell.positions.is_empty())
        .map(|cell| FragmentGeometry {
            positions: cell.positions,
            normals: cell.normals,
            uvs: cell.uvs,
        })
        .collect();

    let max_height = occupied
        .iter()
        .map(|geometry| geometry.bounding_box().size().z)
        .fold(0.0_f32, f32::max);

    let fragments: Vec<Fragment> = occupied
        .into_iter()
        .map(|geometry| {
            let bbox = geometry.bounding_box();
            let center = bbox.center();
            let size = bbox.size();
            let saliency = if max_height > 0.0 {
                size.z / max_height
            } else {
                0.0
            };

            Fragment {
                geometry,
                material: material.clone(),
                saliency,
                base_center: Vector3::new(center.x, center.y, 0.0),
                base_size: Vector3::new(size.x, size.y, BASE_THICKNESS),
                fragment_center: center,
                rank: 0,
                ordered_center: None,
                adjacent_connections: Vec::new(),
            }
        })
        .collect();

    debug!(
        "decomposed {} triangles into {} fragments ({}x{} grid)",
        mesh.triangle_count(),
        fragments.len(),
        grid,
        grid
    );

    fragments
}

/// Locates the grid cell along one axis, absorbing degenerate extents
/// and floating-point edge overflow.
fn cell_index(distance: f32, cell_size: f32, grid: usize) -> usize {
    if cell_size <= 0.0 {
        return 0;
    }
    let index = (distance / cell_size).floor();
    (index.max(0.0) as usize).min(grid - 1)
}
