//! # Fragment Records
//!
//! The atomic unit of the visualization: a fragment owns a small piece
//! of surface geometry cut from a source mesh, plus the derived
//! statistics and mutable layout state the rest of the pipeline works
//! on. All fragments live in a single [`FragmentSet`] arena that is
//! kept in rank order once ranked.

pub mod fragmenter;
pub mod ranker;

use std::sync::Arc;

use cgmath::{Vector2, Vector3};

use crate::assets::MaterialRecord;
use crate::geometry::{Aabb, FragmentVertex};

/// A neighbor entry in a fragment's adjacency window.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacentConnection {
    /// The neighbor's current layout target (or base center when the
    /// neighbor has no target).
    pub position: Vector3<f32>,
    /// The neighbor's saliency, used as its extrusion height.
    pub height: f32,
}

/// Triangle-soup geometry owned exclusively by one fragment.
///
/// Three positions per triangle; normals and UVs are either empty or
/// parallel to positions.
#[derive(Debug, Clone)]
pub struct FragmentGeometry {
    pub positions: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Vector2<f32>>,
}

impl FragmentGeometry {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Interleaves the geometry into GPU-uploadable vertices, zeroing
    /// attributes the source did not carry.
    pub fn vertices(&self) -> Vec<FragmentVertex> {
        let has_normals = !self.normals.is_empty();
        let has_uvs = !self.uvs.is_empty();
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| FragmentVertex {
                position: [p.x, p.y, p.z],
                normal: if has_normals {
                    [self.normals[i].x, self.normals[i].y, self.normals[i].z]
                } else {
                    [0.0; 3]
                },
                uv: if has_uvs {
                    [self.uvs[i].x, self.uvs[i].y]
                } else {
                    [0.0; 2]
                },
            })
            .collect()
    }
}

/// One surface fragment and its layout state.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Owned sub-geometry, never shared between fragments.
    pub geometry: FragmentGeometry,
    /// Material shared with siblings cut from the same source sub-mesh.
    pub material: Arc<MaterialRecord>,
    /// Normalized height in [0, 1] relative to the tallest sibling.
    pub saliency: f32,
    /// Bounding-box center flattened to the ground plane (z = 0).
    pub base_center: Vector3<f32>,
    /// Footprint width/depth plus a fixed pedestal thickness.
    pub base_size: Vector3<f32>,
    /// Full 3D bounding-box center; the fragment pivots about it.
    pub fragment_center: Vector3<f32>,
    /// Position in the saliency-descending global order.
    pub rank: usize,
    /// Layout target for the current mode; `None` means "stay at the
    /// base center" (the Original layout and spiral overflow).
    pub ordered_center: Option<Vector3<f32>>,
    /// Rank-window neighbors for connecting-line rendering.
    pub adjacent_connections: Vec<AdjacentConnection>,
}

impl Fragment {
    /// The point this fragment should move toward under the current
    /// layout.
    pub fn target_center(&self) -> Vector3<f32> {
        self.ordered_center.unwrap_or(self.base_center)
    }
}

/// The single owned arena of all fragments.
///
/// After [`ranker::rank`] runs, the arena is stored in rank order so
/// `set[rank]` addresses the fragment with that rank directly.
#[derive(Default)]
pub struct FragmentSet {
    pub(crate) fragments: Vec<Fragment>,
}

impl FragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn extend(&mut self, fragments: impl IntoIterator<Item = Fragment>) {
        self.fragments.extend(fragments);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Fragment> {
        self.fragments.iter_mut()
    }

    /// Bounding box of every fragment's base center, recomputed fresh.
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_points(self.fragments.iter().map(|f| f.base_center))
    }

    /// Drops all layout targets (every fragment falls back to its base
    /// center until the next layout pass).
    pub fn clear_targets(&mut self) {
        for fragment in &mut self.fragments {
            fragment.ordered_center = None;
        }
    }
}

impl std::ops::Index<usize> for FragmentSet {
    type Output = Fragment;

    fn index(&self, index: usize) -> &Fragment {
        &self.fragments[index]
    }
}

impl std::ops::IndexMut<usize> for FragmentSet {
    fn index_mut(&mut self, index: usize) -> &mut Fragment {
        &mut self.fragments[index]
    }
}
