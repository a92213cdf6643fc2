//! Geometric placement passes.
//!
//! Each function writes `ordered_center` for every fragment it places;
//! fragments a pass never reaches (the spiral window) keep an unset
//! target and fall back to their base center.

use std::f32::consts::{E, PI};

use cgmath::{InnerSpace, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{progress, WorldGrid, WORLD_GRID_SIZE};
use crate::fragment::FragmentSet;
use crate::geometry::Aabb;

/// Cluster count for the galaxy scatter.
const GALAXY_CLUSTERS: usize = 5;

/// 4x4 macro areas in rank order, each filled on a 3x3 micro grid.
pub(crate) fn grid(set: &mut FragmentSet, grid: &WorldGrid) {
    let n = set.len();
    let per_area = n.div_ceil(16);

    for rank in 0..n {
        let area = rank / per_area;
        let in_area = rank % per_area;
        let area_x = (area % 4) as i32;
        let area_y = (area / 4) as i32;
        let sub_x = (in_area % 3) as i32;
        let sub_y = (in_area / 3) as i32;
        set[rank].ordered_center = Some(grid.cell_center(area_x * 3 + sub_x, area_y * 3 + sub_y));
    }
}

/// Square-spiral walk out from the grid center.
///
/// Steps that leave the 12x12 window still consume a fragment but
/// assign nothing, so overflow fragments stay at their base centers.
/// With `reversed` the walk hands cells to the lowest rank first.
pub(crate) fn spiral(set: &mut FragmentSet, grid: &WorldGrid, reversed: bool) {
    let n = set.len() as i64;
    let half = (WORLD_GRID_SIZE / 2) as i64;

    let (mut x, mut y) = (0i64, 0i64);
    let (mut dx, mut dy) = (0i64, -1i64);

    for i in 0..n {
        if -half < x && x <= half && -half < y && y <= half {
            let index = if reversed { n - 1 - i } else { i } as usize;
            set[index].ordered_center =
                Some(grid.cell_center((x + half) as i32, (y + half) as i32));
        }
        if x == y || (x < 0 && x == -y) || (x > 0 && x == 1 - y) {
            let turn = dx;
            dx = -dy;
            dy = turn;
        }
        x += dx;
        y += dy;
    }
}

/// Left-to-right by rank along a three-period sine.
pub(crate) fn wave(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let amplitude = size.y / 3.0;
    let frequency = 3.0;

    for rank in 0..n {
        let p = progress(rank, n);
        set[rank].ordered_center = Some(Vector3::new(
            bounds.min.x + p * size.x,
            bounds.min.y + size.y / 2.0 + amplitude * (p * frequency * 2.0 * PI).sin(),
            0.0,
        ));
    }
}

/// Golden-angle spiral out from the world center.
pub(crate) fn radial(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let center = bounds.center();
    let max_radius = size.x.min(size.y) / 2.0;
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());

    for rank in 0..n {
        let radius = progress(rank, n) * max_radius;
        let angle = rank as f32 * golden_angle;
        set[rank].ordered_center = Some(Vector3::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
            0.0,
        ));
    }
}

/// Scatters the galaxy cluster centers uniformly over the bounds.
///
/// The scatter draws come first on the seeded stream, so reseeding
/// with the same seed reproduces the centers independently of the
/// per-fragment draws that follow.
pub(crate) fn scatter_clusters(bounds: &Aabb, rng: &mut StdRng) -> Vec<Vector3<f32>> {
    let size = bounds.size();
    (0..GALAXY_CLUSTERS)
        .map(|_| {
            Vector3::new(
                bounds.min.x + rng.random::<f32>() * size.x,
                bounds.min.y + rng.random::<f32>() * size.y,
                0.0,
            )
        })
        .collect()
}

/// Five random clusters, fragments dealt round-robin by rank.
pub(crate) fn galaxy(set: &mut FragmentSet, bounds: &Aabb, seed: u64) {
    let n = set.len();
    let size = bounds.size();
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = scatter_clusters(bounds, &mut rng);
    let cluster_radius = size.x / (GALAXY_CLUSTERS as f32 * 2.0);

    for (cluster, center) in centers.iter().enumerate() {
        let mut rank = cluster;
        while rank < n {
            let angle = rng.random::<f32>() * 2.0 * PI;
            let radius = rng.random::<f32>() * cluster_radius;
            set[rank].ordered_center = Some(Vector3::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
                0.0,
            ));
            rank += GALAXY_CLUSTERS;
        }
    }
}

/// Reversed rank order left to right, height rising exponentially.
pub(crate) fn tsunami(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let scale = size.y / (E - 1.0);

    for i in 0..n {
        let p = progress(i, n);
        set[n - 1 - i].ordered_center = Some(Vector3::new(
            bounds.min.x + p * size.x,
            bounds.min.y + (p.exp() - 1.0) * scale,
            0.0,
        ));
    }
}

/// Odd ranks fill the left half, even ranks the right, each as a
/// square grid.
pub(crate) fn alternating(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let half_width = size.x / 2.0;

    let odd: Vec<usize> = (0..n).filter(|r| r % 2 != 0).collect();
    let even: Vec<usize> = (0..n).filter(|r| r % 2 == 0).collect();

    let left = Aabb::new(
        bounds.min,
        Vector3::new(bounds.min.x + half_width, bounds.max.y, 0.0),
    );
    let right = Aabb::new(
        Vector3::new(bounds.min.x + half_width, bounds.min.y, 0.0),
        bounds.max,
    );

    fill_square_grid(set, &odd, &left);
    fill_square_grid(set, &even, &right);
}

fn fill_square_grid(set: &mut FragmentSet, ranks: &[usize], bbox: &Aabb) {
    if ranks.is_empty() {
        return;
    }
    let size = bbox.size();
    let dim = (ranks.len() as f32).sqrt().ceil() as usize;
    let cell_w = size.x / dim as f32;
    let cell_h = size.y / dim as f32;

    for (i, &rank) in ranks.iter().enumerate() {
        let gx = (i % dim) as f32;
        let gy = (i / dim) as f32;
        set[rank].ordered_center = Some(Vector3::new(
            bbox.min.x + gx * cell_w + cell_w / 2.0,
            bbox.min.y + gy * cell_h + cell_h / 2.0,
            0.0,
        ));
    }
}

/// Centered grid, each offset twisted by saliency and pushed outward.
pub(crate) fn deconstruction(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let center = bounds.center();
    let dim = (n as f32).sqrt().ceil() as usize;
    let dim_f = dim as f32;

    for rank in 0..n {
        let gx = (rank % dim) as f32 - (dim_f - 1.0) / 2.0;
        let gy = (rank / dim) as f32 - (dim_f - 1.0) / 2.0;
        let mut pos = Vector3::new(gx * (size.x / dim_f), gy * (size.y / dim_f), 0.0);

        let saliency = set[rank].saliency;
        let angle = saliency * PI / 4.0;
        let (sin, cos) = angle.sin_cos();
        pos = Vector3::new(pos.x * cos - pos.y * sin, pos.x * sin + pos.y * cos, 0.0);

        let length = pos.magnitude();
        if length > 0.0 {
            pos += (pos / length) * (saliency * 50.0);
        }

        set[rank].ordered_center = Some(Vector3::new(center.x + pos.x, center.y + pos.y, 0.0));
    }
}

/// Bottom-to-top stem with sinusoidal branching and parity offset.
pub(crate) fn metabolism(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let center_x = bounds.min.x + size.x / 2.0;
    let branch_width = size.x / 4.0;

    for rank in 0..n {
        let p = progress(rank, n);
        let bias = if rank % 2 == 0 {
            -branch_width / 2.0
        } else {
            branch_width / 2.0
        };
        let offset = (p * PI * 4.0).sin() * branch_width + bias;
        set[rank].ordered_center = Some(Vector3::new(
            center_x + offset,
            bounds.min.y + p * size.y,
            0.0,
        ));
    }
}

/// Three tiers by rank: a skyline along the top edge, a packed block
/// in the bottom-left quadrant, and a spiral disk bottom-right.
pub(crate) fn programmatic(set: &mut FragmentSet, bounds: &Aabb) {
    let n = set.len();
    let size = bounds.size();
    let top_count = (n as f32 * 0.2).floor() as usize;
    let mid_count = (n as f32 * 0.4).floor() as usize;
    let low_count = n - top_count - mid_count;

    // Tallest tier strung along the top edge.
    for i in 0..top_count {
        let t = progress(i, top_count);
        set[i].ordered_center = Some(Vector3::new(
            bounds.min.x + t * size.x,
            bounds.max.y,
            0.0,
        ));
    }

    // Middle tier packed into the bottom-left quadrant.
    if mid_count > 0 {
        let dim = (mid_count as f32).sqrt().ceil() as usize;
        let cell_w = (size.x / 2.0) / dim as f32;
        let cell_h = (size.y / 2.0) / dim as f32;
        for i in 0..mid_count {
            let gx = (i % dim) as f32;
            let gy = (i / dim) as f32;
            set[top_count + i].ordered_center = Some(Vector3::new(
                bounds.min.x + gx * cell_w,
                bounds.min.y + gy * cell_h,
                0.0,
            ));
        }
    }

    // Shortest tier on an area-preserving disk bottom-right.
    let disk_center = Vector3::new(
        bounds.max.x - size.x / 4.0,
        bounds.min.y + size.y / 4.0,
        0.0,
    );
    let disk_radius = size.x / 5.0;
    for i in 0..low_count {
        let t = i as f32 / low_count as f32;
        let angle = t * 2.0 * PI;
        let radius = t.sqrt() * disk_radius;
        set[top_count + mid_count + i].ordered_center = Some(Vector3::new(
            disk_center.x + angle.cos() * radius,
            disk_center.y + angle.sin() * radius,
            0.0,
        ));
    }
}
