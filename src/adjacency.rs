//! # Adjacency Graph
//!
//! A fixed-window band graph over the rank order: each fragment links
//! to the fragments whose ranks fall within `window` of its own. Rank
//! adjacency stands in for "similar saliency" and is deliberately
//! independent of where the current layout placed anything; only the
//! stored endpoints track layout targets.

use crate::fragment::{AdjacentConnection, FragmentSet};

/// Rebuilds every fragment's adjacency window in place.
///
/// For rank `r` and every offset in `[-window, window]` except zero,
/// a valid neighbor rank contributes one connection holding the
/// neighbor's current target (base center when it has none) and its
/// saliency. Runs after ranking and layout, and again whenever the
/// window or any target changes.
pub fn build_adjacency(set: &mut FragmentSet, window: usize) {
    let n = set.len();
    let window = window as isize;

    let mut connections: Vec<Vec<AdjacentConnection>> = Vec::with_capacity(n);
    for rank in 0..n as isize {
        let mut entries = Vec::with_capacity(2 * window as usize);
        for offset in -window..=window {
            if offset == 0 {
                continue;
            }
            let neighbor = rank + offset;
            if neighbor < 0 || neighbor >= n as isize {
                continue;
            }
            let neighbor = &set[neighbor as usize];
            entries.push(AdjacentConnection {
                position: neighbor.target_center(),
                height: neighbor.saliency,
            });
        }
        connections.push(entries);
    }

    for (fragment, entries) in set.iter_mut().zip(connections) {
        fragment.adjacent_connections = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialRecord;
    use crate::fragment::{ranker, Fragment, FragmentGeometry};
    use cgmath::Vector3;
    use std::sync::Arc;

    fn ranked_set(n: usize) -> FragmentSet {
        let mut set = FragmentSet::new();
        for i in 0..n {
            set.push(Fragment {
                geometry: FragmentGeometry {
                    positions: Vec::new(),
                    normals: Vec::new(),
                    uvs: Vec::new(),
                },
                material: Arc::new(MaterialRecord::default()),
                saliency: (n - i) as f32 / n as f32,
                base_center: Vector3::new(i as f32, 0.0, 0.0),
                base_size: Vector3::new(1.0, 1.0, 0.1),
                fragment_center: Vector3::new(i as f32, 0.0, 0.5),
                rank: 0,
                ordered_center: None,
                adjacent_connections: Vec::new(),
            });
        }
        ranker::rank(&mut set);
        set
    }

    #[test]
    fn test_window_is_clipped_at_the_boundaries() {
        let n = 10;
        for window in 1..=5usize {
            let mut set = ranked_set(n);
            build_adjacency(&mut set, window);
            for (rank, fragment) in set.iter().enumerate() {
                let expected = window.min(rank) + window.min(n - 1 - rank);
                assert_eq!(
                    fragment.adjacent_connections.len(),
                    expected,
                    "rank {rank} window {window}"
                );
            }
        }
    }

    #[test]
    fn test_connections_use_targets_when_present() {
        let mut set = ranked_set(4);
        let moved = Vector3::new(100.0, 50.0, 0.0);
        set[1].ordered_center = Some(moved);
        build_adjacency(&mut set, 1);

        // Rank 0's only neighbor is rank 1, which has a layout target.
        assert_eq!(set[0].adjacent_connections[0].position, moved);
        // Rank 1's neighbors (ranks 0 and 2) have none and fall back.
        assert_eq!(
            set[1].adjacent_connections[0].position,
            set[0].base_center
        );
        assert_eq!(
            set[1].adjacent_connections[1].position,
            set[2].base_center
        );
    }

    #[test]
    fn test_connections_carry_neighbor_saliency() {
        let mut set = ranked_set(3);
        build_adjacency(&mut set, 2);
        let heights: Vec<f32> = set[0]
            .adjacent_connections
            .iter()
            .map(|c| c.height)
            .collect();
        assert_eq!(heights, vec![set[1].saliency, set[2].saliency]);
    }

    #[test]
    fn test_rebuild_replaces_stale_connections() {
        let mut set = ranked_set(6);
        build_adjacency(&mut set, 3);
        build_adjacency(&mut set, 1);
        assert_eq!(set[0].adjacent_connections.len(), 1);
        assert_eq!(set[3].adjacent_connections.len(), 2);
    }

    #[test]
    fn test_single_fragment_has_no_connections() {
        let mut set = ranked_set(1);
        build_adjacency(&mut set, 2);
        assert!(set[0].adjacent_connections.is_empty());
    }
}
