//! # Animation Shell
//!
//! Per-fragment motion between layouts. Each fragment carries an
//! explicit state machine (at rest or transitioning) whose ground-plane
//! position is a damped spring chasing the current layout target;
//! vertical extrusion tracks the explosion factor directly with no
//! damping. Integration runs on a fixed timestep so results do not
//! depend on frame pacing.
//!
//! The driving render loop calls [`Animator::advance`] once per display
//! frame and reads back [`FragmentFrame`] values; recomputation of the
//! targets themselves always completes before the next advance.

pub mod spring;

use cgmath::Vector3;

use crate::fragment::FragmentSet;
pub use spring::{Spring, SpringConfig};

/// Integration step, in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 120.0;

/// Whether a fragment is moving toward a new target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    AtRest,
    Transitioning,
}

/// Spring state for one fragment's ground-plane position.
#[derive(Debug, Clone)]
struct FragmentMotion {
    x: Spring,
    y: Spring,
    state: MotionState,
}

impl FragmentMotion {
    fn settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }
}

/// Everything a renderer needs to draw one fragment this frame.
#[derive(Debug, Clone)]
pub struct FragmentFrame {
    /// Ground-plane translation of the fragment's group.
    pub position: Vector3<f32>,
    /// Local offset that re-centers the sub-mesh on its own pivot.
    pub pivot_offset: Vector3<f32>,
    /// Vertical lift of the mesh within its group.
    pub mesh_lift: f32,
    /// Endpoints of the vertical extrusion line, in group space.
    pub extrusion_line: [Vector3<f32>; 2],
    /// World-space endpoints of each adjacency connecting line.
    pub adjacency_lines: Vec<[Vector3<f32>; 2]>,
    /// Current motion state, for renderers that batch static geometry.
    pub state: MotionState,
}

/// Drives all fragment motions with one shared spring configuration.
pub struct Animator {
    motions: Vec<FragmentMotion>,
    config: SpringConfig,
    accumulator: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}

impl Animator {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            motions: Vec::new(),
            config,
            accumulator: 0.0,
        }
    }

    pub fn spring_config(&self) -> SpringConfig {
        self.config
    }

    pub fn set_spring_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Rebuilds motion state for the given set, everything at rest on
    /// its base center. Call after the fragment set changes.
    pub fn sync(&mut self, set: &FragmentSet) {
        self.motions = set
            .iter()
            .map(|fragment| FragmentMotion {
                x: Spring::at(fragment.base_center.x),
                y: Spring::at(fragment.base_center.y),
                state: MotionState::AtRest,
            })
            .collect();
        self.accumulator = 0.0;
    }

    /// Points every motion at its fragment's current target.
    ///
    /// Fragments already on target stay at rest; the rest re-enter the
    /// transitioning state from wherever they are now.
    pub fn retarget(&mut self, set: &FragmentSet) {
        if self.motions.len() != set.len() {
            self.sync(set);
        }
        for (motion, fragment) in self.motions.iter_mut().zip(set.iter()) {
            let target = fragment.target_center();
            motion.x.set_target(target.x);
            motion.y.set_target(target.y);
            motion.state = if motion.settled() {
                MotionState::AtRest
            } else {
                MotionState::Transitioning
            };
        }
    }

    /// Integrates elapsed time in fixed steps.
    pub fn advance(&mut self, dt: f32) {
        self.accumulator += dt.max(0.0);
        while self.accumulator >= FIXED_TIMESTEP {
            self.accumulator -= FIXED_TIMESTEP;
            for motion in &mut self.motions {
                if motion.state == MotionState::AtRest {
                    continue;
                }
                motion.x.step(&self.config, FIXED_TIMESTEP);
                motion.y.step(&self.config, FIXED_TIMESTEP);
                if motion.settled() {
                    motion.x.snap();
                    motion.y.snap();
                    motion.state = MotionState::AtRest;
                }
            }
        }
    }

    pub fn all_at_rest(&self) -> bool {
        self.motions.iter().all(|m| m.state == MotionState::AtRest)
    }

    /// Builds this frame's render state for every fragment.
    ///
    /// Pure read: positions come from the springs, extrusion from
    /// `saliency * explosion` applied directly, and adjacency line ends
    /// from the precomputed connections.
    pub fn frame(&self, set: &FragmentSet, explosion: f32) -> Vec<FragmentFrame> {
        debug_assert_eq!(self.motions.len(), set.len());
        self.motions
            .iter()
            .zip(set.iter())
            .map(|(motion, fragment)| {
                let lift = fragment.saliency * explosion;
                let position = Vector3::new(motion.x.value(), motion.y.value(), 0.0);

                let adjacency_lines = fragment
                    .adjacent_connections
                    .iter()
                    .map(|connection| {
                        [
                            Vector3::new(position.x, position.y, -lift),
                            Vector3::new(
                                connection.position.x,
                                connection.position.y,
                                -connection.height * explosion,
                            ),
                        ]
                    })
                    .collect();

                FragmentFrame {
                    position,
                    pivot_offset: -fragment.fragment_center,
                    mesh_lift: lift,
                    extrusion_line: [
                        Vector3::new(0.0, 0.0, -lift),
                        Vector3::new(0.0, 0.0, lift),
                    ],
                    adjacency_lines,
                    state: motion.state,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_adjacency;
    use crate::assets::MaterialRecord;
    use crate::fragment::{ranker, Fragment, FragmentGeometry};
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
                base_center: Vector3::new(i as f32 * 2.0, 0.0, 0.0),
                base_size: Vector3::new(1.0, 1.0, 0.1),
                fragment_center: Vector3::new(i as f32 * 2.0, 0.0, 0.5),
                rank: 0,
                ordered_center: None,
                adjacent_connections: Vec::new(),
            });
        }
        ranker::rank(&mut set);
        set
    }

    #[test]
    fn test_fragments_converge_on_their_targets() {
        let mut set = ranked_set(3);
        for fragment in set.iter_mut() {
            fragment.ordered_center = Some(fragment.base_center + Vector3::new(5.0, -3.0, 0.0));
        }

        let mut animator = Animator::default();
        animator.sync(&set);
        animator.retarget(&set);
        assert!(!animator.all_at_rest());

        animator.advance(20.0);
        assert!(animator.all_at_rest());

        let frames = animator.frame(&set, 0.0);
        for (frame, fragment) in frames.iter().zip(set.iter()) {
            let target = fragment.target_center();
            assert!((frame.position.x - target.x).abs() < 1e-2);
            assert!((frame.position.y - target.y).abs() < 1e-2);
        }
    }

    #[test]
    fn test_retarget_mid_flight_is_continuous() {
        let mut set = ranked_set(1);
        set[0].ordered_center = Some(Vector3::new(10.0, 0.0, 0.0));

        let mut animator = Animator::default();
        animator.sync(&set);
        animator.retarget(&set);
        animator.advance(0.1);

        let before = animator.frame(&set, 0.0)[0].position;
        set[0].ordered_center = Some(Vector3::new(-10.0, 4.0, 0.0));
        animator.retarget(&set);
        let after = animator.frame(&set, 0.0)[0].position;

        assert_eq!(before, after);
        assert!(!animator.all_at_rest());
    }

    #[test]
    fn test_extrusion_tracks_explosion_without_damping() {
        let set = ranked_set(2);
        let mut animator = Animator::default();
        animator.sync(&set);

        // No advance needed: the factor applies immediately.
        let frames = animator.frame(&set, 100.0);
        assert!((frames[0].mesh_lift - set[0].saliency * 100.0).abs() < 1e-5);
        assert_eq!(frames[0].extrusion_line[0].z, -frames[0].mesh_lift);
        assert_eq!(frames[0].extrusion_line[1].z, frames[0].mesh_lift);

        let frames = animator.frame(&set, 250.0);
        assert!((frames[1].mesh_lift - set[1].saliency * 250.0).abs() < 1e-5);
    }

    #[test]
    fn test_adjacency_lines_drop_below_the_ground_plane() {
        let mut set = ranked_set(3);
        build_adjacency(&mut set, 1);

        let mut animator = Animator::default();
        animator.sync(&set);

        let frames = animator.frame(&set, 10.0);
        let line = frames[0].adjacency_lines[0];
        // Own end hangs at -saliency * factor, neighbor end likewise.
        assert!((line[0].z + set[0].saliency * 10.0).abs() < 1e-5);
        assert!((line[1].z + set[1].saliency * 10.0).abs() < 1e-5);
        assert_eq!(line[1].x, set[1].base_center.x);
    }

    #[test]
    fn test_pivot_offset_recenters_the_mesh() {
        let set = ranked_set(1);
        let mut animator = Animator::default();
        animator.sync(&set);
        let frames = animator.frame(&set, 0.0);
        assert_eq!(frames[0].pivot_offset, -set[0].fragment_center);
    }
}
