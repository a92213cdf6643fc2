//! # Layout Engine
//!
//! Maps the ranked fragment set onto a named target arrangement. Every
//! layout is a pure placement pass over the rank order: it reads the
//! world bounds of all base centers (recomputed fresh each call) and
//! writes one ground-plane target per fragment. Vertical extrusion is
//! applied later by the animation shell, never here.

pub mod letters;
pub mod modes;

use cgmath::Vector3;
use log::{debug, warn};

use crate::fragment::FragmentSet;
use crate::geometry::Aabb;
pub use letters::{GlyphBitmap, GlyphRasterizer, LetterParams, LetterStyle};

/// Cell count per axis of the shared world placement grid.
pub const WORLD_GRID_SIZE: usize = 12;

/// The available target arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Identity: every fragment stays at its base center.
    Original,
    /// 4x4 macro areas, each a 3x3 micro grid, in rank order.
    Grid,
    /// Square spiral walk from the center, tallest first.
    Spiral,
    /// The same spiral walk with the shortest fragment at the center.
    Hurricane,
    /// Left-to-right by rank along a three-period sine.
    Wave,
    /// Golden-angle spiral out from the world center.
    Radial,
    /// Five randomly scattered clusters, fragments dealt round-robin.
    Galaxy,
    /// Left-to-right by reversed rank along an exponential rise.
    Tsunami,
    /// Odd ranks gridded into the left half, even ranks into the right.
    Alternating,
    /// Centered grid with saliency-driven twist and outward push.
    Deconstruction,
    /// Bottom-to-top stem with sinusoidal branching.
    Metabolism,
    /// Three tiers: top edge line, quadrant block, spiral disk.
    Programmatic,
    /// Fragments form the glyphs of the active text.
    Letters,
}

impl LayoutMode {
    /// Every mode, in presentation order.
    pub const ALL: [LayoutMode; 13] = [
        LayoutMode::Original,
        LayoutMode::Grid,
        LayoutMode::Spiral,
        LayoutMode::Hurricane,
        LayoutMode::Wave,
        LayoutMode::Radial,
        LayoutMode::Galaxy,
        LayoutMode::Tsunami,
        LayoutMode::Alternating,
        LayoutMode::Deconstruction,
        LayoutMode::Metabolism,
        LayoutMode::Programmatic,
        LayoutMode::Letters,
    ];

    /// Display name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Original => "Original",
            LayoutMode::Grid => "Grid",
            LayoutMode::Spiral => "Spiral",
            LayoutMode::Hurricane => "Hurricane",
            LayoutMode::Wave => "Wave",
            LayoutMode::Radial => "Radial",
            LayoutMode::Galaxy => "Galaxy",
            LayoutMode::Tsunami => "Tsunami",
            LayoutMode::Alternating => "Alternating",
            LayoutMode::Deconstruction => "Deconstruction",
            LayoutMode::Metabolism => "Metabolism",
            LayoutMode::Programmatic => "Programmatic",
            LayoutMode::Letters => "Letters",
        }
    }

    /// Resolves a mode by name; unrecognized names fall back to
    /// `Original` rather than failing.
    pub fn parse(name: &str) -> LayoutMode {
        for mode in LayoutMode::ALL {
            if mode.name().eq_ignore_ascii_case(name) {
                return mode;
            }
        }
        warn!("unknown layout mode {name:?}, falling back to Original");
        LayoutMode::Original
    }
}

/// Parameters shared by every layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub letters: LetterParams,
    /// Seed for all randomized placement (cluster scatter, glyph point
    /// shuffling, jitter). Same seed, same output.
    pub seed: u64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            letters: LetterParams::default(),
            seed: 0,
        }
    }
}

/// The shared 12x12 placement grid spanning the world bounds.
pub(crate) struct WorldGrid {
    min: Vector3<f32>,
    cell_w: f32,
    cell_h: f32,
}

impl WorldGrid {
    pub(crate) fn new(bounds: &Aabb) -> Self {
        let size = bounds.size();
        Self {
            min: bounds.min,
            cell_w: size.x / WORLD_GRID_SIZE as f32,
            cell_h: size.y / WORLD_GRID_SIZE as f32,
        }
    }

    /// World-space center of grid cell (gx, gy) on the ground plane.
    pub(crate) fn cell_center(&self, gx: i32, gy: i32) -> Vector3<f32> {
        Vector3::new(
            self.min.x + gx as f32 * self.cell_w + self.cell_w / 2.0,
            self.min.y + gy as f32 * self.cell_h + self.cell_h / 2.0,
            0.0,
        )
    }

    pub(crate) fn cell_width(&self) -> f32 {
        self.cell_w
    }
}

/// Writes every fragment's layout target in place.
///
/// The set must already be ranked (arena in rank order). All previous
/// targets are cleared first so a layout switch never leaks stale
/// positions; `Original` then simply leaves every target unset and
/// consumers fall back to base centers.
pub fn compute_targets(
    set: &mut FragmentSet,
    mode: LayoutMode,
    params: &LayoutParams,
    rasterizer: Option<&dyn GlyphRasterizer>,
) {
    if set.is_empty() {
        return;
    }

    set.clear_targets();
    let bounds = set.world_bounds();
    let grid = WorldGrid::new(&bounds);

    match mode {
        LayoutMode::Original => {}
        LayoutMode::Grid => modes::grid(set, &grid),
        LayoutMode::Spiral => modes::spiral(set, &grid, false),
        LayoutMode::Hurricane => modes::spiral(set, &grid, true),
        LayoutMode::Wave => modes::wave(set, &bounds),
        LayoutMode::Radial => modes::radial(set, &bounds),
        LayoutMode::Galaxy => modes::galaxy(set, &bounds, params.seed),
        LayoutMode::Tsunami => modes::tsunami(set, &bounds),
        LayoutMode::Alternating => modes::alternating(set, &bounds),
        LayoutMode::Deconstruction => modes::deconstruction(set, &bounds),
        LayoutMode::Metabolism => modes::metabolism(set, &bounds),
        LayoutMode::Programmatic => modes::programmatic(set, &bounds),
        LayoutMode::Letters => letters::apply(
            set,
            &bounds,
            grid.cell_width(),
            &params.letters,
            params.seed,
            rasterizer,
        ),
    }

    debug!("layout {} over {} fragments", mode.name(), set.len());
}

/// Rank progress in [0, 1], safe for sets of one.
pub(crate) fn progress(index: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{ranker, Fragment, FragmentGeometry};
    use crate::assets::MaterialRecord;
    use std::sync::Arc;

    /// Builds a ranked set of `n` fragments with distinct descending
    /// saliencies and base centers spread over a 4-wide strip.
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
                base_center: cgmath::Vector3::new((i % 4) as f32, (i / 4) as f32, 0.0),
                base_size: cgmath::Vector3::new(1.0, 1.0, 0.1),
                fragment_center: cgmath::Vector3::new((i % 4) as f32, (i / 4) as f32, 0.5),
                rank: 0,
                ordered_center: None,
                adjacent_connections: Vec::new(),
            });
        }
        ranker::rank(&mut set);
        set
    }

    fn targets(set: &FragmentSet) -> Vec<Option<cgmath::Vector3<f32>>> {
        set.iter().map(|f| f.ordered_center).collect()
    }

    #[test]
    fn test_parse_known_and_unknown_names() {
        assert_eq!(LayoutMode::parse("Wave"), LayoutMode::Wave);
        assert_eq!(LayoutMode::parse("hurricane"), LayoutMode::Hurricane);
        assert_eq!(LayoutMode::parse("Cubist"), LayoutMode::Original);
    }

    #[test]
    fn test_original_leaves_targets_unset() {
        let mut set = ranked_set(9);
        compute_targets(&mut set, LayoutMode::Original, &LayoutParams::default(), None);
        for fragment in set.iter() {
            assert!(fragment.ordered_center.is_none());
            assert_eq!(fragment.target_center(), fragment.base_center);
        }
    }

    #[test]
    fn test_layout_switch_clears_stale_targets() {
        let mut set = ranked_set(9);
        compute_targets(&mut set, LayoutMode::Grid, &LayoutParams::default(), None);
        assert!(set.iter().all(|f| f.ordered_center.is_some()));

        compute_targets(&mut set, LayoutMode::Original, &LayoutParams::default(), None);
        assert!(set.iter().all(|f| f.ordered_center.is_none()));
    }

    #[test]
    fn test_no_layout_produces_non_finite_targets() {
        let params = LayoutParams::default();
        for mode in LayoutMode::ALL {
            for n in [1, 2, 3, 16, 40] {
                let mut set = ranked_set(n);
                compute_targets(&mut set, mode, &params, None);
                for fragment in set.iter() {
                    if let Some(target) = fragment.ordered_center {
                        assert!(
                            target.x.is_finite() && target.y.is_finite() && target.z.is_finite(),
                            "{} produced a non-finite target for n={n}",
                            mode.name()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic_recompute() {
        let params = LayoutParams::default();
        for mode in LayoutMode::ALL {
            let mut set = ranked_set(24);
            compute_targets(&mut set, mode, &params, None);
            let first = targets(&set);
            compute_targets(&mut set, mode, &params, None);
            assert_eq!(first, targets(&set), "{} not idempotent", mode.name());
        }
    }

    #[test]
    fn test_grid_sixteen_fragments_one_per_area() {
        let mut set = ranked_set(16);
        compute_targets(&mut set, LayoutMode::Grid, &LayoutParams::default(), None);

        let bounds = set.world_bounds();
        let grid = WorldGrid::new(&bounds);

        let mut seen = std::collections::HashSet::new();
        for (rank, fragment) in set.iter().enumerate() {
            // One fragment per macro area: rank maps straight to a
            // distinct (area_x, area_y) with local index 0.
            let (area_x, area_y) = (rank % 4, rank / 4);
            assert!(seen.insert((area_x, area_y)));
            let expected = grid.cell_center(area_x as i32 * 3, area_y as i32 * 3);
            let target = fragment.ordered_center.unwrap();
            assert!((target.x - expected.x).abs() < 1e-5);
            assert!((target.y - expected.y).abs() < 1e-5);
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_wave_three_fragments_span_the_width() {
        // World bounds 9 wide, 3 tall.
        let mut set = FragmentSet::new();
        for (i, (x, y)) in [(0.0, 0.0), (4.5, 1.5), (9.0, 3.0)].iter().enumerate() {
            let mut f = ranked_set(1)[0].clone();
            f.saliency = 1.0 - i as f32 * 0.4;
            f.base_center = cgmath::Vector3::new(*x, *y, 0.0);
            set.push(f);
        }
        ranker::rank(&mut set);
        compute_targets(&mut set, LayoutMode::Wave, &LayoutParams::default(), None);

        let xs: Vec<f32> = set
            .iter()
            .map(|f| f.ordered_center.unwrap().x)
            .collect();
        assert!((xs[0] - 0.0).abs() < 1e-5);
        assert!((xs[1] - 4.5).abs() < 1e-5);
        assert!((xs[2] - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_galaxy_points_stay_in_envelope() {
        let mut set = ranked_set(40);
        let params = LayoutParams {
            seed: 7,
            ..Default::default()
        };
        compute_targets(&mut set, LayoutMode::Galaxy, &params, None);

        let bounds = set.world_bounds();
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(params.seed);
        let centers = modes::scatter_clusters(&bounds, &mut rng);
        let radius = bounds.size().x / 10.0;

        for fragment in set.iter() {
            let target = fragment.ordered_center.unwrap();
            let within = centers.iter().any(|c| {
                let dx = target.x - c.x;
                let dy = target.y - c.y;
                (dx * dx + dy * dy).sqrt() <= radius + 1e-4
            });
            assert!(within, "galaxy point escaped every cluster");
        }
    }

    #[test]
    fn test_galaxy_seed_controls_scatter() {
        let mut a = ranked_set(20);
        let mut b = ranked_set(20);
        let mut c = ranked_set(20);

        let params_a = LayoutParams { seed: 1, ..Default::default() };
        let params_c = LayoutParams { seed: 2, ..Default::default() };
        compute_targets(&mut a, LayoutMode::Galaxy, &params_a, None);
        compute_targets(&mut b, LayoutMode::Galaxy, &params_a, None);
        compute_targets(&mut c, LayoutMode::Galaxy, &params_c, None);

        assert_eq!(targets(&a), targets(&b));
        assert_ne!(targets(&a), targets(&c));
    }

    #[test]
    fn test_empty_set_is_a_no_op() {
        let mut set = FragmentSet::new();
        compute_targets(&mut set, LayoutMode::Grid, &LayoutParams::default(), None);
        assert!(set.is_empty());
    }
}
