//! # Typographic Layout
//!
//! Forms the active text out of fragments: the ranked set is split
//! into one contiguous run per letter and each run is placed onto its
//! glyph, either along a hand-authored stroke path or across a
//! rasterized glyph point cloud supplied by a collaborator.

pub mod raster;
pub mod strokes;

use cgmath::{Vector2, Vector3};
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use raster::{GlyphBitmap, GlyphRasterizer};

use crate::fragment::FragmentSet;
use crate::geometry::Aabb;

/// How a letter's fragment run is placed onto its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterStyle {
    /// String fragments along the glyph's stroke path.
    Stroke,
    /// Scatter fragments over a rasterized glyph's interior.
    Raster,
}

/// Typography parameters for the letters layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterParams {
    /// The text to form. Only A-Z survives filtering.
    pub text: String,
    pub style: LetterStyle,
    /// Multiplies the world bounds into the per-letter box size.
    pub scale: f32,
    /// Extra width multiplier on the letter box.
    pub aspect: f32,
    /// Inter-letter gap as a fraction of the scaled letter width
    /// (negative values overlap letters).
    pub spacing: f32,
    /// Raster scatter jitter as a fraction of one world grid cell.
    pub jitter: f32,
}

impl Default for LetterParams {
    fn default() -> Self {
        Self {
            text: "LG".to_string(),
            style: LetterStyle::Stroke,
            scale: 1.0,
            aspect: 1.0,
            spacing: 0.1,
            jitter: 0.5,
        }
    }
}

/// Uppercases `text` and drops everything outside A-Z.
pub fn filter_letters(text: &str) -> String {
    text.chars()
        .flat_map(|c| c.to_uppercase())
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Places every fragment onto the active text.
///
/// Letters sit side by side, centered as a group on the world bounds;
/// each gets a near-equal share of fragments with the remainder going
/// to the first letters. A letter with no usable outline leaves its
/// run unset (base-center fallback).
pub(crate) fn apply(
    set: &mut FragmentSet,
    bounds: &Aabb,
    cell_width: f32,
    params: &LetterParams,
    seed: u64,
    rasterizer: Option<&dyn GlyphRasterizer>,
) {
    let letters: Vec<char> = filter_letters(&params.text).chars().collect();
    if letters.is_empty() {
        return;
    }

    let n = set.len();
    let per_letter = n / letters.len();
    let remainder = n % letters.len();

    let size = bounds.size();
    let center = bounds.center();
    let scaled_x = size.x * params.scale * params.aspect;
    let scaled_y = size.y * params.scale;
    let gap = scaled_x * params.spacing;
    let total_width = letters.len() as f32 * scaled_x + (letters.len() - 1) as f32 * gap;
    let start_x = -total_width / 2.0 + scaled_x / 2.0;

    let jitter = cell_width * params.jitter;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut next_rank = 0;
    for (index, &letter) in letters.iter().enumerate() {
        let count = per_letter + usize::from(index < remainder);
        let first = next_rank;
        next_rank += count;
        if count == 0 {
            continue;
        }

        let (points, jittered): (Option<Vec<Vector2<f32>>>, bool) = match params.style {
            LetterStyle::Stroke => (stroke_points(letter, count), false),
            LetterStyle::Raster => match rasterizer {
                Some(rasterizer) => (
                    rasterizer
                        .rasterize(letter)
                        .map(|bitmap| raster::letter_points(&bitmap, count, &mut rng)),
                    true,
                ),
                None => {
                    warn!("no glyph rasterizer attached, using stroke paths");
                    (stroke_points(letter, count), false)
                }
            },
        };

        let points = match points {
            Some(points) if !points.is_empty() => points,
            _ => {
                warn!("letter {letter:?} has no usable outline, its fragments keep base centers");
                continue;
            }
        };

        let x_offset = start_x + index as f32 * (scaled_x + gap);
        for i in 0..count {
            let point = points[i % points.len()];
            let (jx, jy) = if jittered {
                (rng.random::<f32>() * jitter, rng.random::<f32>() * jitter)
            } else {
                (0.0, 0.0)
            };
            set[first + i].ordered_center = Some(Vector3::new(
                center.x + x_offset + (point.x - 0.5) * scaled_x + jx,
                center.y + (point.y - 0.5) * scaled_y + jy,
                0.0,
            ));
        }
    }
}

fn stroke_points(letter: char, count: usize) -> Option<Vec<Vector2<f32>>> {
    strokes::stroke_path(letter).map(|path| strokes::sample_along(path, count))
}
