//! Hand-authored letter stroke paths.
//!
//! Each A-Z glyph is a normalized polyline in [0, 1] x [0, 1] with
//! y = 0 at the top of the glyph. Fragments are strung along the path
//! by cumulative arc length.

use cgmath::Vector2;

use crate::layout::progress;

const A: &[[f32; 2]] = &[[0.5, 0.0], [0.0, 1.0], [0.25, 0.5], [0.75, 0.5], [1.0, 1.0], [0.5, 0.0]];
const B: &[[f32; 2]] = &[
    [0.0, 0.0], [0.0, 1.0], [0.7, 1.0], [0.8, 0.85], [0.8, 0.65], [0.7, 0.5], [0.0, 0.5],
    [0.7, 0.5], [0.8, 0.35], [0.8, 0.15], [0.7, 0.0], [0.0, 0.0],
];
const C: &[[f32; 2]] = &[
    [1.0, 0.15], [0.7, 0.0], [0.3, 0.0], [0.0, 0.15], [0.0, 0.85], [0.3, 1.0], [0.7, 1.0], [1.0, 0.85],
];
const D: &[[f32; 2]] = &[
    [0.0, 0.0], [0.0, 1.0], [0.6, 1.0], [0.9, 0.8], [1.0, 0.5], [0.9, 0.2], [0.6, 0.0], [0.0, 0.0],
];
const E: &[[f32; 2]] = &[
    [1.0, 0.0], [0.0, 0.0], [0.0, 0.5], [0.7, 0.5], [0.0, 0.5], [0.0, 1.0], [1.0, 1.0],
];
const F: &[[f32; 2]] = &[[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [0.0, 0.0], [0.0, 0.5], [0.7, 0.5]];
const G: &[[f32; 2]] = &[
    [1.0, 0.2], [0.7, 0.0], [0.3, 0.0], [0.0, 0.2], [0.0, 0.8], [0.3, 1.0], [0.7, 1.0],
    [1.0, 0.8], [1.0, 0.5], [0.5, 0.5],
];
const H: &[[f32; 2]] = &[[0.0, 0.0], [0.0, 1.0], [0.0, 0.5], [1.0, 0.5], [1.0, 0.0], [1.0, 1.0]];
const I: &[[f32; 2]] = &[[0.3, 0.0], [0.7, 0.0], [0.5, 0.0], [0.5, 1.0], [0.3, 1.0], [0.7, 1.0]];
const J: &[[f32; 2]] = &[
    [0.2, 0.0], [0.8, 0.0], [0.6, 0.0], [0.6, 0.8], [0.5, 1.0], [0.3, 1.0], [0.1, 0.8], [0.1, 0.6],
];
const K: &[[f32; 2]] = &[[0.0, 0.0], [0.0, 1.0], [0.0, 0.5], [1.0, 0.0], [0.0, 0.5], [1.0, 1.0]];
const L: &[[f32; 2]] = &[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
const M: &[[f32; 2]] = &[[0.0, 1.0], [0.0, 0.0], [0.5, 0.5], [1.0, 0.0], [1.0, 1.0]];
const N: &[[f32; 2]] = &[[0.0, 1.0], [0.0, 0.0], [1.0, 1.0], [1.0, 0.0]];
const O: &[[f32; 2]] = &[
    [0.5, 0.0], [0.15, 0.15], [0.0, 0.5], [0.15, 0.85], [0.5, 1.0], [0.85, 0.85], [1.0, 0.5],
    [0.85, 0.15], [0.5, 0.0],
];
const P: &[[f32; 2]] = &[
    [0.0, 1.0], [0.0, 0.0], [0.7, 0.0], [1.0, 0.15], [1.0, 0.35], [0.7, 0.5], [0.0, 0.5],
];
const Q: &[[f32; 2]] = &[
    [0.5, 0.0], [0.15, 0.15], [0.0, 0.5], [0.15, 0.85], [0.5, 1.0], [0.85, 0.85], [1.0, 0.5],
    [0.85, 0.15], [0.5, 0.0], [0.6, 0.7], [1.0, 1.0],
];
const R: &[[f32; 2]] = &[
    [0.0, 1.0], [0.0, 0.0], [0.7, 0.0], [1.0, 0.15], [1.0, 0.35], [0.7, 0.5], [0.0, 0.5], [1.0, 1.0],
];
const S: &[[f32; 2]] = &[
    [1.0, 0.15], [0.7, 0.0], [0.3, 0.0], [0.0, 0.15], [0.0, 0.35], [0.3, 0.5], [0.7, 0.5],
    [1.0, 0.65], [1.0, 0.85], [0.7, 1.0], [0.3, 1.0], [0.0, 0.85],
];
const T: &[[f32; 2]] = &[[0.0, 0.0], [1.0, 0.0], [0.5, 0.0], [0.5, 1.0]];
const U: &[[f32; 2]] = &[[0.0, 0.0], [0.0, 0.8], [0.2, 1.0], [0.8, 1.0], [1.0, 0.8], [1.0, 0.0]];
const V: &[[f32; 2]] = &[[0.0, 0.0], [0.5, 1.0], [1.0, 0.0]];
const W: &[[f32; 2]] = &[[0.0, 0.0], [0.25, 1.0], [0.5, 0.5], [0.75, 1.0], [1.0, 0.0]];
const X: &[[f32; 2]] = &[[0.0, 0.0], [1.0, 1.0], [0.5, 0.5], [0.0, 1.0], [1.0, 0.0]];
const Y: &[[f32; 2]] = &[[0.0, 0.0], [0.5, 0.5], [1.0, 0.0], [0.5, 0.5], [0.5, 1.0]];
const Z: &[[f32; 2]] = &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Stroke path for an A-Z glyph, or `None` for anything else.
pub(crate) fn stroke_path(letter: char) -> Option<&'static [[f32; 2]]> {
    Some(match letter {
        'A' => A,
        'B' => B,
        'C' => C,
        'D' => D,
        'E' => E,
        'F' => F,
        'G' => G,
        'H' => H,
        'I' => I,
        'J' => J,
        'K' => K,
        'L' => L,
        'M' => M,
        'N' => N,
        'O' => O,
        'P' => P,
        'Q' => Q,
        'R' => R,
        'S' => S,
        'T' => T,
        'U' => U,
        'V' => V,
        'W' => W,
        'X' => X,
        'Y' => Y,
        'Z' => Z,
        _ => return None,
    })
}

/// Places `count` points along the path by cumulative arc length.
///
/// The i-th point sits at arc-length fraction `i / (count - 1)`
/// (a single point lands at the path start). Returned coordinates are
/// normalized with y flipped so y = 1 is the top of the glyph.
pub(crate) fn sample_along(path: &[[f32; 2]], count: usize) -> Vec<Vector2<f32>> {
    if path.is_empty() || count == 0 {
        return Vec::new();
    }
    if path.len() == 1 {
        return vec![Vector2::new(path[0][0], 1.0 - path[0][1]); count];
    }

    let segment_lengths: Vec<f32> = path
        .windows(2)
        .map(|pair| {
            let dx = pair[1][0] - pair[0][0];
            let dy = pair[1][1] - pair[0][1];
            (dx * dx + dy * dy).sqrt()
        })
        .collect();
    let total_length: f32 = segment_lengths.iter().sum();

    (0..count)
        .map(|i| {
            let target = progress(i, count) * total_length;

            let mut accumulated = 0.0;
            let mut segment = segment_lengths.len() - 1;
            for (j, length) in segment_lengths.iter().enumerate() {
                if accumulated + length >= target {
                    segment = j;
                    break;
                }
                accumulated += length;
            }

            let t = if segment_lengths[segment] > 0.0 {
                ((target - accumulated) / segment_lengths[segment]).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let start = path[segment];
            let end = path[segment + 1];
            let x = start[0] + (end[0] - start[0]) * t;
            let y = start[1] + (end[1] - start[1]) * t;
            Vector2::new(x, 1.0 - y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_has_a_path() {
        for letter in 'A'..='Z' {
            let path = stroke_path(letter).unwrap();
            assert!(path.len() >= 2);
            for point in path {
                assert!(point[0] >= 0.0 && point[0] <= 1.0);
                assert!(point[1] >= 0.0 && point[1] <= 1.0);
            }
        }
        assert!(stroke_path('1').is_none());
        assert!(stroke_path('a').is_none());
    }

    #[test]
    fn test_sample_along_letter_l() {
        // L is two unit segments: down the left side, then across the
        // bottom. Five samples land at arc fractions 0, .25, .5, .75, 1.
        let samples = sample_along(stroke_path('L').unwrap(), 5);
        let expected = [
            Vector2::new(0.0, 1.0),
            Vector2::new(0.0, 0.5),
            Vector2::new(0.0, 0.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(1.0, 0.0),
        ];
        for (sample, want) in samples.iter().zip(expected.iter()) {
            assert!((sample.x - want.x).abs() < 1e-5);
            assert!((sample.y - want.y).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sample_endpoints_match_path_endpoints() {
        for letter in ['A', 'M', 'S', 'Z'] {
            let path = stroke_path(letter).unwrap();
            let samples = sample_along(path, 6);
            assert_eq!(samples.len(), 6);

            let first = path[0];
            let last = path[path.len() - 1];
            assert!((samples[0].x - first[0]).abs() < 1e-5);
            assert!((samples[0].y - (1.0 - first[1])).abs() < 1e-5);
            assert!((samples[5].x - last[0]).abs() < 1e-4);
            assert!((samples[5].y - (1.0 - last[1])).abs() < 1e-4);
        }
    }

    #[test]
    fn test_single_sample_sits_at_the_start() {
        let samples = sample_along(stroke_path('V').unwrap(), 1);
        assert_eq!(samples.len(), 1);
        assert!((samples[0].x - 0.0).abs() < 1e-6);
        assert!((samples[0].y - 1.0).abs() < 1e-6);
    }
}
