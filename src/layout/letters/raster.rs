//! Rasterized glyph sampling.
//!
//! The engine never renders text itself; a collaborator hands in
//! coverage bitmaps and this module turns them into normalized point
//! clouds for fragment placement.

use cgmath::Vector2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Coverage threshold above which a pixel counts as glyph interior.
const FOREGROUND_THRESHOLD: u8 = 128;

/// A text-rendering collaborator that rasterizes single glyphs.
pub trait GlyphRasterizer {
    /// Renders `letter` to a coverage bitmap, or `None` when the glyph
    /// cannot be produced.
    fn rasterize(&self, letter: char) -> Option<GlyphBitmap>;
}

/// A row-major glyph coverage bitmap (0 = background, 255 = interior).
pub struct GlyphBitmap {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Wraps a coverage buffer. The buffer length must be
    /// `width * height`; anything else returns `None`.
    pub fn new(width: usize, height: usize, coverage: Vec<u8>) -> Option<Self> {
        if coverage.len() != width * height || width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            coverage,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Normalized positions of all foreground pixels, y flipped so
    /// y = 1 is the top row.
    pub(crate) fn foreground_points(&self) -> Vec<Vector2<f32>> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.coverage[y * self.width + x] > FOREGROUND_THRESHOLD {
                    points.push(Vector2::new(
                        x as f32 / self.width as f32,
                        1.0 - y as f32 / self.height as f32,
                    ));
                }
            }
        }
        points
    }
}

/// Picks up to `count` placement points from a glyph bitmap.
///
/// Foreground points are shuffled on the caller's seeded stream so a
/// subset still covers the whole glyph, then sampled evenly when the
/// glyph has more pixels than fragments. Returns everything (fewer
/// than `count`) when the glyph is sparse; callers wrap indices.
pub(crate) fn letter_points(
    bitmap: &GlyphBitmap,
    count: usize,
    rng: &mut StdRng,
) -> Vec<Vector2<f32>> {
    if count == 0 {
        return Vec::new();
    }

    let mut points = bitmap.foreground_points();
    if points.is_empty() {
        return points;
    }

    points.shuffle(rng);

    if points.len() <= count {
        return points;
    }

    let step = points.len() as f32 / count as f32;
    (0..count)
        .map(|i| points[(i as f32 * step).floor() as usize])
        .collect()
}
