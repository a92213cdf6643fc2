// src/lib.rs
//! Cityscape Collage Engine
//!
//! Decomposes 3D city tiles into surface fragments and re-arranges
//! them into animated collage layouts with rank-adjacency line graphs.

pub mod adjacency;
pub mod animation;
pub mod assets;
pub mod collage;
pub mod controls;
pub mod fragment;
pub mod geometry;
pub mod layout;

// Re-export main types for convenience
pub use animation::{Animator, FragmentFrame, SpringConfig};
pub use assets::{load_tile, load_tile_set, MaterialRecord, SourceMesh};
pub use collage::Collage;
pub use controls::{ControlState, KeyInput, LetterSequencer, TypedText};
pub use fragment::{Fragment, FragmentSet};
pub use layout::{GlyphBitmap, GlyphRasterizer, LayoutMode, LetterParams, LetterStyle};

/// Creates an empty collage with default controls
pub fn default() -> Collage {
    Collage::new()
}
