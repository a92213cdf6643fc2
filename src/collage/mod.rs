//! # Collage Orchestration
//!
//! Owns the fragment arena and runs the recompute pipeline in its
//! strict order: rank, then layout, then adjacency, then animation
//! retargeting.

pub mod manager;

pub use manager::Collage;
