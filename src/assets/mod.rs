//! # Asset Loading
//!
//! Loads city tile models (OBJ + MTL) into CPU-side source meshes and
//! shared material records. The loader is the sole input boundary of
//! the engine; everything downstream works on [`SourceMesh`] values
//! regardless of where they came from.

pub mod loader;
pub mod material;

pub use loader::{load_tile, load_tile_set, AssetError, SourceMesh};
pub use material::{MaterialLibrary, MaterialRecord};
