//! # Collage Tour Demo
//!
//! Builds a procedural city tile cluster, walks it through every
//! layout, and reports how the fragments settle. Runs headless; attach
//! your own renderer to the frame output to see it move.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=info cargo run --example collage
//! ```

use std::sync::Arc;

use cityscape::geometry::primitives::generate_city_tile;
use cityscape::{Collage, LayoutMode, MaterialRecord};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut collage = Collage::new();

    // A 3x3 cluster of tiles, like a downtown slice.
    for tile in 0..9 {
        let mesh = generate_city_tile(4 + tile % 2, 4 + tile / 5, 1.0, 2.0 + tile as f32 * 0.3);
        let material = Arc::new(MaterialRecord::new(
            &format!("tile_{tile}"),
            [0.8, 0.8, 0.8, 1.0],
            0.0,
            0.6,
        ));
        collage.ingest_mesh(&mesh, material);
    }

    println!("{} fragments loaded", collage.fragments().len());

    collage.update_controls(|controls| controls.explosion = 120.0);

    for mode in LayoutMode::ALL {
        collage.update_controls(|controls| controls.layout = mode);

        // Let the springs settle, stepping as a 60 Hz loop would.
        let mut frames = 0;
        while !collage.all_at_rest() && frames < 600 {
            collage.advance(1.0 / 60.0);
            frames += 1;
        }

        let frame = collage.frame();
        let lines: usize = frame.iter().map(|f| f.adjacency_lines.len()).sum();
        println!(
            "{:<16} settled after {:>3} frames, {} adjacency lines",
            mode.name(),
            frames,
            lines
        );
    }

    Ok(())
}
