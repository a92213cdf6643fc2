//! # Typed Text Demo
//!
//! Feeds keystrokes and the auto letter sequence into the collage and
//! shows how the typed buffer overrides the configured text.
//!
//! ## Usage:
//! ```bash
//! cargo run --example typed_text
//! ```

use std::sync::Arc;

use cityscape::geometry::primitives::generate_city_tile;
use cityscape::{Collage, KeyInput, LayoutMode, LetterSequencer, MaterialRecord};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut collage = Collage::new();
    let tile = generate_city_tile(6, 6, 1.0, 4.0);
    collage.ingest_mesh(&tile, Arc::new(MaterialRecord::default()));

    // Type a word; each keystroke re-forms the fragments.
    for key in "hello".chars() {
        collage.key_input(KeyInput::Char(key));
    }
    println!("typed {:?}", collage.typed_text());
    let placed = collage
        .fragments()
        .iter()
        .filter(|f| f.ordered_center.is_some())
        .count();
    println!("{placed} fragments placed on glyphs");

    // Escape clears the buffer and falls back to the configured layout.
    collage.key_input(KeyInput::Escape);
    assert_eq!(collage.typed_text(), "");

    // Auto-cycle single letters, one every two seconds of sim time.
    collage.update_controls(|controls| controls.layout = LayoutMode::Letters);
    let mut sequencer = LetterSequencer::default();
    for step in 0..4 {
        if let Some(letter) = sequencer.advance(2.0) {
            collage.update_controls(|controls| {
                controls.letters.text = letter.to_string();
            });
            collage.advance(2.0);
            println!("step {step}: showing {letter:?}");
        }
    }

    Ok(())
}
