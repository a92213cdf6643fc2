//! # Control Parameters
//!
//! The live-updating parameter surface the engine reacts to. A control
//! panel (or any other host) owns widgets and event plumbing; the
//! engine only sees [`ControlState`] snapshots plus raw key input, and
//! decides from the [`LayoutKey`] whether a change needs a full
//! recompute or just flows into the next frame.

use crate::layout::{LayoutMode, LayoutParams, LetterParams};

/// Keyboard input relevant to the typed-text layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A character key; only A-Z (either case) is accepted.
    Char(char),
    Backspace,
    Escape,
}

/// Accumulates typed letters that override the configured text.
#[derive(Debug, Default, Clone)]
pub struct TypedText {
    buffer: String,
}

impl TypedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one key. Returns true when the buffer changed.
    pub fn apply(&mut self, key: KeyInput) -> bool {
        match key {
            KeyInput::Char(c) => {
                let upper = c.to_ascii_uppercase();
                if upper.is_ascii_uppercase() {
                    self.buffer.push(upper);
                    true
                } else {
                    false
                }
            }
            KeyInput::Backspace => self.buffer.pop().is_some(),
            KeyInput::Escape => {
                let had_text = !self.buffer.is_empty();
                self.buffer.clear();
                had_text
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Snapshot of every live parameter the engine consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub layout: LayoutMode,
    /// Vertical extrusion factor; animation-only, never triggers a
    /// recompute.
    pub explosion: f32,
    /// Half-width of the rank adjacency window.
    pub adjacency_window: usize,
    pub base_color: [f32; 3],
    pub base_opacity: f32,
    pub adjacency_color: [f32; 3],
    pub adjacency_opacity: f32,
    pub letters: LetterParams,
    /// Seed for all randomized placement.
    pub seed: u64,
    /// Replace material colors with the flat palette.
    pub flatten: bool,
    /// Palette cycled by rank under the flat override; empty means
    /// "use the base color".
    pub flat_palette: Vec<[f32; 3]>,
    pub flat_opacity: f32,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            layout: LayoutMode::Original,
            explosion: 0.0,
            adjacency_window: 2,
            base_color: [1.0, 1.0, 1.0],
            base_opacity: 1.0,
            adjacency_color: [1.0, 1.0, 1.0],
            adjacency_opacity: 0.5,
            letters: LetterParams::default(),
            seed: 0,
            flatten: false,
            flat_palette: Vec::new(),
            flat_opacity: 0.15,
        }
    }
}

/// The layout-affecting slice of the control state. Two equal keys
/// mean the last recompute is still valid.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutKey {
    mode: LayoutMode,
    letters: LetterParams,
    window: usize,
    seed: u64,
}

impl ControlState {
    /// Resolves the effective layout: a non-empty typed buffer forces
    /// the letters layout with the typed text, and a letters layout
    /// with no usable text degrades to Original.
    pub fn resolve_layout(&self, typed: &TypedText) -> (LayoutMode, String) {
        if !typed.is_empty() {
            return (LayoutMode::Letters, typed.as_str().to_string());
        }
        if self.layout == LayoutMode::Letters {
            let filtered = crate::layout::letters::filter_letters(&self.letters.text);
            if filtered.is_empty() {
                return (LayoutMode::Original, String::new());
            }
            return (LayoutMode::Letters, filtered);
        }
        (self.layout, String::new())
    }

    /// Layout parameters with the effective text substituted in.
    pub fn layout_params(&self, typed: &TypedText) -> (LayoutMode, LayoutParams) {
        let (mode, text) = self.resolve_layout(typed);
        (
            mode,
            LayoutParams {
                letters: LetterParams {
                    text,
                    ..self.letters.clone()
                },
                seed: self.seed,
            },
        )
    }

    /// Key over everything that forces a recompute when it changes.
    pub fn layout_key(&self, typed: &TypedText) -> LayoutKey {
        let (mode, params) = self.layout_params(typed);
        LayoutKey {
            mode,
            letters: params.letters,
            window: self.adjacency_window,
            seed: self.seed,
        }
    }

    /// The color and opacity a renderer should draw a fragment with,
    /// honoring the flat palette override.
    pub fn fragment_color(&self, rank: usize) -> ([f32; 3], f32) {
        if self.flatten {
            let color = if self.flat_palette.is_empty() {
                self.base_color
            } else {
                self.flat_palette[rank % self.flat_palette.len()]
            };
            (color, self.flat_opacity)
        } else {
            (self.base_color, self.base_opacity)
        }
    }
}

/// Cycles a fixed letter sequence on a time interval, for the
/// auto-playing single-glyph show.
#[derive(Debug, Clone)]
pub struct LetterSequencer {
    sequence: Vec<char>,
    index: usize,
    interval: f32,
    elapsed: f32,
}

impl Default for LetterSequencer {
    fn default() -> Self {
        Self::new("LIVINGGEOMETRY", 2.0)
    }
}

impl LetterSequencer {
    /// # Arguments
    /// * `sequence` - letters to cycle through (filtered to A-Z)
    /// * `interval` - seconds between steps
    pub fn new(sequence: &str, interval: f32) -> Self {
        Self {
            sequence: crate::layout::letters::filter_letters(sequence)
                .chars()
                .collect(),
            index: 0,
            interval: interval.max(1e-3),
            elapsed: 0.0,
        }
    }

    pub fn current(&self) -> Option<char> {
        self.sequence.get(self.index).copied()
    }

    /// Accumulates time; returns the new letter each time the
    /// sequence steps.
    pub fn advance(&mut self, dt: f32) -> Option<char> {
        if self.sequence.is_empty() {
            return None;
        }
        self.elapsed += dt.max(0.0);
        let mut stepped = false;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.index = (self.index + 1) % self.sequence.len();
            stepped = true;
        }
        if stepped {
            self.current()
        } else {
            None
        }
    }
}
