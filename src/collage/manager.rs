//! The collage manager.

use std::sync::Arc;

use log::{debug, info};

use crate::adjacency::build_adjacency;
use crate::animation::{Animator, FragmentFrame, SpringConfig};
use crate::assets::{MaterialRecord, SourceMesh};
use crate::controls::{ControlState, KeyInput, LayoutKey, TypedText};
use crate::fragment::{fragmenter, ranker, FragmentSet};
use crate::geometry::TriangleMesh;
use crate::layout::{self, GlyphRasterizer};

/// The whole visualization pipeline behind one handle.
///
/// Source meshes go in once; afterwards every control change flows
/// through [`Collage::update_controls`] or [`Collage::key_input`] and
/// the manager decides whether the fragment state must be recomputed.
/// The recompute runs synchronously and completely before it returns,
/// so a render loop interleaving [`Collage::advance`] and
/// [`Collage::frame`] never observes partial state.
pub struct Collage {
    fragments: FragmentSet,
    animator: Animator,
    controls: ControlState,
    typed: TypedText,
    rasterizer: Option<Box<dyn GlyphRasterizer>>,
    last_key: Option<LayoutKey>,
}

impl Default for Collage {
    fn default() -> Self {
        Self::new()
    }
}

impl Collage {
    pub fn new() -> Self {
        Self {
            fragments: FragmentSet::new(),
            animator: Animator::default(),
            controls: ControlState::default(),
            typed: TypedText::new(),
            rasterizer: None,
            last_key: None,
        }
    }

    /// Decomposes one mesh into fragments and folds them into the set.
    ///
    /// Growing the set re-runs the whole pipeline; the animator resets
    /// the newcomers (and everyone else) to rest on their base centers.
    pub fn ingest_mesh(&mut self, mesh: &TriangleMesh, material: Arc<MaterialRecord>) {
        let fragments = fragmenter::decompose(mesh, material, fragmenter::GRID_RESOLUTION);
        info!("ingested mesh: {} fragments", fragments.len());
        self.fragments.extend(fragments);
        self.recompute();
    }

    /// Ingests every sub-mesh of a loaded tile set.
    pub fn ingest_sources(&mut self, sources: &[SourceMesh]) {
        for source in sources {
            self.ingest_mesh(&source.mesh, source.material.clone());
        }
    }

    /// Attaches the text-rendering collaborator used by the raster
    /// letter style.
    pub fn set_rasterizer(&mut self, rasterizer: Box<dyn GlyphRasterizer>) {
        self.rasterizer = Some(rasterizer);
        self.last_key = None;
        self.maybe_recompute();
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Edits the control state, recomputing afterwards only if a
    /// layout-affecting parameter actually changed.
    pub fn update_controls(&mut self, edit: impl FnOnce(&mut ControlState)) {
        edit(&mut self.controls);
        self.maybe_recompute();
    }

    /// Feeds one keystroke into the typed-text buffer.
    pub fn key_input(&mut self, key: KeyInput) {
        if self.typed.apply(key) {
            self.maybe_recompute();
        }
    }

    pub fn typed_text(&self) -> &str {
        self.typed.as_str()
    }

    pub fn fragments(&self) -> &FragmentSet {
        &self.fragments
    }

    /// Replaces the spring response; animation-only, no recompute.
    pub fn set_spring_config(&mut self, config: SpringConfig) {
        self.animator.set_spring_config(config);
    }

    /// Runs the full pipeline unconditionally: rank, layout,
    /// adjacency, then animation retargeting.
    pub fn recompute(&mut self) {
        if self.fragments.is_empty() {
            return;
        }

        let (mode, params) = self.controls.layout_params(&self.typed);

        ranker::rank(&mut self.fragments);
        layout::compute_targets(&mut self.fragments, mode, &params, self.rasterizer.as_deref());
        build_adjacency(&mut self.fragments, self.controls.adjacency_window);
        self.animator.retarget(&self.fragments);

        self.last_key = Some(self.controls.layout_key(&self.typed));
        debug!(
            "recompute: {} over {} fragments, window {}",
            mode.name(),
            self.fragments.len(),
            self.controls.adjacency_window
        );
    }

    fn maybe_recompute(&mut self) {
        let key = self.controls.layout_key(&self.typed);
        if self.last_key.as_ref() != Some(&key) {
            self.recompute();
        }
    }

    /// Advances the animation clock. Call once per display frame.
    pub fn advance(&mut self, dt: f32) {
        self.animator.advance(dt);
    }

    pub fn all_at_rest(&self) -> bool {
        self.animator.all_at_rest()
    }

    /// This frame's render state for every fragment, in rank order.
    pub fn frame(&self) -> Vec<FragmentFrame> {
        self.animator.frame(&self.fragments, self.controls.explosion)
    }
}
