//! Render-ready output of one frame.

use std::sync::Arc;

use map_core::{
    BorderPlan, FrameComposition, Layer, Rect, Region, TemplateId, ViewContext, ZoneId,
};

/// One template as the renderer draws it.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateFrame {
    pub id: TemplateId,
    pub layer: Layer,
    pub area: Region,
    pub border: BorderPlan,
    pub bounds: Rect,
    /// Area flattened for filling, as interleaved `x, y` pairs.
    pub fill: Arc<[f32]>,
}

/// Work one frame could not serve from cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Templates whose shape had to be rebuilt this frame.
    pub templates_rebuilt: usize,
    pub fog_rebuilt: bool,
    pub overlays_rebuilt: bool,
    /// The viewer's visible area was unioned again.
    pub visible_rebuilt: bool,
    /// Template fills flattened this frame.
    pub fills_flattened: usize,
    /// Templates tested against the fog mask this frame.
    pub fog_checks: usize,
    pub outline_flattened: bool,
}

impl FrameStats {
    pub fn fully_cached(&self) -> bool {
        self.templates_rebuilt == 0
            && !self.fog_rebuilt
            && !self.overlays_rebuilt
            && !self.visible_rebuilt
            && self.fills_flattened == 0
            && self.fog_checks == 0
            && !self.outline_flattened
    }
}

#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub frame: u64,
    pub zone: ZoneId,
    pub view: ViewContext,
    pub templates: Vec<TemplateFrame>,
    /// Shared with the session cache until the viewer's inputs change.
    pub composition: Arc<FrameComposition>,
    /// Visible-area outline flattened for stroking.
    pub fog_outline: Arc<[f32]>,
    pub stats: FrameStats,
}

impl FrameOutput {
    pub fn template(&self, id: TemplateId) -> Option<&TemplateFrame> {
        self.templates.iter().find(|t| t.id == id)
    }
}
