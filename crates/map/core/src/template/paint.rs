use super::BorderSegment;
use crate::geometry::Region;

/// Drawing capability supplied by the renderer.
pub trait Painter {
    fn fill_region(&mut self, region: &Region);
    fn stroke_segment(&mut self, segment: &BorderSegment);
}

/// Painter that keeps every call, for tests and headless tools.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    pub fills: Vec<Region>,
    pub strokes: Vec<BorderSegment>,
}

impl Painter for RecordingPainter {
    fn fill_region(&mut self, region: &Region) {
        self.fills.push(region.clone());
    }

    fn stroke_segment(&mut self, segment: &BorderSegment) {
        self.strokes.push(*segment);
    }
}
