use super::TemplateShape;
use super::border::{BorderPlan, CellFrame};
use crate::config::EngineConfig;
use crate::geometry::{CellPoint, Rect, Region};

/// Number of cells between the vertex and the far side of `offset`, inclusive.
pub(super) const fn extent(offset: i32) -> i32 {
    if offset >= 0 { offset + 1 } else { -offset }
}

/// Cell range `[start, start + radius)` along one axis.
///
/// The major axis runs flush from the vertex toward the control cell; the
/// minor axis is centred on the control cell and clamped into `[-radius, 0]`.
fn axis_start(offset: i32, radius: i32, major: bool) -> i32 {
    if major {
        if offset >= 0 { 0 } else { -radius }
    } else {
        (offset - radius / 2).clamp(-radius, 0)
    }
}

/// A single `radius` x `radius` square pushed out from the vertex toward `control`.
pub(super) fn build_blast(frame: CellFrame, radius: i32, control: CellPoint) -> TemplateShape {
    if radius <= 0 {
        return TemplateShape::empty();
    }
    let major_x = extent(control.x) > extent(control.y);
    let sx = axis_start(control.x, radius, major_x);
    let sy = axis_start(control.y, radius, !major_x);

    let g = frame.cell_size();
    let vertex = frame.vertex();
    let square = Rect::new(vertex.x + sx * g, vertex.y + sy * g, radius * g, radius * g);

    let mut border = BorderPlan::new();
    border.push_rect(square);
    TemplateShape {
        area: Region::from_rect(square),
        border,
        bounds: square.inflate(EngineConfig::BOUNDS_PADDING),
        quadrant: None,
    }
}
