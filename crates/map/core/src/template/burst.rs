use super::TemplateShape;
use super::border::{BorderPlan, CellFrame};
use crate::config::EngineConfig;
use crate::geometry::{Rect, Region};
use crate::grid::{ChebyshevMetric, GridMetric};

/// Square of `2 * radius + 1` cells centred on the cell whose top-left corner is the vertex.
pub(super) fn build_burst(frame: CellFrame, radius: i32) -> TemplateShape {
    let metric = ChebyshevMetric;
    let g = frame.cell_size();
    let vertex = frame.vertex();

    let mut cells = Vec::new();
    for cy in -radius..=radius {
        for cx in -radius..=radius {
            if metric.distance(cx, cy) <= radius {
                cells.push(Rect::new(vertex.x + cx * g, vertex.y + cy * g, g, g));
            }
        }
    }

    let side = (2 * radius + 1) * g;
    let outer = Rect::new(vertex.x - radius * g, vertex.y - radius * g, side, side);
    let mut border = BorderPlan::new();
    border.push_rect(outer);
    border.push_rect(Rect::new(vertex.x, vertex.y, g, g));

    TemplateShape {
        area: Region::from_rects(cells),
        border,
        bounds: outer.inflate(EngineConfig::BOUNDS_PADDING),
        quadrant: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ZonePoint;

    #[test]
    fn burst_covers_the_full_square() {
        let shape = build_burst(CellFrame::new(ZonePoint::ORIGIN, 50), 2);
        assert_eq!(shape.area, Region::from_rect(Rect::new(-100, -100, 250, 250)));
        assert_eq!(shape.bounds, Rect::new(-110, -110, 270, 270));
    }

    #[test]
    fn border_is_outer_square_and_vertex_marker() {
        let shape = build_burst(CellFrame::new(ZonePoint::new(100, 100), 10), 1);
        assert_eq!(shape.border.len(), 8);
        let marker: Vec<_> = shape.border.iter().skip(4).map(|s| s.start).collect();
        assert_eq!(
            marker,
            vec![
                ZonePoint::new(100, 100),
                ZonePoint::new(110, 100),
                ZonePoint::new(110, 110),
                ZonePoint::new(100, 110),
            ]
        );
    }

    #[test]
    fn burst_follows_an_offset_vertex() {
        let shape = build_burst(CellFrame::new(ZonePoint::new(20, 40), 10), 1);
        assert_eq!(shape.area, Region::from_rect(Rect::new(10, 30, 30, 30)));
    }
}
