//! Radius templates: every cell within the metric radius of the vertex.

use std::collections::BTreeSet;

use super::TemplateShape;
use super::border::{BorderPlan, CellEdge, CellFrame, cell_silhouette};
use crate::config::EngineConfig;
use crate::geometry::{CellPoint, Rect, Region};
use crate::grid::{GridMetric, Quadrant};

/// Vertex on a grid intersection; the south-east scan is mirrored into all four quadrants.
pub(super) fn build_radius(frame: CellFrame, radius: i32, metric: &dyn GridMetric) -> TemplateShape {
    let mut cells = Vec::new();
    let mut border = BorderPlan::new();

    for y in 0..radius {
        for x in 0..radius {
            if metric.distance(x, y) > radius {
                continue;
            }
            cells.extend(Quadrant::ALL.map(|q| frame.cell(x, y, q)));

            // Shell: the next cell outward falls outside the radius.
            if metric.distance(x + 1, y) > radius {
                for q in Quadrant::ALL {
                    border.push(frame.edge(x, y, q, CellEdge::FarVertical));
                }
            }
            if metric.distance(x, y + 1) > radius {
                for q in Quadrant::ALL {
                    border.push(frame.edge(x, y, q, CellEdge::FarHorizontal));
                }
            }
        }
    }

    TemplateShape {
        area: Region::from_rects(cells),
        border,
        bounds: centered_bounds(frame, radius),
        quadrant: None,
    }
}

/// Vertex is the top-left corner of a centre cell; distances are measured from that cell.
pub(super) fn build_radius_cell(
    frame: CellFrame,
    radius: i32,
    metric: &dyn GridMetric,
) -> TemplateShape {
    let mut cells = BTreeSet::new();
    for y in 0..radius {
        for x in 0..radius {
            for q in Quadrant::ALL {
                let x_shift = (q.x_mult() - 1) / 2;
                let y_shift = (q.y_mult() - 1) / 2;
                if metric.distance(x - x_shift, y - y_shift) > radius {
                    continue;
                }
                cells.insert(CellPoint::new(
                    q.x_mult() * x + x_shift,
                    q.y_mult() * y + y_shift,
                ));
            }
        }
    }

    let g = frame.cell_size();
    let quadrant_size = quadrant_extent(frame, radius);
    let vertex = frame.vertex();
    let span = quadrant_size.saturating_mul(2).saturating_sub(g);
    let bounds = Rect::new(
        vertex.x.saturating_sub(quadrant_size).saturating_add(g),
        vertex.y.saturating_sub(quadrant_size).saturating_add(g),
        span,
        span,
    );

    TemplateShape {
        area: Region::from_rects(cells.iter().map(|c| frame.signed_cell(*c))),
        border: cell_silhouette(&cells, &frame),
        bounds,
        quadrant: None,
    }
}

/// Padded distance from the vertex to the far side of a quadrant, saturating at `i32::MAX`.
pub(super) fn quadrant_extent(frame: CellFrame, radius: i32) -> i32 {
    radius
        .saturating_mul(frame.cell_size())
        .saturating_add(EngineConfig::BOUNDS_PADDING)
}

pub(super) fn centered_bounds(frame: CellFrame, radius: i32) -> Rect {
    let quadrant_size = quadrant_extent(frame, radius);
    let vertex = frame.vertex();
    Rect::new(
        vertex.x.saturating_sub(quadrant_size),
        vertex.y.saturating_sub(quadrant_size),
        quadrant_size.saturating_mul(2),
        quadrant_size.saturating_mul(2),
    )
}
