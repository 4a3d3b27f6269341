use std::collections::BTreeSet;

use crate::geometry::{BoundaryPath, CellPoint, Rect, ZonePoint};
use crate::grid::Quadrant;

/// Axis of a border segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One stroke of a template border, always axis-aligned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderSegment {
    pub start: ZonePoint,
    pub end: ZonePoint,
}

impl BorderSegment {
    pub const fn new(start: ZonePoint, end: ZonePoint) -> Self {
        Self { start, end }
    }

    pub fn orientation(&self) -> Orientation {
        if self.start.y == self.end.y {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn length(&self) -> i32 {
        (self.end.x - self.start.x).abs() + (self.end.y - self.start.y).abs()
    }

    /// Same segment with endpoints ordered, for comparisons that ignore drawing direction.
    pub fn normalized(&self) -> Self {
        if self.end < self.start {
            Self::new(self.end, self.start)
        } else {
            *self
        }
    }
}

/// Ordered border strokes of a template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BorderPlan {
    segments: Vec<BorderSegment>,
}

impl BorderPlan {
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: BorderSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[BorderSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BorderSegment> {
        self.segments.iter()
    }

    /// Pushes the four sides of `rect`, clockwise from the top-left corner.
    pub fn push_rect(&mut self, rect: Rect) {
        let tl = ZonePoint::new(rect.x, rect.y);
        let tr = ZonePoint::new(rect.right(), rect.y);
        let br = ZonePoint::new(rect.right(), rect.bottom());
        let bl = ZonePoint::new(rect.x, rect.bottom());
        self.push(BorderSegment::new(tl, tr));
        self.push(BorderSegment::new(tr, br));
        self.push(BorderSegment::new(br, bl));
        self.push(BorderSegment::new(bl, tl));
    }

    /// Open two-point subpaths, one per segment, for a stroking rasterizer.
    pub fn to_path(&self) -> BoundaryPath {
        let mut path = BoundaryPath::with_capacity(self.segments.len() * 2);
        for segment in &self.segments {
            path.move_to(f64::from(segment.start.x), f64::from(segment.start.y))
                .line_to(f64::from(segment.end.x), f64::from(segment.end.y));
        }
        path
    }
}

impl FromIterator<BorderSegment> for BorderPlan {
    fn from_iter<T: IntoIterator<Item = BorderSegment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// The four sides of a cell, named relative to the template vertex.
///
/// "Close" sides face the vertex and "far" sides face away from it, so the
/// same name picks the mirrored side in every quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum CellEdge {
    CloseVertical,
    FarHorizontal,
    FarVertical,
    CloseHorizontal,
}

/// Converts vertex-relative cell offsets into zone geometry for one template.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CellFrame {
    vertex: ZonePoint,
    cell_size: i32,
}

impl CellFrame {
    pub(crate) const fn new(vertex: ZonePoint, cell_size: i32) -> Self {
        Self { vertex, cell_size }
    }

    pub(crate) const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub(crate) const fn vertex(&self) -> ZonePoint {
        self.vertex
    }

    /// Cell `(x, y)` of the south-east sector mirrored into `quadrant`.
    pub(crate) fn cell(&self, x: i32, y: i32, quadrant: Quadrant) -> Rect {
        let (xm, ym) = (quadrant.x_mult(), quadrant.y_mult());
        let g = self.cell_size;
        Rect::new(
            self.vertex.x + xm * x * g + ((xm - 1) / 2) * g,
            self.vertex.y + ym * y * g + ((ym - 1) / 2) * g,
            g,
            g,
        )
    }

    /// Cell at signed offset `(x, y)` without mirroring.
    pub(crate) fn signed_cell(&self, cell: CellPoint) -> Rect {
        let g = self.cell_size;
        Rect::new(self.vertex.x + cell.x * g, self.vertex.y + cell.y * g, g, g)
    }

    pub(crate) fn edge(&self, x: i32, y: i32, quadrant: Quadrant, edge: CellEdge) -> BorderSegment {
        let (xm, ym) = (quadrant.x_mult(), quadrant.y_mult());
        let g = self.cell_size;
        let near_x = self.vertex.x + xm * x * g;
        let near_y = self.vertex.y + ym * y * g;
        let (sx, sy) = match edge {
            CellEdge::CloseHorizontal | CellEdge::CloseVertical => (near_x, near_y),
            CellEdge::FarHorizontal => (near_x, near_y + ym * g),
            CellEdge::FarVertical => (near_x + xm * g, near_y),
        };
        let start = ZonePoint::new(sx, sy);
        let end = match edge {
            CellEdge::CloseHorizontal | CellEdge::FarHorizontal => ZonePoint::new(sx + xm * g, sy),
            CellEdge::CloseVertical | CellEdge::FarVertical => ZonePoint::new(sx, sy + ym * g),
        };
        BorderSegment::new(start, end)
    }
}

/// Outer outline of a set of grid cells: every cell side not shared with another cell.
///
/// Cells are signed offsets from `frame`'s vertex.
pub(crate) fn cell_silhouette(cells: &BTreeSet<CellPoint>, frame: &CellFrame) -> BorderPlan {
    let mut plan = BorderPlan::new();
    for &cell in cells {
        let neighbours = [
            (CellPoint::new(cell.x, cell.y - 1), CellEdge::CloseHorizontal),
            (CellPoint::new(cell.x + 1, cell.y), CellEdge::FarVertical),
            (CellPoint::new(cell.x, cell.y + 1), CellEdge::FarHorizontal),
            (CellPoint::new(cell.x - 1, cell.y), CellEdge::CloseVertical),
        ];
        for (neighbour, edge) in neighbours {
            if !cells.contains(&neighbour) {
                plan.push(frame.edge(cell.x, cell.y, Quadrant::SouthEast, edge));
            }
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_cells_share_the_vertex_corner() {
        let frame = CellFrame::new(ZonePoint::new(100, 100), 50);
        assert_eq!(frame.cell(0, 0, Quadrant::SouthEast), Rect::new(100, 100, 50, 50));
        assert_eq!(frame.cell(0, 0, Quadrant::NorthEast), Rect::new(100, 50, 50, 50));
        assert_eq!(frame.cell(0, 0, Quadrant::NorthWest), Rect::new(50, 50, 50, 50));
        assert_eq!(frame.cell(1, 0, Quadrant::SouthWest), Rect::new(0, 100, 50, 50));
    }

    #[test]
    fn far_edges_face_away_from_the_vertex() {
        let frame = CellFrame::new(ZonePoint::ORIGIN, 10);
        let se = frame.edge(1, 0, Quadrant::SouthEast, CellEdge::FarVertical);
        assert_eq!(se, BorderSegment::new(ZonePoint::new(20, 0), ZonePoint::new(20, 10)));

        let nw = frame.edge(1, 0, Quadrant::NorthWest, CellEdge::FarVertical);
        assert_eq!(nw, BorderSegment::new(ZonePoint::new(-20, 0), ZonePoint::new(-20, -10)));
        assert_eq!(nw.orientation(), Orientation::Vertical);
        assert_eq!(nw.length(), 10);
    }

    #[test]
    fn silhouette_of_a_domino_has_six_sides() {
        let cells: BTreeSet<_> = [CellPoint::new(0, 0), CellPoint::new(1, 0)].into();
        let plan = cell_silhouette(&cells, &CellFrame::new(ZonePoint::ORIGIN, 10));
        assert_eq!(plan.len(), 6);
        let shared = BorderSegment::new(ZonePoint::new(10, 0), ZonePoint::new(10, 10));
        assert!(plan.iter().all(|s| s.normalized() != shared));
    }
}
