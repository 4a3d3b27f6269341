//! Cone templates: a radius restricted to one quadrant or one half-plane.

use super::TemplateShape;
use super::radius::quadrant_extent;
use super::border::{BorderPlan, CellEdge, CellFrame};
use crate::config::EngineConfig;
use crate::geometry::{Rect, Region};
use crate::grid::{Direction, GridMetric, Quadrant};

/// Spine cones keep only the cells on their own side of the diagonal.
fn off_spine(direction: Direction, x: i32, y: i32) -> bool {
    match direction {
        Direction::East | Direction::West => y > x,
        Direction::North | Direction::South => x > y,
        _ => false,
    }
}

/// Whether the radius shell of cell `(x, y)` mirrored into `quadrant` belongs to this cone.
fn shell_visible(direction: Direction, quadrant: Quadrant, x: i32, y: i32) -> bool {
    let (vertical_spine, horizontal_spine, diagonal) = match quadrant {
        Quadrant::SouthEast => (Direction::South, Direction::East, Direction::SouthEast),
        Quadrant::NorthEast => (Direction::North, Direction::East, Direction::NorthEast),
        Quadrant::SouthWest => (Direction::South, Direction::West, Direction::SouthWest),
        Quadrant::NorthWest => (Direction::North, Direction::West, Direction::NorthWest),
    };
    direction == diagonal
        || (direction == vertical_spine && y >= x)
        || (direction == horizontal_spine && x >= y)
}

pub(super) fn build_cone(
    frame: CellFrame,
    radius: i32,
    direction: Direction,
    metric: &dyn GridMetric,
) -> TemplateShape {
    let quadrants = direction.quadrants();
    if quadrants.is_empty() {
        return TemplateShape::empty();
    }

    let mut cells = Vec::new();
    let mut border = BorderPlan::new();

    for y in 0..radius {
        for x in 0..radius {
            let distance = metric.distance(x, y);
            if distance <= radius && !off_spine(direction, x, y) {
                cells.extend(quadrants.iter().map(|q| frame.cell(x, y, *q)));
            }
            push_shell(&mut border, frame, direction, x, y, distance, radius, metric);
            push_edges(&mut border, frame, direction, x, y, distance, radius);
        }
    }

    TemplateShape {
        area: Region::from_rects(cells),
        border,
        bounds: cone_bounds(frame, radius, direction),
        quadrant: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn push_shell(
    border: &mut BorderPlan,
    frame: CellFrame,
    direction: Direction,
    x: i32,
    y: i32,
    distance: i32,
    radius: i32,
    metric: &dyn GridMetric,
) {
    if distance != radius {
        return;
    }
    let visible = Quadrant::ALL
        .into_iter()
        .filter(|q| shell_visible(direction, *q, x, y));
    // push_edges strokes the far side of spine cells itself
    let on_spine = direction.is_spine() && x == y;
    let spine_vertical = on_spine && matches!(direction, Direction::North | Direction::South);
    let spine_horizontal = on_spine && matches!(direction, Direction::East | Direction::West);
    if !spine_vertical && metric.distance(x + 1, y) > radius {
        for q in visible.clone() {
            border.push(frame.edge(x, y, q, CellEdge::FarVertical));
        }
    }
    if !spine_horizontal && metric.distance(x, y + 1) > radius {
        for q in visible {
            border.push(frame.edge(x, y, q, CellEdge::FarHorizontal));
        }
    }
}

/// Closes the straight sides a plain radius shell leaves open.
fn push_edges(
    border: &mut BorderPlan,
    frame: CellFrame,
    direction: Direction,
    x: i32,
    y: i32,
    distance: i32,
    radius: i32,
) {
    use CellEdge::{CloseHorizontal, CloseVertical, FarHorizontal, FarVertical};
    use Quadrant::{NorthEast, NorthWest, SouthEast, SouthWest};

    if direction.is_diagonal() {
        if x == 0 {
            let q = match direction {
                Direction::SouthEast | Direction::SouthWest => SouthEast,
                _ => NorthEast,
            };
            border.push(frame.edge(x, y, q, CloseVertical));
        }
        if y == 0 {
            let q = match direction {
                Direction::SouthEast | Direction::NorthEast => NorthEast,
                _ => NorthWest,
            };
            border.push(frame.edge(x, y, q, CloseHorizontal));
        }
        return;
    }

    if !direction.is_spine() || x != y || distance > radius {
        return;
    }
    let strokes: [(Quadrant, CellEdge); 4] = match direction {
        Direction::South => [
            (SouthEast, FarVertical),
            (SouthWest, FarVertical),
            (SouthEast, CloseHorizontal),
            (SouthWest, CloseHorizontal),
        ],
        Direction::North => [
            (NorthEast, FarVertical),
            (NorthWest, FarVertical),
            (NorthEast, CloseHorizontal),
            (NorthWest, CloseHorizontal),
        ],
        Direction::East => [
            (SouthEast, CloseVertical),
            (NorthEast, CloseVertical),
            (SouthEast, FarHorizontal),
            (NorthEast, FarHorizontal),
        ],
        _ => [
            (SouthWest, CloseVertical),
            (NorthWest, CloseVertical),
            (SouthWest, FarHorizontal),
            (NorthWest, FarHorizontal),
        ],
    };
    for (q, edge) in strokes {
        border.push(frame.edge(x, y, q, edge));
    }
}

/// Bounds open toward the cone's direction only.
fn cone_bounds(frame: CellFrame, radius: i32, direction: Direction) -> Rect {
    let quadrant_size = quadrant_extent(frame, radius);
    let vertex = frame.vertex();

    let reaches_west = matches!(
        direction,
        Direction::NorthWest
            | Direction::West
            | Direction::SouthWest
            | Direction::North
            | Direction::South
    );
    let reaches_north = matches!(
        direction,
        Direction::NorthWest
            | Direction::North
            | Direction::NorthEast
            | Direction::East
            | Direction::West
    );
    let x = if reaches_west { vertex.x.saturating_sub(quadrant_size) } else { vertex.x };
    let y = if reaches_north { vertex.y.saturating_sub(quadrant_size) } else { vertex.y };

    let mut width = quadrant_size.saturating_add(EngineConfig::BOUNDS_PADDING);
    if matches!(direction, Direction::North | Direction::South) {
        width = width.saturating_add(quadrant_size);
    }
    let mut height = quadrant_size.saturating_add(EngineConfig::BOUNDS_PADDING);
    if matches!(direction, Direction::East | Direction::West) {
        height = height.saturating_add(quadrant_size);
    }
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::geometry::{Point, ZonePoint};
    use crate::template::BorderSegment;
    use crate::grid::TABLETOP;

    fn cone(direction: Direction, radius: i32) -> TemplateShape {
        build_cone(CellFrame::new(ZonePoint::ORIGIN, 10), radius, direction, &TABLETOP)
    }

    #[test]
    fn diagonal_cone_fills_one_quadrant() {
        let shape = cone(Direction::SouthEast, 2);
        // (0,0), (1,0), (0,1)
        assert_eq!(shape.area.area(), 300.0);
        let bounds = shape.area.bounds().unwrap();
        assert_eq!((bounds.min_x, bounds.min_y), (0.0, 0.0));
    }

    #[test]
    fn all_direction_is_empty() {
        let shape = cone(Direction::All, 4);
        assert!(shape.area.is_empty());
        assert!(shape.border.is_empty());
    }

    #[test]
    fn north_cone_stays_above_the_vertex() {
        let shape = cone(Direction::North, 3);
        let bounds = shape.area.bounds().unwrap();
        assert_eq!(bounds.max_y, 0.0);
        assert!(shape.area.contains(Point::new(-5.0, -25.0)));
        // off-spine cell (x=1, y=0) of the north-east quadrant
        assert!(!shape.area.contains(Point::new(15.0, -5.0)));
    }

    #[test]
    fn spine_edges_close_the_cone_sides() {
        let shape = cone(Direction::East, 3);
        // the cell on the spine at (0, 0) gets its close vertical side in both quadrants
        let closing = shape
            .border
            .iter()
            .filter(|s| s.start.x == 0 && s.end.x == 0)
            .count();
        assert_eq!(closing, 2);
    }

    #[test]
    fn spine_cells_on_the_shell_are_stroked_once() {
        let spines = [Direction::North, Direction::East, Direction::South, Direction::West];
        for direction in spines {
            for radius in 1..=6 {
                let shape = cone(direction, radius);
                let unique: HashSet<BorderSegment> =
                    shape.border.iter().map(BorderSegment::normalized).collect();
                assert_eq!(unique.len(), shape.border.len(), "{direction} radius {radius}");
            }
        }
    }

    #[test]
    fn bounds_extend_toward_the_direction() {
        let frame = CellFrame::new(ZonePoint::new(100, 100), 10);
        assert_eq!(cone_bounds(frame, 2, Direction::SouthEast), Rect::new(100, 100, 40, 40));
        assert_eq!(cone_bounds(frame, 2, Direction::North), Rect::new(70, 70, 70, 40));
        assert_eq!(cone_bounds(frame, 2, Direction::West), Rect::new(70, 70, 40, 70));
    }
}
