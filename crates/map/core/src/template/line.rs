//! Path templates: lines walked from the vertex toward a target, and hand-drawn walls.

use rust_decimal::{Decimal, RoundingStrategy};

use super::border::{BorderPlan, BorderSegment, CellEdge, CellFrame};
use super::{LineSpec, TemplateShape};
use crate::config::EngineConfig;
use crate::geometry::{CellPoint, Rect, Region, ZonePoint};
use crate::grid::{GridMetric, Quadrant};

/// Significant digits kept when comparing where the ideal line leaves a cell.
const EXIT_DIGITS: u32 = 16;

/// Cell sides in the order neighbour lookups index them.
const SIDES: [CellEdge; 4] = [
    CellEdge::CloseVertical,
    CellEdge::FarHorizontal,
    CellEdge::FarVertical,
    CellEdge::CloseHorizontal,
];

/// Vertex on a grid intersection; the walk runs in the south-east sector of the
/// target's quadrant and is mirrored on output.
pub(super) fn build_line(
    frame: CellFrame,
    radius: i32,
    spec: &LineSpec,
    metric: &dyn GridMetric,
    path: &mut Vec<CellPoint>,
) -> TemplateShape {
    path.clear();
    let Some(target) = spec.path_vertex else {
        return TemplateShape::empty();
    };
    if radius <= 0 || target == frame.vertex() {
        return TemplateShape::empty();
    }

    let delta = target - frame.vertex();
    let quadrant = Quadrant::from_delta(delta.x, delta.y);
    if delta.x != 0 && delta.y != 0 {
        walk_sloped(delta, radius, spec, metric, path);
        // The walk stops one step past the radius.
        path.retain(|c| metric.distance(c.x, c.y) <= radius);
    } else {
        walk_straight(delta, radius, spec.double_wide, metric, path);
    }

    let cells: Vec<Rect> = path.iter().map(|c| frame.cell(c.x, c.y, quadrant)).collect();
    TemplateShape {
        area: Region::from_rects(cells.iter().copied()),
        border: path_border(path, |c, edge| frame.edge(c.x, c.y, quadrant, edge)),
        bounds: cells_bounds(&cells),
        quadrant: Some(quadrant),
    }
}

fn walk_sloped(
    delta: ZonePoint,
    radius: i32,
    spec: &LineSpec,
    metric: &dyn GridMetric,
    path: &mut Vec<CellPoint>,
) {
    path.push(CellPoint::ORIGIN);
    let Some(slope) = Decimal::from(delta.y).checked_div(Decimal::from(delta.x)) else {
        return;
    };
    let slope = slope.abs();

    let mut last = CellPoint::ORIGIN;
    while metric.distance(last.x, last.y) <= radius {
        let CellPoint { x, y } = last;
        let Some((x_exit, y_exit)) = exits(slope, x, y) else {
            return;
        };

        if x_exit == Decimal::from(x + 1) && y_exit == Decimal::from(y + 1) {
            // Through the corner: pick the side cell(s) from the line options.
            if spec.double_wide || !spec.mouse_slope_greater {
                path.push(CellPoint::new(x + 1, y));
            }
            if spec.double_wide || spec.mouse_slope_greater {
                path.push(CellPoint::new(x, y + 1));
            }
            path.push(CellPoint::new(x + 1, y + 1));
        } else if x_exit.floor() == Decimal::from(x) {
            path.push(CellPoint::new(x, y + 1));
        } else if y_exit.floor() == Decimal::from(y) {
            path.push(CellPoint::new(x + 1, y));
        } else {
            return;
        }

        let Some(next) = path.last().copied() else {
            return;
        };
        last = next;
    }
}

/// Where the ideal line crosses the bottom (`x_exit`) and right (`y_exit`) side of cell `(x, y)`.
fn exits(slope: Decimal, x: i32, y: i32) -> Option<(Decimal, Decimal)> {
    let x_exit = Decimal::from(y + 1).checked_div(slope)?;
    let y_exit = Decimal::from(x + 1).checked_mul(slope)?;
    Some((
        x_exit.round_sf_with_strategy(EXIT_DIGITS, RoundingStrategy::ToZero)?,
        y_exit.round_sf_with_strategy(EXIT_DIGITS, RoundingStrategy::ToZero)?,
    ))
}

fn walk_straight(
    delta: ZonePoint,
    radius: i32,
    double_wide: bool,
    metric: &dyn GridMetric,
    path: &mut Vec<CellPoint>,
) {
    let x_inc = i32::from(delta.x != 0);
    let y_inc = i32::from(delta.y != 0);
    let x_touch = if delta.x != 0 { 0 } else { -1 };
    let y_touch = if delta.y != 0 { 0 } else { -1 };

    path.push(CellPoint::ORIGIN);
    if double_wide {
        path.push(CellPoint::new(x_touch, y_touch));
    }
    let (mut x, mut y) = (x_inc, y_inc);
    while metric.distance(x, y) <= radius {
        path.push(CellPoint::new(x, y));
        if double_wide {
            path.push(CellPoint::new(x + x_touch, y + y_touch));
        }
        x += x_inc;
        y += y_inc;
    }
}

/// Vertex is the top-left corner of the starting cell; mirroring happens around that cell.
pub(super) fn build_line_cell(
    frame: CellFrame,
    radius: i32,
    path_vertex: Option<ZonePoint>,
    metric: &dyn GridMetric,
    path: &mut Vec<CellPoint>,
) -> TemplateShape {
    path.clear();
    let Some(target) = path_vertex else {
        return TemplateShape::empty();
    };
    if radius <= 0 || target == frame.vertex() {
        return TemplateShape::empty();
    }

    let delta = target - frame.vertex();
    let quadrant = Quadrant::from_delta(delta.x, delta.y);
    let dx = f64::from(delta.x.abs());
    let dy = f64::from(delta.y.abs());
    let shallow = dx >= dy;
    let slope = if shallow { dy / dx } else { dx / dy };

    // Pretend the slope is shallow and swap the axes afterwards.
    let mut deviation = 0.5;
    let mut cell = CellPoint::ORIGIN;
    path.push(cell);
    while metric.distance(cell.x, cell.y) < radius {
        cell.x += 1;
        deviation += slope;
        if deviation >= 1.0 {
            cell.y += 1;
            deviation -= 1.0;
        }
        path.push(cell);
    }
    if !shallow {
        for cell in path.iter_mut() {
            *cell = cell.swapped();
        }
    }

    let signed: Vec<CellPoint> = path
        .iter()
        .map(|c| CellPoint::new(quadrant.x_mult() * c.x, quadrant.y_mult() * c.y))
        .collect();
    let mut shape = signed_path_shape(frame, &signed);
    shape.quadrant = Some(quadrant);
    shape
}

/// Wall cells are signed offsets from the vertex cell, in drawing order.
pub(super) fn build_wall(
    frame: CellFrame,
    cells: &[CellPoint],
    path: &mut Vec<CellPoint>,
) -> TemplateShape {
    path.clear();
    path.extend_from_slice(cells);
    if cells.is_empty() {
        return TemplateShape::empty();
    }
    signed_path_shape(frame, cells)
}

fn signed_path_shape(frame: CellFrame, cells: &[CellPoint]) -> TemplateShape {
    let rects: Vec<Rect> = cells.iter().map(|c| frame.signed_cell(*c)).collect();
    TemplateShape {
        area: Region::from_rects(rects.iter().copied()),
        border: path_border(cells, |c, edge| {
            frame.edge(c.x, c.y, Quadrant::SouthEast, edge)
        }),
        bounds: cells_bounds(&rects),
        quadrant: None,
    }
}

/// Strokes every side of every path cell except those shared with an
/// orthogonal neighbour within [`EngineConfig::PATH_BORDER_WINDOW`] path steps.
pub(super) fn path_border<F>(path: &[CellPoint], edge: F) -> BorderPlan
where
    F: Fn(CellPoint, CellEdge) -> BorderSegment,
{
    let window = EngineConfig::PATH_BORDER_WINDOW;
    let mut plan = BorderPlan::new();
    for (index, &cell) in path.iter().enumerate() {
        let mut shared = [false; 4];
        let lo = index.saturating_sub(window);
        let hi = (index + window).min(path.len() - 1);
        for (offset, other) in path[lo..=hi].iter().enumerate() {
            if lo + offset == index {
                continue;
            }
            let dx = other.x - cell.x;
            let dy = other.y - cell.y;
            if dx.abs() == dy.abs() || dx.abs() > 1 || dy.abs() > 1 {
                continue;
            }
            let side = match (dx, dy) {
                (-1, _) => 0,
                (1, _) => 2,
                (_, -1) => 3,
                _ => 1,
            };
            shared[side] = true;
        }
        for (side, kind) in SIDES.into_iter().enumerate() {
            if !shared[side] {
                plan.push(edge(cell, kind));
            }
        }
    }
    plan
}

/// Cells stepped through from `from` to `to`, excluding `from` and ending exactly on `to`.
pub(super) fn walk_cells(from: CellPoint, to: CellPoint) -> Vec<CellPoint> {
    let delta = to - from;
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    let steps = ax.max(ay);
    let shallow = ax >= ay;
    let slope = match (steps, shallow) {
        (0, _) => 0.0,
        (_, true) => f64::from(ay) / f64::from(ax),
        (_, false) => f64::from(ax) / f64::from(ay),
    };

    let mut cells = Vec::with_capacity(usize::try_from(steps).unwrap_or_default());
    let mut deviation = 0.5;
    let (mut major, mut minor) = (0, 0);
    for _ in 0..steps {
        major += 1;
        deviation += slope;
        if deviation >= 1.0 {
            minor += 1;
            deviation -= 1.0;
        }
        let (x, y) = if shallow { (major, minor) } else { (minor, major) };
        cells.push(CellPoint::new(
            from.x + delta.x.signum() * x,
            from.y + delta.y.signum() * y,
        ));
    }
    if let Some(last) = cells.last_mut() {
        *last = to;
    }
    cells
}

fn cells_bounds(cells: &[Rect]) -> Rect {
    cells
        .iter()
        .fold(Rect::EMPTY, |acc, cell| acc.union(cell))
        .inflate(EngineConfig::BOUNDS_PADDING)
}
