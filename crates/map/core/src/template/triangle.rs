//! Triangle templates: a continuous isosceles triangle quantized to grid cells.
//!
//! The triangle is as wide at its base as it is long. Cells are found by
//! adaptive subdivision of the triangle's grid-snapped bounding box: fully
//! covered candidates are accepted whole, untouched ones are dropped, and
//! partially covered ones are split along grid lines until they are single
//! cells, which are then accepted if their uncovered fraction is small enough.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use super::TemplateShape;
use super::border::{CellFrame, cell_silhouette};
use super::radius::centered_bounds;
use crate::geometry::{Bounds, CellPoint, Point, Rect, Region, ZonePoint, polygon_area};

/// Relative slack when deciding whether a candidate is fully covered or untouched.
const COVERAGE_EPSILON: f64 = 1e-9;

/// Slack for snapping near-integral floating corners onto the grid.
const SNAP_EPSILON: f64 = 1e-9;

/// Half-angle at the apex: the base is as wide as the triangle is long.
pub(super) fn cone_angle() -> f64 {
    0.5_f64.atan2(1.0)
}

/// Clamps a coverage percentage into `[0, 100]`; NaN counts as zero.
pub(super) fn clamp_sensitivity(sensitivity: f64) -> f64 {
    if sensitivity.is_nan() {
        0.0
    } else {
        sensitivity.clamp(0.0, 100.0)
    }
}

/// Apex plus the two base corners, in zone coordinates.
pub(super) fn triangle_vertices(
    vertex: ZonePoint,
    radius: i32,
    cell_size: i32,
    theta: f64,
) -> [Point; 3] {
    let half = cone_angle();
    let side = f64::from(radius) * f64::from(cell_size) / half.cos();
    let apex = vertex.to_point();
    let corner = |angle: f64| Point::new(apex.x + side * angle.cos(), apex.y + side * angle.sin());
    [apex, corner(theta + half), corner(theta - half)]
}

pub(super) fn build_triangle(
    frame: CellFrame,
    radius: i32,
    theta: f64,
    sensitivity: f64,
) -> TemplateShape {
    if radius <= 0 || !theta.is_finite() {
        return TemplateShape::empty();
    }
    let g = frame.cell_size();
    let triangle = triangle_vertices(frame.vertex(), radius, g, theta);
    let Some(bbox) = Bounds::from_points(triangle) else {
        return TemplateShape::empty();
    };

    let cell_area = f64::from(g) * f64::from(g);
    let threshold = cell_area * (100.0 - clamp_sensitivity(sensitivity)) / 100.0;

    let mut cells = BTreeSet::new();
    let mut queue = BinaryHeap::new();
    queue.push(Candidate(snap_to_grid(bbox, g)));
    while let Some(Candidate(rect)) = queue.pop() {
        let rect_area = rect.area() as f64;
        let covered = covered_area(&triangle, rect);
        let uncovered = rect_area - covered;
        let tolerance = rect_area * COVERAGE_EPSILON;

        if uncovered <= tolerance {
            insert_cells(rect, g, &mut cells);
        } else if covered > tolerance {
            if rect.width > g {
                split_columns(rect, g, &mut queue);
            } else if rect.height > g {
                split_rows(rect, g, &mut queue);
            } else if uncovered < threshold {
                insert_cells(rect, g, &mut cells);
            }
        }
    }

    let grid_frame = CellFrame::new(ZonePoint::ORIGIN, g);
    TemplateShape {
        area: Region::from_rects(cells.iter().map(|c| grid_frame.signed_cell(*c))),
        border: cell_silhouette(&cells, &grid_frame),
        bounds: centered_bounds(frame, radius),
        quadrant: None,
    }
}

/// Smallest grid-aligned rectangle holding `bounds`.
fn snap_to_grid(bounds: Bounds, g: i32) -> Rect {
    let floor_to = |v: f64| ((v + SNAP_EPSILON).floor() as i32).div_euclid(g) * g;
    let ceil_to = |v: f64| -((-((v - SNAP_EPSILON).ceil() as i32)).div_euclid(g)) * g;
    let x = floor_to(bounds.min_x);
    let y = floor_to(bounds.min_y);
    let right = ceil_to(bounds.max_x).max(x + g);
    let bottom = ceil_to(bounds.max_y).max(y + g);
    Rect::new(x, y, right - x, bottom - y)
}

fn insert_cells(rect: Rect, g: i32, cells: &mut BTreeSet<CellPoint>) {
    for y in rect.y.div_euclid(g)..rect.bottom().div_euclid(g) {
        for x in rect.x.div_euclid(g)..rect.right().div_euclid(g) {
            cells.insert(CellPoint::new(x, y));
        }
    }
}

/// Splits at the grid line nearest the middle column; taller halves are split into rows too.
fn split_columns(rect: Rect, g: i32, queue: &mut BinaryHeap<Candidate>) {
    let mid = rect.width / 2;
    let mid = mid - mid % g;
    let left = Rect::new(rect.x, rect.y, mid, rect.height);
    let right = Rect::new(rect.x + mid, rect.y, rect.width - mid, rect.height);
    if rect.height > g {
        split_rows(left, g, queue);
        split_rows(right, g, queue);
    } else {
        queue.push(Candidate(left));
        queue.push(Candidate(right));
    }
}

fn split_rows(rect: Rect, g: i32, queue: &mut BinaryHeap<Candidate>) {
    let mid = rect.height / 2;
    let mid = mid - mid % g;
    queue.push(Candidate(Rect::new(rect.x, rect.y, rect.width, mid)));
    queue.push(Candidate(Rect::new(rect.x, rect.y + mid, rect.width, rect.height - mid)));
}

/// Area of `rect` covered by `triangle`.
pub(super) fn covered_area(triangle: &[Point; 3], rect: Rect) -> f64 {
    let mut clipped = triangle.to_vec();
    let edges = [
        (Axis::X, f64::from(rect.x), true),
        (Axis::X, f64::from(rect.right()), false),
        (Axis::Y, f64::from(rect.y), true),
        (Axis::Y, f64::from(rect.bottom()), false),
    ];
    for (axis, bound, keep_above) in edges {
        clipped = clip(&clipped, axis, bound, keep_above);
        if clipped.is_empty() {
            return 0.0;
        }
    }
    polygon_area(&clipped)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

/// Sutherland-Hodgman step against one axis-aligned half-plane.
fn clip(points: &[Point], axis: Axis, bound: f64, keep_above: bool) -> Vec<Point> {
    let inside = |p: Point| {
        if keep_above {
            axis.of(p) >= bound
        } else {
            axis.of(p) <= bound
        }
    };
    let crossing = |a: Point, b: Point| {
        let t = (bound - axis.of(a)) / (axis.of(b) - axis.of(a));
        a.lerp(b, t)
    };

    let mut out = Vec::with_capacity(points.len() + 2);
    for (i, &current) in points.iter().enumerate() {
        let previous = points[(i + points.len() - 1) % points.len()];
        match (inside(previous), inside(current)) {
            (true, true) => out.push(current),
            (true, false) => out.push(crossing(previous, current)),
            (false, true) => {
                out.push(crossing(previous, current));
                out.push(current);
            }
            (false, false) => {}
        }
    }
    out
}

/// Subdivision candidate; the heap pops the smallest area first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate(Rect);

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .area()
            .cmp(&self.0.area())
            .then_with(|| {
                let key = |r: &Rect| (r.y, r.x, r.height, r.width);
                key(&other.0).cmp(&key(&self.0))
            })
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
