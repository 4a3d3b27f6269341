//! Boolean-combinable planar regions.
//!
//! A [`Region`] is stored as a stack of horizontal bands, each holding disjoint
//! trapezoidal spans ordered left to right. Rectilinear inputs (grid cells,
//! rectangles) stay exact; sloped inputs such as template triangles or light
//! polygons are kept to floating point precision.

use super::path::{BoundaryPath, FillRule};
use super::point::Point;
use super::rect::{Bounds, Rect};
use super::sweep::{Band, EPSILON, Edge, sweep};
use crate::tessellate::{CurveTessellator, FlattenMode};

/// Regions whose area falls below this many square units count as empty.
pub const AREA_EPSILON: f64 = 1e-6;

/// Boolean operator applied to two regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RegionOp {
    Union,
    Intersect,
    Subtract,
    Xor,
}

impl RegionOp {
    fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::Union => a || b,
            Self::Intersect => a && b,
            Self::Subtract => a && !b,
            Self::Xor => a != b,
        }
    }
}

/// One filled trapezoid of a region, with horizontal top and bottom sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoid {
    pub top: f64,
    pub bottom: f64,
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl Trapezoid {
    pub fn area(&self) -> f64 {
        let top = self.top_right - self.top_left;
        let bottom = self.bottom_right - self.bottom_left;
        (top + bottom) * 0.5 * (self.bottom - self.top)
    }

    /// Corners clockwise from top-left (Y down).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.top_left, self.top),
            Point::new(self.top_right, self.top),
            Point::new(self.bottom_right, self.bottom),
            Point::new(self.bottom_left, self.bottom),
        ]
    }
}

/// Planar point set supporting union, subtraction and intersection.
#[derive(Clone, Debug, Default)]
pub struct Region {
    bands: Vec<Band>,
}

impl Region {
    pub const fn empty() -> Self {
        Self { bands: Vec::new() }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::from_rects([rect])
    }

    /// Union of many rectangles in a single sweep.
    pub fn from_rects<I>(rects: I) -> Self
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut edges = Vec::new();
        for rect in rects.into_iter().filter(|r| !r.is_empty()) {
            let [tl, tr, br, bl] = rect.corners();
            edges.push(Edge::oriented(tl, bl, 0, 1));
            edges.push(Edge::oriented(tr, br, 0, -1));
        }
        Self::from_edges(&edges, |c| c[0] != 0)
    }

    /// Region enclosed by a closed polygon under `rule`.
    pub fn from_polygon(points: &[Point], rule: FillRule) -> Self {
        let mut edges = Vec::with_capacity(points.len());
        push_polygon_edges(points, 0, &mut edges);
        Self::from_edges(&edges, |c| rule.is_inside(c[0]))
    }

    /// Region enclosed by every subpath of `path`; open subpaths are closed implicitly.
    pub fn from_path(path: &BoundaryPath, rule: FillRule) -> Self {
        let contours = CurveTessellator::model_space().contours(path, FlattenMode::Fill);
        let mut edges = Vec::new();
        for contour in &contours {
            push_polygon_edges(&contour.points, 0, &mut edges);
        }
        Self::from_edges(&edges, |c| rule.is_inside(c[0]))
    }

    fn from_edges<F>(edges: &[Edge], inside: F) -> Self
    where
        F: Fn([i32; 2]) -> bool,
    {
        if edges.is_empty() {
            return Self::empty();
        }
        Self {
            bands: sweep(edges, inside),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty() || self.area() <= AREA_EPSILON
    }

    pub fn area(&self) -> f64 {
        self.trapezoids().map(|t| t.area()).sum()
    }

    pub fn trapezoids(&self) -> impl Iterator<Item = Trapezoid> + '_ {
        self.bands.iter().flat_map(|band| {
            band.spans.iter().map(move |span| Trapezoid {
                top: band.top,
                bottom: band.bottom,
                top_left: span.top_left,
                top_right: span.top_right,
                bottom_left: span.bottom_left,
                bottom_right: span.bottom_right,
            })
        })
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.trapezoids().flat_map(|t| t.corners()))
    }

    /// Point-in-region test; edges are half-open (left/top inclusive).
    pub fn contains(&self, point: Point) -> bool {
        self.bands
            .iter()
            .filter(|band| point.y >= band.top && point.y < band.bottom)
            .any(|band| {
                let t = (point.y - band.top) / (band.bottom - band.top);
                band.spans.iter().any(|span| {
                    let left = span.top_left + (span.bottom_left - span.top_left) * t;
                    let right = span.top_right + (span.bottom_right - span.top_right) * t;
                    point.x >= left && point.x < right
                })
            })
    }

    pub fn combine(&self, other: &Region, op: RegionOp) -> Region {
        match op {
            RegionOp::Union | RegionOp::Xor if other.bands.is_empty() => return self.clone(),
            RegionOp::Union | RegionOp::Xor if self.bands.is_empty() => return other.clone(),
            RegionOp::Intersect if self.bands.is_empty() || other.bands.is_empty() => {
                return Region::empty();
            }
            RegionOp::Subtract if self.bands.is_empty() => return Region::empty(),
            RegionOp::Subtract if other.bands.is_empty() => return self.clone(),
            _ => {}
        }
        let mut edges = Vec::new();
        self.push_edges(0, &mut edges);
        other.push_edges(1, &mut edges);
        Self::from_edges(&edges, |c| op.apply(c[0] != 0, c[1] != 0))
    }

    pub fn union(&self, other: &Region) -> Region {
        self.combine(other, RegionOp::Union)
    }

    pub fn intersect(&self, other: &Region) -> Region {
        self.combine(other, RegionOp::Intersect)
    }

    pub fn subtract(&self, other: &Region) -> Region {
        self.combine(other, RegionOp::Subtract)
    }

    pub fn xor(&self, other: &Region) -> Region {
        self.combine(other, RegionOp::Xor)
    }

    /// In-place union.
    pub fn add(&mut self, other: &Region) {
        if other.bands.is_empty() {
            return;
        }
        *self = self.union(other);
    }

    /// True when every point of `other` lies inside `self`.
    pub fn contains_region(&self, other: &Region) -> bool {
        other.subtract(self).is_empty()
    }

    /// True when both regions enclose the same point set.
    pub fn same_area(&self, other: &Region) -> bool {
        self.xor(other).is_empty()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Region {
        let mut moved = self.clone();
        for band in &mut moved.bands {
            band.top += dy;
            band.bottom += dy;
            for span in &mut band.spans {
                span.top_left += dx;
                span.top_right += dx;
                span.bottom_left += dx;
                span.bottom_right += dx;
            }
        }
        moved
    }

    /// Boundary as one closed subpath per trapezoid, suitable for filling.
    pub fn to_path(&self) -> BoundaryPath {
        let mut path = BoundaryPath::new();
        for trapezoid in self.trapezoids() {
            let corners = trapezoid.corners();
            // Triangular pieces collapse one side to a point.
            let mut points: Vec<Point> = Vec::with_capacity(4);
            for corner in corners {
                if points.last().is_none_or(|last| !last.approx_eq(corner, EPSILON)) {
                    points.push(corner);
                }
            }
            if points.len() > 3 && points[0].approx_eq(points[points.len() - 1], EPSILON) {
                points.pop();
            }
            path.add_polygon(&points);
        }
        path
    }

    fn push_edges(&self, operand: usize, edges: &mut Vec<Edge>) {
        for trapezoid in self.trapezoids() {
            let [tl, tr, br, bl] = trapezoid.corners();
            edges.push(Edge::oriented(tl, bl, operand, 1));
            edges.push(Edge::oriented(tr, br, operand, -1));
        }
    }
}

fn push_polygon_edges(points: &[Point], operand: usize, edges: &mut Vec<Edge>) {
    if points.len() < 3 {
        return;
    }
    for (i, from) in points.iter().enumerate() {
        let to = points[(i + 1) % points.len()];
        if let Some(edge) = Edge::directed(*from, to, operand) {
            edges.push(edge);
        }
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.same_area(other)
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl FromIterator<Rect> for Region {
    fn from_iter<T: IntoIterator<Item = Rect>>(iter: T) -> Self {
        Self::from_rects(iter)
    }
}
