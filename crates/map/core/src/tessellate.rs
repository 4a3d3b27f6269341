//! Curve flattening for the rasterizer.
//!
//! Boundaries arrive as move/line/quadratic/cubic/close segments in model space
//! (Y down). The tessellator samples every curve at a fixed number of evenly
//! spaced parameter values and emits polygon vertices in render space (Y up).

use crate::config::EngineConfig;
use crate::geometry::{BoundaryPath, PathSegment, Point};

/// What the caller intends to do with the flattened vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FlattenMode {
    /// Filled polygon: a duplicated closing vertex is dropped.
    Fill,
    /// Outline: a closed subpath ends on its starting vertex.
    Stroke,
}

/// One flattened subpath.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    /// Whether the subpath ended with an explicit close.
    pub closed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fixed-step curve flattener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveTessellator {
    points_per_curve: u32,
    flip_y: bool,
}

impl CurveTessellator {
    /// Render-space tessellator (Y flipped) with the default sample count.
    pub fn new() -> Self {
        Self {
            points_per_curve: EngineConfig::POINTS_PER_CURVE,
            flip_y: true,
        }
    }

    /// Keeps model-space coordinates; used when building regions from curves.
    pub fn model_space() -> Self {
        Self {
            flip_y: false,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_points_per_curve(mut self, points_per_curve: u32) -> Self {
        self.points_per_curve = points_per_curve.max(1);
        self
    }

    pub fn points_per_curve(&self) -> u32 {
        self.points_per_curve
    }

    /// Flattens `path` into interleaved `x, y` pairs, all subpaths concatenated.
    pub fn flatten(&self, path: &BoundaryPath, mode: FlattenMode) -> Vec<f32> {
        let mut out = Vec::new();
        self.flatten_into(path, mode, &mut out);
        out
    }

    /// Like [`flatten`](Self::flatten) but appends into a reusable buffer.
    pub fn flatten_into(&self, path: &BoundaryPath, mode: FlattenMode, out: &mut Vec<f32>) {
        for contour in self.contours(path, mode) {
            out.reserve(contour.points.len() * 2);
            for point in contour.points {
                out.push(point.x as f32);
                out.push(point.y as f32);
            }
        }
    }

    /// Flattens each subpath separately.
    pub fn contours(&self, path: &BoundaryPath, mode: FlattenMode) -> Vec<Contour> {
        let mut contours = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut cursor: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for segment in path.segments() {
            match *segment {
                PathSegment::MoveTo(p) => {
                    self.finish(&mut current, false, mode, &mut contours);
                    current.push(self.map(p));
                    cursor = Some(p);
                    subpath_start = Some(p);
                }
                PathSegment::LineTo(p) => {
                    // Segments before any move-to have no start point.
                    let Some(start) = cursor else { continue };
                    self.reopen(&mut current, start);
                    current.push(self.map(p));
                    cursor = Some(p);
                }
                PathSegment::QuadTo(control, end) => {
                    let Some(start) = cursor else { continue };
                    self.reopen(&mut current, start);
                    let n = self.points_per_curve;
                    for i in 1..=n {
                        let t = f64::from(i) / f64::from(n);
                        current.push(self.map(quadratic(start, control, end, t)));
                    }
                    cursor = Some(end);
                }
                PathSegment::CubicTo(c1, c2, end) => {
                    let Some(start) = cursor else { continue };
                    self.reopen(&mut current, start);
                    let n = self.points_per_curve;
                    for i in 1..=n {
                        let t = f64::from(i) / f64::from(n);
                        current.push(self.map(cubic(start, c1, c2, end, t)));
                    }
                    cursor = Some(end);
                }
                PathSegment::Close => {
                    self.finish(&mut current, true, mode, &mut contours);
                    cursor = subpath_start;
                }
            }
        }
        self.finish(&mut current, false, mode, &mut contours);
        contours
    }

    fn map(&self, p: Point) -> Point {
        if self.flip_y { Point::new(p.x, -p.y) } else { p }
    }

    fn reopen(&self, current: &mut Vec<Point>, start: Point) {
        if current.is_empty() {
            current.push(self.map(start));
        }
    }

    fn finish(
        &self,
        current: &mut Vec<Point>,
        closed: bool,
        mode: FlattenMode,
        contours: &mut Vec<Contour>,
    ) {
        let mut points = std::mem::take(current);
        if points.len() < 2 {
            return;
        }
        let first = points[0];
        let coincide = points
            .last()
            .is_some_and(|last| last.approx_eq(first, f64::EPSILON));
        match mode {
            FlattenMode::Fill if coincide => {
                points.pop();
            }
            FlattenMode::Stroke if closed && !coincide => points.push(first),
            _ => {}
        }
        contours.push(Contour { points, closed });
    }
}

impl Default for CurveTessellator {
    fn default() -> Self {
        Self::new()
    }
}

fn quadratic(p0: Point, c: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * p0.x + 2.0 * u * t * c.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * c.y + t * t * p1.y,
    )
}

fn cubic(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn square() -> BoundaryPath {
        let mut path = BoundaryPath::new();
        path.move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .line_to(0.0, 10.0)
            .close();
        path
    }

    #[test]
    fn closed_square_fill_and_stroke_vertex_counts() {
        let tess = CurveTessellator::new();
        assert_eq!(tess.flatten(&square(), FlattenMode::Fill).len() / 2, 4);
        assert_eq!(tess.flatten(&square(), FlattenMode::Stroke).len() / 2, 5);
    }

    #[test]
    fn explicit_return_to_start_is_dropped_for_fill_only() {
        let mut path = BoundaryPath::new();
        path.move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(0.0, 10.0)
            .line_to(0.0, 0.0)
            .close();
        let tess = CurveTessellator::new();
        assert_eq!(tess.contours(&path, FlattenMode::Fill)[0].len(), 3);
        // Stroke keeps the duplicate and does not add another.
        assert_eq!(tess.contours(&path, FlattenMode::Stroke)[0].len(), 4);
    }

    #[test]
    fn output_is_y_flipped() {
        let tess = CurveTessellator::new();
        let flat = tess.flatten(&square(), FlattenMode::Fill);
        // third vertex (10, 10) becomes (10, -10)
        assert_eq!(&flat[4..6], &[10.0, -10.0]);

        let model = CurveTessellator::model_space().flatten(&square(), FlattenMode::Fill);
        assert_eq!(&model[4..6], &[10.0, 10.0]);
    }

    #[test]
    fn curves_use_fixed_sample_count() {
        let mut path = BoundaryPath::new();
        path.move_to(0.0, 0.0).quad_to(5.0, 10.0, 10.0, 0.0);
        path.cubic_to(
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
            Point::new(0.0, 0.0),
        );
        let contours = CurveTessellator::model_space().contours(&path, FlattenMode::Stroke);
        // start + 10 quadratic samples + 10 cubic samples
        assert_eq!(contours[0].len(), 21);
        // quadratic midpoint: 0.25*0 + 0.5*10 + 0.25*0 = 5
        assert!(contours[0].points[5].approx_eq(Point::new(5.0, 5.0), 1e-9));
        assert!(contours[0].points[20].approx_eq(Point::new(0.0, 0.0), 1e-9));
    }

    #[test]
    fn multiple_subpaths_are_kept_apart() {
        let mut path = BoundaryPath::from_rect(Rect::new(0, 0, 10, 10));
        path.add_rect(Rect::new(20, 0, 10, 10));
        let contours = CurveTessellator::new().contours(&path, FlattenMode::Fill);
        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(|c| c.closed && c.len() == 4));
    }

    #[test]
    fn line_after_close_restarts_at_subpath_start() {
        let mut path = square();
        path.line_to(-10.0, 0.0);
        let contours = CurveTessellator::model_space().contours(&path, FlattenMode::Stroke);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[1].points[0], Point::new(0.0, 0.0));
        assert!(!contours[1].closed);
    }
}
