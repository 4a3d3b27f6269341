use super::point::Point;
use super::rect::Rect;

/// One drawing command of a boundary description.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve: control point, end point.
    QuadTo(Point, Point),
    /// Cubic curve: two control points, end point.
    CubicTo(Point, Point, Point),
    Close,
}

/// Interior rule used when turning a boundary into a filled region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub(crate) fn is_inside(self, winding: i32) -> bool {
        match self {
            Self::NonZero => winding != 0,
            Self::EvenOdd => winding & 1 != 0,
        }
    }
}

/// Ordered list of segments describing one or more closed or open subpaths.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryPath {
    segments: Vec<PathSegment>,
}

impl BoundaryPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.segments
            .push(PathSegment::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) -> &mut Self {
        self.segments.push(PathSegment::CubicTo(c1, c2, end));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Appends a closed polygon subpath.
    pub fn add_polygon(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.segments.push(PathSegment::MoveTo(*first));
        self.segments
            .extend(rest.iter().map(|p| PathSegment::LineTo(*p)));
        self.segments.push(PathSegment::Close);
    }

    pub fn add_rect(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.add_polygon(&rect.corners());
        }
    }

    pub fn from_polygon(points: &[Point]) -> Self {
        let mut path = Self::with_capacity(points.len() + 1);
        path.add_polygon(points);
        path
    }

    pub fn from_rect(rect: Rect) -> Self {
        let mut path = Self::with_capacity(5);
        path.add_rect(rect);
        path
    }
}

impl FromIterator<PathSegment> for BoundaryPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Extend<PathSegment> for BoundaryPath {
    fn extend<T: IntoIterator<Item = PathSegment>>(&mut self, iter: T) {
        self.segments.extend(iter);
    }
}

/// Absolute area of a simple polygon via the shoelace sum.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice_area += p.x * q.y - q.x * p.y;
    }
    (twice_area * 0.5).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shoelace_area_of_rect_and_triangle() {
        let square = Rect::new(10, 10, 50, 50).corners();
        assert_eq!(polygon_area(&square), 2500.0);

        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ];
        assert_eq!(polygon_area(&triangle), 6.0);
    }

    #[test]
    fn polygon_subpath_is_closed() {
        let path = BoundaryPath::from_rect(Rect::new(0, 0, 1, 1));
        assert_eq!(path.len(), 5);
        assert_eq!(path.segments().last(), Some(&PathSegment::Close));
    }
}
