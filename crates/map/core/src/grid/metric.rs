/// Distance between a cell and the origin cell, measured in whole cells.
///
/// Offsets are non-negative; callers mirror geometry into the other quadrants.
pub trait GridMetric: Send + Sync {
    fn distance(&self, dx: i32, dy: i32) -> i32;
}

/// Tabletop movement metric: every second diagonal step costs double.
///
/// `distance(0, 0)` is 1 because the origin cell itself already counts as the
/// first cell of the area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TabletopMetric;

impl GridMetric for TabletopMetric {
    fn distance(&self, dx: i32, dy: i32) -> i32 {
        if dx > dy {
            dx + dy / 2 + 1 + (dy & 1)
        } else {
            dy + dx / 2 + 1 + (dx & 1)
        }
    }
}

/// Square rings around the origin cell: `max(dx, dy)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChebyshevMetric;

impl GridMetric for ChebyshevMetric {
    fn distance(&self, dx: i32, dy: i32) -> i32 {
        dx.max(dy)
    }
}

pub static TABLETOP: TabletopMetric = TabletopMetric;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabletop_distances() {
        let m = TabletopMetric;
        assert_eq!(m.distance(0, 0), 1);
        assert_eq!(m.distance(1, 0), 2);
        assert_eq!(m.distance(1, 1), 3);
        assert_eq!(m.distance(2, 2), 4);
        assert_eq!(m.distance(3, 1), 5);
    }

    #[test]
    fn tabletop_is_symmetric() {
        let m = TabletopMetric;
        for a in 0..40 {
            for b in 0..40 {
                assert_eq!(m.distance(a, b), m.distance(b, a), "a={a} b={b}");
            }
        }
    }

    #[test]
    fn tabletop_never_decreases_along_an_axis() {
        let m = TabletopMetric;
        for a in 0..40 {
            for b in 0..40 {
                assert!(m.distance(a + 1, b) >= m.distance(a, b));
                assert!(m.distance(a, b + 1) >= m.distance(a, b));
            }
        }
    }

    #[test]
    fn chebyshev_is_max() {
        assert_eq!(ChebyshevMetric.distance(3, 5), 5);
        assert_eq!(ChebyshevMetric.distance(0, 0), 0);
    }
}
