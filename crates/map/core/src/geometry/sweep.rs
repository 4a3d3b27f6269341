//! Scanline decomposition shared by polygon filling and region boolean operations.
//!
//! Every input boundary is reduced to non-horizontal edges tagged with an operand
//! index and a winding direction. The plane is cut into horizontal slabs at every
//! edge endpoint and every pairwise edge crossing, so inside a slab no two edges
//! swap order. Walking the edges of a slab left to right while accumulating the
//! per-operand winding counts yields the covered spans, which become trapezoids.

use super::point::Point;

/// Tolerance for coordinate comparisons in zone units.
pub(crate) const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Edge {
    top: Point,
    bottom: Point,
    operand: usize,
    winding: i32,
}

impl Edge {
    /// Directed edge `from -> to`; horizontal edges carry no winding and are dropped.
    pub(crate) fn directed(from: Point, to: Point, operand: usize) -> Option<Self> {
        if (from.y - to.y).abs() <= EPSILON {
            return None;
        }
        Some(if from.y < to.y {
            Self {
                top: from,
                bottom: to,
                operand,
                winding: 1,
            }
        } else {
            Self {
                top: to,
                bottom: from,
                operand,
                winding: -1,
            }
        })
    }

    /// Edge already ordered top to bottom with an explicit winding.
    pub(crate) fn oriented(top: Point, bottom: Point, operand: usize, winding: i32) -> Self {
        Self {
            top,
            bottom,
            operand,
            winding,
        }
    }

    fn x_at(&self, y: f64) -> f64 {
        let dy = self.bottom.y - self.top.y;
        if dy <= EPSILON {
            return self.top.x;
        }
        let t = ((y - self.top.y) / dy).clamp(0.0, 1.0);
        self.top.x + (self.bottom.x - self.top.x) * t
    }

    fn spans(&self, y0: f64, y1: f64) -> bool {
        self.top.y <= y0 + EPSILON && self.bottom.y >= y1 - EPSILON
    }
}

/// Horizontal slice of a trapezoid between two edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Span {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl Span {
    fn abuts(&self, next: &Span) -> bool {
        (self.top_right - next.top_left).abs() <= EPSILON
            && (self.bottom_right - next.bottom_left).abs() <= EPSILON
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Band {
    pub top: f64,
    pub bottom: f64,
    pub spans: Vec<Span>,
}

impl Band {
    fn height(&self) -> f64 {
        self.bottom - self.top
    }

    fn continues_into(&self, next: &Band) -> bool {
        if (next.top - self.bottom).abs() > EPSILON || self.spans.len() != next.spans.len() {
            return false;
        }
        let (h0, h1) = (self.height(), next.height());
        self.spans.iter().zip(&next.spans).all(|(a, b)| {
            let left = (a.bottom_left - b.top_left).abs() <= EPSILON
                && same_slope(a.top_left, a.bottom_left, h0, b.top_left, b.bottom_left, h1);
            let right = (a.bottom_right - b.top_right).abs() <= EPSILON
                && same_slope(a.top_right, a.bottom_right, h0, b.top_right, b.bottom_right, h1);
            left && right
        })
    }

    fn absorb(&mut self, next: Band) {
        self.bottom = next.bottom;
        for (span, lower) in self.spans.iter_mut().zip(next.spans) {
            span.bottom_left = lower.bottom_left;
            span.bottom_right = lower.bottom_right;
        }
    }
}

fn same_slope(t0: f64, b0: f64, h0: f64, t1: f64, b1: f64, h1: f64) -> bool {
    ((b0 - t0) / h0 - (b1 - t1) / h1).abs() <= EPSILON
}

fn sort_dedup(values: &mut Vec<f64>) {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|later, kept| (*later - *kept).abs() <= EPSILON);
}

/// Decomposes `edges` into bands of spans where `inside(winding counts)` holds.
pub(crate) fn sweep<F>(edges: &[Edge], inside: F) -> Vec<Band>
where
    F: Fn([i32; 2]) -> bool,
{
    let mut ys: Vec<f64> = edges
        .iter()
        .flat_map(|edge| [edge.top.y, edge.bottom.y])
        .collect();
    sort_dedup(&mut ys);

    let mut bands: Vec<Band> = Vec::new();
    let mut active: Vec<&Edge> = Vec::new();
    let mut cuts: Vec<f64> = Vec::new();

    for window in ys.windows(2) {
        let (y0, y1) = (window[0], window[1]);
        if y1 - y0 <= EPSILON {
            continue;
        }
        active.clear();
        active.extend(edges.iter().filter(|edge| edge.spans(y0, y1)));
        if active.is_empty() {
            continue;
        }

        cuts.clear();
        cuts.push(y0);
        cuts.push(y1);
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                let d0 = a.x_at(y0) - b.x_at(y0);
                let d1 = a.x_at(y1) - b.x_at(y1);
                let crosses = (d0 > EPSILON && d1 < -EPSILON) || (d0 < -EPSILON && d1 > EPSILON);
                if crosses {
                    let y = y0 + (y1 - y0) * d0 / (d0 - d1);
                    if y > y0 + EPSILON && y < y1 - EPSILON {
                        cuts.push(y);
                    }
                }
            }
        }
        sort_dedup(&mut cuts);

        for slab in cuts.windows(2) {
            if let Some(band) = build_band(&active, slab[0], slab[1], &inside) {
                match bands.last_mut() {
                    Some(last) if last.continues_into(&band) => last.absorb(band),
                    _ => bands.push(band),
                }
            }
        }
    }
    bands
}

fn build_band<F>(active: &[&Edge], y0: f64, y1: f64, inside: &F) -> Option<Band>
where
    F: Fn([i32; 2]) -> bool,
{
    if y1 - y0 <= EPSILON {
        return None;
    }
    let mid = (y0 + y1) * 0.5;
    let mut crossings: Vec<(f64, &Edge)> = active.iter().map(|e| (e.x_at(mid), *e)).collect();
    crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut counts = [0i32; 2];
    let mut open: Option<(f64, f64)> = None;
    let mut spans: Vec<Span> = Vec::new();

    for (_, edge) in crossings {
        let was_inside = inside(counts);
        counts[edge.operand] += edge.winding;
        let now_inside = inside(counts);
        let (top_x, bottom_x) = (edge.x_at(y0), edge.x_at(y1));

        if !was_inside && now_inside {
            open = Some((top_x, bottom_x));
        } else if was_inside
            && !now_inside
            && let Some((left_top, left_bottom)) = open.take()
        {
            if top_x - left_top <= EPSILON && bottom_x - left_bottom <= EPSILON {
                continue;
            }
            let span = Span {
                top_left: left_top,
                top_right: top_x,
                bottom_left: left_bottom,
                bottom_right: bottom_x,
            };
            match spans.last_mut() {
                Some(last) if last.abuts(&span) => {
                    last.top_right = span.top_right;
                    last.bottom_right = span.bottom_right;
                }
                _ => spans.push(span),
            }
        }
    }

    (!spans.is_empty()).then(|| Band {
        top: y0,
        bottom: y1,
        spans,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_edges(x: f64, y: f64, size: f64, operand: usize) -> Vec<Edge> {
        let corners = [
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ];
        (0..4)
            .filter_map(|i| Edge::directed(corners[i], corners[(i + 1) % 4], operand))
            .collect()
    }

    #[test]
    fn single_square_is_one_band() {
        let edges = square_edges(0.0, 0.0, 10.0, 0);
        let bands = sweep(&edges, |c| c[0] != 0);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].spans.len(), 1);
        assert_eq!(bands[0].spans[0].top_left, 0.0);
        assert_eq!(bands[0].spans[0].top_right, 10.0);
    }

    #[test]
    fn stacked_squares_merge_vertically() {
        let mut edges = square_edges(0.0, 0.0, 10.0, 0);
        edges.extend(square_edges(0.0, 10.0, 10.0, 0));
        let bands = sweep(&edges, |c| c[0] != 0);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].top, 0.0);
        assert_eq!(bands[0].bottom, 20.0);
    }

    #[test]
    fn crossing_edges_split_the_slab() {
        // Bow-tie: the two diagonals cross at y = 5.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        ];
        let edges: Vec<Edge> = (0..4)
            .filter_map(|i| Edge::directed(pts[i], pts[(i + 1) % 4], 0))
            .collect();
        let bands = sweep(&edges, |c| c[0] != 0);
        assert_eq!(bands.len(), 2);
        assert!((bands[0].bottom - 5.0).abs() < 1e-9);
    }
}
