use map_core::{
    Direction, Point, Rect, Region, SingleZone, Template, TemplateId, TemplateKind, ZoneId,
    ZonePoint,
};

const ZONE: ZoneId = ZoneId(7);
const CELL: i32 = 50;

fn place(kind: TemplateKind, radius: i32) -> Template {
    Template::new(TemplateId(1), kind)
        .with_zone(ZONE)
        .with_radius(radius)
}

fn zones() -> SingleZone {
    SingleZone::square(ZONE, CELL)
}

/// Cells of a `cols` x `rows` box starting at cell `(x0, y0)` that `area` covers.
fn covered_cells(area: &Region, x0: i32, y0: i32, cols: i32, rows: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for y in y0..y0 + rows {
        for x in x0..x0 + cols {
            let centre = Point::new(
                f64::from(x * CELL) + f64::from(CELL) / 2.0,
                f64::from(y * CELL) + f64::from(CELL) / 2.0,
            );
            if area.contains(centre) {
                cells.push((x, y));
            }
        }
    }
    cells
}

#[test]
fn radius_one_is_a_block_around_the_vertex() {
    let mut template = place(TemplateKind::Radius, 1);
    assert_eq!(
        template.area(&zones()),
        &Region::from_rect(Rect::new(-50, -50, 100, 100))
    );
}

#[test]
fn burst_two_spans_five_cells() {
    let mut template = place(TemplateKind::Burst, 2);
    let bounds = template.area(&zones()).bounds().unwrap();
    assert_eq!(
        (bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y),
        (-100.0, -100.0, 150.0, 150.0)
    );
    assert_eq!(template.area(&zones()).area(), 25.0 * 2500.0);
}

#[test]
fn east_cone_keeps_to_its_side_of_the_diagonal() {
    let mut template = place(
        TemplateKind::Cone {
            direction: Some(Direction::East),
        },
        2,
    );
    assert_eq!(
        template.area(&zones()),
        &Region::from_rect(Rect::new(0, -50, 100, 100))
    );

    let mut wide = place(
        TemplateKind::Cone {
            direction: Some(Direction::East),
        },
        6,
    );
    let cells = covered_cells(wide.area(&zones()), -8, -8, 16, 16);
    assert!(!cells.is_empty());
    for (x, y) in cells {
        // mirror the north-east half back into the south-east scan frame
        let scan_y = if y < 0 { -y - 1 } else { y };
        assert!(x >= 0, "cell ({x}, {y}) west of the vertex");
        assert!(scan_y <= x, "cell ({x}, {y}) has y > x");
    }
}

#[test]
fn loose_triangle_takes_its_whole_snapped_box() {
    let mut template = place(
        TemplateKind::Triangle {
            theta: 0.0,
            sensitivity: 0.0,
        },
        1,
    );
    assert_eq!(
        template.area(&zones()),
        &Region::from_rect(Rect::new(0, -50, 50, 100))
    );
}

#[test]
fn strict_triangle_takes_only_fully_covered_cells() {
    let radius = 4;
    let theta = 0.25;
    let mut template = place(
        TemplateKind::Triangle {
            theta,
            sensitivity: 100.0,
        },
        radius,
    );

    let half = 0.5_f64.atan2(1.0);
    let side = f64::from(radius * CELL) / half.cos();
    let apex = Point::new(0.0, 0.0);
    let left = Point::new(side * (theta + half).cos(), side * (theta + half).sin());
    let right = Point::new(side * (theta - half).cos(), side * (theta - half).sin());
    let inside = |p: Point| {
        let cross = |a: Point, b: Point| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        let signs = [cross(apex, right), cross(right, left), cross(left, apex)];
        signs.iter().all(|s| *s >= -1e-6) || signs.iter().all(|s| *s <= 1e-6)
    };

    let cells = covered_cells(template.area(&zones()), -2, -6, 10, 12);
    assert!(!cells.is_empty());
    for (x, y) in cells {
        let (x0, y0) = (f64::from(x * CELL), f64::from(y * CELL));
        let size = f64::from(CELL);
        for corner in [
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
        ] {
            assert!(inside(corner), "cell ({x}, {y}) sticks out of the triangle");
        }
    }
}

#[test]
fn templates_follow_their_vertex() {
    let mut template = place(TemplateKind::Radius, 2).with_vertex(ZonePoint::new(500, 250));
    let bounds = template.area(&zones()).bounds().unwrap();
    assert_eq!((bounds.min_x, bounds.min_y), (400.0, 150.0));
    assert_eq!(template.bounds(&zones()), Rect::new(390, 140, 220, 220));
}

#[test]
fn unknown_zone_draws_nothing() {
    let mut template = place(TemplateKind::Radius, 3);
    template.set_zone(Some(ZoneId(99)));
    assert!(template.area(&zones()).is_empty());
    assert!(template.border(&zones()).is_empty());
}
