use map_core::{
    BoundaryPath, CellPoint, CurveTessellator, Direction, ExposedAreaTracker, FlattenMode,
    FogPolicy, GridMetric, LightEntry, LineSpec, Rect, Region, SingleZone, TABLETOP, Template,
    TemplateId, TemplateKind, TokenId, ViewContext, VisibilityCompositor, VisibilityInputs, ZoneId,
    ZonePoint,
};

const ZONE: ZoneId = ZoneId(1);

fn zones() -> SingleZone {
    SingleZone::square(ZONE, 50)
}

fn area(kind: TemplateKind, radius: i32) -> Region {
    let mut template = Template::new(TemplateId(1), kind)
        .with_zone(ZONE)
        .with_vertex(ZonePoint::new(200, 200))
        .with_radius(radius);
    template.area(&zones()).clone()
}

fn growing_kinds() -> Vec<TemplateKind> {
    vec![
        TemplateKind::Radius,
        TemplateKind::RadiusCell,
        TemplateKind::Cone {
            direction: Some(Direction::SouthWest),
        },
        TemplateKind::Cone {
            direction: Some(Direction::North),
        },
        TemplateKind::Burst,
        TemplateKind::Blast {
            control: CellPoint::new(1, 0),
        },
        TemplateKind::Line(LineSpec {
            path_vertex: Some(ZonePoint::new(900, 550)),
            ..LineSpec::default()
        }),
        TemplateKind::LineCell {
            path_vertex: Some(ZonePoint::new(-400, 450)),
        },
        TemplateKind::Triangle {
            theta: 0.3,
            sensitivity: 50.0,
        },
    ]
}

#[test]
fn metric_is_symmetric() {
    for dx in 0..25 {
        for dy in 0..25 {
            assert_eq!(TABLETOP.distance(dx, dy), TABLETOP.distance(dy, dx), "({dx}, {dy})");
        }
    }
}

#[test]
fn every_variant_grows_with_its_radius() {
    for kind in growing_kinds() {
        let mut previous = Region::empty();
        for radius in 1..=6 {
            let current = area(kind.clone(), radius);
            assert!(
                current.contains_region(&previous),
                "{:?} shrank going to radius {radius}",
                kind.tag()
            );
            previous = current;
        }
        assert!(!previous.is_empty(), "{:?} never covered anything", kind.tag());
    }
}

#[test]
fn cones_stay_inside_the_radius() {
    for radius in 1..=7 {
        let full = area(TemplateKind::Radius, radius);
        for direction in Direction::ORDER {
            let cone = area(
                TemplateKind::Cone {
                    direction: Some(direction),
                },
                radius,
            );
            assert!(full.contains_region(&cone), "{direction} at radius {radius}");
        }
    }
}

#[test]
fn tessellated_square_closes_only_for_stroke() {
    let square = Region::from_rect(Rect::new(0, 0, 50, 50)).to_path();
    let tess = CurveTessellator::new();
    assert_eq!(tess.flatten(&square, FlattenMode::Fill).len(), 8);
    let stroke = tess.flatten(&square, FlattenMode::Stroke);
    assert_eq!(stroke.len(), 10);
    assert_eq!(stroke[..2], stroke[8..]);
}

#[test]
fn curved_boundaries_flatten_to_the_configured_sample_count() {
    let mut path = BoundaryPath::new();
    path.move_to(0.0, 0.0).quad_to(25.0, 50.0, 50.0, 0.0).close();
    let tess = CurveTessellator::new().with_points_per_curve(4);
    // start + 4 samples, the last of which is the end point
    assert_eq!(tess.flatten(&path, FlattenMode::Fill).len() / 2, 5);
}

#[test]
fn wall_radius_tracks_its_path() {
    let mut wall = Template::new(
        TemplateId(9),
        TemplateKind::Wall {
            path: vec![CellPoint::ORIGIN, CellPoint::new(1, 0), CellPoint::new(2, 0)],
        },
    )
    .with_zone(ZONE);
    assert_eq!(wall.radius(), 3);

    wall.set_radius(20);
    assert_eq!(wall.radius(), 3);

    wall.extend_wall(CellPoint::new(2, 2));
    assert_eq!(wall.radius(), 5);
    assert_eq!(wall.area(&zones()).area(), 5.0 * 2500.0);
}

#[test]
fn fog_mask_never_loses_zone_history() {
    let mut exposure = ExposedAreaTracker::new();
    exposure.expose_zone(&Region::from_rect(Rect::new(0, 0, 200, 200)));
    exposure.expose_token(TokenId(4), &Region::from_rect(Rect::new(300, 0, 100, 100)));
    let visible = Region::from_rect(Rect::new(150, 0, 200, 200));
    let lights = [LightEntry::light(Region::from_rect(Rect::new(0, 0, 50, 50)), 3)];

    let views = [
        ViewContext::gm(),
        ViewContext::player([]),
        ViewContext::player([TokenId(4)]),
        ViewContext::player([TokenId(4), TokenId(5)]),
    ];
    for individual_fog in [false, true] {
        for use_vision in [false, true] {
            let policy = FogPolicy {
                individual_fog,
                use_vision,
                ..FogPolicy::default()
            };
            let inputs = VisibilityInputs {
                exposure: &exposure,
                visible: &visible,
                lights: &lights,
                policy: &policy,
            };
            for view in &views {
                let mask = VisibilityCompositor::fog_mask(view, &inputs);
                assert!(mask.exposed.contains_region(exposure.zone_history()));
                assert!(mask.exposed.contains_region(&mask.clear));
                assert!(mask.exposed.contains_region(&mask.dimmed));
            }
        }
    }
}

#[test]
fn revealing_more_never_shrinks_the_mask() {
    let policy = FogPolicy {
        individual_fog: true,
        ..FogPolicy::default()
    };
    let view = ViewContext::player([TokenId(1)]);
    let visible = Region::empty();
    let mut exposure = ExposedAreaTracker::new();
    let mut previous = Region::empty();

    for step in 0..5 {
        let area = Region::from_rect(Rect::new(step * 40, step * 10, 60, 60));
        if step % 2 == 0 {
            exposure.expose_zone(&area);
        } else {
            exposure.expose_token(TokenId(1), &area);
        }
        let inputs = VisibilityInputs {
            exposure: &exposure,
            visible: &visible,
            lights: &[],
            policy: &policy,
        };
        let mask = VisibilityCompositor::fog_mask(&view, &inputs);
        assert!(mask.exposed.contains_region(&previous));
        previous = mask.exposed;
    }
}
