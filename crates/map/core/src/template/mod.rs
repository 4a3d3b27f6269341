//! Area-of-effect templates.
//!
//! A [`Template`] is a closed set of shape variants sharing a vertex and a
//! radius. Geometry is built on demand by [`build_shape`] and memoized until
//! one of the template's own parameters, or its zone's grid, changes.
mod blast;
mod border;
mod burst;
mod cache;
mod cone;
mod dto;
mod line;
mod paint;
mod radius;
mod triangle;

use std::fmt;

pub use border::{BorderPlan, BorderSegment, Orientation};
pub use dto::{TEMPLATE_DTO_VERSION, TemplateDto, TemplateKindTag};
pub use paint::{Painter, RecordingPainter};

use crate::config::EngineConfig;
use crate::geometry::{CellPoint, Rect, Region, ZonePoint};
use crate::grid::{Direction, GridMetric, GridSpec, Quadrant, TABLETOP, ZoneId, ZoneOracle};
use border::CellFrame;
use cache::ShapeCache;

/// Unique identifier for a template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template#{}", self.0)
    }
}

/// Drawing layer a template lives on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layer {
    Token,
    Gm,
    #[default]
    Object,
    Background,
}

/// Parameters every variant shares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateParams {
    pub vertex: ZonePoint,
    /// Radius in cells; `0` means the template has not been sized yet.
    pub radius: i32,
}

/// Options of a [`TemplateKind::Line`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSpec {
    /// Point the line is aimed at; no target means no line.
    pub path_vertex: Option<ZonePoint>,
    /// Draw both cells when the line passes exactly through a cell corner.
    pub double_wide: bool,
    /// Which side cell a single-width line takes through a corner.
    pub mouse_slope_greater: bool,
}

/// Variant payloads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateKind {
    /// Cells around a grid intersection.
    Radius,
    /// Cells around a centre cell.
    RadiusCell,
    Cone {
        direction: Option<Direction>,
    },
    Burst,
    Blast {
        /// Control cell relative to the vertex cell.
        control: CellPoint,
    },
    Line(LineSpec),
    LineCell {
        path_vertex: Option<ZonePoint>,
    },
    Wall {
        /// Cells relative to the vertex cell, in drawing order.
        path: Vec<CellPoint>,
    },
    Triangle {
        /// Aim angle in radians, measured from the +x axis toward +y.
        theta: f64,
        /// Percentage of a cell the triangle must cover for the cell to count.
        sensitivity: f64,
    },
}

impl TemplateKind {
    pub fn tag(&self) -> TemplateKindTag {
        match self {
            Self::Radius => TemplateKindTag::Radius,
            Self::RadiusCell => TemplateKindTag::RadiusCell,
            Self::Cone { .. } => TemplateKindTag::Cone,
            Self::Burst => TemplateKindTag::Burst,
            Self::Blast { .. } => TemplateKindTag::Blast,
            Self::Line(_) => TemplateKindTag::Line,
            Self::LineCell { .. } => TemplateKindTag::LineCell,
            Self::Wall { .. } => TemplateKindTag::Wall,
            Self::Triangle { .. } => TemplateKindTag::Triangle,
        }
    }

    /// Default payload for a variant.
    pub fn from_tag(tag: TemplateKindTag) -> Self {
        match tag {
            TemplateKindTag::Radius => Self::Radius,
            TemplateKindTag::RadiusCell => Self::RadiusCell,
            TemplateKindTag::Cone => Self::Cone { direction: None },
            TemplateKindTag::Burst => Self::Burst,
            TemplateKindTag::Blast => Self::Blast {
                control: CellPoint::ORIGIN,
            },
            TemplateKindTag::Line => Self::Line(LineSpec::default()),
            TemplateKindTag::LineCell => Self::LineCell { path_vertex: None },
            TemplateKindTag::Wall => Self::Wall { path: Vec::new() },
            TemplateKindTag::Triangle => Self::Triangle {
                theta: 0.0,
                sensitivity: 0.0,
            },
        }
    }
}

/// Built geometry of a template.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateShape {
    /// Covered cells.
    pub area: Region,
    /// Outline strokes.
    pub border: BorderPlan,
    /// Repaint box, padded for stroke width.
    pub bounds: Rect,
    /// Quadrant a line was mirrored into.
    pub quadrant: Option<Quadrant>,
}

impl TemplateShape {
    pub const fn empty() -> Self {
        Self {
            area: Region::empty(),
            border: BorderPlan::new(),
            bounds: Rect::EMPTY,
            quadrant: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_empty() && self.border.is_empty()
    }
}

/// A placed area-of-effect template.
#[derive(Clone, Debug)]
pub struct Template {
    id: TemplateId,
    zone: Option<ZoneId>,
    name: Option<String>,
    layer: Layer,
    params: TemplateParams,
    kind: TemplateKind,
    cache: ShapeCache,
}

/// Stores `value` in `slot`, reporting whether anything changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl Template {
    pub fn new(id: TemplateId, kind: TemplateKind) -> Self {
        Self {
            id,
            zone: None,
            name: None,
            layer: Layer::default(),
            params: TemplateParams::default(),
            kind,
            cache: ShapeCache::default(),
        }
    }

    #[must_use]
    pub fn with_zone(mut self, zone: ZoneId) -> Self {
        self.set_zone(Some(zone));
        self
    }

    #[must_use]
    pub fn with_vertex(mut self, vertex: ZonePoint) -> Self {
        self.set_vertex(vertex);
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.set_radius(radius);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn zone(&self) -> Option<ZoneId> {
        self.zone
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    pub fn params(&self) -> TemplateParams {
        self.params
    }

    pub fn vertex(&self) -> ZonePoint {
        self.params.vertex
    }

    /// Radius in cells. Walls report their path length.
    pub fn radius(&self) -> i32 {
        match &self.kind {
            TemplateKind::Wall { path } => i32::try_from(path.len()).unwrap_or(i32::MAX),
            _ => self.params.radius,
        }
    }

    /// Times the shape has been rebuilt; stays put while parameters are unchanged.
    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuilds()
    }

    pub fn set_zone(&mut self, zone: Option<ZoneId>) {
        if replace(&mut self.zone, zone) {
            self.cache.invalidate();
        }
    }

    pub fn set_vertex(&mut self, vertex: ZonePoint) {
        if replace(&mut self.params.vertex, vertex) {
            self.cache.invalidate();
        }
    }

    /// Clamped into the allowed range; walls ignore this.
    pub fn set_radius(&mut self, radius: i32) {
        if matches!(self.kind, TemplateKind::Wall { .. }) {
            return;
        }
        if replace(&mut self.params.radius, EngineConfig::clamp_radius(radius)) {
            self.cache.invalidate();
        }
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) {
        if let TemplateKind::Cone { direction: slot } = &mut self.kind
            && replace(slot, direction)
        {
            self.cache.invalidate();
        }
    }

    /// Points the template at a zone point: cones snap to a compass direction,
    /// triangles take the exact angle and lines take the point as their target.
    pub fn aim_at(&mut self, point: ZonePoint) {
        let vertex = self.params.vertex;
        let changed = match &mut self.kind {
            TemplateKind::Cone { direction } => {
                replace(direction, Some(Direction::toward(vertex, point)))
            }
            TemplateKind::Triangle { theta, .. } => {
                if point == vertex {
                    return;
                }
                let delta = point - vertex;
                replace(theta, f64::from(delta.y).atan2(f64::from(delta.x)))
            }
            TemplateKind::Line(spec) => replace(&mut spec.path_vertex, Some(point)),
            TemplateKind::LineCell { path_vertex } => replace(path_vertex, Some(point)),
            _ => false,
        };
        if changed {
            self.cache.invalidate();
        }
    }

    pub fn set_path_vertex(&mut self, target: Option<ZonePoint>) {
        let changed = match &mut self.kind {
            TemplateKind::Line(spec) => replace(&mut spec.path_vertex, target),
            TemplateKind::LineCell { path_vertex } => replace(path_vertex, target),
            _ => false,
        };
        if changed {
            self.cache.invalidate();
        }
    }

    pub fn set_line_options(&mut self, double_wide: bool, mouse_slope_greater: bool) {
        if let TemplateKind::Line(spec) = &mut self.kind {
            let wide = replace(&mut spec.double_wide, double_wide);
            let slope = replace(&mut spec.mouse_slope_greater, mouse_slope_greater);
            if wide || slope {
                self.cache.invalidate();
            }
        }
    }

    pub fn set_theta(&mut self, theta: f64) {
        if let TemplateKind::Triangle { theta: slot, .. } = &mut self.kind
            && replace(slot, theta)
        {
            self.cache.invalidate();
        }
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        if let TemplateKind::Triangle {
            sensitivity: slot, ..
        } = &mut self.kind
            && replace(slot, triangle::clamp_sensitivity(sensitivity))
        {
            self.cache.invalidate();
        }
    }

    /// Moves a blast's control cell; the radius follows the control cell's reach.
    pub fn set_control_cell(&mut self, cell: CellPoint) {
        let TemplateKind::Blast { control } = &mut self.kind else {
            return;
        };
        let moved = replace(control, cell);
        let reach = blast::extent(cell.x).max(blast::extent(cell.y));
        let resized = replace(&mut self.params.radius, EngineConfig::clamp_radius(reach));
        if moved || resized {
            self.cache.invalidate();
        }
    }

    /// Extends a wall to `cell` (relative to the vertex cell), stepping through
    /// the cells in between.
    pub fn extend_wall(&mut self, cell: CellPoint) {
        let TemplateKind::Wall { path } = &mut self.kind else {
            return;
        };
        let Some(&last) = path.last() else {
            path.push(CellPoint::ORIGIN);
            path.extend(line::walk_cells(CellPoint::ORIGIN, cell));
            self.cache.invalidate();
            return;
        };
        if last == cell {
            return;
        }
        path.extend(line::walk_cells(last, cell));
        self.cache.invalidate();
    }

    /// Current shape, rebuilt only if a parameter or the zone grid changed.
    pub fn shape(&mut self, zones: &dyn ZoneOracle) -> &TemplateShape {
        let grid = self
            .zone
            .and_then(|zone| zones.grid(zone))
            .filter(GridSpec::is_usable);
        let radius = self.radius();
        let Self {
            zone,
            params,
            kind,
            cache,
            ..
        } = self;
        cache.get_or_build(grid, |grid, path| {
            let metric: &dyn GridMetric = match zone {
                Some(zone) => zones.metric(*zone),
                None => &TABLETOP,
            };
            build_shape(kind, params.vertex, radius, grid, metric, path)
        })
    }

    pub fn area(&mut self, zones: &dyn ZoneOracle) -> &Region {
        &self.shape(zones).area
    }

    pub fn border(&mut self, zones: &dyn ZoneOracle) -> &BorderPlan {
        &self.shape(zones).border
    }

    pub fn bounds(&mut self, zones: &dyn ZoneOracle) -> Rect {
        self.shape(zones).bounds
    }

    /// Derived cell path of line-like templates.
    ///
    /// Lines report cells in the south-east frame of their quadrant; line-cell
    /// and wall templates report signed offsets from the vertex cell.
    pub fn path(&mut self, zones: &dyn ZoneOracle) -> &[CellPoint] {
        self.shape(zones);
        self.cache.path()
    }

    /// Fills the area, then strokes the border, each only if requested.
    pub fn paint(
        &mut self,
        zones: &dyn ZoneOracle,
        border: bool,
        area: bool,
        painter: &mut dyn Painter,
    ) {
        let shape = self.shape(zones);
        if area && !shape.area.is_empty() {
            painter.fill_region(&shape.area);
        }
        if border {
            for segment in shape.border.iter() {
                painter.stroke_segment(segment);
            }
        }
    }
}

/// One geometry routine per variant.
pub fn build_shape(
    kind: &TemplateKind,
    vertex: ZonePoint,
    radius: i32,
    grid: GridSpec,
    metric: &dyn GridMetric,
    path: &mut Vec<CellPoint>,
) -> TemplateShape {
    path.clear();
    if radius <= 0 || !grid.is_usable() {
        return TemplateShape::empty();
    }
    let frame = CellFrame::new(vertex, grid.cell_size);
    match kind {
        TemplateKind::Radius => radius::build_radius(frame, radius, metric),
        TemplateKind::RadiusCell => radius::build_radius_cell(frame, radius, metric),
        TemplateKind::Cone {
            direction: Some(direction),
        } => cone::build_cone(frame, radius, *direction, metric),
        TemplateKind::Cone { direction: None } => TemplateShape::empty(),
        TemplateKind::Burst => burst::build_burst(frame, radius),
        TemplateKind::Blast { control } => blast::build_blast(frame, radius, *control),
        TemplateKind::Line(spec) => line::build_line(frame, radius, spec, metric, path),
        TemplateKind::LineCell { path_vertex } => {
            line::build_line_cell(frame, radius, *path_vertex, metric, path)
        }
        TemplateKind::Wall { path: cells } => line::build_wall(frame, cells, path),
        TemplateKind::Triangle { theta, sensitivity } => {
            triangle::build_triangle(frame, radius, *theta, *sensitivity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SingleZone;

    const ZONE: ZoneId = ZoneId(1);

    fn zones() -> SingleZone {
        SingleZone::square(ZONE, 50)
    }

    fn placed(kind: TemplateKind) -> Template {
        Template::new(TemplateId(7), kind)
            .with_zone(ZONE)
            .with_radius(2)
    }

    #[test]
    fn shape_is_memoized_until_a_parameter_changes() {
        let zones = zones();
        let mut template = placed(TemplateKind::Radius);
        template.area(&zones);
        template.border(&zones);
        template.bounds(&zones);
        assert_eq!(template.rebuild_count(), 1);

        template.set_radius(2);
        template.set_vertex(ZonePoint::ORIGIN);
        template.area(&zones);
        assert_eq!(template.rebuild_count(), 1);

        template.set_radius(3);
        template.area(&zones);
        assert_eq!(template.rebuild_count(), 2);
    }

    #[test]
    fn missing_zone_gives_an_empty_shape() {
        let zones = zones();
        let mut template = placed(TemplateKind::Burst).with_zone(ZoneId(99));
        assert!(template.shape(&zones).is_empty());

        template.set_zone(Some(ZONE));
        assert!(!template.area(&zones).is_empty());
    }

    #[test]
    fn oversized_grids_give_an_empty_shape() {
        let huge = SingleZone::square(ZONE, i32::MAX);
        let mut template = placed(TemplateKind::Cone {
            direction: Some(Direction::South),
        })
        .with_radius(EngineConfig::MAX_RADIUS);
        assert!(template.shape(&huge).is_empty());

        let largest = SingleZone::square(ZONE, EngineConfig::MAX_CELL_SIZE);
        assert!(!template.area(&largest).is_empty());
    }

    #[test]
    fn radius_is_clamped() {
        let mut template = placed(TemplateKind::Radius);
        template.set_radius(500);
        assert_eq!(template.radius(), EngineConfig::MAX_RADIUS);
        template.set_radius(-3);
        assert_eq!(template.radius(), 0);
        assert!(template.area(&zones()).is_empty());
    }

    #[test]
    fn wall_radius_is_its_length() {
        let mut wall = placed(TemplateKind::Wall { path: Vec::new() });
        assert_eq!(wall.radius(), 0);
        wall.extend_wall(CellPoint::new(3, 0));
        assert_eq!(wall.radius(), 4);
        wall.set_radius(10);
        assert_eq!(wall.radius(), 4);
        assert_eq!(wall.path(&zones()).len(), 4);
    }

    #[test]
    fn aiming_updates_the_variant_payload() {
        let mut cone = placed(TemplateKind::Cone { direction: None });
        cone.aim_at(ZonePoint::new(100, 0));
        assert_eq!(
            cone.kind(),
            &TemplateKind::Cone {
                direction: Some(Direction::East)
            }
        );

        let mut triangle = placed(TemplateKind::from_tag(TemplateKindTag::Triangle));
        triangle.aim_at(ZonePoint::new(0, 100));
        let TemplateKind::Triangle { theta, .. } = triangle.kind() else {
            panic!("kind changed");
        };
        assert!((theta - core::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let mut line = placed(TemplateKind::from_tag(TemplateKindTag::Line));
        line.aim_at(ZonePoint::new(250, 0));
        assert_eq!(line.path(&zones()).len(), 2);
    }

    #[test]
    fn mismatched_setters_are_ignored() {
        let mut burst = placed(TemplateKind::Burst);
        burst.area(&zones());
        burst.set_theta(1.0);
        burst.set_direction(Some(Direction::North));
        burst.set_control_cell(CellPoint::new(5, 5));
        burst.extend_wall(CellPoint::new(1, 1));
        burst.area(&zones());
        assert_eq!(burst.rebuild_count(), 1);
        assert_eq!(burst.kind(), &TemplateKind::Burst);
    }

    #[test]
    fn blast_radius_follows_the_control_cell() {
        let mut blast = placed(TemplateKind::from_tag(TemplateKindTag::Blast));
        blast.set_control_cell(CellPoint::new(3, -1));
        assert_eq!(blast.radius(), 4);
        blast.set_control_cell(CellPoint::new(-2, 0));
        assert_eq!(blast.radius(), 2);
    }

    #[test]
    fn paint_fills_before_stroking() {
        let zones = zones();
        let mut template = placed(TemplateKind::Burst);
        let mut painter = RecordingPainter::default();
        template.paint(&zones, true, true, &mut painter);
        assert_eq!(painter.fills.len(), 1);
        assert_eq!(painter.strokes.len(), 8);

        let mut painter = RecordingPainter::default();
        template.paint(&zones, true, false, &mut painter);
        assert!(painter.fills.is_empty());
        assert_eq!(painter.strokes.len(), 8);
    }
}
