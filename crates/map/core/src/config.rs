/// Engine-wide constants and tunable rendering parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Samples taken along every quadratic or cubic curve when flattening.
    pub points_per_curve: u32,
    /// Opacity applied to template areas drawn underneath their borders.
    pub template_alpha: f32,
}

impl EngineConfig {
    // ===== template limits =====
    /// Largest radius (in cells) a template may take.
    pub const MAX_RADIUS: i32 = 30;
    /// Smallest non-zero radius. Zero stays available as "not placed yet".
    pub const MIN_RADIUS: i32 = 1;
    /// Largest cell size a grid may declare. Keeps radius-scaled extents inside `i32`.
    pub const MAX_CELL_SIZE: i32 = 1 << 16;
    /// Slack added around template bounds so border strokes are not clipped.
    pub const BOUNDS_PADDING: i32 = 10;
    /// Path neighbours inspected on each side when suppressing interior borders.
    pub const PATH_BORDER_WINDOW: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TEMPLATE_ALPHA: f32 = 0.20;
    pub const POINTS_PER_CURVE: u32 = 10;
    pub const DEFAULT_CELL_SIZE: i32 = 50;

    pub fn new() -> Self {
        Self {
            points_per_curve: Self::POINTS_PER_CURVE,
            template_alpha: Self::DEFAULT_TEMPLATE_ALPHA,
        }
    }

    /// Clamps a requested radius: non-positive values mean "unset".
    pub fn clamp_radius(radius: i32) -> i32 {
        if radius <= 0 {
            0
        } else {
            radius.clamp(Self::MIN_RADIUS, Self::MAX_RADIUS)
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
