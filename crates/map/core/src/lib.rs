//! Grid-quantized map geometry for a virtual tabletop.
//!
//! `map-core` computes which cells an area-of-effect template covers, how fog,
//! light and darkness compose for a given viewer, and how region boundaries
//! flatten into vertex lists for a rasterizer. Everything here is pure and
//! deterministic; caches live on the values that own them
//! ([`template::Template`], [`fog::RenderFrameContext`]).
pub mod config;
pub mod error;
pub mod fog;
pub mod geometry;
pub mod grid;
pub mod template;
pub mod tessellate;

pub use config::EngineConfig;
pub use error::{DtoError, EngineError, ErrorSeverity};
pub use fog::{
    ClipStyle, ComposedView, ExposedAreaTracker, FlushFlags, FogMask, FogPolicy, FrameComposition,
    LightEntry, LightOverlay, RenderFrameContext, Rgba, TokenId, ViewContext, ViewerRole,
    VisibilityCompositor, VisibilityInputs,
};
pub use geometry::{
    BoundaryPath, Bounds, CellPoint, FillRule, PathSegment, Point, Rect, Region, ZonePoint,
};
pub use grid::{
    ChebyshevMetric, Direction, GridKind, GridMetric, GridSpec, Quadrant, SingleZone, TABLETOP,
    TabletopMetric, ZoneId, ZoneOracle,
};
pub use template::{
    BorderPlan, BorderSegment, Layer, LineSpec, Orientation, Painter, RecordingPainter,
    TEMPLATE_DTO_VERSION, Template, TemplateDto, TemplateId, TemplateKind, TemplateKindTag,
    TemplateShape, build_shape,
};
pub use tessellate::{Contour, CurveTessellator, FlattenMode};
