//! Planar primitives shared by templates, fog composition and tessellation.
mod path;
mod point;
mod rect;
mod region;
mod sweep;

pub use path::{BoundaryPath, FillRule, PathSegment, polygon_area};
pub use point::{CellPoint, Point, ZonePoint};
pub use rect::{Bounds, Rect};
pub use region::{AREA_EPSILON, Region, RegionOp, Trapezoid};
