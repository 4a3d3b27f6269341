//! Grid metadata consumed by the template engine.
//!
//! Zones are resolved through a [`ZoneOracle`], the only way templates learn
//! their cell size. An unresolved zone makes every template render as empty.
mod direction;
mod metric;

use crate::config::EngineConfig;

pub use direction::{Direction, Quadrant};
pub use metric::{ChebyshevMetric, GridMetric, TABLETOP, TabletopMetric};

/// Identifier of a map zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneId(pub u32);

impl core::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "zone#{}", self.0)
    }
}

/// Grid topology of a zone.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridKind {
    #[default]
    Square,
    HexHorizontal,
    HexVertical,
    Isometric,
    Gridless,
}

/// Cell size and topology of a zone's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    pub cell_size: i32,
    pub kind: GridKind,
}

impl GridSpec {
    pub const fn square(cell_size: i32) -> Self {
        Self {
            cell_size,
            kind: GridKind::Square,
        }
    }

    /// Templates need a positive cell size no larger than [`EngineConfig::MAX_CELL_SIZE`].
    pub const fn is_usable(&self) -> bool {
        self.cell_size > 0 && self.cell_size <= EngineConfig::MAX_CELL_SIZE
    }
}

/// Read-only access to zone grid metadata.
pub trait ZoneOracle {
    fn grid(&self, zone: ZoneId) -> Option<GridSpec>;

    /// Distance metric for the zone. Square and gridless zones use the tabletop
    /// metric; other topologies override this.
    fn metric(&self, _zone: ZoneId) -> &dyn GridMetric {
        &TABLETOP
    }
}

/// Oracle serving a single zone, handy for tools and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleZone {
    pub zone: ZoneId,
    pub grid: GridSpec,
}

impl SingleZone {
    pub const fn new(zone: ZoneId, grid: GridSpec) -> Self {
        Self { zone, grid }
    }

    pub const fn square(zone: ZoneId, cell_size: i32) -> Self {
        Self::new(zone, GridSpec::square(cell_size))
    }
}

impl ZoneOracle for SingleZone {
    fn grid(&self, zone: ZoneId) -> Option<GridSpec> {
        (zone == self.zone).then_some(self.grid)
    }
}
