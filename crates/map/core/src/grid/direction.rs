use arrayvec::ArrayVec;

use crate::geometry::ZonePoint;

/// One of the four 90° sectors around a template vertex.
///
/// Geometry is derived for the south-east sector and mirrored into the others
/// through the (x, y) sign pair returned by [`Quadrant::x_mult`] / [`Quadrant::y_mult`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
    ];

    pub const fn x_mult(self) -> i32 {
        match self {
            Self::NorthWest | Self::SouthWest => -1,
            Self::NorthEast | Self::SouthEast => 1,
        }
    }

    pub const fn y_mult(self) -> i32 {
        match self {
            Self::NorthWest | Self::NorthEast => -1,
            Self::SouthWest | Self::SouthEast => 1,
        }
    }

    /// Quadrant holding a non-zero delta; zero components fall on the east/south side.
    pub const fn from_delta(dx: i32, dy: i32) -> Self {
        match (dx < 0, dy < 0) {
            (true, true) => Self::NorthWest,
            (true, false) => Self::SouthWest,
            (false, true) => Self::NorthEast,
            (false, false) => Self::SouthEast,
        }
    }
}

/// Compass direction a cone opens toward.
///
/// The declaration order matters: odd positions are the four spines
/// (W, N, E, S) and even positions the diagonals, with `All` first.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    All,
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
}

impl Direction {
    /// Every direction in declaration order.
    pub const ORDER: [Direction; 9] = [
        Direction::All,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Compass direction of `to` as seen from `from`, snapped to 45° sectors.
    pub fn toward(from: ZonePoint, to: ZonePoint) -> Self {
        let dx = f64::from(to.x - from.x);
        let dy = f64::from(to.y - from.y);
        let angle = dy.atan2(dx);
        let mut sector = (((angle / core::f64::consts::PI + 1.0) / 2.0) * 16.0).floor() as usize;
        if sector >= 15 {
            sector = 0;
        }
        Self::ORDER[(sector + 1) / 2 + 1]
    }

    /// W, N, E or S: the cone is split along a spine.
    pub const fn is_spine(self) -> bool {
        self.ordinal() % 2 == 1
    }

    pub const fn is_diagonal(self) -> bool {
        !matches!(self, Self::All) && self.ordinal() % 2 == 0
    }

    /// Quadrants a cone in this direction draws into.
    pub fn quadrants(self) -> ArrayVec<Quadrant, 2> {
        let mut out = ArrayVec::new();
        for quadrant in Quadrant::ALL {
            if self.covers(quadrant) {
                out.push(quadrant);
            }
        }
        out
    }

    pub const fn covers(self, quadrant: Quadrant) -> bool {
        match quadrant {
            Quadrant::SouthEast => matches!(self, Self::South | Self::East | Self::SouthEast),
            Quadrant::NorthEast => matches!(self, Self::North | Self::East | Self::NorthEast),
            Quadrant::SouthWest => matches!(self, Self::South | Self::West | Self::SouthWest),
            Quadrant::NorthWest => matches!(self, Self::North | Self::West | Self::NorthWest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toward(dx: i32, dy: i32) -> Direction {
        Direction::toward(ZonePoint::ORIGIN, ZonePoint::new(dx, dy))
    }

    #[test]
    fn toward_snaps_to_compass_sectors() {
        assert_eq!(toward(10, 0), Direction::East);
        assert_eq!(toward(10, 10), Direction::SouthEast);
        assert_eq!(toward(0, 10), Direction::South);
        assert_eq!(toward(-10, 10), Direction::SouthWest);
        assert_eq!(toward(-10, 0), Direction::West);
        assert_eq!(toward(-10, -10), Direction::NorthWest);
        assert_eq!(toward(0, -10), Direction::North);
        assert_eq!(toward(10, -10), Direction::NorthEast);
        // 20° below the east axis is still east
        assert_eq!(toward(100, 36), Direction::East);
    }

    #[test]
    fn spines_and_diagonals() {
        assert!(Direction::East.is_spine());
        assert!(Direction::NorthWest.is_diagonal());
        assert!(!Direction::All.is_spine());
        assert!(!Direction::All.is_diagonal());
        assert_eq!(
            Direction::East.quadrants().as_slice(),
            &[Quadrant::NorthEast, Quadrant::SouthEast]
        );
        assert_eq!(Direction::SouthWest.quadrants().as_slice(), &[Quadrant::SouthWest]);
        assert!(Direction::All.quadrants().is_empty());
    }

    #[test]
    fn quadrant_multipliers_and_parse() {
        assert_eq!(Quadrant::NorthWest.x_mult(), -1);
        assert_eq!(Quadrant::NorthWest.y_mult(), -1);
        assert_eq!(Quadrant::SouthEast.x_mult(), 1);
        assert_eq!(Quadrant::from_delta(-3, 2), Quadrant::SouthWest);
        assert_eq!("SOUTH_EAST".parse::<Direction>(), Ok(Direction::SouthEast));
        assert_eq!(Direction::NorthEast.to_string(), "north_east");
    }
}
