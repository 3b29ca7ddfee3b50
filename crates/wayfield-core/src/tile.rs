//! Tiles and the 8-way direction set.

use std::fmt;
use std::ops::Neg;

/// A grid cell in logical (host) coordinates.
///
/// The host offsets map coordinates by an undisclosed amount each run,
/// so components may be negative and two logical tiles can denote the
/// same storage cell on the torus. Wrapping into storage coordinates is
/// owned by `CoordinateWindow` in `wayfield-map`; `Tile` itself is plain
/// arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    /// Logical x coordinate (grows east).
    pub x: i32,
    /// Logical y coordinate (grows south).
    pub y: i32,
}

impl Tile {
    /// Construct a tile from logical coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tile one step in `dir` from this one.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight grid movement directions.
///
/// Wire encodings are explicit and stable: they are stored in a 4-bit
/// field of every published path record and must not change between
/// builds that share a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

/// Neighbour scan order for the expansion loop: diagonals first, then
/// cardinals. The order is part of the tie-breaking behavior of the
/// expansion and must stay stable between builds that share a channel.
pub const SCAN_ORDER: [Direction; 8] = [
    Direction::NorthWest,
    Direction::SouthWest,
    Direction::SouthEast,
    Direction::NorthEast,
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
];

impl Direction {
    /// `(dx, dy)` for one step in this direction. y grows south.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Whether a step in this direction is diagonal (costs 1.4 ticks
    /// instead of 1.0).
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest
        )
    }

    /// The 4-bit wire encoding of this direction.
    pub fn wire(self) -> u32 {
        self as u32
    }

    /// Decode a 4-bit wire field. Returns `None` for values 8..=15.
    pub fn from_wire(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(Self::North),
            1 => Some(Self::NorthEast),
            2 => Some(Self::East),
            3 => Some(Self::SouthEast),
            4 => Some(Self::South),
            5 => Some(Self::SouthWest),
            6 => Some(Self::West),
            7 => Some(Self::NorthWest),
            _ => None,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    /// The opposite direction.
    fn neg(self) -> Direction {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        };
        write!(f, "{name}")
    }
}
