use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::{fmt, str::FromStr};

use crate::error::MazeFormatError;

/// A single grid position, addressed by its column `x` and row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Cell { x, y }
    }

    /// Canonical identity of this cell for set and map membership.
    pub const fn key(self) -> CellKey {
        CellKey(((self.x as u32) << 16) | self.y as u32)
    }

    /// Moves one step in `direction`, or `None` if that would leave the `u16` range.
    /// The result is not checked against any grid bounds.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let Cell { x, y } = self;
        match direction {
            Direction::North => y.checked_sub(1).map(|y| Cell::new(x, y)),
            Direction::South => y.checked_add(1).map(|y| Cell::new(x, y)),
            Direction::East => x.checked_add(1).map(|x| Cell::new(x, y)),
            Direction::West => x.checked_sub(1).map(|x| Cell::new(x, y)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Packed `(x, y)` pair, x in the high half. Distinct cells never share a key,
/// and keys order by x first, then y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(u32);

impl CellKey {
    pub const fn cell(self) -> Cell {
        Cell::new((self.0 >> 16) as u16, self.0 as u16)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cell { x, y } = self.cell();
        write!(f, "{},{}", x, y)
    }
}

impl FromStr for CellKey {
    type Err = MazeFormatError;

    /// Parses the `"x,y"` form: base-10, no sign, no whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MazeFormatError::InvalidKey(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse::<u16>().map_err(|_| invalid())
        };
        Ok(Cell::new(parse(x)?, parse(y)?).key())
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Compass direction of an opened wall, written as a single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub fn from_code(code: char) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.code() == code)
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction of the wall to open in `from` to reach `to`.
    /// Returns `None` unless the two cells differ by exactly 1 along exactly one axis.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        let dx = to.x as i32 - from.x as i32;
        let dy = to.y as i32 - from.y as i32;
        match (dx, dy) {
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (0, 1) => Some(Direction::South),
            (0, -1) => Some(Direction::North),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next().and_then(Direction::from_code), chars.next()) {
            (Some(direction), None) => Ok(direction),
            _ => Err(serde::de::Error::custom(MazeFormatError::InvalidDirection(s))),
        }
    }
}
