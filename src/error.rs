use thiserror::Error;

use crate::maze::Cell;

/// Failures raised while growing a maze.
///
/// Apart from `InvalidConfiguration`, every variant means an internal invariant of the
/// growth engine was broken. They abort generation instead of producing a wrong maze.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid grid size {width}x{height}, both dimensions must be at least 1")]
    InvalidConfiguration { width: u16, height: u16 },
    #[error("cannot draw a cell from an empty frontier")]
    EmptyFrontier,
    #[error("cells {from} and {to} are not grid-adjacent")]
    MalformedDirectionRequest { from: Cell, to: Cell },
    #[error("frontier cell {0} has no visited neighbor")]
    OrphanCandidate(Cell),
    #[error("cell {0} was absorbed into the tree twice")]
    DuplicateAbsorption(Cell),
}

/// Failures raised while reading a maze back from its `"x,y" -> [codes]` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeFormatError {
    #[error("invalid cell key {0:?}, expected \"x,y\"")]
    InvalidKey(String),
    #[error("invalid direction code {0:?}, expected one of N, S, E, W")]
    InvalidDirection(String),
    #[error("opening {direction} from {cell} leads outside the grid")]
    OutOfRange { cell: Cell, direction: char },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cell {0} is not part of the maze")]
    UnknownCell(Cell),
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
