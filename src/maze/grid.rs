use rand::Rng;

use super::cell::Cell;
use crate::error::GenerationError;

/// Bounds of a rectangular grid of cells. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Result<Self, GenerationError> {
        if width == 0 || height == 0 {
            return Err(GenerationError::InvalidConfiguration { width, height });
        }
        Ok(Grid { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells in the grid.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false, a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks if the given cell is within the bounds of the grid.
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }

    /// Picks a cell uniformly at random, drawing the column first and then the row.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Get neighbors of a cell.
    /// A neighbor is a cell one step away in the cardinal directions, yielded in the order
    /// west, east, north, south. Cells outside the grid have no neighbors.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + use<> {
        let grid = *self;
        let candidates = if grid.is_in_bounds(cell) {
            let Cell { x, y } = cell;
            // NOTE: When x or y is 0, wrapping_sub gives u16::MAX, which is never in bounds
            // since the largest index is u16::MAX - 1. saturating_add clamps to u16::MAX
            // for the same reason, so both ends get filtered out below.
            [
                Some(Cell::new(x.wrapping_sub(1), y)),
                Some(Cell::new(x.saturating_add(1), y)),
                Some(Cell::new(x, y.wrapping_sub(1))),
                Some(Cell::new(x, y.saturating_add(1))),
            ]
        } else {
            [None; 4]
        };

        candidates
            .into_iter()
            .flatten()
            .filter(move |&c| grid.is_in_bounds(c))
    }
}
