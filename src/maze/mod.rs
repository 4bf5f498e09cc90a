pub mod cell;
pub mod grid;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::collections::{BTreeMap, HashSet, VecDeque};

pub use cell::{Cell, CellKey, Direction};
pub use grid::Grid;

use crate::error::{GenerationError, MazeFormatError};

/// A maze over a rectangular grid, stored as the walls opened from each cell.
///
/// Cells without any opening have no entry at all. Entries are kept in `CellKey` order,
/// so two equal mazes always serialize to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    openings: BTreeMap<CellKey, Vec<Direction>>,
}

impl Maze {
    /// Creates a maze with every wall closed.
    pub fn new(grid: Grid) -> Self {
        Maze {
            grid,
            openings: BTreeMap::new(),
        }
    }

    /// Builds a maze from raw entries, checking that every opening stays inside `grid`.
    pub fn from_openings(
        grid: Grid,
        mut openings: BTreeMap<CellKey, Vec<Direction>>,
    ) -> Result<Self, MazeFormatError> {
        openings.retain(|_, directions| !directions.is_empty());
        for (key, directions) in &openings {
            let cell = key.cell();
            for &direction in directions {
                let lands = cell.step(direction).filter(|&c| grid.is_in_bounds(c));
                if !grid.is_in_bounds(cell) || lands.is_none() {
                    return Err(MazeFormatError::OutOfRange {
                        cell,
                        direction: direction.code(),
                    });
                }
            }
        }
        Ok(Maze { grid, openings })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Opens the wall of `from` that faces `to` and returns its direction.
    ///
    /// Only `from`'s entry is touched; see [`Maze::connect`] for the symmetric version.
    /// Fails if the cells are not grid-adjacent or lie outside the grid.
    pub fn open_wall(&mut self, from: Cell, to: Cell) -> Result<Direction, GenerationError> {
        let direction = Direction::between(from, to)
            .filter(|_| self.grid.is_in_bounds(from) && self.grid.is_in_bounds(to))
            .ok_or(GenerationError::MalformedDirectionRequest { from, to })?;
        self.openings.entry(from.key()).or_default().push(direction);
        Ok(direction)
    }

    /// Carves a passage between two adjacent cells, opening the facing wall on both sides.
    pub fn connect(&mut self, a: Cell, b: Cell) -> Result<Direction, GenerationError> {
        // Validate before touching either entry so a bad request leaves the maze unchanged
        if Direction::between(a, b).is_none() {
            return Err(GenerationError::MalformedDirectionRequest { from: a, to: b });
        }
        let direction = self.open_wall(a, b)?;
        self.open_wall(b, a)?;
        Ok(direction)
    }

    /// Walls opened from `cell`, in the order they were opened.
    pub fn openings(&self, cell: Cell) -> &[Direction] {
        self.get(cell.key()).unwrap_or(&[])
    }

    pub fn get(&self, key: CellKey) -> Option<&[Direction]> {
        self.openings.get(&key).map(Vec::as_slice)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.openings.contains_key(&cell.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &[Direction])> {
        self.openings.iter().map(|(&key, dirs)| (key, dirs.as_slice()))
    }

    /// Number of cells with at least one opening.
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// Total number of direction codes across all cells.
    pub fn opening_count(&self) -> usize {
        self.openings.values().map(Vec::len).sum()
    }

    /// Cells reachable from `cell` through a single opening.
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.openings(cell)
            .iter()
            .filter_map(move |&d| cell.step(d))
            .filter(move |&c| self.grid.is_in_bounds(c))
    }

    /// Number of distinct undirected passages.
    pub fn edge_count(&self) -> usize {
        self.openings
            .keys()
            .flat_map(|&key| {
                let cell = key.cell();
                self.open_neighbors(cell)
                    .map(move |n| (cell.key().min(n.key()), cell.key().max(n.key())))
            })
            .collect::<HashSet<_>>()
            .len()
    }

    /// Breadth-first walk over the openings starting at `start`.
    pub fn reachable_from(&self, start: Cell) -> HashSet<Cell> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            for next in self.open_neighbors(cell) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// True if some cell lists the same direction more than once.
    pub fn has_repeated_openings(&self) -> bool {
        self.openings.values().any(|directions| {
            directions
                .iter()
                .enumerate()
                .any(|(i, d)| directions[..i].contains(d))
        })
    }

    /// Every opening from A toward B is matched by exactly one opposite opening from B
    /// toward A, and no cell opens the same wall twice.
    pub fn is_symmetric(&self) -> bool {
        if self.has_repeated_openings() {
            return false;
        }
        self.iter().all(|(key, directions)| {
            let cell = key.cell();
            directions.iter().all(|&d| {
                cell.step(d)
                    .is_some_and(|n| self.openings(n).contains(&d.opposite()))
            })
        })
    }

    /// Checks that the openings form a symmetric, connected, cycle-free tree containing
    /// `root` and every cell that has an entry.
    pub fn is_spanning_tree(&self, root: Cell) -> bool {
        if !self.is_symmetric() {
            return false;
        }
        let mut cells = self.openings.keys().map(|k| k.cell()).collect::<HashSet<_>>();
        cells.insert(root);
        self.reachable_from(root) == cells
            && self.edge_count() == cells.len() - 1
            && self.opening_count() == 2 * (cells.len() - 1)
    }
}

impl Serialize for Maze {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.openings)
    }
}

impl<'de> Deserialize<'de> for Maze {
    /// Reads the `"x,y" -> [codes]` mapping. The grid bounds are the smallest ones holding
    /// every listed cell and every cell an opening leads to.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let openings = BTreeMap::<CellKey, Vec<Direction>>::deserialize(deserializer)?;
        let (width, height) = openings
            .iter()
            .flat_map(|(key, directions)| {
                let cell = key.cell();
                std::iter::once(cell).chain(directions.iter().filter_map(move |&d| cell.step(d)))
            })
            .fold((1u16, 1u16), |(w, h), Cell { x, y }| {
                (w.max(x.saturating_add(1)), h.max(y.saturating_add(1)))
            });
        let grid = Grid::new(width, height).map_err(serde::de::Error::custom)?;
        Maze::from_openings(grid, openings).map_err(serde::de::Error::custom)
    }
}
