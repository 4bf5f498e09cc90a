use rand::Rng;

use std::collections::HashMap;

use crate::{
    error::GenerationError,
    maze::{Cell, CellKey},
};

/// Candidate cells bordering the growing tree, deduplicated by `CellKey`.
///
/// Cells live in a dense `Vec` with a key -> index map beside it, so a random element
/// can be removed in O(1) with `swap_remove`.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    cells: Vec<Cell>,
    index: HashMap<CellKey, usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains_key(&cell.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Adds `cell` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if self.contains(cell) {
            return false;
        }
        self.index.insert(cell.key(), self.cells.len());
        self.cells.push(cell);
        true
    }

    /// Set union by key: adds every cell not already present and returns how many were added.
    ///
    /// Callers must only pass cells that are not yet part of the tree.
    pub fn merge<I: IntoIterator<Item = Cell>>(&mut self, cells: I) -> usize {
        cells.into_iter().filter(|&cell| self.insert(cell)).count()
    }

    /// Removes and returns a cell chosen uniformly at random.
    pub fn take_random<R: Rng>(&mut self, rng: &mut R) -> Result<Cell, GenerationError> {
        if self.cells.is_empty() {
            return Err(GenerationError::EmptyFrontier);
        }
        let idx = rng.random_range(0..self.cells.len());
        let cell = self.cells.swap_remove(idx);
        self.index.remove(&cell.key());
        // The former last element now sits at `idx`
        if let Some(moved) = self.cells.get(idx) {
            self.index.insert(moved.key(), idx);
        }
        Ok(cell)
    }
}

impl FromIterator<Cell> for Frontier {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut frontier = Frontier::new();
        frontier.merge(iter);
        frontier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_merge_deduplicates() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.merge([Cell::new(0, 1), Cell::new(1, 0)]), 2);
        assert_eq!(
            frontier.merge([Cell::new(1, 0), Cell::new(2, 1), Cell::new(2, 1)]),
            1
        );
        assert_eq!(frontier.len(), 3);
        assert!(frontier.contains(Cell::new(2, 1)));
        assert!(!frontier.contains(Cell::new(1, 1)));
    }

    #[test]
    fn test_take_random_drains_every_cell_once() {
        let mut rng = StdRng::seed_from_u64(42);
        let cells = (0..10).flat_map(|x| (0..10).map(move |y| Cell::new(x, y)));
        let mut frontier = cells.clone().collect::<Frontier>();
        assert_eq!(frontier.len(), 100);

        let mut taken = Vec::new();
        while !frontier.is_empty() {
            let cell = frontier.take_random(&mut rng).unwrap();
            assert!(!frontier.contains(cell));
            // Index stays consistent with the backing storage after each swap_remove
            for (i, c) in frontier.iter().enumerate() {
                assert_eq!(frontier.index[&c.key()], i);
            }
            taken.push(cell);
        }
        taken.sort();
        assert_eq!(taken, cells.collect::<Vec<_>>());
    }

    #[test]
    fn test_take_random_on_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut frontier = Frontier::new();
        assert_eq!(
            frontier.take_random(&mut rng),
            Err(GenerationError::EmptyFrontier)
        );
        frontier.insert(Cell::new(3, 3));
        assert_eq!(frontier.take_random(&mut rng), Ok(Cell::new(3, 3)));
        assert_eq!(
            frontier.take_random(&mut rng),
            Err(GenerationError::EmptyFrontier)
        );
    }

    #[test]
    fn test_take_random_is_uniform_enough() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let mut frontier = (0..4).map(|x| Cell::new(x, 0)).collect::<Frontier>();
            let cell = frontier.take_random(&mut rng).unwrap();
            counts[cell.x as usize] += 1;
        }
        assert!(counts.iter().all(|&n| n > 800 && n < 1200), "{counts:?}");
    }
}
