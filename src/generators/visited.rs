use std::collections::HashSet;

use crate::{
    error::GenerationError,
    maze::{Cell, CellKey},
};

/// Cells already absorbed into the spanning tree. Only ever grows.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    keys: HashSet<CellKey>,
}

impl VisitedSet {
    /// Starts a tree rooted at `initial`.
    pub fn rooted_at(initial: Cell) -> Self {
        VisitedSet {
            keys: HashSet::from([initial.key()]),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.keys.contains(&cell.key())
    }

    /// Absorbs `cell`. Each cell is absorbed exactly once, a second attempt is an error.
    pub fn absorb(&mut self, cell: Cell) -> Result<(), GenerationError> {
        if !self.keys.insert(cell.key()) {
            return Err(GenerationError::DuplicateAbsorption(cell));
        }
        Ok(())
    }

    /// Splits `cells` into `(visited, not_visited)`, keeping their relative order.
    pub fn partition<I: IntoIterator<Item = Cell>>(&self, cells: I) -> (Vec<Cell>, Vec<Cell>) {
        cells.into_iter().partition(|&cell| self.contains(cell))
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.keys.iter().map(|key| key.cell())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_once() {
        let mut visited = VisitedSet::rooted_at(Cell::new(1, 1));
        assert_eq!(visited.len(), 1);
        assert!(visited.absorb(Cell::new(1, 2)).is_ok());
        assert_eq!(
            visited.absorb(Cell::new(1, 1)),
            Err(GenerationError::DuplicateAbsorption(Cell::new(1, 1)))
        );
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_partition() {
        let mut visited = VisitedSet::rooted_at(Cell::new(0, 0));
        visited.absorb(Cell::new(2, 0)).unwrap();
        let (seen, unseen) =
            visited.partition([Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 0), Cell::new(1, 0)]);
        assert_eq!(seen, vec![Cell::new(0, 0), Cell::new(2, 0)]);
        assert_eq!(unseen, vec![Cell::new(1, 1), Cell::new(1, 0)]);

        let (seen, unseen) = visited.partition(std::iter::empty());
        assert!(seen.is_empty() && unseen.is_empty());
    }
}
