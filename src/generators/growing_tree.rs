use rand::Rng;

use crate::{
    error::GenerationError,
    generators::{frontier::Frontier, visited::VisitedSet},
    maze::{Cell, Grid, Maze},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The frontier still holds candidates.
    Running,
    /// The frontier is empty and the maze is final.
    Done,
}

/// Randomized growing-tree generator.
///
/// Each step takes a random frontier cell, links it to a random neighbor that is already
/// part of the tree and pushes its unvisited neighbors onto the frontier. The engine owns
/// all of its state, randomness included, so independent instances never interfere.
pub struct GrowingTree<R: Rng> {
    grid: Grid,
    rng: R,
    initial: Cell,
    frontier: Frontier,
    visited: VisitedSet,
    maze: Maze,
    steps: usize,
}

impl<R: Rng> GrowingTree<R> {
    /// Picks the initial cell with `rng` and seeds the frontier with its neighbors.
    pub fn new(grid: Grid, mut rng: R) -> Self {
        let initial = grid.random_cell(&mut rng);
        tracing::debug!(
            "[growing tree] {}x{} grid, initial cell {}",
            grid.width(),
            grid.height(),
            initial
        );
        GrowingTree {
            grid,
            rng,
            initial,
            frontier: grid.neighbors(initial).collect(),
            visited: VisitedSet::rooted_at(initial),
            maze: Maze::new(grid),
            steps: 0,
        }
    }

    pub fn state(&self) -> State {
        if self.frontier.is_empty() {
            State::Done
        } else {
            State::Running
        }
    }

    pub fn initial(&self) -> Cell {
        self.initial
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Number of cells absorbed so far, not counting the initial cell.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Absorbs one frontier cell into the tree and returns it.
    pub fn step(&mut self) -> Result<Cell, GenerationError> {
        let current = self.frontier.take_random(&mut self.rng)?;

        let (visited, unvisited) = self.visited.partition(self.grid.neighbors(current));

        // A frontier cell only ever enters the frontier as a neighbor of a visited cell
        if visited.is_empty() {
            tracing::error!("[growing tree] frontier cell {} has no visited neighbor", current);
            self.frontier.insert(current);
            return Err(GenerationError::OrphanCandidate(current));
        }
        let added = self.frontier.merge(unvisited);
        let parent = visited[self.rng.random_range(0..visited.len())];

        let direction = self.maze.connect(current, parent)?;
        self.visited.absorb(current)?;
        self.steps += 1;

        tracing::trace!(
            "[growing tree] step {}: {} -> {} ({}), {} new frontier cells, {} left",
            self.steps,
            current,
            parent,
            direction,
            added,
            self.frontier.len()
        );
        Ok(current)
    }

    /// Steps until the frontier is empty. Returns the number of steps taken by this call.
    pub fn run(&mut self) -> Result<usize, GenerationError> {
        let before = self.steps;
        while self.state() == State::Running {
            self.step()?;
        }
        tracing::debug!(
            "[growing tree] done after {} steps, {} cells visited",
            self.steps,
            self.visited.len()
        );
        Ok(self.steps - before)
    }

    pub fn into_maze(self) -> Maze {
        self.maze
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use rand::{SeedableRng, rngs::StdRng};

    fn engine(width: u16, height: u16, seed: u64) -> GrowingTree<StdRng> {
        let grid = Grid::new(width, height).expect("valid grid size");
        GrowingTree::new(grid, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_initial_state() {
        let tree = engine(5, 4, 3);
        let initial = tree.initial();
        assert_eq!(tree.visited().len(), 1);
        assert!(tree.visited().contains(initial));
        assert!(tree.maze().is_empty());
        assert_eq!(tree.steps(), 0);
        let expected = Grid::new(5, 4).unwrap().neighbors(initial).count();
        assert_eq!(tree.frontier().len(), expected);
        assert_eq!(tree.state(), State::Running);
    }

    #[test]
    fn test_single_cell_is_done_immediately() {
        let mut tree = engine(1, 1, 0);
        assert_eq!(tree.state(), State::Done);
        assert_eq!(tree.run(), Ok(0));
        assert_eq!(tree.step(), Err(GenerationError::EmptyFrontier));
        assert!(tree.into_maze().is_empty());
    }

    #[test]
    fn test_invariants_hold_after_every_step() {
        for seed in 0..20 {
            let mut tree = engine(6, 5, seed);
            while tree.state() == State::Running {
                let absorbed = tree.step().unwrap();
                assert!(tree.visited().contains(absorbed));
                for cell in tree.frontier().iter() {
                    // Frontier and visited set stay disjoint
                    assert!(!tree.visited().contains(cell));
                    // Every candidate borders the tree
                    assert!(
                        tree.grid
                            .neighbors(cell)
                            .any(|n| tree.visited().contains(n))
                    );
                }
                assert!(tree.maze().is_spanning_tree(tree.initial()));
            }
        }
    }

    #[test]
    fn test_run_absorbs_every_cell_once() {
        let mut tree = engine(9, 7, 11);
        assert_eq!(tree.run(), Ok(9 * 7 - 1));
        assert_eq!(tree.state(), State::Done);
        assert_eq!(tree.visited().len(), 63);
        assert!(Grid::new(9, 7).unwrap().cells().all(|c| tree.visited().contains(c)));
        // Running again is a no-op
        assert_eq!(tree.run(), Ok(0));
    }

    #[test]
    fn test_each_step_opens_one_wall_per_side() {
        let mut tree = engine(4, 4, 5);
        while tree.state() == State::Running {
            let before = tree.maze().opening_count();
            let cell = tree.step().unwrap();
            assert_eq!(tree.maze().opening_count(), before + 2);
            // The newly absorbed cell has exactly one opening, toward its parent
            assert_eq!(tree.maze().openings(cell).len(), 1);
            let direction: Direction = tree.maze().openings(cell)[0];
            let parent = cell.step(direction).unwrap();
            assert!(tree.maze().openings(parent).contains(&direction.opposite()));
        }
    }

    #[test]
    fn test_orphan_candidate_is_fatal() {
        let mut tree = engine(3, 3, 0);
        // Replace the frontier with a cell that does not border the tree
        let far = [Cell::new(0, 0), Cell::new(2, 2)]
            .into_iter()
            .find(|&c| !tree.grid.neighbors(c).any(|n| n == tree.initial()) && c != tree.initial())
            .unwrap();
        tree.frontier = [far].into_iter().collect();
        assert_eq!(tree.step(), Err(GenerationError::OrphanCandidate(far)));
        // The failed step leaves the engine as it found it
        assert_eq!(tree.frontier().iter().collect::<Vec<_>>(), vec![far]);
        assert_eq!(tree.visited().len(), 1);
        assert!(tree.maze().is_empty());
        assert_eq!(tree.steps(), 0);
    }
}
