use rand::{SeedableRng, rngs::StdRng};

pub mod frontier;
pub mod growing_tree;
pub mod visited;

pub use frontier::Frontier;
pub use growing_tree::{GrowingTree, State};
pub use visited::VisitedSet;

use crate::{
    error::GenerationError,
    maze::{Grid, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Size and seed of a maze to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub width: u16,
    pub height: u16,
    /// Fixed seed for repeatable output. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Default side length of the square grid.
    pub const DEFAULT_SIZE: u16 = 10;

    pub fn new(width: u16, height: u16, seed: Option<u64>) -> Self {
        Self {
            width,
            height,
            seed,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE, None)
    }
}

/// Generates a perfect maze over a `width` x `height` grid.
pub fn generate(width: u16, height: u16, seed: Option<u64>) -> Result<Maze, GenerationError> {
    generate_with(&GeneratorConfig::new(width, height, seed))
}

pub fn generate_with(config: &GeneratorConfig) -> Result<Maze, GenerationError> {
    let grid = Grid::new(config.width, config.height)?;
    let mut tree = GrowingTree::new(grid, get_rng(config.seed));
    let steps = tree.run()?;
    tracing::info!(
        "[generate] {}x{} maze (seed {:?}) grown from {} in {} steps",
        config.width,
        config.height,
        config.seed,
        tree.initial(),
        steps
    );
    Ok(tree.into_maze())
}
