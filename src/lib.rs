//! Random perfect mazes grown with a randomized growing-tree walk.
//!
//! A maze is a spanning tree over a rectangular grid, stored as the walls opened from
//! each cell. It serializes to a JSON object mapping `"x,y"` to direction codes:
//!
//! ```
//! let maze = mazegrow::generate(1, 2, Some(7)).unwrap();
//! assert_eq!(serde_json::to_string(&maze).unwrap(), r#"{"0,0":["S"],"0,1":["N"]}"#);
//! ```

pub mod error;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod renderer;

pub use error::{GenerationError, MazeFormatError, RenderError};
pub use generators::{GeneratorConfig, generate, generate_with};
pub use maze::{Cell, CellKey, Direction, Grid, Maze};
