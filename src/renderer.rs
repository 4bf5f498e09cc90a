use std::{fmt, io::Write};

use crossterm::{
    queue,
    style::{self, Color, Stylize},
    terminal,
};

use crate::{
    error::RenderError,
    maze::{Cell, CellKey, Direction, Maze},
};

/// One square of the drawn maze. Cells and the walls between them each get a tile,
/// so a `w` x `h` maze is drawn on a `(2w + 1)` x `(2h + 1)` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Path,
    Start,
    End,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;

    fn symbol(self, color: bool) -> &'static str {
        match (self, color) {
            (Tile::Wall, true) => "⬜",
            (Tile::Path, true) => "  ",
            (Tile::Start, true) => "🟩",
            (Tile::End, true) => "🟥",
            (Tile::Wall, false) => "##",
            (Tile::Path, false) => "  ",
            (Tile::Start, false) => "S ",
            (Tile::End, false) => "E ",
        }
    }

    fn color(self) -> Color {
        match self {
            Tile::Wall => Color::White,
            Tile::Path => Color::Reset,
            Tile::Start => Color::Green,
            Tile::End => Color::Red,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.symbol(true);

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                symbol.width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", symbol.with(self.color()))
    }
}

/// Draws a finished maze with start and end flags. Only reads the maze.
pub struct Renderer<'a> {
    maze: &'a Maze,
    start: Cell,
    end: Cell,
    color: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(maze: &'a Maze, start: CellKey, end: CellKey) -> Result<Self, RenderError> {
        let (start, end) = (start.cell(), end.cell());
        for cell in [start, end] {
            if !maze.grid().is_in_bounds(cell) {
                return Err(RenderError::UnknownCell(cell));
            }
        }
        Ok(Renderer {
            maze,
            start,
            end,
            color: true,
        })
    }

    /// Toggle terminal colors and emoji blocks. Without them, plain ASCII is drawn.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Board position of a cell's own tile.
    fn board_coord(cell: Cell) -> (usize, usize) {
        (cell.x as usize * 2 + 1, cell.y as usize * 2 + 1)
    }

    /// Lays the maze out as rows of tiles.
    pub fn tiles(&self) -> Vec<Vec<Tile>> {
        let board_width = self.maze.width() as usize * 2 + 1;
        let board_height = self.maze.height() as usize * 2 + 1;
        let mut board = vec![vec![Tile::Wall; board_width]; board_height];

        for cell in self.maze.grid().cells() {
            let (bx, by) = Self::board_coord(cell);
            board[by][bx] = if cell == self.start {
                Tile::Start
            } else if cell == self.end {
                Tile::End
            } else {
                Tile::Path
            };
            for &direction in self.maze.openings(cell) {
                let (wx, wy) = match direction {
                    Direction::North => (bx, by - 1),
                    Direction::South => (bx, by + 1),
                    Direction::East => (bx + 1, by),
                    Direction::West => (bx - 1, by),
                };
                board[wy][wx] = Tile::Path;
            }
        }
        board
    }

    /// Writes the board to `out`, one line per tile row.
    pub fn draw<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        let board = self.tiles();
        if let Ok((term_width, _)) = terminal::size() {
            let needed = board[0].len() * Tile::WIDTH as usize;
            if needed > term_width as usize {
                tracing::warn!(
                    "[render] maze needs {} columns but the terminal has {}",
                    needed,
                    term_width
                );
            }
        }

        for row in &board {
            for &tile in row {
                if self.color {
                    queue!(out, style::Print(tile))?;
                } else {
                    queue!(out, style::Print(tile.symbol(false)))?;
                }
            }
            queue!(out, style::Print("\n"))?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Grid;

    fn key(x: u16, y: u16) -> CellKey {
        Cell::new(x, y).key()
    }

    fn corridor() -> Maze {
        // Three cells in a row, joined left to right
        let mut maze = Maze::new(Grid::new(3, 1).unwrap());
        maze.connect(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        maze.connect(Cell::new(1, 0), Cell::new(2, 0)).unwrap();
        maze
    }

    #[test]
    fn test_plain_drawing() {
        let maze = corridor();
        let renderer = Renderer::new(&maze, key(0, 0), key(2, 0))
            .unwrap()
            .with_color(false);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                "##############\n",
                "##S       E ##\n",
                "##############\n"
            )
        );
    }

    #[test]
    fn test_tiles_follow_openings() {
        let mut maze = Maze::new(Grid::new(2, 2).unwrap());
        maze.connect(Cell::new(0, 0), Cell::new(0, 1)).unwrap();
        maze.connect(Cell::new(0, 1), Cell::new(1, 1)).unwrap();
        maze.connect(Cell::new(1, 1), Cell::new(1, 0)).unwrap();
        let board = Renderer::new(&maze, key(0, 0), key(1, 0)).unwrap().tiles();
        assert_eq!(board.len(), 5);
        assert!(board.iter().all(|row| row.len() == 5));
        assert_eq!(board[1][1], Tile::Start);
        assert_eq!(board[1][3], Tile::End);
        // Wall between the two top cells stays closed
        assert_eq!(board[1][2], Tile::Wall);
        // Passages carved by the openings
        assert_eq!(board[2][1], Tile::Path);
        assert_eq!(board[3][2], Tile::Path);
        assert_eq!(board[2][3], Tile::Path);
        // Outer border is intact
        assert!(board[0].iter().all(|&t| t == Tile::Wall));
        assert!(board.iter().all(|row| row[0] == Tile::Wall && row[4] == Tile::Wall));
    }

    #[test]
    fn test_unknown_flag_cell() {
        let maze = corridor();
        assert!(matches!(
            Renderer::new(&maze, key(0, 0), key(3, 0)),
            Err(RenderError::UnknownCell(c)) if c == Cell::new(3, 0)
        ));
    }

    #[test]
    fn test_rendering_leaves_maze_untouched() {
        let maze = corridor();
        let before = maze.clone();
        let mut out = Vec::new();
        Renderer::new(&maze, key(0, 0), key(2, 0))
            .unwrap()
            .draw(&mut out)
            .unwrap();
        assert_eq!(maze, before);
        assert!(!out.is_empty());
    }
}
