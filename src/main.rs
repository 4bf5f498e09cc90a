use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use thiserror::Error;

use mazegrow::{
    Cell, CellKey, GenerationError, GeneratorConfig, Maze, RenderError, generate_with, logging,
    renderer::Renderer,
};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("invalid maze JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazegrow")]
struct Args {
    #[clap(long, global = true, help = "Log level filter, overridden by RUST_LOG")]
    log_level: Option<String>,
    #[clap(long, global = true, help = "Write logs to this file instead of stderr")]
    log_file: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and print it as JSON
    Generate {
        #[clap(long, help = "Side length of a square grid")]
        size: Option<u16>,
        #[clap(long, help = "Grid width in cells")]
        width: Option<u16>,
        #[clap(long, help = "Grid height in cells")]
        height: Option<u16>,
        #[clap(short, long, help = "Seed for a repeatable maze")]
        seed: Option<u64>,
        #[clap(short, long, action, help = "Pretty-print the JSON")]
        pretty: bool,
        #[clap(short, long, action, help = "Draw the maze instead of printing JSON")]
        render: bool,
        #[clap(long, help = "Start flag cell as x,y [default: 0,0]")]
        start: Option<CellKey>,
        #[clap(long, help = "End flag cell as x,y [default: bottom-right cell]")]
        end: Option<CellKey>,
        #[clap(long, action, help = "Draw with plain ASCII")]
        no_color: bool,
    },
    /// Draw a maze read from a JSON file, or `-` for stdin
    Render {
        input: PathBuf,
        #[clap(long, help = "Start flag cell as x,y [default: 0,0]")]
        start: Option<CellKey>,
        #[clap(long, help = "End flag cell as x,y [default: bottom-right cell]")]
        end: Option<CellKey>,
        #[clap(long, action, help = "Draw with plain ASCII")]
        no_color: bool,
    },
}

fn read_maze(input: &Path) -> Result<Maze, CliError> {
    let mut text = String::new();
    if input.as_os_str() == "-" {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        text = std::fs::read_to_string(input)?;
    }
    Ok(serde_json::from_str(&text)?)
}

fn draw(
    maze: &Maze,
    start: Option<CellKey>,
    end: Option<CellKey>,
    no_color: bool,
) -> Result<(), CliError> {
    let start = start.unwrap_or(Cell::new(0, 0).key());
    let end = end.unwrap_or(Cell::new(maze.width() - 1, maze.height() - 1).key());
    tracing::debug!(
        "[render] drawing {}x{} maze from {} to {}",
        maze.width(),
        maze.height(),
        start,
        end
    );
    Renderer::new(maze, start, end)?
        .with_color(!no_color)
        .draw(&mut std::io::stdout())?;
    Ok(())
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Generate {
            size,
            width,
            height,
            seed,
            pretty,
            render,
            start,
            end,
            no_color,
        } => {
            let side = size.unwrap_or(GeneratorConfig::DEFAULT_SIZE);
            let config = GeneratorConfig::new(width.unwrap_or(side), height.unwrap_or(side), seed);
            let maze = generate_with(&config)?;
            if render {
                return draw(&maze, start, end, no_color);
            }
            let json = if pretty {
                serde_json::to_string_pretty(&maze)?
            } else {
                serde_json::to_string(&maze)?
            };
            let mut stdout = std::io::stdout();
            writeln!(stdout, "{}", json)?;
            stdout.flush()?;
            Ok(())
        }
        Command::Render {
            input,
            start,
            end,
            no_color,
        } => {
            let maze = read_maze(&input)?;
            let root = start.map_or(Cell::new(0, 0), CellKey::cell);
            if !maze.is_spanning_tree(root) {
                tracing::warn!("[render] {} does not hold a perfect maze", input.display());
            }
            draw(&maze, start, end, no_color)
        }
    }
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    let _guard = logging::init(args.log_level.as_deref(), args.log_file.as_deref())?;

    run(args.command).inspect_err(|e| tracing::error!("[main] {}", e))
}
