use docopt::Docopt;
use log::debug;
use mazewalk::{
    cells::GridCoordinate,
    generators, pathing,
    grid::Grid,
    renderers::ScreenTrace,
    units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount},
};
use serde_derive::Deserialize;

const USAGE: &str = "Mazewalk

Carves a random perfect maze, then walks it from the entrance to the exit,
redrawing the grid after every step.

Usage:
    mazewalk_driver -h | --help
    mazewalk_driver [<width> <height>] [--seed=<n>] [--hide-progress] [--start-row=<r> --start-col=<c>] [--exit-row=<r> --exit-col=<c>]

Options:
    -h --help        Show this screen.
    --seed=<n>       Fix the random number generator seed so the carve and the walk replay identically.
    --hide-progress  Skip rendering while carving. The solve trace always renders.
    --start-row=<r>  Row of the entrance cell. Defaults to the top-left corner.
    --start-col=<c>  Column of the entrance cell.
    --exit-row=<r>   Row of the exit cell. Defaults to the bottom-right corner.
    --exit-col=<c>   Column of the exit cell.

Without <width> and <height> the maze is sized from the terminal: 30% of its
columns wide and 45% of its rows tall.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_width: Option<usize>,
    arg_height: Option<usize>,
    flag_seed: Option<u64>,
    flag_hide_progress: bool,
    flag_start_row: Option<usize>,
    flag_start_col: Option<usize>,
    flag_exit_row: Option<usize>,
    flag_exit_col: Option<usize>,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types.
    // Result is a typedef of std `Result` with the error type our own `Error`
    // and the From conversions that let `?` work for foreign errors.
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Grid(::mazewalk::grid::GridError);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = grid_dimensions(&args)?;
    debug!("grid is {} cells wide, {} cells tall", width, height);

    let mut maze_grid = Grid::new(RowsCount(height), ColumnsCount(width))?;
    if let (Some(row), Some(col)) = (args.flag_start_row, args.flag_start_col) {
        maze_grid.set_start(GridCoordinate::from_row_column_indices(RowIndex(row),
                                                                    ColumnIndex(col)))?;
    }
    if let (Some(row), Some(col)) = (args.flag_exit_row, args.flag_exit_col) {
        maze_grid.set_exit(GridCoordinate::from_row_column_indices(RowIndex(row),
                                                                   ColumnIndex(col)))?;
    }

    let mut rng = match args.flag_seed {
        Some(seed) => generators::seeded_rng(seed),
        None => rand::weak_rng(),
    };

    let trace = ScreenTrace::new();
    let carve_trace = if args.flag_hide_progress {
        None
    } else {
        Some(&trace)
    };
    generators::recursive_backtracker(&mut maze_grid, &mut rng, carve_trace);
    debug!("carved maze is perfect: {}", maze_grid.is_perfect_maze());

    match pathing::depth_first_path(&mut maze_grid, &mut rng, Some(&trace)) {
        Some(path) => {
            println!("{}", maze_grid);
            println!("walked {} steps from {} to {}",
                     path.len() - 1,
                     maze_grid.start(),
                     maze_grid.exit());
        }
        None => {
            println!("{}", maze_grid);
            println!("no path from {} to {}", maze_grid.start(), maze_grid.exit());
        }
    }

    Ok(())
}

/// Width and height from the positional arguments, or derived from the
/// terminal dimensions when they are not both given.
fn grid_dimensions(args: &MazeArgs) -> Result<(usize, usize)> {
    if let (Some(width), Some(height)) = (args.arg_width, args.arg_height) {
        return Ok((width, height));
    }

    let (term_columns, term_rows) =
        crossterm::terminal::size().chain_err(|| "failed to query the terminal dimensions")?;
    let width = (f64::from(term_columns) * 0.30) as usize;
    let height = (f64::from(term_rows) * 0.45) as usize;
    Ok((width, height))
}
