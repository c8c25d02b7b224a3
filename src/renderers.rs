use crate::grid::Grid;
use crate::cells::WallState;

use crossterm::{cursor, execute, terminal};
use itertools::Itertools;
use std::io::{self, Write};

pub const NORTH_BARRIER: &str = "+--";
pub const NORTH_OPEN: &str = "+  ";
pub const WEST_BARRIER: &str = "|  ";
pub const WEST_OPEN: &str = "   ";

/// Serialize the grid as text. Each maze row becomes two lines: the north
/// wall glyph of every cell, then the west wall glyph of every cell, both
/// closed out with the eastern border. A final line draws the southern
/// border. A cell on the solution path swaps the middle of its west glyph
/// for its arrival direction letter (blank for the entrance, which was
/// never arrived at).
pub fn render_text(grid: &Grid) -> String {
    let mut out = String::new();

    for row in grid.iter_row() {
        let mut north_line = String::new();
        let mut west_line = String::new();

        for coord in row {
            let cell = grid.cell(coord).expect("row iterator yielded an invalid coordinate");

            north_line.push_str(if cell.north() == WallState::Open {
                NORTH_OPEN
            } else {
                NORTH_BARRIER
            });

            let west_glyph = if cell.west() == WallState::Open {
                WEST_OPEN
            } else {
                WEST_BARRIER
            };
            if cell.is_on_path() {
                let marker = cell.arrival().map_or(' ', |direction| direction.letter());
                west_line.push_str(&west_glyph[..1]);
                west_line.push(marker);
                west_line.push(' ');
            } else {
                west_line.push_str(west_glyph);
            }
        }

        north_line.push('|');
        west_line.push('|');
        out.push_str(&north_line);
        out.push('\n');
        out.push_str(&west_line);
        out.push('\n');
    }

    let columns = grid.columns().0;
    out.push_str(&(0..columns).map(|_| NORTH_BARRIER).join(""));
    out.push('+');

    out
}

/// Step trace collaborator: wipes the terminal and prints the current grid
/// once per traversal step. All screen I/O is best effort; a redirected or
/// absent terminal quietly degrades to plain sequential prints.
#[derive(Debug)]
pub struct ScreenTrace;

impl ScreenTrace {
    pub fn new() -> ScreenTrace {
        ScreenTrace
    }

    pub fn render(&self, grid: &Grid) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout,
                         terminal::Clear(terminal::ClearType::All),
                         cursor::MoveTo(0, 0));
        let _ = writeln!(stdout, "{}", render_text(grid));
        let _ = stdout.flush();
    }
}

impl Default for ScreenTrace {
    fn default() -> ScreenTrace {
        ScreenTrace::new()
    }
}
