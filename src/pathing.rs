use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::{CoordinateSmallVec, Grid};
use crate::renderers::ScreenTrace;
use crate::traversal::{depth_first_walk, WalkOutcome, WalkPolicy};

use log::debug;
use rand::XorShiftRng;

struct SolvePolicy<'t> {
    exit: GridCoordinate,
    trace: Option<&'t ScreenTrace>,
}

impl<'t> WalkPolicy for SolvePolicy<'t> {
    fn candidates(&self, grid: &Grid, current: GridCoordinate) -> CoordinateSmallVec {
        grid.open_unvisited_neighbours(current)
    }

    fn on_advance(&mut self, grid: &mut Grid, from: GridCoordinate, to: GridCoordinate) {
        if let Some(direction) = CompassPrimary::between(from, to) {
            grid.set_arrival(to, Some(direction));
        }
        grid.set_on_path(to, true);
    }

    fn on_backtrack(&mut self, grid: &mut Grid, cell: GridCoordinate) {
        // A dead end is off the candidate solution path again.
        grid.set_on_path(cell, false);
    }

    fn at_goal(&self, _: &Grid, current: GridCoordinate) -> bool {
        current == self.exit
    }

    fn observe(&mut self, grid: &Grid) {
        if let Some(trace) = self.trace {
            trace.render(grid);
        }
    }
}

/// Find a simple path from the grid's entrance to its exit through open
/// walls only, depth first with backtracking. The discovered path is
/// marked on the cells (`on_path` + arrival direction) and returned
/// entrance first. On a perfect maze this is the unique simple path
/// between the two cells.
///
/// Returns None when the exit is unreachable, which cannot happen on a
/// grid the generator carved but can on wall state assembled by hand. The
/// per-cell visited flags bound the search: no cell is walked twice, so
/// the stack empties after at most `grid.size()` visits.
///
/// Any run state from a previous walk is cleared first. When `trace` is
/// supplied every search step renders the grid, walked path included.
pub fn depth_first_path(grid: &mut Grid,
                        rng: &mut XorShiftRng,
                        trace: Option<&ScreenTrace>)
                        -> Option<Vec<GridCoordinate>> {
    grid.clear_run_state();

    let entrance = grid.start();
    let exit = grid.exit();
    grid.set_on_path(entrance, true);
    debug!("searching for a path {} -> {}", entrance, exit);

    let mut policy = SolvePolicy { exit, trace };
    let (outcome, move_stack) = depth_first_walk(grid, rng, entrance, &mut policy);

    match outcome {
        WalkOutcome::GoalReached => {
            debug!("path found, {} cells", move_stack.len());
            Some(move_stack)
        }
        WalkOutcome::StackExhausted => {
            debug!("exit unreachable from the entrance");
            None
        }
    }
}
