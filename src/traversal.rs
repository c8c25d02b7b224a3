use crate::cells::GridCoordinate;
use crate::grid::{CoordinateSmallVec, Grid};

use log::trace;
use rand::{Rng, XorShiftRng};

/// How a depth first walk over the grid came to a stop.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WalkOutcome {
    /// The policy's goal cell reached the top of the move stack.
    GoalReached,
    /// The move stack emptied with the goal never reached. For a policy
    /// without a goal this is the normal way a walk completes.
    StackExhausted,
}

/// The per-phase half of a depth first walk. Carving and solving share the
/// move stack mechanics and differ only in what counts as a candidate move
/// and what happens on advance and backtrack, so those live behind this
/// trait while `depth_first_walk` owns the stack.
pub trait WalkPolicy {
    /// Cells the walk may advance to from `current`. Candidates are
    /// shuffled by the walk; visited filtering is the policy's job.
    fn candidates(&self, grid: &Grid, current: GridCoordinate) -> CoordinateSmallVec;

    /// The walk advanced from `from` to the freshly visited `to`.
    fn on_advance(&mut self, grid: &mut Grid, from: GridCoordinate, to: GridCoordinate);

    /// `cell` was popped off the stack as a dead end.
    fn on_backtrack(&mut self, grid: &mut Grid, cell: GridCoordinate);

    /// Whether the walk is complete with `current` on top of the stack.
    fn at_goal(&self, grid: &Grid, current: GridCoordinate) -> bool;

    /// Observation hook run once per loop iteration, before anything else.
    fn observe(&mut self, grid: &Grid);
}

/// Run a depth first walk from `start` until the policy's goal is reached
/// or the move stack empties. Returns the outcome together with the move
/// stack as it stood at termination: for a goal-reaching walk that is the
/// simple path from `start` (bottom) to the goal (top).
///
/// Every pushed cell is marked visited and candidates are policy-filtered
/// to unvisited cells, so no cell is pushed twice and the walk performs at
/// most `grid.size()` advances before it stops.
pub fn depth_first_walk<P: WalkPolicy>(grid: &mut Grid,
                                       rng: &mut XorShiftRng,
                                       start: GridCoordinate,
                                       policy: &mut P)
                                       -> (WalkOutcome, Vec<GridCoordinate>) {
    let mut move_stack: Vec<GridCoordinate> = Vec::with_capacity(grid.size());
    move_stack.push(start);
    grid.mark_visited(start);

    while let Some(&current) = move_stack.last() {
        policy.observe(grid);

        if policy.at_goal(grid, current) {
            return (WalkOutcome::GoalReached, move_stack);
        }

        grid.mark_visited(current);

        let mut moves = policy.candidates(grid, current);
        rng.shuffle(&mut moves);

        if let Some(next) = moves.pop() {
            grid.mark_visited(next);
            policy.on_advance(grid, current, next);
            move_stack.push(next);
            trace!("advance {} -> {}", current, next);
        } else {
            // Dead end: this cell takes no further part in the walk.
            move_stack.pop();
            policy.on_backtrack(grid, current);
            if let Some(cell) = grid.cell(current) {
                trace!("backtrack {}", cell);
            }
        }
    }

    (WalkOutcome::StackExhausted, move_stack)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};
    use rand;

    fn small_grid(rows: usize, cols: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(cols)).expect("grid dimensions rejected")
    }

    /// Walks every unvisited neighbour, wall-blind, counting its callbacks.
    struct SweepPolicy {
        goal: Option<GridCoordinate>,
        advances: usize,
        backtracks: usize,
        observations: usize,
    }

    impl SweepPolicy {
        fn new(goal: Option<GridCoordinate>) -> SweepPolicy {
            SweepPolicy {
                goal,
                advances: 0,
                backtracks: 0,
                observations: 0,
            }
        }
    }

    impl WalkPolicy for SweepPolicy {
        fn candidates(&self, grid: &Grid, current: GridCoordinate) -> CoordinateSmallVec {
            grid.unvisited_neighbours(current)
        }

        fn on_advance(&mut self, _: &mut Grid, _: GridCoordinate, _: GridCoordinate) {
            self.advances += 1;
        }

        fn on_backtrack(&mut self, _: &mut Grid, _: GridCoordinate) {
            self.backtracks += 1;
        }

        fn at_goal(&self, _: &Grid, current: GridCoordinate) -> bool {
            self.goal == Some(current)
        }

        fn observe(&mut self, _: &Grid) {
            self.observations += 1;
        }
    }

    #[test]
    fn goalless_walk_sweeps_every_cell_once() {
        let mut g = small_grid(3, 3);
        let mut rng = rand::weak_rng();
        let mut policy = SweepPolicy::new(None);

        let (outcome, stack) =
            depth_first_walk(&mut g, &mut rng, GridCoordinate::new(0, 0), &mut policy);

        assert_eq!(outcome, WalkOutcome::StackExhausted);
        assert!(stack.is_empty());
        // Each cell is entered exactly once and abandoned exactly once.
        assert_eq!(policy.advances, g.size() - 1);
        assert_eq!(policy.backtracks, g.size());
        assert!(g.iter().all(|coord| g.cell(coord).unwrap().is_visited()));
    }

    #[test]
    fn goal_walk_stops_with_the_goal_on_top() {
        let mut g = small_grid(4, 4);
        let mut rng = rand::weak_rng();
        let goal = GridCoordinate::new(3, 3);
        let mut policy = SweepPolicy::new(Some(goal));

        let (outcome, stack) =
            depth_first_walk(&mut g, &mut rng, GridCoordinate::new(0, 0), &mut policy);

        assert_eq!(outcome, WalkOutcome::GoalReached);
        assert_eq!(stack.first().cloned(), Some(GridCoordinate::new(0, 0)));
        assert_eq!(stack.last().cloned(), Some(goal));
    }

    #[test]
    fn start_equal_to_goal_is_an_immediate_success() {
        let mut g = small_grid(2, 2);
        let mut rng = rand::weak_rng();
        let start = GridCoordinate::new(1, 1);
        let mut policy = SweepPolicy::new(Some(start));

        let (outcome, stack) = depth_first_walk(&mut g, &mut rng, start, &mut policy);

        assert_eq!(outcome, WalkOutcome::GoalReached);
        assert_eq!(stack, vec![start]);
        assert_eq!(policy.advances, 0);
        assert_eq!(policy.observations, 1);
    }

    #[test]
    fn walled_in_start_exhausts_without_advancing() {
        // No walls are open and SolvePolicy-style candidates need hallways.
        struct Walled;
        impl WalkPolicy for Walled {
            fn candidates(&self, grid: &Grid, current: GridCoordinate) -> CoordinateSmallVec {
                grid.open_unvisited_neighbours(current)
            }
            fn on_advance(&mut self, _: &mut Grid, _: GridCoordinate, _: GridCoordinate) {}
            fn on_backtrack(&mut self, _: &mut Grid, _: GridCoordinate) {}
            fn at_goal(&self, _: &Grid, _: GridCoordinate) -> bool {
                false
            }
            fn observe(&mut self, _: &Grid) {}
        }

        let mut g = small_grid(2, 2);
        let mut rng = rand::weak_rng();
        let (outcome, stack) =
            depth_first_walk(&mut g, &mut rng, GridCoordinate::new(0, 0), &mut Walled);

        assert_eq!(outcome, WalkOutcome::StackExhausted);
        assert!(stack.is_empty());
    }
}
