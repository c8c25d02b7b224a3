use crate::cells::GridCoordinate;
use crate::grid::{CoordinateSmallVec, Grid};
use crate::renderers::ScreenTrace;
use crate::traversal::{depth_first_walk, WalkPolicy};

use log::debug;
use rand::{SeedableRng, XorShiftRng};

struct CarvePolicy<'t> {
    trace: Option<&'t ScreenTrace>,
}

impl<'t> WalkPolicy for CarvePolicy<'t> {
    fn candidates(&self, grid: &Grid, current: GridCoordinate) -> CoordinateSmallVec {
        grid.unvisited_neighbours(current)
    }

    fn on_advance(&mut self, grid: &mut Grid, from: GridCoordinate, to: GridCoordinate) {
        // `to` was unvisited, so this passage joins two regions that were
        // not previously connected and can never close a cycle.
        grid.open_wall(from, to);
    }

    fn on_backtrack(&mut self, _: &mut Grid, _: GridCoordinate) {}

    fn at_goal(&self, _: &Grid, _: GridCoordinate) -> bool {
        false
    }

    fn observe(&mut self, grid: &Grid) {
        if let Some(trace) = self.trace {
            trace.render(grid);
        }
    }
}

/// Carve a perfect maze into `grid` with the recursive backtracker: a depth
/// first walk from a uniformly random start cell that opens a wall toward a
/// randomly chosen unvisited neighbour on every advance and backtracks at
/// dead ends. The walk ends once every cell has been visited, leaving the
/// open walls forming a spanning tree over the grid.
///
/// Carve bookkeeping is reset afterwards: no cell is left marked visited.
/// When `trace` is supplied the grid is rendered after every carve step.
pub fn recursive_backtracker(grid: &mut Grid, rng: &mut XorShiftRng, trace: Option<&ScreenTrace>) {
    let start = grid.random_cell(rng);
    debug!("carving from {}", start);

    let mut policy = CarvePolicy { trace };
    depth_first_walk(grid, rng, start, &mut policy);

    grid.clear_run_state();
    debug!("carved {} passages over {} cells",
           grid.open_walls_count(),
           grid.size());
}

/// A fixed-seed RNG so a maze and its discovered path can be replayed.
/// XorShift cannot be seeded with all zero words, hence the low bit pin.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::from_seed([(seed as u32) | 1,
                            (seed >> 32) as u32,
                            0x9E37_79B9,
                            0x85EB_CA6B])
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};
    use quickcheck::{quickcheck, TestResult};

    fn carved_grid(rows: usize, cols: usize, seed: u64) -> Grid {
        let mut g = Grid::new(RowsCount(rows), ColumnsCount(cols))
            .expect("grid dimensions rejected");
        let mut rng = seeded_rng(seed);
        recursive_backtracker(&mut g, &mut rng, None);
        g
    }

    #[test]
    fn carved_grids_are_perfect_mazes() {
        for &(rows, cols) in &[(1, 2), (2, 1), (2, 2), (3, 5), (8, 8), (12, 3)] {
            for seed in 0..5 {
                let g = carved_grid(rows, cols, seed);
                assert_eq!(g.open_walls_count(), rows * cols - 1);
                assert!(g.is_perfect_maze());
            }
        }
    }

    #[test]
    fn single_cell_grid_opens_no_walls() {
        let g = carved_grid(1, 1, 99);
        assert_eq!(g.open_walls_count(), 0);
        assert!(g.is_perfect_maze());
    }

    #[test]
    fn two_by_two_grid_opens_exactly_three_walls() {
        for seed in 0..20 {
            let g = carved_grid(2, 2, seed);
            assert_eq!(g.open_walls_count(), 3);
            assert!(g.is_perfect_maze());
        }
    }

    #[test]
    fn no_visited_state_leaks_out_of_carving() {
        let g = carved_grid(6, 4, 7);
        assert!(g.iter().all(|coord| !g.cell(coord).unwrap().is_visited()));
        assert!(g.iter().all(|coord| !g.cell(coord).unwrap().is_on_path()));
    }

    #[test]
    fn same_seed_carves_the_same_maze() {
        let first = carved_grid(9, 7, 0xDEAD_BEEF);
        let second = carved_grid(9, 7, 0xDEAD_BEEF);
        for coord in first.iter() {
            let a = first.cell(coord).unwrap();
            let b = second.cell(coord).unwrap();
            assert_eq!(a.north(), b.north());
            assert_eq!(a.west(), b.west());
        }
    }

    #[test]
    fn quickcheck_spanning_tree_property() {
        fn property(rows: u8, cols: u8, seed: u64) -> TestResult {
            if rows == 0 || cols == 0 || rows > 16 || cols > 16 {
                return TestResult::discard();
            }
            let g = carved_grid(rows as usize, cols as usize, seed);
            TestResult::from_bool(g.is_perfect_maze() &&
                                  g.open_walls_count() == g.size() - 1)
        }
        quickcheck(property as fn(u8, u8, u64) -> TestResult);
    }
}
