use crate::cells::{Cell, CompassPrimary, GridCoordinate, WallState};
use crate::renderers;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils;

use rand::{Rng, XorShiftRng};
use smallvec::SmallVec;
use std::error::Error;
use std::fmt;

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    /// Zero rows or zero columns. A grid never runs with degenerate
    /// dimensions, so this is rejected before any cell is created.
    EmptyDimensions,
    /// An entrance or exit placed outside the grid. Rejected at set time
    /// rather than discovered mid-solve.
    CoordinateOutOfBounds,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridError::EmptyDimensions => write!(f, "grid dimensions must be at least 1x1"),
            GridError::CoordinateOutOfBounds => write!(f, "coordinate is outside the grid"),
        }
    }
}

impl Error for GridError {}

/// A rows x cols matrix of cells with fixed dimensions, plus the designated
/// entrance and exit. Wall mutation goes through `open_wall` so that the
/// single-owner wall invariant holds however a passage is described.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
    start: GridCoordinate,
    exit: GridCoordinate,
}

impl Grid {
    /// Entrance defaults to the top-left cell and exit to the bottom-right.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid, GridError> {
        let (RowsCount(row_count), ColumnsCount(col_count)) = (rows, columns);
        if row_count == 0 || col_count == 0 {
            return Err(GridError::EmptyDimensions);
        }

        let mut cells = Vec::with_capacity(row_count * col_count);
        for row in 0..row_count {
            for col in 0..col_count {
                cells.push(Cell::new(GridCoordinate::new(row as u32, col as u32)));
            }
        }

        Ok(Grid {
            cells,
            rows,
            columns,
            start: GridCoordinate::new(0, 0),
            exit: GridCoordinate::new(row_count as u32 - 1, col_count as u32 - 1),
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        self.exit
    }

    pub fn set_start(&mut self, coord: GridCoordinate) -> Result<(), GridError> {
        if self.is_valid_coordinate(coord) {
            self.start = coord;
            Ok(())
        } else {
            Err(GridError::CoordinateOutOfBounds)
        }
    }

    pub fn set_exit(&mut self, coord: GridCoordinate) -> Result<(), GridError> {
        if self.is_valid_coordinate(coord) {
            self.exit = coord;
            Ok(())
        } else {
            Err(GridError::CoordinateOutOfBounds)
        }
    }

    /// Signed bounds test: true iff `0 <= row < rows` and `0 <= col < cols`.
    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && row < self.rows.0 as i64 && col < self.columns.0 as i64
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        self.in_bounds(i64::from(coord.row), i64::from(coord.col))
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.index_of(coord).map(|index| &self.cells[index])
    }

    fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        self.index_of(coord).map(move |index| &mut self.cells[index])
    }

    /// Row major index of a coordinate, None when out of bounds.
    #[inline]
    fn index_of(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.col as usize)
        } else {
            None
        }
    }

    /// Is there an open wall (a hallway) between two adjacent cells?
    ///
    /// Ownership resolution: North reads `from`'s north wall, East reads
    /// `to`'s west wall, South reads `to`'s north wall, West reads `from`'s
    /// west wall. Non-adjacent or out of bounds pairs are never open.
    pub fn is_open(&self, from: GridCoordinate, to: GridCoordinate) -> bool {
        let wall = match CompassPrimary::between(from, to) {
            Some(CompassPrimary::North) => self.cell(from).map(|cell| cell.north),
            Some(CompassPrimary::East) => self.cell(to).map(|cell| cell.west),
            Some(CompassPrimary::South) => self.cell(to).map(|cell| cell.north),
            Some(CompassPrimary::West) => self.cell(from).map(|cell| cell.west),
            None => None,
        };
        wall == Some(WallState::Open)
    }

    /// Open the wall between two adjacent cells, resolving which cell owns
    /// it the same way as `is_open`. Opening an already open wall is a
    /// no-op, as is a non-adjacent or out of bounds pair.
    pub fn open_wall(&mut self, from: GridCoordinate, to: GridCoordinate) {
        match CompassPrimary::between(from, to) {
            Some(CompassPrimary::North) => {
                if let Some(cell) = self.cell_mut(from) {
                    cell.north = WallState::Open;
                }
            }
            Some(CompassPrimary::East) => {
                if let Some(cell) = self.cell_mut(to) {
                    cell.west = WallState::Open;
                }
            }
            Some(CompassPrimary::South) => {
                if let Some(cell) = self.cell_mut(to) {
                    cell.north = WallState::Open;
                }
            }
            Some(CompassPrimary::West) => {
                if let Some(cell) = self.cell_mut(from) {
                    cell.west = WallState::Open;
                }
            }
            None => {}
        }
    }

    /// In-bounds orthogonal neighbours in North, East, South, West order.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| coord.offset(dir))
            .filter(|&adjacent| self.is_valid_coordinate(adjacent))
            .collect()
    }

    /// Carve candidates: neighbours not yet visited, walls ignored.
    pub fn unvisited_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        let neighbours = self.neighbours(coord);
        neighbours
            .iter()
            .cloned()
            .filter(|&adjacent| self.cell(adjacent).map_or(false, |cell| !cell.visited))
            .collect()
    }

    /// Solve candidates: unvisited neighbours reachable through an open wall.
    pub fn open_unvisited_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        let neighbours = self.neighbours(coord);
        neighbours
            .iter()
            .cloned()
            .filter(|&adjacent| {
                self.is_open(coord, adjacent) &&
                self.cell(adjacent).map_or(false, |cell| !cell.visited)
            })
            .collect()
    }

    pub fn random_cell(&self, rng: &mut XorShiftRng) -> GridCoordinate {
        let index = rng.gen::<usize>() % self.size();
        GridCoordinate::new((index / self.columns.0) as u32, (index % self.columns.0) as u32)
    }

    /// Reset visited/on-path/arrival on every cell. Wall state is untouched.
    /// Run after carving so generation bookkeeping never leaks into solving.
    pub fn clear_run_state(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
            cell.on_path = false;
            cell.arrival = None;
        }
    }

    /// Number of open walls (passages) on the whole grid. Every passage is
    /// counted once because every wall has exactly one owning cell.
    pub fn open_walls_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                (cell.north == WallState::Open) as usize + (cell.west == WallState::Open) as usize
            })
            .sum()
    }

    /// A perfect maze is a spanning tree over the cells: every cell
    /// reachable through open walls and exactly `size - 1` passages.
    pub fn is_perfect_maze(&self) -> bool {
        if self.open_walls_count() != self.size() - 1 {
            return false;
        }

        let origin = GridCoordinate::new(0, 0);
        let mut seen = utils::fnv_hashset(self.size());
        seen.insert(origin);
        let mut frontier = vec![origin];
        while let Some(coord) = frontier.pop() {
            let neighbours = self.neighbours(coord);
            for &adjacent in neighbours.iter() {
                if self.is_open(coord, adjacent) && seen.insert(adjacent) {
                    frontier.push(adjacent);
                }
            }
        }

        seen.len() == self.size()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns.0,
            cells_count: self.size(),
        }
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            rows: self.rows.0,
            columns: self.columns.0,
        }
    }

    pub(crate) fn mark_visited(&mut self, coord: GridCoordinate) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.visited = true;
        }
    }

    pub(crate) fn set_on_path(&mut self, coord: GridCoordinate, on_path: bool) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.on_path = on_path;
        }
    }

    pub(crate) fn set_arrival(&mut self, coord: GridCoordinate, arrival: Option<CompassPrimary>) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.arrival = arrival;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", renderers::render_text(self))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let row = self.current_cell_number / self.columns;
            let col = self.current_cell_number % self.columns;
            self.current_cell_number += 1;
            Some(GridCoordinate::new(row as u32, col as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    rows: usize,
    columns: usize,
}

impl Iterator for RowIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows {
            let row = self.current_row;
            self.current_row += 1;
            Some((0..self.columns)
                     .map(|col| GridCoordinate::new(row as u32, col as u32))
                     .collect())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows - self.current_row;
        (remaining, Some(remaining))
    }
}
