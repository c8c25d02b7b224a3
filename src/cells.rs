use crate::units::{ColumnIndex, RowIndex};

use std::fmt;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub col: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        GridCoordinate::new(row as u32, col as u32)
    }

    /// The coordinate one cell away in the given direction.
    /// Returns None if that coordinate is not representable (above the top
    /// row or left of the first column). Bounds on the other two sides are
    /// the grid's concern, not the coordinate's.
    pub fn offset(self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let GridCoordinate { row, col } = self;
        match dir {
            CompassPrimary::North => {
                if row > 0 {
                    Some(GridCoordinate { row: row - 1, col })
                } else {
                    None
                }
            }
            CompassPrimary::South => Some(GridCoordinate { row: row + 1, col }),
            CompassPrimary::East => Some(GridCoordinate { row, col: col + 1 }),
            CompassPrimary::West => {
                if col > 0 {
                    Some(GridCoordinate { row, col: col - 1 })
                } else {
                    None
                }
            }
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_col_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Candidate move order before shuffling: North, East, South, West.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    /// The direction moved when stepping from `from` to `to`, derived from
    /// the coordinate deltas alone. North decreases the row, East increases
    /// the column. Returns None unless the cells are orthogonally adjacent.
    pub fn between(from: GridCoordinate, to: GridCoordinate) -> Option<CompassPrimary> {
        let row_delta = i64::from(to.row) - i64::from(from.row);
        let col_delta = i64::from(to.col) - i64::from(from.col);
        match (row_delta, col_delta) {
            (-1, 0) => Some(CompassPrimary::North),
            (1, 0) => Some(CompassPrimary::South),
            (0, 1) => Some(CompassPrimary::East),
            (0, -1) => Some(CompassPrimary::West),
            _ => None,
        }
    }

    /// Single letter glyph used when rendering a path cell.
    pub fn letter(self) -> char {
        match self {
            CompassPrimary::North => 'N',
            CompassPrimary::South => 'S',
            CompassPrimary::East => 'E',
            CompassPrimary::West => 'W',
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallState {
    Closed,
    Open,
}

/// One grid location. A cell owns its north and west walls only: the south
/// wall of (r, c) is the north wall of (r+1, c) and the east wall is the
/// west wall of (r, c+1), so every shared wall has exactly one owner.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    coord: GridCoordinate,
    pub(crate) visited: bool,
    pub(crate) north: WallState,
    pub(crate) west: WallState,
    pub(crate) on_path: bool,
    pub(crate) arrival: Option<CompassPrimary>,
}

impl Cell {
    pub fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            visited: false,
            north: WallState::Closed,
            west: WallState::Closed,
            on_path: false,
            arrival: None,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn north(&self) -> WallState {
        self.north
    }

    #[inline]
    pub fn west(&self) -> WallState {
        self.west
    }

    #[inline]
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    /// The direction moved to reach this cell when it was added to the
    /// solution path. None for the entrance and for cells never walked.
    #[inline]
    pub fn arrival(&self) -> Option<CompassPrimary> {
        self.arrival
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "[ {} vis: {} north: {:?} west: {:?} path: {} ]",
               self.coord,
               self.visited,
               self.north,
               self.west,
               self.on_path)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn direction_between_adjacent_cells() {
        let gc = |row, col| GridCoordinate::new(row, col);
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(0, 1)),
                   Some(CompassPrimary::North));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(2, 1)),
                   Some(CompassPrimary::South));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(1, 2)),
                   Some(CompassPrimary::East));
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(1, 0)),
                   Some(CompassPrimary::West));
    }

    #[test]
    fn no_direction_between_non_adjacent_cells() {
        let gc = |row, col| GridCoordinate::new(row, col);
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(1, 1)), None);
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(0, 0)), None);
        assert_eq!(CompassPrimary::between(gc(1, 1), gc(2, 2)), None);
        assert_eq!(CompassPrimary::between(gc(0, 0), gc(0, 2)), None);
        assert_eq!(CompassPrimary::between(gc(0, 0), gc(2, 0)), None);
    }

    #[test]
    fn offsets_fall_off_the_top_left_edges() {
        let origin = GridCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(origin.offset(CompassPrimary::South),
                   Some(GridCoordinate::new(1, 0)));
        assert_eq!(origin.offset(CompassPrimary::East),
                   Some(GridCoordinate::new(0, 1)));
    }

    #[test]
    fn new_cells_are_sealed_and_unwalked() {
        let cell = Cell::new(GridCoordinate::new(2, 3));
        assert_eq!(cell.north(), WallState::Closed);
        assert_eq!(cell.west(), WallState::Closed);
        assert!(!cell.is_visited());
        assert!(!cell.is_on_path());
        assert_eq!(cell.arrival(), None);
    }
}
