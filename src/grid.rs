use crate::direction::Direction;

/// Board position in `(row, col)` form.
///
/// Coordinates are signed so that a step off the board (row `-1`, say) can be
/// represented and then rejected by [`Grid::is_out_of_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the coordinate one unit away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Dense identifier of a board cell, `row * size + col`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CellId(pub usize);

/// Immutable square board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Creates a `size`×`size` board.
    #[must_use]
    pub const fn new(size: u16) -> Self {
        Self { size }
    }

    /// Returns the side length of the board.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Returns true when `coord` lies off the board.
    #[must_use]
    pub fn is_out_of_bounds(self, coord: Coordinate) -> bool {
        let size = i32::from(self.size);
        coord.row < 0 || coord.col < 0 || coord.row >= size || coord.col >= size
    }

    /// Maps a coordinate to its cell, or `None` when it is off the board.
    #[must_use]
    pub fn cell_at(self, coord: Coordinate) -> Option<CellId> {
        if self.is_out_of_bounds(coord) {
            return None;
        }

        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.col).ok()?;
        Some(CellId(row * usize::from(self.size) + col))
    }

    /// Maps a cell back to its coordinate.
    ///
    /// `cell` must belong to this board; foreign ids produce coordinates that
    /// fail [`Grid::is_out_of_bounds`].
    #[must_use]
    pub fn coordinate_of(self, cell: CellId) -> Coordinate {
        let size = usize::from(self.size).max(1);
        let row = i32::try_from(cell.0 / size).unwrap_or(i32::MAX);
        let col = i32::try_from(cell.0 % size).unwrap_or(i32::MAX);
        Coordinate { row, col }
    }

    /// Returns true when `cell` names a cell on this board.
    #[must_use]
    pub fn contains(self, cell: CellId) -> bool {
        cell.0 < self.total_cells()
    }

    /// Iterates all cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellId> {
        (0..self.total_cells()).map(CellId)
    }
}
