//! Position arithmetic for square boards.
//!
//! Positions are 1-based and row-major: position 1 is the top-left cell and
//! position `N * N` the bottom-right one. Tile number `k` belongs at position
//! `k`, so a tile's goal cell is computed with the same formulas as its
//! current cell. Rows and columns returned here are 1-based as well.
//!
//! Position 0 and tile number 0 are not valid inputs: the arithmetic
//! underflows and panics on them. Callers range-check first, as
//! [`PuzzleState::is_slidable`](crate::board::PuzzleState::is_slidable) does.

/// A 1-based cell index on the board.
pub type Position = usize;

/// A tile number in `1..N*N`. `0` marks the slot in flat layouts.
pub type TileNumber = u16;

/// Row of a position (1-based). `position` must be at least 1.
#[inline(always)]
pub const fn row(position: Position, dimension: usize) -> usize {
    (position - 1) / dimension + 1
}

/// Column of a position (1-based). `position` must be at least 1.
#[inline(always)]
pub const fn col(position: Position, dimension: usize) -> usize {
    (position - 1) % dimension + 1
}

/// Converts a 1-based (row, column) pair back to a position.
#[inline(always)]
pub const fn position_at(row: usize, col: usize, dimension: usize) -> Position {
    (row - 1) * dimension + col
}

/// Grid distance between where a tile sits and where it belongs.
///
/// Both `number` and `position` must be at least 1; the slot has no distance.
///
/// Tile numbers divisible by the dimension land in the last column of the
/// row above what plain division suggests; the `- 1` shift in [`row`] and
/// [`col`] takes care of that.
#[inline(always)]
pub const fn manhattan(number: TileNumber, position: Position, dimension: usize) -> u32 {
    let goal = number as usize;
    let rows = row(goal, dimension).abs_diff(row(position, dimension));
    let cols = col(goal, dimension).abs_diff(col(position, dimension));
    (rows + cols) as u32
}

/// Whether two positions share an edge.
#[inline]
pub const fn adjacent(a: Position, b: Position, dimension: usize) -> bool {
    let same_row = row(a, dimension) == row(b, dimension);
    let same_col = col(a, dimension) == col(b, dimension);
    (same_row && a.abs_diff(b) == 1) || (same_col && a.abs_diff(b) == dimension)
}
