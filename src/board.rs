//! Board state with incrementally maintained heuristics.
//!
//! A [`PuzzleState`] stores the tile layout as a flat row-major array where
//! each cell holds a tile number or 0 for the slot. The Hamming and Manhattan
//! distances are computed once at construction and then adjusted on every
//! slide by looking only at the tile that moved.

use std::fmt;
use std::ops::Deref;

use crate::error::{Error, Result};
use crate::tile::{self, Position, TileNumber};

/// Largest supported board edge. Keeps every tile number within `u16`.
pub const MAX_DIMENSION: usize = 255;

/// Immutable-by-convention snapshot of a board.
///
/// Equality compares the full layout, so two states are equal only when every
/// tile sits in the same cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    dimension: usize,
    /// Tile number per cell, indexed by `position - 1`; 0 is the slot.
    cells: Vec<TileNumber>,
    slot: Position,
    /// Number of tiles away from their goal cell.
    hamming: u32,
    /// Sum of the per-tile grid distances to the goal cell.
    manhattan: u32,
}

/// Feedback from an in-place slide, used by callers that animate moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveFeedback {
    /// Where the slot was before the slide (and where the tile now sits).
    pub previous_slot: Position,
    /// Whether the board reached the goal layout with this slide.
    pub solved: bool,
}

/// Positions next to the slot. Always holds 2, 3 or 4 entries.
///
/// Uses a fixed-size array so move generation never allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlidablePositions {
    positions: [Position; 4],
    len: usize,
}

impl SlidablePositions {
    fn push(&mut self, position: Position) {
        self.positions[self.len] = position;
        self.len += 1;
    }
}

impl Deref for SlidablePositions {
    type Target = [Position];

    fn deref(&self) -> &[Position] {
        &self.positions[..self.len]
    }
}

impl<'a> IntoIterator for &'a SlidablePositions {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PuzzleState {
    /// Builds a board from a row-major layout where 0 marks the slot.
    ///
    /// Fails with [`Error::MalformedBoard`] unless the layout holds exactly
    /// `dimension²` cells covering every tile `1..dimension²` once plus a
    /// single slot.
    pub fn new(dimension: usize, layout: &[TileNumber]) -> Result<Self> {
        check_dimension(dimension)?;
        let cell_count = dimension * dimension;
        if layout.len() != cell_count {
            return Err(Error::MalformedBoard(format!(
                "expected {cell_count} cells for dimension {dimension}, found {}",
                layout.len()
            )));
        }

        let mut seen = vec![false; cell_count];
        for (index, &number) in layout.iter().enumerate() {
            let number = number as usize;
            if number >= cell_count {
                return Err(Error::MalformedBoard(format!(
                    "tile {number} at position {} is out of range 0..{cell_count}",
                    index + 1
                )));
            }
            if seen[number] {
                let what = if number == 0 {
                    "more than one slot".to_string()
                } else {
                    format!("tile {number} appears twice")
                };
                return Err(Error::MalformedBoard(what));
            }
            seen[number] = true;
        }
        // every value is in range and unique, and there are exactly
        // cell_count of them, so each of 0..cell_count appears once

        Ok(Self::from_valid_cells(dimension, layout.to_vec()))
    }

    /// Builds a board from an explicit position -> tile mapping plus the slot.
    pub fn from_tiles(
        dimension: usize,
        tiles: &[(Position, TileNumber)],
        slot: Position,
    ) -> Result<Self> {
        check_dimension(dimension)?;
        let cell_count = dimension * dimension;
        if !(1..=cell_count).contains(&slot) {
            return Err(Error::MalformedBoard(format!(
                "slot position {slot} is outside 1..={cell_count}"
            )));
        }
        if tiles.len() != cell_count - 1 {
            return Err(Error::MalformedBoard(format!(
                "expected {} tiles for dimension {dimension}, found {}",
                cell_count - 1,
                tiles.len()
            )));
        }

        let mut cells: Vec<Option<TileNumber>> = vec![None; cell_count];
        for &(position, number) in tiles {
            if !(1..=cell_count).contains(&position) {
                return Err(Error::MalformedBoard(format!(
                    "tile {number} placed at position {position}, outside 1..={cell_count}"
                )));
            }
            if position == slot {
                return Err(Error::MalformedBoard(format!(
                    "tile {number} placed on the slot at position {slot}"
                )));
            }
            if number == 0 {
                return Err(Error::MalformedBoard(format!(
                    "tile number 0 at position {position} is reserved for the slot"
                )));
            }
            if cells[position - 1].replace(number).is_some() {
                return Err(Error::MalformedBoard(format!(
                    "position {position} is assigned more than once"
                )));
            }
        }

        let layout: Vec<TileNumber> = cells.into_iter().map(|cell| cell.unwrap_or(0)).collect();
        Self::new(dimension, &layout)
    }

    /// The goal board: tile `k` at position `k`, slot in the last cell.
    pub fn solved(dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        let cell_count = dimension * dimension;
        let cells = (1..cell_count)
            .map(|number| number as TileNumber)
            .chain(std::iter::once(0))
            .collect();
        Ok(Self::from_valid_cells(dimension, cells))
    }

    /// Computes the heuristics from scratch for a layout already known to be valid.
    fn from_valid_cells(dimension: usize, cells: Vec<TileNumber>) -> Self {
        let mut slot = 0;
        let mut hamming = 0;
        let mut manhattan = 0;

        for (index, &number) in cells.iter().enumerate() {
            let position = index + 1;
            if number == 0 {
                slot = position;
                continue;
            }
            let distance = tile::manhattan(number, position, dimension);
            if distance > 0 {
                hamming += 1;
                manhattan += distance;
            }
        }

        Self {
            dimension,
            cells,
            slot,
            hamming,
            manhattan,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn slot_position(&self) -> Position {
        self.slot
    }

    pub fn hamming_distance(&self) -> u32 {
        self.hamming
    }

    pub fn manhattan_distance(&self) -> u32 {
        self.manhattan
    }

    /// Number of tiles on the board (`dimension² - 1`).
    pub fn tile_count(&self) -> usize {
        self.cells.len() - 1
    }

    /// Row-major layout with 0 for the slot.
    pub fn layout(&self) -> &[TileNumber] {
        &self.cells
    }

    /// Tile at a position, or `None` for the slot or an out-of-range position.
    pub fn tile_at(&self, position: Position) -> Option<TileNumber> {
        match position.checked_sub(1).and_then(|index| self.cells.get(index)) {
            Some(&number) if number != 0 => Some(number),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.hamming == 0
    }

    /// Fraction of the way to the goal: 1.0 when solved, lower the further
    /// the tiles are from home. Can drop below zero on heavily scrambled boards.
    pub fn progress(&self) -> f64 {
        if self.is_solved() {
            1.0
        } else {
            1.0 - self.manhattan as f64 / self.tile_count() as f64
        }
    }

    /// Positions whose tile may slide into the slot.
    pub fn slidable_positions(&self) -> SlidablePositions {
        let dimension = self.dimension;
        let slot = self.slot;
        let slot_row = tile::row(slot, dimension);
        let slot_col = tile::col(slot, dimension);

        let mut slidable = SlidablePositions {
            positions: [0; 4],
            len: 0,
        };
        if slot_col > 1 {
            slidable.push(tile::position_at(slot_row, slot_col - 1, dimension));
        }
        if slot_col < dimension {
            slidable.push(tile::position_at(slot_row, slot_col + 1, dimension));
        }
        if slot_row > 1 {
            slidable.push(tile::position_at(slot_row - 1, slot_col, dimension));
        }
        if slot_row < dimension {
            slidable.push(tile::position_at(slot_row + 1, slot_col, dimension));
        }
        slidable
    }

    /// Whether the tile at `position` touches the slot.
    pub fn is_slidable(&self, position: Position) -> bool {
        (1..=self.cells.len()).contains(&position)
            && tile::adjacent(position, self.slot, self.dimension)
    }

    /// Returns a new board with the tile at `position` slid into the slot.
    pub fn neighbor_after_sliding(&self, position: Position) -> Result<Self> {
        self.check_slidable(position)?;
        Ok(self.slid_unchecked(position))
    }

    /// [`neighbor_after_sliding`](Self::neighbor_after_sliding) for positions
    /// taken straight from [`slidable_positions`](Self::slidable_positions).
    #[inline]
    pub(crate) fn slid_unchecked(&self, position: Position) -> Self {
        debug_assert!(self.is_slidable(position));
        let mut neighbor = self.clone();
        neighbor.slide(position);
        neighbor
    }

    /// Slides the tile at `position` into the slot in place.
    ///
    /// Illegal positions leave the board untouched.
    pub fn apply(&mut self, position: Position) -> Result<MoveFeedback> {
        self.check_slidable(position)?;
        let previous_slot = self.slot;
        self.slide(position);
        Ok(MoveFeedback {
            previous_slot,
            solved: self.is_solved(),
        })
    }

    /// The board with two tiles of one row exchanged.
    ///
    /// Swapping two tiles flips the permutation parity while keeping the
    /// slot fixed, so exactly one of a board and its twin can reach the goal.
    /// The pair is the first two tiles of the first row holding at least two.
    pub fn twin(&self) -> Self {
        let dimension = self.dimension;
        let mut cells = self.cells.clone();

        // a row has at least dimension - 1 >= 1 tiles; with dimension 2 the
        // slot's row has only one, but then the other row has two
        let (first, second) = (0..dimension)
            .find_map(|row| {
                let start = row * dimension;
                let mut tiles = (start..start + dimension).filter(|&index| cells[index] != 0);
                Some((tiles.next()?, tiles.next()?))
            })
            .unwrap_or((0, 1));
        cells.swap(first, second);

        Self::from_valid_cells(dimension, cells)
    }

    fn check_slidable(&self, position: Position) -> Result<()> {
        if self.is_slidable(position) {
            Ok(())
        } else {
            Err(Error::IllegalMove {
                position,
                slot: self.slot,
            })
        }
    }

    /// Moves the tile at `position` into the slot, adjusting the heuristics
    /// from that tile's before/after distance only.
    fn slide(&mut self, position: Position) {
        let number = self.cells[position - 1];
        let before = tile::manhattan(number, position, self.dimension);
        let after = tile::manhattan(number, self.slot, self.dimension);

        self.cells.swap(position - 1, self.slot - 1);
        self.manhattan = self.manhattan - before + after;
        if before > 0 && after == 0 {
            self.hamming -= 1;
        } else if before == 0 && after > 0 {
            self.hamming += 1;
        }
        self.slot = position;
    }
}

fn check_dimension(dimension: usize) -> Result<()> {
    if (2..=MAX_DIMENSION).contains(&dimension) {
        Ok(())
    } else {
        Err(Error::MalformedBoard(format!(
            "dimension {dimension} is outside 2..={MAX_DIMENSION}"
        )))
    }
}

/// Renders the board as right-aligned rows, `0` for the slot.
impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells.len() - 1).to_string().len();
        for row in self.cells.chunks(self.dimension) {
            for (col, number) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{number:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
