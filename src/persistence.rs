//! Plain-text board files.
//!
//! Format: whitespace-separated integers. The first is the dimension `N`,
//! followed by `N * N` tile numbers in row-major order with `0` for the slot.
//! Line breaks carry no meaning, but [`format_board`] writes one row per line:
//!
//! ```text
//! 3
//! 1 2 3
//! 4 0 6
//! 7 5 8
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::board::PuzzleState;
use crate::error::{Error, Result};
use crate::tile::TileNumber;

/// Parses a board from its text form.
pub fn parse_board(contents: &str) -> Result<PuzzleState> {
    let mut tokens = contents.split_whitespace();

    let dimension_token = tokens
        .next()
        .ok_or_else(|| Error::MalformedBoard("no dimension found".to_string()))?;
    let dimension: usize = dimension_token.parse().map_err(|_| {
        Error::MalformedBoard(format!("dimension {dimension_token:?} is not a number"))
    })?;

    let layout = tokens
        .map(|token| {
            token.parse::<TileNumber>().map_err(|_| {
                Error::MalformedBoard(format!("tile {token:?} is not a valid tile number"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    PuzzleState::new(dimension, &layout)
}

/// Formats a board as its dimension followed by one line per row.
pub fn format_board(state: &PuzzleState) -> String {
    let mut output = format!("{}\n", state.dimension());
    for row in state.layout().chunks(state.dimension()) {
        let cells: Vec<String> = row.iter().map(TileNumber::to_string).collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }
    output
}

/// Reads and parses a board file.
pub fn load(path: impl AsRef<Path>) -> Result<PuzzleState> {
    let contents = fs::read_to_string(path)?;
    parse_board(&contents)
}

/// Writes a board file in the format [`load`] reads.
pub fn save(path: impl AsRef<Path>, state: &PuzzleState) -> Result<()> {
    fs::write(path, format_board(state))?;
    Ok(())
}

impl FromStr for PuzzleState {
    type Err = Error;

    fn from_str(contents: &str) -> Result<Self> {
        parse_board(contents)
    }
}
