//! Error type shared by board construction, moves and the solver.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The board violates a layout invariant (dimension, tile range,
    /// duplicates, slot count) or could not be parsed.
    #[error("malformed board: {0}")]
    MalformedBoard(String),

    /// A slide was requested for a position that is not next to the slot.
    #[error("illegal move: position {position} is not adjacent to slot {slot}")]
    IllegalMove { position: usize, slot: usize },

    /// The configured expansion bound was reached before the search ended.
    #[error("search limit reached after {expanded} expansions")]
    SearchLimit { expanded: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
