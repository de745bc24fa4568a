//! Sliding Tile Puzzle Solver Library
//!
//! Finds shortest solutions for square N-puzzles (8-puzzle, 15-puzzle, ...)
//! with A* over Manhattan distance, and proves unsolvable boards by racing
//! the search against the board's parity twin.

pub mod board;
pub mod error;
pub mod persistence;
pub mod queue;
pub mod scramble;
pub mod solver;
pub mod tile;

pub use board::{MoveFeedback, PuzzleState, SlidablePositions, MAX_DIMENSION};
pub use error::{Error, Result};
pub use queue::MinHeap;
pub use solver::{replay, solve, solve_with, Outcome, Solution, SolveStats, SolverConfig};
pub use tile::{Position, TileNumber};
