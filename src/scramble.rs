//! Random-walk scrambler.
//!
//! Starts from the goal board and slides random tiles, so the result is
//! always solvable. The walk never slides the tile it just moved back and
//! prefers layouts it has not produced before, which keeps it from dithering
//! around the goal on small boards.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::board::PuzzleState;
use crate::error::Result;
use crate::tile::Position;

/// Scrambler settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrambleConfig {
    /// Stop once at least this share of tiles (0-100) is out of place.
    pub displaced_percent: u8,
    /// Hard cap on the number of slides.
    pub max_moves: usize,
    /// Seed for a reproducible walk; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            displaced_percent: 80,
            max_moves: 1_000,
            seed: None,
        }
    }
}

/// Scrambles a goal board of the given dimension.
pub fn scramble(dimension: usize, config: &ScrambleConfig) -> Result<PuzzleState> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let start = PuzzleState::solved(dimension)?;
    Ok(scramble_from(start, config, &mut rng))
}

/// Random walk from `start` until the displaced share or move cap is reached.
pub fn scramble_from<R: Rng + ?Sized>(
    start: PuzzleState,
    config: &ScrambleConfig,
    rng: &mut R,
) -> PuzzleState {
    let target = displaced_target(start.tile_count(), config.displaced_percent);
    let mut state = start;
    let mut visited: FxHashSet<PuzzleState> = FxHashSet::default();
    visited.insert(state.clone());
    let mut vacated: Option<Position> = None;
    let mut moves = 0;

    while (state.hamming_distance() as usize) < target && moves < config.max_moves {
        let candidates: Vec<Position> = state
            .slidable_positions()
            .iter()
            .copied()
            .filter(|&position| Some(position) != vacated)
            .collect();
        let fresh: Vec<Position> = candidates
            .iter()
            .copied()
            .filter(|&position| !visited.contains(&state.slid_unchecked(position)))
            .collect();
        let pool = if fresh.is_empty() { &candidates } else { &fresh };

        // at least one neighbor besides the vacated cell always exists
        let Some(&position) = pool.choose(rng) else {
            break;
        };
        let previous_slot = state.slot_position();
        state = state.slid_unchecked(position);
        visited.insert(state.clone());
        vacated = Some(previous_slot);
        moves += 1;
    }

    debug!(
        moves,
        hamming = state.hamming_distance(),
        manhattan = state.manhattan_distance(),
        "scramble finished"
    );
    state
}

/// Number of displaced tiles the walk aims for, capped at the tile count.
fn displaced_target(tile_count: usize, percent: u8) -> usize {
    let percent = usize::from(percent.min(100));
    (tile_count * percent).div_ceil(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, Outcome};

    #[test]
    fn test_zero_percent_returns_goal() {
        let config = ScrambleConfig {
            displaced_percent: 0,
            seed: Some(1),
            ..ScrambleConfig::default()
        };
        let state = scramble(4, &config).unwrap();
        assert!(state.is_solved());
    }

    #[test]
    fn test_reaches_displaced_target() {
        let config = ScrambleConfig {
            displaced_percent: 75,
            max_moves: 10_000,
            seed: Some(7),
        };
        let state = scramble(3, &config).unwrap();
        assert!(
            state.hamming_distance() >= 6,
            "Expected at least 6 of 8 tiles displaced, got {}",
            state.hamming_distance()
        );
    }

    #[test]
    fn test_move_cap_is_respected() {
        let config = ScrambleConfig {
            displaced_percent: 100,
            max_moves: 1,
            seed: Some(3),
        };
        let state = scramble(4, &config).unwrap();
        assert_eq!(state.hamming_distance(), 1);
        assert_eq!(state.manhattan_distance(), 1);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = ScrambleConfig {
            seed: Some(42),
            ..ScrambleConfig::default()
        };
        assert_eq!(scramble(4, &config).unwrap(), scramble(4, &config).unwrap());
    }

    #[test]
    fn test_scrambled_boards_are_solvable() {
        for seed in 0..5 {
            let config = ScrambleConfig {
                displaced_percent: 100,
                max_moves: 40,
                seed: Some(seed),
            };
            let state = scramble(3, &config).unwrap();
            assert!(
                matches!(solve(&state), Outcome::Solvable(_)),
                "Seed {seed} produced an unsolvable board:\n{state}"
            );
        }
    }

    #[test]
    fn test_displaced_target_rounds_up() {
        assert_eq!(displaced_target(8, 50), 4);
        assert_eq!(displaced_target(15, 50), 8);
        assert_eq!(displaced_target(15, 200), 15);
        assert_eq!(displaced_target(3, 0), 0);
    }
}
