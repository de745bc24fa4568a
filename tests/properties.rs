//! Property-based tests for board bookkeeping, move generation and the solver.
//!
//! Boards come from two sources: random walks away from the goal (always
//! solvable, bounded distance) and arbitrary permutations (either parity).

use proptest::prelude::*;
use slider::{solve, tile, Outcome, PuzzleState, TileNumber};

// ── Strategies ──────────────────────────────────────────────────────────

/// Applies `choices` as indices into the slidable positions of each board.
fn walk(dimension: usize, choices: &[usize]) -> PuzzleState {
    let mut state = PuzzleState::solved(dimension).unwrap();
    for &choice in choices {
        let slidable = state.slidable_positions();
        let position = slidable[choice % slidable.len()];
        state.apply(position).unwrap();
    }
    state
}

fn walked_board(max_dimension: usize, max_moves: usize) -> impl Strategy<Value = PuzzleState> {
    (2..=max_dimension, prop::collection::vec(0usize..4, 0..max_moves))
        .prop_map(|(dimension, choices)| walk(dimension, &choices))
}

fn shuffled_board(max_dimension: usize) -> impl Strategy<Value = PuzzleState> {
    (2..=max_dimension).prop_flat_map(|dimension| {
        let layout: Vec<TileNumber> = (0..(dimension * dimension) as TileNumber).collect();
        Just(layout)
            .prop_shuffle()
            .prop_map(move |layout| PuzzleState::new(dimension, &layout).unwrap())
    })
}

/// Inversion-count parity test for solvability.
fn parity_solvable(state: &PuzzleState) -> bool {
    let tiles: Vec<TileNumber> = state.layout().iter().copied().filter(|&n| n != 0).collect();
    let inversions = (0..tiles.len())
        .flat_map(|i| (i + 1..tiles.len()).map(move |j| (i, j)))
        .filter(|&(i, j)| tiles[i] > tiles[j])
        .count();
    let dimension = state.dimension();
    if dimension % 2 == 1 {
        inversions % 2 == 0
    } else {
        let slot_row = tile::row(state.slot_position(), dimension) - 1;
        (inversions + slot_row) % 2 == 1
    }
}

/// Manhattan and Hamming distances recomputed tile by tile.
fn recomputed(state: &PuzzleState) -> (u32, u32) {
    let dimension = state.dimension();
    let distances: Vec<u32> = state
        .layout()
        .iter()
        .enumerate()
        .filter(|&(_, &number)| number != 0)
        .map(|(index, &number)| tile::manhattan(number, index + 1, dimension))
        .collect();
    let hamming = distances.iter().filter(|&&d| d > 0).count() as u32;
    (distances.iter().sum(), hamming)
}

// ═══════════════════════════════════════════════════════════════════════
// Move generation
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slidable_count_matches_slot_location(state in shuffled_board(6)) {
        let dimension = state.dimension();
        let slot = state.slot_position();
        let (row, col) = (tile::row(slot, dimension), tile::col(slot, dimension));
        let on_row_edge = row == 1 || row == dimension;
        let on_col_edge = col == 1 || col == dimension;
        let expected = match (on_row_edge, on_col_edge) {
            (true, true) => 2,
            (true, false) | (false, true) => 3,
            (false, false) => 4,
        };
        let slidable = state.slidable_positions();
        prop_assert_eq!(slidable.len(), expected);
        for &position in &slidable {
            prop_assert!(state.is_slidable(position));
            prop_assert!(state.tile_at(position).is_some());
        }
    }

    #[test]
    fn sliding_back_restores_the_board(state in walked_board(5, 40), choice in 0usize..4) {
        let slidable = state.slidable_positions();
        let position = slidable[choice % slidable.len()];
        let next = state.neighbor_after_sliding(position).unwrap();
        prop_assert_eq!(next.slot_position(), position);

        let back = next.neighbor_after_sliding(state.slot_position()).unwrap();
        prop_assert_eq!(back, state);
    }

    #[test]
    fn non_adjacent_positions_are_rejected(state in shuffled_board(4), position in 0usize..20) {
        let slidable = state.slidable_positions();
        if !slidable.contains(&position) {
            prop_assert!(state.neighbor_after_sliding(position).is_err());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Heuristic bookkeeping
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn incremental_heuristics_match_recomputation(state in walked_board(6, 80)) {
        let (manhattan, hamming) = recomputed(&state);
        prop_assert_eq!(state.manhattan_distance(), manhattan);
        prop_assert_eq!(state.hamming_distance(), hamming);
    }

    #[test]
    fn solved_iff_heuristics_are_zero(state in prop_oneof![walked_board(4, 6), shuffled_board(3)]) {
        let solved = state.is_solved();
        prop_assert_eq!(solved, state.hamming_distance() == 0);
        prop_assert_eq!(solved, state.manhattan_distance() == 0);
        prop_assert_eq!(solved, state == PuzzleState::solved(state.dimension()).unwrap());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Twin parity and the solver
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exactly_one_of_board_and_twin_is_solvable(state in shuffled_board(6)) {
        let twin = state.twin();
        prop_assert_eq!(twin.slot_position(), state.slot_position());
        prop_assert_ne!(parity_solvable(&state), parity_solvable(&twin));
        prop_assert_eq!(twin.twin(), state);
    }

    #[test]
    fn walked_boards_solve_within_walk_length(
        dimension in 2usize..=4,
        choices in prop::collection::vec(0usize..4, 0..14),
    ) {
        let state = walk(dimension, &choices);
        let outcome = solve(&state);
        let moves = outcome.moves().expect("walked boards are solvable").to_vec();
        prop_assert!(moves.len() <= choices.len());

        let mut replayed = state.clone();
        for position in moves {
            replayed.apply(position).unwrap();
        }
        prop_assert!(replayed.is_solved());
    }

    #[test]
    fn twins_of_walked_boards_are_unsolvable(
        dimension in 2usize..=4,
        choices in prop::collection::vec(0usize..4, 0..14),
    ) {
        let state = walk(dimension, &choices);
        prop_assert_eq!(solve(&state.twin()), Outcome::Unsolvable);
    }
}

#[test]
fn every_2x2_board_agrees_with_parity() {
    let mut layout: Vec<TileNumber> = vec![0, 1, 2, 3];
    let mut permutations = Vec::new();
    permute(&mut layout, 0, &mut permutations);
    assert_eq!(permutations.len(), 24);

    for layout in permutations {
        let state = PuzzleState::new(2, &layout).unwrap();
        assert_eq!(
            solve(&state).is_solvable(),
            parity_solvable(&state),
            "Solver and parity disagree on {layout:?}"
        );
    }
}

fn permute(layout: &mut [TileNumber], start: usize, out: &mut Vec<Vec<TileNumber>>) {
    if start == layout.len() {
        out.push(layout.to_vec());
        return;
    }
    for i in start..layout.len() {
        layout.swap(start, i);
        permute(layout, start + 1, out);
        layout.swap(start, i);
    }
}
