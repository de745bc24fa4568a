//! Best-first (A*) solver with a parity twin.
//!
//! Two frontiers take turns expanding one node each: one seeded with the
//! board, one with its [`twin`](PuzzleState::twin). Exactly one of the two can reach the goal,
//! so whichever frontier surfaces a solved board first decides solvability
//! without any inversion counting.
//!
//! Key choices:
//! - Search nodes live in a per-frontier arena and point at their parent by
//!   index, so the tree is acyclic by construction and freed in one go
//! - Heap entries are small `Copy` keys; boards stay put in the arena
//! - Only the immediate move back to the parent's board is suppressed

use tracing::{debug, trace};

use crate::board::PuzzleState;
use crate::error::{Error, Result};
use crate::queue::MinHeap;
use crate::tile::Position;

/// How often (in expansions) progress is logged at debug level.
const PROGRESS_INTERVAL: usize = 100_000;

/// Index of a node inside its frontier's arena.
type NodeId = usize;

/// A board plus its place in the search tree.
struct SearchNode {
    state: PuzzleState,
    /// Depth in the tree (g).
    moves: u32,
    /// Position slid to reach this board from its parent.
    moved: Option<Position>,
    previous: Option<NodeId>,
}

/// Heap key for a node: `priority` first, then `manhattan`, then age.
///
/// Field order matters: the derived `Ord` compares fields top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    /// `manhattan + moves` (f = g + h).
    priority: u32,
    manhattan: u32,
    node: NodeId,
}

/// One independent search: a priority queue over an arena of nodes.
struct Frontier {
    nodes: Vec<SearchNode>,
    queue: MinHeap<FrontierEntry>,
}

impl Frontier {
    fn seed(root: PuzzleState) -> Self {
        let mut frontier = Self {
            nodes: Vec::new(),
            queue: MinHeap::new(),
        };
        frontier.push(SearchNode {
            state: root,
            moves: 0,
            moved: None,
            previous: None,
        });
        frontier
    }

    fn push(&mut self, node: SearchNode) {
        let manhattan = node.state.manhattan_distance();
        let entry = FrontierEntry {
            priority: manhattan + node.moves,
            manhattan,
            node: self.nodes.len(),
        };
        self.nodes.push(node);
        self.queue.insert(entry);
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether the current minimum is a goal board.
    fn min_is_solved(&self) -> bool {
        self.queue
            .peek_min()
            .is_some_and(|entry| self.nodes[entry.node].state.is_solved())
    }

    /// Pops the minimum and queues each of its neighbors except the board
    /// it was reached from.
    fn expand(&mut self) {
        let Some(entry) = self.queue.pop_min() else {
            return;
        };
        let parent = entry.node;
        let moves = self.nodes[parent].moves + 1;
        let grandparent = self.nodes[parent].previous;

        for &position in &self.nodes[parent].state.slidable_positions() {
            let neighbor = self.nodes[parent].state.slid_unchecked(position);
            if grandparent.is_some_and(|id| self.nodes[id].state == neighbor) {
                continue;
            }
            self.push(SearchNode {
                state: neighbor,
                moves,
                moved: Some(position),
                previous: Some(parent),
            });
        }
    }

    /// Slides leading from the root to the current minimum, in order.
    fn path_to_min(&self) -> Vec<Position> {
        let mut path = Vec::new();
        let mut current = self.queue.peek_min().map(|entry| entry.node);
        while let Some(id) = current {
            let node = &self.nodes[id];
            if let Some(position) = node.moved {
                path.push(position);
            }
            current = node.previous;
        }
        path.reverse();
        path
    }
}

/// Solver settings. The default search is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Stop with [`Error::SearchLimit`] once this many expansions, counted
    /// across both frontiers, have run without an outcome.
    pub max_expansions: Option<usize>,
}

/// Result of a finished search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The positions to slide, in order. Empty when already solved.
    Solvable(Vec<Position>),
    /// The board's twin reached the goal, so the board itself never will.
    Unsolvable,
}

impl Outcome {
    pub fn is_solvable(&self) -> bool {
        matches!(self, Outcome::Solvable(_))
    }

    /// Number of slides in the solution, `None` when unsolvable.
    pub fn move_count(&self) -> Option<usize> {
        self.moves().map(<[Position]>::len)
    }

    pub fn moves(&self) -> Option<&[Position]> {
        match self {
            Outcome::Solvable(moves) => Some(moves),
            Outcome::Unsolvable => None,
        }
    }
}

/// Counters reported with a solution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Nodes popped and expanded, both frontiers combined.
    pub expanded: usize,
    /// Nodes created, roots included.
    pub generated: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub outcome: Outcome,
    pub stats: SolveStats,
}

/// Solves the board, or proves it unsolvable.
pub fn solve(initial: &PuzzleState) -> Outcome {
    // without an expansion bound the search always reaches an outcome
    search(initial, None)
        .0
        .unwrap_or(Outcome::Unsolvable)
}

/// Solves the board under `config`, reporting search counters.
pub fn solve_with(initial: &PuzzleState, config: &SolverConfig) -> Result<Solution> {
    match search(initial, config.max_expansions) {
        (Some(outcome), stats) => Ok(Solution { outcome, stats }),
        (None, stats) => Err(Error::SearchLimit {
            expanded: stats.expanded,
        }),
    }
}

/// Runs both frontiers until one surfaces a goal board, one runs dry, or
/// `max_expansions` is reached (returned as `None`).
fn search(initial: &PuzzleState, max_expansions: Option<usize>) -> (Option<Outcome>, SolveStats) {
    if initial.is_solved() {
        let stats = SolveStats {
            expanded: 0,
            generated: 1,
        };
        return (Some(Outcome::Solvable(Vec::new())), stats);
    }

    debug!(
        dimension = initial.dimension(),
        manhattan = initial.manhattan_distance(),
        hamming = initial.hamming_distance(),
        "starting search"
    );

    let mut main = Frontier::seed(initial.clone());
    let mut twin = Frontier::seed(initial.twin());
    let mut expanded = 0;

    let outcome = loop {
        if main.min_is_solved() {
            break Some(Outcome::Solvable(main.path_to_min()));
        }
        if twin.min_is_solved() {
            trace!("twin frontier reached the goal");
            break Some(Outcome::Unsolvable);
        }
        if main.is_empty() || twin.is_empty() {
            debug!("frontier exhausted without reaching the goal");
            break Some(Outcome::Unsolvable);
        }
        if max_expansions.is_some_and(|limit| expanded >= limit) {
            break None;
        }

        // strict alternation, one expansion per frontier per turn
        if expanded % 2 == 0 {
            main.expand();
        } else {
            twin.expand();
        }
        expanded += 1;

        if expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                expanded,
                main_frontier = main.queue.len(),
                twin_frontier = twin.queue.len(),
                "search progress"
            );
        }
    };

    let stats = SolveStats {
        expanded,
        generated: main.nodes.len() + twin.nodes.len(),
    };
    debug!(
        expanded = stats.expanded,
        generated = stats.generated,
        moves = outcome.as_ref().and_then(Outcome::move_count),
        "search finished"
    );
    (outcome, stats)
}

/// Applies `moves` to a copy of `initial`, returning every board along the
/// way with `initial` first.
pub fn replay(initial: &PuzzleState, moves: &[Position]) -> Result<Vec<PuzzleState>> {
    let mut boards = Vec::with_capacity(moves.len() + 1);
    let mut current = initial.clone();
    boards.push(current.clone());
    for &position in moves {
        current.apply(position)?;
        boards.push(current.clone());
    }
    Ok(boards)
}
