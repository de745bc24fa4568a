//! Sliding Tile Puzzle Solver
//!
//! Reads N-puzzle boards from text files, finds a shortest sequence of
//! slides to the ordered goal (or reports that none exists), and generates
//! scrambled boards.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slider::scramble::{self, ScrambleConfig};
use slider::{persistence, solver, Outcome, PuzzleState, Solution, SolverConfig};

/// Solves sliding tile puzzles.
#[derive(Parser)]
#[command(name = "slider")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a board file and print the slides.
    Solve {
        /// Board file: dimension followed by the tiles, 0 for the slot.
        file: PathBuf,
        /// Give up after this many node expansions.
        #[arg(long)]
        max_expansions: Option<usize>,
        /// Print the board after every slide.
        #[arg(long)]
        replay: bool,
    },
    /// Generate a random solvable board.
    Scramble {
        /// Board edge length.
        #[arg(short, long, default_value_t = 4)]
        dimension: usize,
        /// Share of tiles (0-100) that must end up out of place.
        #[arg(short, long, default_value_t = 80)]
        percent: u8,
        /// Maximum number of random slides.
        #[arg(long, default_value_t = 1_000)]
        max_moves: usize,
        /// Seed for a reproducible board.
        #[arg(long)]
        seed: Option<u64>,
        /// Write the board to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show heuristics and slidable positions for a board file.
    Check {
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Solve {
            file,
            max_expansions,
            replay,
        } => run_solve(&file, SolverConfig { max_expansions }, replay),
        Command::Scramble {
            dimension,
            percent,
            max_moves,
            seed,
            output,
        } => {
            let config = ScrambleConfig {
                displaced_percent: percent,
                max_moves,
                seed,
            };
            run_scramble(dimension, &config, output)
        }
        Command::Check { file } => run_check(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs to stderr; `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads, solves and prints a board.
fn run_solve(file: &Path, config: SolverConfig, replay: bool) -> slider::Result<()> {
    let initial = persistence::load(file)?;
    tracing::info!(file = %file.display(), dimension = initial.dimension(), "loaded board");

    let solution = solver::solve_with(&initial, &config)?;
    print!("{}", format_solution(&initial, &solution));

    if replay {
        if let Outcome::Solvable(moves) = &solution.outcome {
            let boards = solver::replay(&initial, moves)?;
            print!("{}", format_replay(&boards, moves));
        }
    }
    Ok(())
}

/// Scrambles a board and writes it to a file or stdout.
fn run_scramble(
    dimension: usize,
    config: &ScrambleConfig,
    output: Option<PathBuf>,
) -> slider::Result<()> {
    let state = scramble::scramble(dimension, config)?;
    match output {
        Some(path) => {
            persistence::save(&path, &state)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", persistence::format_board(&state)),
    }
    Ok(())
}

/// Prints what the board looks like to the solver.
fn run_check(file: &Path) -> slider::Result<()> {
    let state = persistence::load(file)?;
    print!("{}", format_check(&state));
    Ok(())
}

/// Summary of a search result.
fn format_solution(initial: &PuzzleState, solution: &Solution) -> String {
    let mut output = format!("{initial}");
    match &solution.outcome {
        Outcome::Solvable(moves) if moves.is_empty() => {
            output.push_str("Already solved\n");
        }
        Outcome::Solvable(moves) => {
            let slides: Vec<String> = moves.iter().map(usize::to_string).collect();
            output.push_str(&format!("Solved in {} moves\n", moves.len()));
            output.push_str(&format!("Slide positions: {}\n", slides.join(" ")));
        }
        Outcome::Unsolvable => output.push_str("Unsolvable\n"),
    }
    output.push_str(&format!(
        "Expanded {} nodes, generated {}\n",
        solution.stats.expanded, solution.stats.generated
    ));
    output
}

/// Every intermediate board, labelled with the slide that produced it.
fn format_replay(boards: &[PuzzleState], moves: &[usize]) -> String {
    let mut output = String::new();
    for (step, (board, position)) in boards.iter().skip(1).zip(moves).enumerate() {
        output.push_str(&format!("\nMove {}: slide {}\n", step + 1, position));
        output.push_str(&board.to_string());
    }
    output
}

fn format_check(state: &PuzzleState) -> String {
    let slidable: Vec<String> = state
        .slidable_positions()
        .iter()
        .map(usize::to_string)
        .collect();
    format!(
        "{state}Dimension: {}\nSlot: {}\nHamming: {}\nManhattan: {}\nProgress: {:.2}\nSlidable: {}\n",
        state.dimension(),
        state.slot_position(),
        state.hamming_distance(),
        state.manhattan_distance(),
        state.progress(),
        slidable.join(" ")
    )
}
