use std::{process::ExitCode, time::Instant};

use clap::Parser;
use itertools::Itertools;
use log::error;
use rand::{rngs::StdRng, SeedableRng};

use eight_puzzle_solver::{
    parse_board, Board, Heuristic, Solver, SolverConfig, SolverError, DEFAULT_NODE_LIMIT,
};

// Named instances, all solved towards the conventional goal.
const EXAMPLES: &[(&str, &str)] = &[
    ("one move", "1 2 3 / 4 5 6 / 7 _ 8"),
    ("two moves", "1 2 3 / 4 5 6 / _ 7 8"),
    ("three moves", "1 2 3 / _ 4 5 / 7 8 6"),
    ("five moves", "1 3 5 / 4 2 _ / 7 8 6"),
    ("unsolvable", "1 2 3 / 4 5 6 / 8 7 _"),
    ("solved", "1 2 3 / 4 5 6 / 7 8 _"),
    ("reversed", "8 7 6 / 5 4 3 / 2 1 _"),
];

/// Solve the 8-puzzle with A* search.
///
/// With no board given, every built-in example is solved with both
/// heuristics so their expansion counts can be compared.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board to solve, rows separated by `/`, blank as `0` or `_`
    #[arg(long, conflicts_with = "scramble")]
    board: Option<String>,

    /// Goal board; defaults to 1..8 with the blank last
    #[arg(long)]
    goal: Option<String>,

    /// Scramble the goal with this many random moves and solve the result
    #[arg(long)]
    scramble: Option<usize>,

    /// Seed for --scramble
    #[arg(long, requires = "scramble")]
    seed: Option<u64>,

    /// `manhattan` or `misplaced`; both are run when omitted
    #[arg(long)]
    heuristic: Option<String>,

    #[arg(long, default_value_t = DEFAULT_NODE_LIMIT)]
    node_limit: usize,

    /// JSON solver configuration, e.g. '{"heuristic":"misplaced"}'
    #[arg(long, conflicts_with_all = ["heuristic", "node_limit"])]
    config: Option<String>,

    /// Print every board along the solution
    #[arg(long)]
    show_path: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SolverError> {
    let (config, selected) = match (&args.config, &args.heuristic) {
        (Some(json), _) => {
            let config = SolverConfig::from_json(json)?;
            (config, Some(config.heuristic))
        }
        (None, Some(name)) => {
            let config = SolverConfig::named(name, args.node_limit)?;
            (config, Some(config.heuristic))
        }
        (None, None) => (SolverConfig::new(Heuristic::default(), args.node_limit)?, None),
    };

    let goal = match &args.goal {
        Some(goal) => parse_board(goal)?,
        None => Board::goal(),
    };

    let initial = match (&args.board, args.scramble) {
        (Some(board), _) => Some(parse_board(board)?),
        (None, Some(moves)) => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Some(goal.scrambled(moves, &mut rng))
        }
        (None, None) => None,
    };

    match initial {
        Some(initial) => report(
            &Solver::new(initial, goal),
            &config,
            selected,
            args.show_path,
        ),
        None => {
            for (name, source) in EXAMPLES.iter() {
                println!("---- {}", name);
                report(
                    &Solver::new(parse_board(source)?, goal),
                    &config,
                    selected,
                    args.show_path,
                );
            }
        }
    }

    Ok(())
}

#[auto_enums::auto_enum(Iterator)]
fn heuristics(selected: Option<Heuristic>) -> impl Iterator<Item = Heuristic> {
    match selected {
        Some(h) => std::iter::once(h),
        None => Heuristic::ALL.into_iter(),
    }
}

fn report(solver: &Solver, config: &SolverConfig, selected: Option<Heuristic>, show_path: bool) {
    println!("{}", solver.initial());
    println!();

    if !solver.is_solvable() {
        println!("Not solvable: tile parity differs from the goal.");
        println!();
        return;
    }

    for heuristic in heuristics(selected) {
        let config = SolverConfig {
            heuristic,
            ..*config
        };

        let start = Instant::now();
        let result = solver.solve(&config);
        let elapsed = start.elapsed();

        match result {
            Ok(solution) => {
                let stats = solution.stats();
                println!(
                    "{:<10} {} moves, {} nodes expanded ({} generated), frontier peaked at {}, {:.2?}",
                    heuristic,
                    stats.path_length,
                    stats.nodes_expanded,
                    stats.nodes_generated,
                    stats.max_frontier_size,
                    elapsed
                );
                if !solution.is_empty() {
                    println!("           {}", solution.moves().iter().join(" → "));
                }

                if show_path {
                    for board in solution.boards() {
                        println!();
                        println!("{}", board);
                    }
                }
            }
            Err(e) => println!("{:<10} no solution: {}", heuristic, e),
        }
    }

    println!();
}
