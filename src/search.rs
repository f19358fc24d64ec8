use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
    sync::atomic::{self, AtomicBool},
};

use log::{debug, info, trace, warn};
use serde::Serialize;

use crate::{
    path, solvability::is_solvable_towards, Board, Heuristic, Move, Result, SolverConfig,
    SolverError, State, StateId,
};

/// Counters describing one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States popped from the frontier and expanded (the goal is not counted).
    pub nodes_expanded: usize,
    /// Successor states produced by those expansions.
    pub nodes_generated: usize,
    pub path_length: usize,
    /// Largest frontier length seen, stale duplicate entries included.
    pub max_frontier_size: usize,
    /// f-score of the goal entry, when the goal was reached.
    pub final_f_score: Option<u32>,
}

/// An optimal path from the initial board to the goal.
#[derive(Clone, Debug)]
pub struct Solution {
    path: Vec<State>,
    moves: Vec<Move>,
    stats: SearchStats,
}

impl Solution {
    /// States from the initial board to the goal, inclusive. Each parent
    /// link is the index of the previous state in this slice.
    pub fn path(&self) -> &[State] {
        &self.path
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_labels(&self) -> Vec<&'static str> {
        self.moves.iter().map(|mv| mv.label()).collect()
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.path.iter().map(State::board)
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// A* search from one board towards another.
///
/// The solver itself holds no search state; every call to [`Solver::solve`]
/// builds and drops its own frontier, so one solver can be shared freely.
#[derive(Clone, Debug)]
pub struct Solver {
    initial: Board,
    goal: Board,
}

impl Solver {
    pub fn new(initial: Board, goal: Board) -> Solver {
        Solver { initial, goal }
    }

    pub fn from_rows(initial: Vec<Vec<u8>>, goal: Vec<Vec<u8>>) -> Result<Solver> {
        Ok(Solver::new(Board::new(initial)?, Board::new(goal)?))
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    /// Whether the goal is reachable, judged by permutation parity alone.
    pub fn is_solvable(&self) -> bool {
        is_solvable_towards(&self.initial, &self.goal)
    }

    pub fn solve(&self, config: &SolverConfig) -> Result<Solution> {
        self.run(config, None)
    }

    /// Like [`Solver::solve`], taking the configuration as strings would come
    /// from a user.
    pub fn solve_named(&self, heuristic: &str, node_limit: usize) -> Result<Solution> {
        self.solve(&SolverConfig::named(heuristic, node_limit)?)
    }

    /// Like [`Solver::solve`], but gives up with [`SolverError::Cancelled`]
    /// once `cancel` is set. The flag is checked before every expansion.
    pub fn solve_cancellable(&self, config: &SolverConfig, cancel: &AtomicBool) -> Result<Solution> {
        self.run(config, Some(cancel))
    }

    fn run(&self, config: &SolverConfig, cancel: Option<&AtomicBool>) -> Result<Solution> {
        let config = config.validate()?;

        if !self.is_solvable() {
            warn!("{:?} cannot reach {:?}, not searching", self.initial, self.goal);
            return Err(SolverError::Unsolvable);
        }

        debug!(
            "searching {:?} -> {:?} with {} heuristic, node limit {}",
            self.initial, self.goal, config.heuristic, config.node_limit
        );

        Search::new(self.initial, &self.goal, config.heuristic).run(config.node_limit, cancel)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    h: u32,
    seq: u64,
    id: StateId,
}

// BinaryHeap is a max-heap, so the comparison is reversed: lowest f first,
// then lowest h, then earliest pushed.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Everything one run owns. States live in `arena` and refer to their
/// parents by index; the frontier may hold several entries for one board,
/// of which only the first popped is expanded.
struct Search<'a> {
    goal: &'a Board,
    heuristic: Heuristic,
    arena: Vec<State>,
    frontier: BinaryHeap<FrontierEntry>,
    g_score: HashMap<Board, u32>,
    finalized: HashSet<Board>,
    next_seq: u64,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(initial: Board, goal: &'a Board, heuristic: Heuristic) -> Search<'a> {
        let mut search = Search {
            goal,
            heuristic,
            arena: Vec::new(),
            frontier: BinaryHeap::new(),
            g_score: HashMap::new(),
            finalized: HashSet::new(),
            next_seq: 0,
            stats: SearchStats::default(),
        };

        search.g_score.insert(initial, 0);
        search.push(State::root(initial));
        search.stats.max_frontier_size = search.frontier.len();
        search
    }

    fn push(&mut self, state: State) {
        let h = self.heuristic.score(state.board(), self.goal);
        let id = StateId(self.arena.len());
        self.frontier.push(FrontierEntry {
            f: state.g() + h,
            h,
            seq: self.next_seq,
            id,
        });
        self.next_seq += 1;
        self.arena.push(state);
    }

    fn run(mut self, node_limit: usize, cancel: Option<&AtomicBool>) -> Result<Solution> {
        loop {
            if cancel.map_or(false, |c| c.load(atomic::Ordering::Relaxed)) {
                debug!("cancelled after {} expansions", self.stats.nodes_expanded);
                return Err(SolverError::Cancelled { stats: self.stats });
            }

            if self.stats.nodes_expanded >= node_limit {
                warn!("node limit of {} reached", node_limit);
                return Err(SolverError::NodeLimitReached {
                    limit: node_limit,
                    stats: self.stats,
                });
            }

            let Some(entry) = self.frontier.pop() else {
                warn!(
                    "frontier exhausted after {} expansions",
                    self.stats.nodes_expanded
                );
                return Err(SolverError::Exhausted { stats: self.stats });
            };

            let current = &self.arena[entry.id.index()];
            let board = *current.board();

            // a cheaper entry for this board was already expanded
            if self.finalized.contains(&board) {
                continue;
            }

            if current.is_goal(self.goal) {
                self.stats.final_f_score = Some(entry.f);
                return Ok(self.finish(entry.id));
            }

            let g = self.g_score.get(&board).copied().unwrap_or(current.g());
            let neighbors = current.neighbors(entry.id);

            trace!("expanding {:?} f={} h={} g={}", board, entry.f, entry.h, g);

            self.finalized.insert(board);
            self.stats.nodes_expanded += 1;
            self.stats.nodes_generated += neighbors.len();

            for neighbor in neighbors {
                if self.finalized.contains(neighbor.board()) {
                    continue;
                }

                let tentative = g + 1;
                let improves = self
                    .g_score
                    .get(neighbor.board())
                    .map_or(true, |&known| tentative < known);

                if improves {
                    debug_assert_eq!(neighbor.g(), tentative);
                    self.g_score.insert(*neighbor.board(), tentative);
                    self.push(neighbor);
                }
            }

            self.stats.max_frontier_size = self.stats.max_frontier_size.max(self.frontier.len());
        }
    }

    fn finish(mut self, goal: StateId) -> Solution {
        let (path, moves) = path::reconstruct(&self.arena, goal);
        self.stats.path_length = moves.len();

        info!(
            "solved in {} moves, {} nodes expanded, frontier peaked at {}",
            self.stats.path_length, self.stats.nodes_expanded, self.stats.max_frontier_size
        );

        Solution {
            path,
            moves,
            stats: self.stats,
        }
    }
}
