use std::{
    fmt::{Display, Write},
    ops::Index,
    str::FromStr,
};

use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

mod config;
mod error;
mod heuristic;
mod path;
mod search;
mod solvability;
mod state;

pub use config::{SolverConfig, DEFAULT_NODE_LIMIT};
pub use error::{Result, SolverError};
pub use heuristic::{manhattan_distance, misplaced_count, Heuristic};
pub use search::{SearchStats, Solution, Solver};
pub use solvability::{inversions, is_solvable, is_solvable_towards};
pub use state::{Move, State, StateId};

/// Side length of the board.
pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;
/// The value marking the empty cell.
pub const BLANK: u8 = 0;

/// A 3×3 arrangement holding every value `0..9` exactly once, `0` being the blank.
///
/// Boards are plain values: two boards with the same layout are the same board.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    tiles: [u8; CELLS],
}

impl Board {
    pub fn new(from: Vec<Vec<u8>>) -> Result<Board> {
        if from.len() != SIZE {
            return Err(SolverError::invalid_board(format!(
                "expected {} rows, found {}",
                SIZE,
                from.len()
            )));
        }

        if let Some((row, cells)) = from.iter().enumerate().find(|(_, r)| r.len() != SIZE) {
            return Err(SolverError::invalid_board(format!(
                "row {} has {} cells, expected {}",
                row,
                cells.len(),
                SIZE
            )));
        }

        let tiles: Vec<u8> = from.iter().flatten().copied().collect();
        Board::from_tiles(&tiles)
    }

    /// Builds a board from its cells in row-major order.
    pub fn from_tiles(tiles: &[u8]) -> Result<Board> {
        if tiles.len() != CELLS {
            return Err(SolverError::invalid_board(format!(
                "expected {} cells, found {}",
                CELLS,
                tiles.len()
            )));
        }

        let mut seen = [false; CELLS];
        for &t in tiles {
            let slot = seen.get_mut(t as usize).ok_or_else(|| {
                SolverError::invalid_board(format!("value {} is outside 0..{}", t, CELLS))
            })?;
            if *slot {
                return Err(SolverError::invalid_board(format!("value {} appears twice", t)));
            }
            *slot = true;
        }

        let mut board = [BLANK; CELLS];
        board.copy_from_slice(tiles);
        Ok(Board { tiles: board })
    }

    /// The conventional goal: 1..8 left-to-right, top-to-bottom, blank last.
    pub fn goal() -> Board {
        let mut tiles = [BLANK; CELLS];
        for (ix, t) in tiles.iter_mut().take(CELLS - 1).enumerate() {
            *t = ix as u8 + 1;
        }

        Board { tiles }
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.tiles.chunks(SIZE)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// Coordinates `(row, col)` of `value`, if it is a tile of this board.
    pub fn position(&self, value: u8) -> Option<(usize, usize)> {
        self.tiles
            .iter()
            .position(|&t| t == value)
            .map(|ix| (ix / SIZE, ix % SIZE))
    }

    pub fn blank(&self) -> (usize, usize) {
        self.position(BLANK)
            .unwrap_or_else(|| unreachable!("a validated board always holds the blank"))
    }

    /// Slides the blank one cell in the direction of `mv`, or `None` if that
    /// would leave the board.
    pub fn apply(&self, mv: Move) -> Option<Board> {
        let (i, j) = self.blank();
        let (di, dj) = mv.delta();
        let ti = i.checked_add_signed(di).filter(|&r| r < SIZE)?;
        let tj = j.checked_add_signed(dj).filter(|&c| c < SIZE)?;

        let mut next = *self;
        next.tiles.swap(i * SIZE + j, ti * SIZE + tj);
        Some(next)
    }

    /// Walks the blank `moves` random legal steps away from this board.
    ///
    /// The result is always reachable from (and so solvable towards) `self`.
    pub fn scrambled<R: Rng + ?Sized>(&self, moves: usize, rng: &mut R) -> Board {
        let mut board = *self;
        for _ in 0..moves {
            let legal: SmallVec<[Board; 4]> =
                Move::ALL.iter().filter_map(|&mv| board.apply(mv)).collect();
            if let Some(next) = legal.choose(rng) {
                board = *next;
            }
        }

        board
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for line in self.rows() {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            for (ix, &c) in line.iter().enumerate() {
                if ix > 0 {
                    f.write_char(' ')?;
                }
                if c == BLANK {
                    f.write_char('_')?;
                } else {
                    write!(f, "{}", c)?;
                }
            }
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index.0 * SIZE + index.1]
    }
}

impl FromStr for Board {
    type Err = SolverError;
    fn from_str(s: &str) -> Result<Board> {
        parse_board(s)
    }
}

// Format:
// one row per line (or rows separated by `/`),
// cells separated by whitespace,
// `0` or `_` is the blank.
pub fn parse_board(b: &str) -> Result<Board> {
    let board = b
        .trim()
        .split(|c: char| c == '\n' || c == '/')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| row.split_whitespace().map(parse_tile).collect::<Result<Vec<u8>>>())
        .collect::<Result<Vec<Vec<u8>>>>()?;

    Board::new(board)
}

fn parse_tile(cell: &str) -> Result<u8> {
    if cell == "_" {
        return Ok(BLANK);
    }

    cell.parse()
        .map_err(|_| SolverError::invalid_board(format!("`{}` is not a tile value", cell)))
}
