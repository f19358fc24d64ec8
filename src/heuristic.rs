use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Board, SolverError, BLANK, CELLS, SIZE};

/// Estimate of the remaining number of moves to the goal.
///
/// Both options never overestimate and are consistent, so A* with either
/// returns optimal paths. Manhattan distance is never below the misplaced
/// count and usually expands far fewer nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Misplaced,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Misplaced];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Misplaced => "misplaced",
        }
    }

    pub fn score(self, board: &Board, goal: &Board) -> u32 {
        match self {
            Heuristic::Manhattan => manhattan_distance(board, goal),
            Heuristic::Misplaced => misplaced_count(board, goal),
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = SolverError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| {
                SolverError::invalid_configuration(format!(
                    "unknown heuristic `{}` (expected one of: {})",
                    s,
                    Heuristic::ALL.iter().map(|h| h.name()).join(", ")
                ))
            })
    }
}

impl TryFrom<String> for Heuristic {
    type Error = SolverError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Number of non-blank cells holding a different value than the goal does.
pub fn misplaced_count(board: &Board, goal: &Board) -> u32 {
    board
        .tiles()
        .iter()
        .zip_eq(goal.tiles())
        .filter(|&(&b, &t)| b != BLANK && b != t)
        .count() as u32
}

/// Sum over non-blank tiles of the row and column distance to their goal cell.
pub fn manhattan_distance(board: &Board, goal: &Board) -> u32 {
    let mut goal_positions = [(0, 0); CELLS];
    for (ix, &t) in goal.tiles().iter().enumerate() {
        goal_positions[t as usize] = (ix / SIZE, ix % SIZE);
    }

    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != BLANK)
        .map(|(ix, &t)| {
            let (gi, gj): (usize, usize) = goal_positions[t as usize];
            ((ix / SIZE).abs_diff(gi) + (ix % SIZE).abs_diff(gj)) as u32
        })
        .sum()
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    use super::*;
    use crate::parse_board;

    fn random_board(rng: &mut StdRng) -> Board {
        let mut tiles: Vec<u8> = (0..CELLS as u8).collect();
        tiles.shuffle(rng);
        Board::from_tiles(&tiles).unwrap()
    }

    #[test]
    fn zero_at_goal() {
        let goal = Board::goal();
        for h in Heuristic::ALL {
            assert_eq!(h.score(&goal, &goal), 0);
        }
    }

    #[test]
    fn known_scores() {
        let goal = Board::goal();
        let board = parse_board("8 7 6/5 4 3/2 1 0").unwrap();

        assert_eq!(misplaced_count(&board, &goal), 8);
        // 8:3 7:3 6:1 5:1 4:1 3:1 2:3 1:3
        assert_eq!(manhattan_distance(&board, &goal), 16);

        let one_off = parse_board("1 2 3/4 5 6/7 0 8").unwrap();
        assert_eq!(misplaced_count(&one_off, &goal), 1);
        assert_eq!(manhattan_distance(&one_off, &goal), 1);
    }

    #[test]
    fn blank_is_not_counted() {
        let goal = Board::goal();
        let board = parse_board("0 2 3/4 5 6/7 8 1").unwrap();
        assert_eq!(misplaced_count(&board, &goal), 1);
        assert_eq!(manhattan_distance(&board, &goal), 4);
    }

    #[test]
    fn manhattan_dominates_misplaced() {
        let mut rng = StdRng::seed_from_u64(89);
        for _ in 0..500 {
            let board = random_board(&mut rng);
            let goal = random_board(&mut rng);
            assert!(manhattan_distance(&board, &goal) >= misplaced_count(&board, &goal));
        }
    }

    #[test]
    fn heuristic_names() {
        assert_eq!("manhattan".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!("misplaced".parse::<Heuristic>().unwrap(), Heuristic::Misplaced);
        assert_eq!(Heuristic::default(), Heuristic::Manhattan);

        for bad in ["", "Manhattan", "euclidean"] {
            assert!(matches!(
                bad.parse::<Heuristic>(),
                Err(SolverError::InvalidConfiguration { .. })
            ));
        }
    }
}
