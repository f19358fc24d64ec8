use itertools::Itertools;

use crate::{Board, BLANK, CELLS};

/// Number of pairs of non-blank tiles appearing in descending order.
pub fn inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .filter(|&&t| t != BLANK)
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count()
}

/// Whether `board` can reach the conventional goal (see [`Board::goal`]).
///
/// On an odd-width board a slide never changes the parity of the inversion
/// count, and the conventional goal has none.
pub fn is_solvable(board: &Board) -> bool {
    inversions(board.tiles()) % 2 == 0
}

/// Whether `board` can reach `goal`, for any goal layout.
///
/// Tiles are renumbered by their order in `goal`, which turns `goal` into the
/// conventional ordering; `board` is solvable iff the renumbered board has an
/// even number of inversions.
pub fn is_solvable_towards(board: &Board, goal: &Board) -> bool {
    let mut rank = [0u8; CELLS];
    for (ix, &t) in goal.tiles().iter().filter(|&&t| t != BLANK).enumerate() {
        rank[t as usize] = ix as u8 + 1;
    }

    let relabelled = board
        .tiles()
        .iter()
        .map(|&t| if t == BLANK { BLANK } else { rank[t as usize] })
        .collect_vec();

    inversions(&relabelled) % 2 == 0
}
