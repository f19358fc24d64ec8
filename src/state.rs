use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Board;

/// Direction the blank slides in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Successors are generated in this order; it decides which of several
    /// equally short paths a search returns.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Index of a [`State`] within the collection that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A board plus the bookkeeping a search needs to walk back to its root.
///
/// Identity is the board alone: equality and hashing ignore the move, parent
/// and cost, so the same layout reached along different paths is one state.
#[derive(Clone, Debug)]
pub struct State {
    board: Board,
    mv: Option<Move>,
    parent: Option<StateId>,
    g: u32,
}

impl State {
    pub fn root(board: Board) -> State {
        State {
            board,
            mv: None,
            parent: None,
            g: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The move that produced this state from its parent; `None` for the root.
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    /// Like [`State::mv`], but as a label, empty for the root.
    pub fn move_label(&self) -> &'static str {
        self.mv.map_or("", Move::label)
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Cost from the root, in moves.
    pub fn g(&self) -> u32 {
        self.g
    }

    pub fn is_goal(&self, goal: &Board) -> bool {
        self.board == *goal
    }

    /// Every state one blank slide away, in [`Move::ALL`] order, each pointing
    /// back at `id` (the handle under which `self` is stored).
    pub fn neighbors(&self, id: StateId) -> SmallVec<[State; 4]> {
        Move::ALL
            .iter()
            .filter_map(|&mv| {
                let board = self.board.apply(mv)?;
                Some(State {
                    board,
                    mv: Some(mv),
                    parent: Some(id),
                    g: self.g + 1,
                })
            })
            .collect()
    }

    pub(crate) fn relink(&mut self, parent: Option<StateId>) {
        self.parent = parent;
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use itertools::Itertools;

    use super::*;
    use crate::{parse_board, BLANK};

    #[test]
    fn corner_blank_has_two_neighbors_in_fixed_order() {
        let state = State::root(Board::goal());
        let moves: Vec<_> = state.neighbors(StateId(0)).iter().map(State::move_label).collect();
        assert_eq!(moves, vec!["up", "left"]);
    }

    #[test]
    fn center_blank_has_four_neighbors() {
        let state = State::root(parse_board("1 2 3/4 0 5/6 7 8").unwrap());
        let moves: Vec<_> = state.neighbors(StateId(0)).iter().map(|s| s.mv().unwrap()).collect();
        assert_eq!(moves, Move::ALL.to_vec());
    }

    #[test]
    fn neighbors_differ_by_one_adjacent_swap() {
        let parent = State::root(parse_board("8 1 3/4 0 2/7 6 5").unwrap());
        let (bi, bj) = parent.board().blank();

        for child in parent.neighbors(StateId(3)) {
            assert_eq!(child.g(), parent.g() + 1);
            assert_eq!(child.parent(), Some(StateId(3)));

            let changed = parent
                .board()
                .tiles()
                .iter()
                .zip_eq(child.board().tiles())
                .positions(|(a, b)| a != b)
                .collect_vec();
            assert_eq!(changed.len(), 2);

            let (ci, cj) = child.board().blank();
            assert_eq!(bi.abs_diff(ci) + bj.abs_diff(cj), 1);
            assert_eq!(child.board()[(bi, bj)], parent.board()[(ci, cj)]);
            assert_eq!(child.board()[(ci, cj)], BLANK);

            let back = child.mv().unwrap().opposite();
            assert_eq!(child.board().apply(back).as_ref(), Some(parent.board()));
        }
    }

    #[test]
    fn identity_is_the_board_only() {
        let root = State::root(Board::goal());
        let child = root.neighbors(StateId(0))[0].clone();
        let grandchild = child
            .neighbors(StateId(1))
            .into_iter()
            .find(|s| s.mv() == Some(Move::Down))
            .unwrap();

        assert_eq!(root, grandchild);
        assert_ne!(root.g(), grandchild.g());

        let set: HashSet<State> = [root, child, grandchild].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn goal_check() {
        let goal = Board::goal();
        assert!(State::root(goal).is_goal(&goal));
        assert!(!State::root(parse_board("1 2 3/4 5 6/7 0 8").unwrap()).is_goal(&goal));
    }
}
