use crate::{Move, State, StateId};

/// Follows parent links from `goal` back to the root of `arena`.
///
/// Returns the states root-first together with the moves between them. The
/// returned states are relinked so each parent points at the previous
/// element of the returned path rather than into `arena`.
pub(crate) fn reconstruct(arena: &[State], goal: StateId) -> (Vec<State>, Vec<Move>) {
    let mut path = Vec::new();
    let mut moves = Vec::new();

    let mut cursor = Some(goal);
    while let Some(id) = cursor {
        let state = &arena[id.index()];
        if let Some(mv) = state.mv() {
            moves.push(mv);
        }
        path.push(state.clone());
        cursor = state.parent();
    }

    path.reverse();
    moves.reverse();

    for (ix, state) in path.iter_mut().enumerate() {
        state.relink(ix.checked_sub(1).map(StateId));
    }

    (path, moves)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{parse_board, Board};

    fn child(arena: &[State], parent: usize, mv: Move) -> State {
        arena[parent]
            .neighbors(StateId(parent))
            .into_iter()
            .find(|s| s.mv() == Some(mv))
            .unwrap()
    }

    #[test]
    fn root_alone() {
        let arena = vec![State::root(Board::goal())];
        let (path, moves) = reconstruct(&arena, StateId(0));

        assert_eq!(path.len(), 1);
        assert_eq!(path[0].parent(), None);
        assert!(moves.is_empty());
    }

    #[test]
    fn follows_parents_not_arena_order() {
        // 0 -> 2 -> 3, with a dead end at 1
        let mut arena = vec![State::root(parse_board("1 2 3/4 5 6/0 7 8").unwrap())];
        arena.push(child(&arena, 0, Move::Up));
        arena.push(child(&arena, 0, Move::Right));
        arena.push(child(&arena, 2, Move::Right));

        let (path, moves) = reconstruct(&arena, StateId(3));

        assert_eq!(moves, vec![Move::Right, Move::Right]);
        assert_eq!(path.len(), 3);
        assert_eq!(*path[2].board(), Board::goal());
        assert_eq!(path.iter().map(State::g).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(path[0].move_label(), "");

        for (ix, state) in path.iter().enumerate().skip(1) {
            let parent = state.parent().unwrap();
            assert_eq!(parent.index(), ix - 1);
            assert_eq!(
                path[parent.index()].board().apply(state.mv().unwrap()).as_ref(),
                Some(state.board())
            );
        }
    }
}
