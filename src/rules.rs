use crate::board::BoardState;
use crate::movegen::has_legal_move;
use crate::types::Move;

/// Returns the successor of `state` after `mv`.
///
/// Caller contract: `mv` is either the pass sentinel or a move produced by
/// `legal_moves` for this exact state. Legality is not re-checked.
pub fn apply_move(state: &BoardState, mv: &Move) -> BoardState {
    if mv.is_pass() {
        return pass(state);
    }

    debug_assert!(
        state.cell(mv.placed).side().is_none(),
        "apply_move() on occupied square {}",
        mv.placed
    );
    debug_assert!(!mv.flips.is_empty(), "apply_move() with empty flip set");

    let colour = state.to_move().cell();
    let mut next = *state;
    next.set(mv.placed, colour);
    for &pos in &mv.flips {
        next.set(pos, colour);
    }
    next.switch_turn();
    next
}

/// Same grid, opponent to move.
pub fn pass(state: &BoardState) -> BoardState {
    let mut next = *state;
    next.switch_turn();
    next
}

/// True when neither side has a legal move.
pub fn is_terminal(state: &BoardState) -> bool {
    !has_legal_move(state) && !has_legal_move(&pass(state))
}
