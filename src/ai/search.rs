use crate::board::BoardState;
use crate::movegen::{has_legal_move, legal_moves};
use crate::rules::{apply_move, pass};
use crate::types::Side;

/// Bound outside any reachable disc differential (|score| <= 64).
pub const SCORE_INF: i32 = 1_000;

/// Alpha-beta bounds, always from Black's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub alpha: i32,
    pub beta: i32,
}

impl SearchWindow {
    pub const FULL: SearchWindow = SearchWindow {
        alpha: -SCORE_INF,
        beta: SCORE_INF,
    };

    pub fn new(alpha: i32, beta: i32) -> Self {
        Self { alpha, beta }
    }

    fn is_closed(&self) -> bool {
        self.beta <= self.alpha
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

/// Leaf score: black discs minus white discs.
pub fn static_eval(state: &BoardState) -> i32 {
    state.disc_differential(Side::Black)
}

/// Depth-bounded minimax value of `state` with alpha-beta pruning.
///
/// Black maximizes and White minimizes regardless of who is to move at the
/// top-level call. A side without moves passes at the same depth; only a
/// double pass ends the line.
pub fn evaluate(state: &BoardState, depth: u8, window: SearchWindow) -> i32 {
    let mut stats = SearchStats::default();
    evaluate_with_stats(state, depth, window, &mut stats)
}

pub fn evaluate_with_stats(
    state: &BoardState,
    depth: u8,
    window: SearchWindow,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 {
        return static_eval(state);
    }

    let moves = legal_moves(state);
    if moves.is_empty() {
        let passed = pass(state);
        if !has_legal_move(&passed) {
            return static_eval(state);
        }
        return evaluate_with_stats(&passed, depth, window, stats);
    }

    let maximizing = state.to_move() == Side::Black;
    let mut window = window;
    let mut best = if maximizing { -SCORE_INF } else { SCORE_INF };

    for mv in &moves {
        let child = apply_move(state, mv);
        let value = evaluate_with_stats(&child, depth - 1, window, stats);

        if maximizing {
            best = best.max(value);
            window.alpha = window.alpha.max(value);
        } else {
            best = best.min(value);
            window.beta = window.beta.min(value);
        }

        if window.is_closed() {
            break;
        }
    }

    best
}
