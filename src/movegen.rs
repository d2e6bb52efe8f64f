use once_cell::sync::Lazy;

use crate::board::{BOARD_SIZE, BoardState, NUM_SQUARES};
use crate::types::{Cell, Move, Position};

/// `(dx, dy)` offsets in row-major order.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// In-bounds neighbours of every square, indexed `y * 8 + x`.
static NEIGHBORS: Lazy<Vec<Vec<Position>>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|idx| {
            let origin = Position::new((idx % BOARD_SIZE) as i8, (idx / BOARD_SIZE) as i8);
            DIRECTIONS
                .iter()
                .map(|&(dx, dy)| origin.offset(dx, dy))
                .filter(|pos| pos.in_bounds())
                .collect()
        })
        .collect()
});

/// Returns the legal moves for the side to move, in generation order.
///
/// Candidates are the empty neighbours of opponent discs; a candidate is kept
/// only when it flips at least one disc. An empty result means the side must pass.
///
/// Order: opponent discs are scanned row by row (`y` outer, `x` inner), and the
/// neighbours of each disc are visited in the same row-major order; a square
/// reached twice keeps its first slot. Root tie-breaks follow this order.
pub fn legal_moves(state: &BoardState) -> Vec<Move> {
    let opponent = state.to_move().opponent().cell();
    let mut seen = 0u64;
    let mut moves = Vec::new();

    for (origin, cell) in state.iter() {
        if cell != opponent {
            continue;
        }

        for &candidate in &NEIGHBORS[square_index(origin)] {
            let mask = 1u64 << square_index(candidate);
            if seen & mask != 0 || state.cell(candidate) != Cell::Empty {
                continue;
            }
            seen |= mask;

            let flips = flips_for(state, candidate);
            if !flips.is_empty() {
                moves.push(Move::new(candidate, flips));
            }
        }
    }

    moves
}

/// Discs the side to move would flip by placing at `pos`.
/// Occupied and off-board positions flip nothing.
pub fn flips_for(state: &BoardState, pos: Position) -> Vec<Position> {
    if !pos.in_bounds() || state.cell(pos) != Cell::Empty {
        return Vec::new();
    }

    let me = state.to_move().cell();
    let opp = state.to_move().opponent().cell();
    let mut flips = Vec::new();

    for (dx, dy) in DIRECTIONS {
        let mut cursor = pos.offset(dx, dy);
        let mut line = Vec::new();

        while cursor.in_bounds() && state.cell(cursor) == opp {
            line.push(cursor);
            cursor = cursor.offset(dx, dy);
        }

        // An open run (edge or empty square) never flips.
        if !line.is_empty() && cursor.in_bounds() && state.cell(cursor) == me {
            flips.extend(line);
        }
    }

    flips
}

/// Builds the move for a placement at `pos` if it is legal for the side to move.
pub fn find_move(state: &BoardState, pos: Position) -> Option<Move> {
    let flips = flips_for(state, pos);
    if flips.is_empty() {
        None
    } else {
        Some(Move::new(pos, flips))
    }
}

pub fn has_legal_move(state: &BoardState) -> bool {
    state
        .iter()
        .any(|(pos, cell)| cell == Cell::Empty && !flips_for(state, pos).is_empty())
}

fn square_index(pos: Position) -> usize {
    pos.y as usize * BOARD_SIZE + pos.x as usize
}
