use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod game;
pub mod movegen;
pub mod rules;
pub mod types;
pub mod wasm;

pub use ai::compute_best_move;
pub use board::BoardState;
pub use types::{Cell, Move, Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
