//! JS-facing wrapper around [`GameInstance`] and the search entry point.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::{SearchConfig, Searcher};
use crate::board::BoardState;
use crate::game::{AlphaBetaSelector, GameInstance};
use crate::types::{Move, Side};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveResponse<'a> {
    #[serde(rename = "move")]
    mv: &'a Move,
    board: String,
    is_game_over: bool,
}

#[wasm_bindgen]
pub struct ReversiGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl ReversiGame {
    #[wasm_bindgen(constructor)]
    pub fn new(depth: u8) -> ReversiGame {
        Self {
            inner: GameInstance::with_depth(depth),
        }
    }

    /// Builds a game from a `SearchConfig`-shaped object, e.g. `{ depth: 4, threads: 2 }`.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<ReversiGame, JsError> {
        let config: SearchConfig = serde_wasm_bindgen::from_value(config)?;
        let searcher = Searcher::new(config)?;
        Ok(Self {
            inner: GameInstance::new(Box::new(AlphaBetaSelector::new(searcher))),
        })
    }

    pub fn start(&mut self) -> Result<JsValue, JsError> {
        self.inner.start();
        self.state()
    }

    pub fn board(&self) -> String {
        self.inner.board_text()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_result())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_moves())?)
    }

    #[wasm_bindgen(js_name = registerMove)]
    pub fn register_move(&mut self, x: i32, y: i32) -> Result<JsValue, JsError> {
        let mv = self.inner.register_move(x, y)?;
        self.move_response(&mv)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsError> {
        self.inner.pass()?;
        self.move_response(&Move::pass())
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        let mv = self.inner.ai_move()?;
        self.move_response(&mv)
    }
}

impl ReversiGame {
    fn move_response(&self, mv: &Move) -> Result<JsValue, JsError> {
        let response = MoveResponse {
            mv,
            board: self.inner.board_text(),
            is_game_over: self.inner.is_game_over,
        };
        Ok(serde_wasm_bindgen::to_value(&response)?)
    }
}

/// Searches an arbitrary position given as 64 row-major `0/1/2` cells.
/// Returns the full search outcome (best move, score, root scores, nodes).
#[wasm_bindgen(js_name = computeBestMove)]
pub fn compute_best_move_js(
    cells: &[u8],
    black_to_move: bool,
    depth: u8,
) -> Result<JsValue, JsError> {
    let side = if black_to_move { Side::Black } else { Side::White };
    let state = BoardState::from_array(cells, side)?;
    let outcome = Searcher::with_depth(depth).search(&state);
    Ok(serde_wasm_bindgen::to_value(&outcome)?)
}
