//! Runs in a browser or node via `wasm-pack test`.
#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use reversi_search::wasm::ReversiGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn new_game_starts_with_four_discs() {
    let game = ReversiGame::new(2);
    let board = game.board();

    assert_eq!(board.matches('B').count(), 2);
    assert_eq!(board.matches('W').count(), 2);
}

#[wasm_bindgen_test]
fn invalid_registration_is_an_error() {
    let mut game = ReversiGame::new(2);
    assert!(game.register_move(0, 0).is_err());
    assert!(game.register_move(3, 2).is_ok());
}

fn field(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

fn assert_plain_move(mv: &JsValue) {
    assert!(field(mv, "x").as_f64().is_some(), "x must be a number");
    assert!(field(mv, "y").as_f64().is_some(), "y must be a number");
    let flipped = Array::from(&field(mv, "flipped"));
    assert!(flipped.length() > 0);
    assert!(field(&flipped.get(0), "x").as_f64().is_some());
}

#[wasm_bindgen_test]
fn legal_moves_are_plain_objects_with_coordinates() {
    let game = ReversiGame::new(1);
    let moves = Array::from(&game.legal_moves().unwrap());

    assert_eq!(moves.length(), 4);
    let first = moves.get(0);
    assert_eq!(field(&first, "x").as_f64(), Some(3.0));
    assert_eq!(field(&first, "y").as_f64(), Some(2.0));
    assert_plain_move(&first);
}

#[wasm_bindgen_test]
fn ai_move_response_carries_a_plain_move() {
    let mut game = ReversiGame::new(1);
    let response = game.ai_move().unwrap();

    assert_plain_move(&field(&response, "move"));
    assert!(field(&response, "board").is_string());
}
