#![cfg(target_arch = "wasm32")]

use othello_engine::wasm::Session;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(othello_engine::wasm_ready());
}

#[wasm_bindgen_test]
fn new_session_offers_four_opening_moves() {
    let session = Session::new(1);
    let moves = js_sys::Array::from(&session.legal_moves().unwrap());

    assert_eq!(moves.length(), 4);
    assert_eq!(field(&session.state().unwrap(), "black_count").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn illegal_move_is_reported_as_an_error() {
    let mut session = Session::new(1);

    assert!(session.play_move(2, 3).is_err());
    assert!(session.play_move(2, 4).is_ok());
    assert_eq!(field(&session.state().unwrap(), "white_count").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn cpu_turn_advances_the_game() {
    let mut session = Session::new(7);
    session.play_move(2, 4).unwrap();

    let result = session.play_cpu_turn(0).unwrap();

    assert_eq!(field(&result, "mover").as_string().as_deref(), Some("white"));
    assert!(!session.is_game_over());
    assert!(session.result().unwrap().is_undefined());
}
