//! Runs the pure game core inside a real browser
//! `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use square_slide::board::{CellPos, Direction};
use square_slide::config::GameConfig;
use square_slide::engine::input::{InputEvent, InputFrame};
use square_slide::engine::{DrawCommand, Point};
use square_slide::game::{Effect, GameState};
use square_slide::scene;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn swipe_then_tap_in_wasm() {
    let mut state = GameState::new(GameConfig::default(), 4, 4);
    let mut input = InputFrame::default();
    input.apply(InputEvent::TouchStart(Point { x: 10.0, y: 10.0 }));
    input.apply(InputEvent::TouchEnd(Point { x: 90.0, y: 15.0 }));
    assert_eq!(state.update(0.0, &mut input), vec![Effect::PlayMoveSound]);
    assert_eq!(state.animation().direction(), Some(Direction::Right));

    state.update(500.0, &mut input);
    assert_eq!(state.block_cell(), CellPos::new(3, 0));

    input.apply(InputEvent::TouchStart(Point { x: 10.0, y: 10.0 }));
    input.apply(InputEvent::TouchEnd(Point { x: 12.0, y: 11.0 }));
    assert_eq!(
        state.update(516.0, &mut input),
        vec![Effect::WallPlaced(CellPos::new(3, 0))]
    );
}

#[wasm_bindgen_test]
fn scene_counts_moves_in_wasm() {
    let mut state = GameState::new(GameConfig::default(), 4, 4);
    let mut input = InputFrame::default();
    input.apply(InputEvent::KeyDown("s".to_string()));
    state.update(0.0, &mut input);

    let scene = scene::compose(&state, Default::default());
    assert!(scene
        .iter()
        .any(|command| matches!(command, DrawCommand::Text { text, .. } if text == "Moves: 1")));
}
