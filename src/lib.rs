// ==================== Imports ====================
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[macro_use]
mod browser;
pub mod board;
pub mod config;
pub mod controls;
pub mod engine;
pub mod game;
pub mod scene;

use engine::GameLoop;
use game::SquareSlide;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - sizes the canvas and grid to the viewport
/// - wires keyboard, touch and resize input
/// - starts the frame loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    log!("Square Slide");

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(SquareSlide::new()).await {
            warn!("Could not start game : {:#?}", err);
        }
    });

    Ok(())
}
