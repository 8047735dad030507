use wasm_bindgen::prelude::*;

pub mod api;
mod assembler;
mod capture;
mod dom;
mod gallery;

/// Drawing page entry point
#[wasm_bindgen]
pub fn start_capture() -> Result<(), JsValue> {
    capture::mount()
}

/// Puzzle page entry point; reads `?id=` from the URL
#[wasm_bindgen]
pub fn start_puzzle() -> Result<(), JsValue> {
    assembler::mount()
}

/// Home page entry point
#[wasm_bindgen]
pub fn start_home() -> Result<(), JsValue> {
    gallery::mount()
}
