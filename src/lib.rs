/// Tabby - Chrome Extension that groups open tabs by site
/// Built with Rust + WASM + Yew

pub mod actions;
pub mod domain;
pub mod error;
pub mod host;
pub mod operations;
pub mod storage;
pub mod tab_data;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the label heuristic for JavaScript access
#[wasm_bindgen]
pub fn resolve_group_label(url: &str, title: &str) -> String {
    domain::resolve_group_label(url, title)
        .unwrap_or_else(|_| operations::UNKNOWN_GROUP.to_string())
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
