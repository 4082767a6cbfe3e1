//! Chatbot Dashboard entry point
//!
//! In the browser, attaches the dashboard helpers on load.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    chatbot_dashboard::platform::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chatbot Dashboard (native) starting...");
    log::info!("The dashboard helpers run in the browser - build with `trunk serve` for the web version");

    // Print the page contract the helpers expect
    let config = chatbot_dashboard::DashboardConfig::load();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize config: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
