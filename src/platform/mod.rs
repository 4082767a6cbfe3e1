//! Browser platform layer
//!
//! `web-sys` adapters for the search filter, form interceptor and theme
//! toggle, and the startup wiring that attaches them to the page:
//! - `search`: cards backed by DOM elements, input listener
//! - `forms`: fetch transport, confirm dialog, `loadContent` binding
//! - `theme`: body class / icon rendering, toggle listener
//! - `storage`: LocalStorage-backed preference store

pub mod forms;
pub mod search;
pub mod storage;
pub mod theme;

use wasm_bindgen::prelude::*;

use crate::config::DashboardConfig;

/// Best-effort message from a thrown JS value
pub(crate) fn js_error_string(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Attach every dashboard behavior to the current page
pub fn run() {
    console_error_panic_hook::set_once();
    // Level is narrowed once the page config is read
    if console_log::init_with_level(log::Level::Trace).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    let config = DashboardConfig::load();
    log::set_max_level(config.log_level().to_level_filter());
    log::info!("Chatbot dashboard starting...");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document; dashboard helpers disabled");
        return;
    };

    if let Err(e) = search::attach_search(&document, &config) {
        log::warn!("Search filter disabled: {e}");
    }

    match forms::attach_forms(&document, &config) {
        Ok(count) => log::info!("Intercepting {} dashboard forms", count),
        Err(e) => log::warn!("Form interception disabled: {e}"),
    }

    if let Err(e) = theme::attach_theme(&document, &config) {
        log::warn!("Theme toggle disabled: {e}");
    }

    log::info!("Chatbot dashboard ready");
}
