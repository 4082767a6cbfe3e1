//! Chatbot Dashboard - browser helpers for the admin dashboard
//!
//! Core modules:
//! - `search`: Card filtering by search text
//! - `actions`: Publish/delete forms sent in the background
//! - `theme`: Light/dark state machine
//! - `settings`: Persisted preferences
//! - `config`: Page contract (element ids, prefixes)
//! - `platform`: `web-sys` adapters and listener wiring (wasm only)

pub mod actions;
pub mod config;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod search;
pub mod settings;
pub mod theme;

pub use actions::{ActionOutcome, ActionResponse, FormInterceptor, FormKind};
pub use config::DashboardConfig;
pub use error::ActionError;
pub use settings::Preferences;
pub use theme::{Theme, ThemeController};
