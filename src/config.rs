//! Dashboard page configuration
//!
//! Element ids, form prefixes and messages the page is expected to use.
//! The page may override any of them with a JSON block in
//! `<script id="dashboard-config" type="application/json">`.

use serde::{Deserialize, Serialize};

/// Id of the optional JSON override block
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// DOM contract for the dashboard page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    // === Search ===
    /// Search input
    pub search_input_id: String,
    /// Container of system-owned cards
    pub system_container_id: String,
    /// Container of user-owned cards
    pub user_container_id: String,
    /// Class shared by every card
    pub card_class: String,

    // === Forms ===
    /// Id prefix of publish/unpublish forms
    pub publish_form_prefix: String,
    /// Id prefix of delete forms
    pub delete_form_prefix: String,
    /// Prompt shown before a delete is sent
    pub delete_confirm_message: String,

    // === Theme ===
    pub theme_toggle_id: String,
    /// Icon shown while the light theme is active
    pub dark_icon_id: String,
    /// Icon shown while the dark theme is active
    pub light_icon_id: String,
    /// Class toggled on `<body>`
    pub dark_class: String,
    /// Class that hides an icon
    pub hidden_class: String,

    // === Logging ===
    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            search_input_id: "chatbot-search".to_string(),
            system_container_id: "system-chatbots".to_string(),
            user_container_id: "user-chatbots".to_string(),
            card_class: "chatbot-card".to_string(),

            publish_form_prefix: "publish-form-".to_string(),
            delete_form_prefix: "delete-chatbot-form-".to_string(),
            delete_confirm_message: "Are you sure you want to delete this chatbot?".to_string(),

            theme_toggle_id: "theme-toggle".to_string(),
            dark_icon_id: "theme-toggle-dark-icon".to_string(),
            light_icon_id: "theme-toggle-light-icon".to_string(),
            dark_class: "dark".to_string(),
            hidden_class: "hidden".to_string(),

            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON override; fields it doesn't name keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configured log level, falling back to `Info` for unknown names
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Load config from the page's override block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring malformed #{CONFIG_ELEMENT_ID}: {e}");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_contract() {
        let config = DashboardConfig::default();
        assert_eq!(config.search_input_id, "chatbot-search");
        assert_eq!(config.publish_form_prefix, "publish-form-");
        assert_eq!(config.delete_form_prefix, "delete-chatbot-form-");
        assert_eq!(config.dark_class, "dark");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config =
            DashboardConfig::from_json(r#"{"search_input_id": "bot-search", "log_level": "debug"}"#)
                .unwrap();
        assert_eq!(config.search_input_id, "bot-search");
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.card_class, "chatbot-card");
        assert_eq!(config.user_container_id, "user-chatbots");
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = DashboardConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(DashboardConfig::from_json("{not json").is_err());
    }
}
