//! Errors returned by background form actions

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("server returned {status} {status_text}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status {
        status: u16,
        status_text: String,
        /// `message` or `error` field of the JSON error body, if any
        message: Option<String>,
    },

    /// A 2xx body that isn't valid JSON
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The page's reload helper failed
    #[error("reload failed: {0}")]
    Reload(String),

    #[error("missing element #{0}")]
    MissingElement(String),

    /// A DOM call threw
    #[error("dom error: {0}")]
    Dom(String),
}

impl ActionError {
    /// Whether the server was reached at all
    pub fn is_transport(&self) -> bool {
        matches!(self, ActionError::Transport(_))
    }
}
