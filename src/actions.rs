//! Background form actions
//!
//! Publish/unpublish and delete forms are sent with an async request
//! instead of a page navigation. On success the current view is re-fetched
//! through the page's reload helper; on failure the view is left as is and
//! the error goes back to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::error::ActionError;

/// Which kind of dashboard form was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Toggles an item's published flag
    Publish,
    Delete,
}

impl FormKind {
    /// Classify a form by its element id prefix
    pub fn from_form_id(id: &str, config: &DashboardConfig) -> Option<Self> {
        if id.starts_with(&config.publish_form_prefix) {
            Some(FormKind::Publish)
        } else if id.starts_with(&config.delete_form_prefix) {
            Some(FormKind::Delete)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Publish => "publish/unpublish",
            FormKind::Delete => "delete",
        }
    }

    /// Delete asks the user first
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, FormKind::Delete)
    }

    /// Publish forwards its fields; delete posts no body
    pub fn sends_fields(&self) -> bool {
        matches!(self, FormKind::Publish)
    }
}

/// A form as the user submitted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedForm {
    pub kind: FormKind,
    /// Resolved `action` URL
    pub action: String,
    /// Fields in document order
    pub fields: Vec<(String, FieldValue)>,
}

/// One form entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Contents of a file input
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Sent as multipart form data
    Form(Vec<(String, FieldValue)>),
}

/// Always a POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub url: String,
    pub body: RequestBody,
}

impl From<SubmittedForm> for ActionRequest {
    fn from(form: SubmittedForm) -> Self {
        let body = if form.kind.sends_fields() {
            RequestBody::Form(form.fields)
        } else {
            RequestBody::Empty
        };
        Self {
            url: form.action,
            body,
        }
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a 2xx body, or turn anything else into [`ActionError::Status`].
    ///
    /// Any JSON is accepted on success; only unparseable bodies fail.
    pub fn into_response(self) -> Result<ActionResponse, ActionError> {
        if !self.is_success() {
            let message = serde_json::from_str::<Value>(&self.body)
                .ok()
                .and_then(|value| ActionResponse::from_value(&value).into_message());
            return Err(ActionError::Status {
                status: self.status,
                status_text: self.status_text,
                message,
            });
        }
        let value: Value =
            serde_json::from_str(&self.body).map_err(|e| ActionError::Decode(e.to_string()))?;
        Ok(ActionResponse::from_value(&value))
    }
}

/// Fields the dashboard recognises in a publish/delete reply.
/// Missing or mistyped fields read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    /// New published state (publish only)
    pub public: Option<bool>,
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let flag = |key: &str| value.get(key).and_then(Value::as_bool);
        Self {
            success: flag("success"),
            message: text("message"),
            public: flag("public"),
            error: text("error"),
        }
    }

    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Request succeeded and the view was reloaded
    Completed(ActionResponse),
    /// User declined the confirmation; nothing was sent
    Cancelled,
}

/// Sends action requests
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, request: &ActionRequest) -> Result<HttpReply, ActionError>;
}

/// Blocking yes/no prompt
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Re-renders a path in place (the page's `loadContent`)
pub trait Reloader {
    fn reload(&self, path: &str) -> Result<(), ActionError>;
}

pub struct FormInterceptor<T, C, R> {
    transport: T,
    confirm: C,
    reloader: R,
    confirm_message: String,
}

impl<T: Transport, C: Confirm, R: Reloader> FormInterceptor<T, C, R> {
    pub fn new(transport: T, confirm: C, reloader: R, config: &DashboardConfig) -> Self {
        Self {
            transport,
            confirm,
            reloader,
            confirm_message: config.delete_confirm_message.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn reloader(&self) -> &R {
        &self.reloader
    }

    /// Send a submitted form and reload `current_path` once it succeeds.
    ///
    /// Nothing is retried. Concurrent submissions are independent; each one
    /// reloads only after its own request settles.
    pub async fn submit(
        &self,
        form: SubmittedForm,
        current_path: &str,
    ) -> Result<ActionOutcome, ActionError> {
        if form.kind.needs_confirmation() && !self.confirm.confirm(&self.confirm_message) {
            return Ok(ActionOutcome::Cancelled);
        }

        let request = ActionRequest::from(form);
        let reply = self.transport.post(&request).await?;
        let response = reply.into_response()?;

        self.reloader.reload(current_path)?;
        Ok(ActionOutcome::Completed(response))
    }
}

/// Log the result of an action; returns the level it was logged at
pub fn report(kind: FormKind, result: &Result<ActionOutcome, ActionError>) -> log::Level {
    match result {
        Ok(ActionOutcome::Completed(response)) => {
            match &response.message {
                Some(message) => log::info!("{}: {}", kind.as_str(), message),
                None => log::info!("{} done", kind.as_str()),
            }
            log::Level::Info
        }
        Ok(ActionOutcome::Cancelled) => {
            log::debug!("{} cancelled by user", kind.as_str());
            log::Level::Debug
        }
        Err(e) if e.is_transport() => {
            log::error!("Failed to {} (server unreachable): {}", kind.as_str(), e);
            log::Level::Error
        }
        Err(e) => {
            log::error!("Failed to {}: {}", kind.as_str(), e);
            log::Level::Error
        }
    }
}
