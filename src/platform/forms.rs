//! Publish/delete form interception over `fetch`

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, Document, File, FormData, HtmlFormElement, RequestInit, Response,
};

use super::js_error_string;
use crate::actions::{
    self, ActionRequest, Confirm, FieldValue, FormInterceptor, FormKind, HttpReply, Reloader,
    RequestBody, SubmittedForm, Transport,
};
use crate::config::DashboardConfig;
use crate::error::ActionError;

// Supplied by the surrounding page
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = loadContent)]
    fn load_content(path: &str) -> Result<(), JsValue>;
}

fn transport_error(value: JsValue) -> ActionError {
    ActionError::Transport(js_error_string(&value))
}

fn dom_error(value: JsValue) -> ActionError {
    ActionError::Dom(js_error_string(&value))
}

fn append_field(data: &FormData, name: &str, value: &FieldValue) -> Result<(), JsValue> {
    match value {
        FieldValue::Text(text) => data.append_with_str(name, text),
        FieldValue::File {
            file_name,
            content_type,
            bytes,
        } => {
            let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
            let options = BlobPropertyBag::new();
            options.set_type(content_type);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
            data.append_with_blob_and_filename(name, &blob, file_name)
        }
    }
}

/// `window.fetch`
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post(&self, request: &ActionRequest) -> Result<HttpReply, ActionError> {
        let window =
            web_sys::window().ok_or_else(|| ActionError::Transport("no window".to_string()))?;

        let init = RequestInit::new();
        init.set_method("POST");
        if let RequestBody::Form(fields) = &request.body {
            let data = FormData::new().map_err(transport_error)?;
            for (name, value) in fields {
                append_field(&data, name, value).map_err(transport_error)?;
            }
            init.set_body(&data);
        }

        let response: Response = JsFuture::from(window.fetch_with_str_and_init(&request.url, &init))
            .await
            .map_err(transport_error)?
            .dyn_into()
            .map_err(transport_error)?;

        let body = JsFuture::from(response.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?
            .as_string()
            .unwrap_or_default();

        Ok(HttpReply {
            status: response.status(),
            status_text: response.status_text(),
            body,
        })
    }
}

/// `window.confirm`
pub struct WindowConfirm;

impl Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

/// The page's `loadContent(path)`
pub struct PageReloader;

impl Reloader for PageReloader {
    fn reload(&self, path: &str) -> Result<(), ActionError> {
        load_content(path).map_err(|e| ActionError::Reload(js_error_string(&e)))
    }
}

pub type PageInterceptor = FormInterceptor<FetchTransport, WindowConfirm, PageReloader>;

/// Copy every `FormData` entry, reading file inputs into memory
async fn read_fields(data: FormData) -> Result<Vec<(String, FieldValue)>, ActionError> {
    let mut fields = Vec::new();
    let Some(entries) = js_sys::try_iter(&data).map_err(dom_error)? else {
        return Ok(fields);
    };
    for entry in entries {
        let pair = js_sys::Array::from(&entry.map_err(dom_error)?);
        let Some(name) = pair.get(0).as_string() else {
            continue;
        };
        let value = pair.get(1);
        if let Some(text) = value.as_string() {
            fields.push((name, FieldValue::Text(text)));
            continue;
        }
        match value.dyn_into::<File>() {
            Ok(file) => {
                let buffer = JsFuture::from(file.array_buffer()).await.map_err(dom_error)?;
                fields.push((
                    name,
                    FieldValue::File {
                        file_name: file.name(),
                        content_type: file.type_(),
                        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
                    },
                ));
            }
            Err(_) => log::warn!("Skipping form field {name}: unsupported value"),
        }
    }
    Ok(fields)
}

/// Snapshot a form at submit time; file contents are read afterwards
async fn read_form(
    data: Option<FormData>,
    action: String,
    kind: FormKind,
) -> Result<SubmittedForm, ActionError> {
    let fields = match data {
        Some(data) => read_fields(data).await?,
        None => Vec::new(),
    };
    Ok(SubmittedForm {
        kind,
        action,
        fields,
    })
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn attach_form(
    form: HtmlFormElement,
    kind: FormKind,
    interceptor: Rc<PageInterceptor>,
) -> Result<(), ActionError> {
    let target = form.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        let data = if kind.sends_fields() {
            match FormData::new_with_form(&target) {
                Ok(data) => Some(data),
                Err(e) => {
                    actions::report(kind, &Err(dom_error(e)));
                    return;
                }
            }
        } else {
            None
        };
        let action = target.action();
        let interceptor = interceptor.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = match read_form(data, action, kind).await {
                Ok(submitted) => interceptor.submit(submitted, &current_path()).await,
                Err(e) => Err(e),
            };
            actions::report(kind, &result);
        });
    });
    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
        .map_err(|e| ActionError::Dom(js_error_string(&e)))?;
    closure.forget();
    Ok(())
}

/// Intercept every publish and delete form on the page; returns how many
pub fn attach_forms(document: &Document, config: &DashboardConfig) -> Result<usize, ActionError> {
    let selector = format!(
        "[id^=\"{}\"], [id^=\"{}\"]",
        config.publish_form_prefix, config.delete_form_prefix
    );
    let nodes = document
        .query_selector_all(&selector)
        .map_err(|e| ActionError::Dom(js_error_string(&e)))?;

    let interceptor = Rc::new(FormInterceptor::new(
        FetchTransport,
        WindowConfirm,
        PageReloader,
        config,
    ));

    let mut attached = 0;
    for i in 0..nodes.length() {
        let Some(form) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlFormElement>().ok()) else {
            continue;
        };
        let Some(kind) = FormKind::from_form_id(&form.id(), config) else {
            continue;
        };
        attach_form(form, kind, interceptor.clone())?;
        attached += 1;
    }
    Ok(attached)
}
