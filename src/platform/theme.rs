//! Theme toggle wiring

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::storage::LocalStorageStore;
use crate::config::DashboardConfig;
use crate::error::ActionError;
use crate::theme::{Theme, ThemeController, ThemeView};

/// `<body>` class plus the two toggle icons
pub struct DomThemeView {
    body: HtmlElement,
    dark_icon: Option<Element>,
    light_icon: Option<Element>,
    dark_class: String,
    hidden_class: String,
}

impl DomThemeView {
    pub fn new(document: &Document, config: &DashboardConfig) -> Result<Self, ActionError> {
        let body = document
            .body()
            .ok_or_else(|| ActionError::MissingElement("body".to_string()))?;
        Ok(Self {
            body,
            dark_icon: document.get_element_by_id(&config.dark_icon_id),
            light_icon: document.get_element_by_id(&config.light_icon_id),
            dark_class: config.dark_class.clone(),
            hidden_class: config.hidden_class.clone(),
        })
    }

    fn set_hidden(&self, icon: Option<&Element>, hidden: bool) {
        if let Some(icon) = icon {
            let _ = icon.class_list().toggle_with_force(&self.hidden_class, hidden);
        }
    }
}

impl ThemeView for DomThemeView {
    fn render(&mut self, theme: Theme) {
        let dark = theme.is_dark();
        let _ = self.body.class_list().toggle_with_force(&self.dark_class, dark);
        self.set_hidden(self.dark_icon.as_ref(), dark);
        self.set_hidden(self.light_icon.as_ref(), !dark);
    }
}

fn os_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Apply the initial theme, then hook up the toggle button
pub fn attach_theme(document: &Document, config: &DashboardConfig) -> Result<(), ActionError> {
    let view = DomThemeView::new(document, config)?;
    let controller = Rc::new(RefCell::new(ThemeController::init(
        LocalStorageStore::open(),
        view,
        os_prefers_dark(),
    )));

    let toggle = document
        .get_element_by_id(&config.theme_toggle_id)
        .ok_or_else(|| ActionError::MissingElement(config.theme_toggle_id.clone()))?;

    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        controller.borrow_mut().toggle();
    });
    toggle
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(|e| ActionError::Dom(super::js_error_string(&e)))?;
    closure.forget();
    Ok(())
}
