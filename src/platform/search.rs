//! Search box wiring

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::config::DashboardConfig;
use crate::error::ActionError;
use crate::search::{Card, SearchTerm, filter_container};

/// A `.chatbot-card` element: `h3` title, `p` description
pub struct DomCard {
    element: HtmlElement,
}

impl DomCard {
    fn text_of(&self, selector: &str) -> String {
        self.element
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }
}

impl Card for DomCard {
    fn title(&self) -> String {
        self.text_of("h3")
    }

    fn description(&self) -> String {
        self.text_of("p")
    }

    fn set_visible(&mut self, visible: bool) {
        let style = self.element.style();
        let _ = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
    }
}

fn collect_cards(container: &Element, card_class: &str) -> Vec<DomCard> {
    let cards = container.get_elements_by_class_name(card_class);
    (0..cards.length())
        .filter_map(|i| cards.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|element| DomCard { element })
        .collect()
}

/// Filter both card containers against `term`
pub fn filter_page(document: &Document, config: &DashboardConfig, term: &SearchTerm) {
    for id in [&config.system_container_id, &config.user_container_id] {
        let mut cards = document
            .get_element_by_id(id)
            .map(|container| collect_cards(&container, &config.card_class));
        if let Some(summary) = filter_container(cards.as_deref_mut(), term) {
            log::debug!(
                "#{}: {} of {} shown for {:?}",
                id,
                summary.shown,
                summary.total(),
                term.as_str()
            );
        }
    }
}

pub fn attach_search(document: &Document, config: &DashboardConfig) -> Result<(), ActionError> {
    let input: HtmlInputElement = document
        .get_element_by_id(&config.search_input_id)
        .ok_or_else(|| ActionError::MissingElement(config.search_input_id.clone()))?
        .dyn_into()
        .map_err(|_| ActionError::Dom(format!("#{} is not an input", config.search_input_id)))?;

    let input_clone = input.clone();
    let document = document.clone();
    let config = config.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let term = SearchTerm::new(&input_clone.value());
        filter_page(&document, &config, &term);
    });
    input
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        .map_err(|e| ActionError::Dom(super::js_error_string(&e)))?;
    closure.forget();
    Ok(())
}
