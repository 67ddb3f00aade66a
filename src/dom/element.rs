// ============================================================================
// ELEMENT HELPERS - Lookups and small mutations on the page
// ============================================================================

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

use crate::error::{ConsoleError, Result};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// Element by id; a missing one disables the feature that needs it.
pub fn require_by_id(id: &str) -> Result<Element> {
    document()
        .and_then(|doc| doc.get_element_by_id(id))
        .ok_or_else(|| ConsoleError::ElementMissing(format!("#{}", id)))
}

/// First match for a CSS selector below `root`, or in the whole document.
pub fn require_selector(root: Option<&Element>, selector: &str) -> Result<Element> {
    let found = match root {
        Some(root) => root.query_selector(selector).ok().flatten(),
        None => document().and_then(|doc| doc.query_selector(selector).ok().flatten()),
    };
    found.ok_or_else(|| ConsoleError::ElementMissing(selector.to_string()))
}

pub fn create_element(tag: &str) -> Result<Element> {
    document()
        .ok_or_else(|| ConsoleError::ElementMissing("document".to_string()))?
        .create_element(tag)
        .map_err(|e| ConsoleError::ElementMissing(format!("<{}>: {:?}", tag, e)))
}

pub fn as_input(element: &Element) -> Result<HtmlInputElement> {
    element
        .clone()
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| ConsoleError::ElementMissing("input element".to_string()))
}

pub fn as_button(element: &Element) -> Result<HtmlButtonElement> {
    element
        .clone()
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| ConsoleError::ElementMissing("button element".to_string()))
}

pub fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}

pub fn append_child(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| ConsoleError::ElementMissing(format!("append failed: {:?}", e)))
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

/// Inline `display` toggle, matching the page's static markup.
pub fn set_displayed(element: &Element, displayed: bool) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html
            .style()
            .set_property("display", if displayed { "block" } else { "none" });
    }
}

pub fn set_background(element: &Element, color: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("background-color", color);
    }
}
