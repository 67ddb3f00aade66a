// ============================================================================
// ELEMENT BUILDER - Chainable construction of small DOM fragments
// ============================================================================

use web_sys::Element;

use crate::dom::{append_child, create_element};
use crate::error::{ConsoleError, Result};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Replace all classes
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    /// Text content; never parsed as markup.
    pub fn text(self, text: &str) -> Self {
        self.element.set_text_content(Some(text));
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self> {
        self.element
            .set_attribute(name, value)
            .map_err(|e| ConsoleError::ElementMissing(format!("attribute {}: {:?}", name, e)))?;
        Ok(self)
    }

    pub fn data(self, key: &str, value: &str) -> Result<Self> {
        self.attr(&format!("data-{}", key), value)
    }

    pub fn child(self, child: Element) -> Result<Self> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}
