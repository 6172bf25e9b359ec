//! Small DOM helpers shared by the widget.

use wasm_bindgen::JsValue;
use ytgallery_core::{DescriptionPanel, Error, Result};

/// Convert a thrown JS value into a crate error.
pub fn js_error(value: JsValue) -> Error {
    Error::Browser(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

/// The global `window`.
pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::Browser("window is not available".to_string()))
}

/// The page document.
pub fn document() -> Result<web_sys::Document> {
    window()?
        .document()
        .ok_or_else(|| Error::Browser("document is not available".to_string()))
}

/// Look up an element by id.
pub fn element_by_id(document: &web_sys::Document, id: &str) -> Result<web_sys::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::ContainerNotFound(id.to_string()))
}

/// The browser's user agent, or an empty string when unavailable.
pub fn user_agent() -> String {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .unwrap_or_default()
}

/// A description panel backed by a DOM element.
#[derive(Debug, Clone)]
pub struct ElementDescriptionPanel {
    element: web_sys::Element,
}

impl ElementDescriptionPanel {
    /// Wrap an element.
    #[must_use]
    pub const fn new(element: web_sys::Element) -> Self {
        Self { element }
    }
}

impl DescriptionPanel for ElementDescriptionPanel {
    fn set_description(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}
