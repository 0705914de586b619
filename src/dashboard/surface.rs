//! Render targets for slide content.

use std::collections::BTreeMap;

use super::slides::Slide;

/// Something that displays text by element id (a web page, a terminal, ...).
pub trait RenderSurface {
    /// Replace the text of an element.
    fn set_text(&mut self, element_id: &str, text: &str);

    /// Replace the status class of an element; `None` clears it.
    fn set_class(&mut self, element_id: &str, class: Option<&str>);
}

/// Write every slide entry to a surface.
pub fn render<S: RenderSurface + ?Sized>(slides: &[Slide], surface: &mut S) {
    for slide in slides {
        for entry in &slide.entries {
            surface.set_text(entry.element_id, &entry.text);
            surface.set_class(entry.element_id, entry.class);
        }
    }
}

/// In-memory surface that records the last text and class per element.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    texts: BTreeMap<String, String>,
    classes: BTreeMap<String, String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently set on an element.
    pub fn text(&self, element_id: &str) -> Option<&str> {
        self.texts.get(element_id).map(String::as_str)
    }

    /// Class currently set on an element.
    pub fn class(&self, element_id: &str) -> Option<&str> {
        self.classes.get(element_id).map(String::as_str)
    }

    /// Number of elements with text.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl RenderSurface for MemorySurface {
    fn set_text(&mut self, element_id: &str, text: &str) {
        self.texts.insert(element_id.to_string(), text.to_string());
    }

    fn set_class(&mut self, element_id: &str, class: Option<&str>) {
        match class {
            Some(class) => {
                self.classes.insert(element_id.to_string(), class.to_string());
            }
            None => {
                self.classes.remove(element_id);
            }
        }
    }
}
