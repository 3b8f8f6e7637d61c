use crate::types::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Attributes read from every discovered element: (descriptor key, DOM attribute name).
pub const DESCRIPTOR_ATTRIBUTES: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("class", "class"),
    ("type", "type"),
    ("value", "value"),
    ("placeholder", "placeholder"),
    ("href", "href"),
    ("aria_label", "aria-label"),
    ("title", "title"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Button,
    Input,
    CheckboxRadio,
    Select,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Button => "button",
            Category::Input => "input",
            Category::CheckboxRadio => "checkbox_radio",
            Category::Select => "select",
            Category::Other => "other",
        }
    }

    /// Prefix of generated method names
    pub fn method_prefix(&self) -> &'static str {
        match self {
            Category::Button => "click",
            Category::Input => "enter",
            Category::CheckboxRadio | Category::Select => "select",
            Category::Other => "element",
        }
    }

    pub fn is_emittable(&self) -> bool {
        !matches!(self, Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one discovered element, taken once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub tag: String,
    pub category: Category,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub geometry: Geometry,
    pub visible: bool,
    pub enabled: bool,
    pub locator_candidates: Vec<String>,
    pub css_selector: Option<String>,
    pub index: usize,
}

impl ElementDescriptor {
    pub fn new(tag: impl Into<String>, category: Category, index: usize) -> Self {
        Self {
            tag: tag.into(),
            category,
            attributes: HashMap::new(),
            text: String::new(),
            geometry: Geometry::default(),
            visible: true,
            enabled: true,
            locator_candidates: Vec::new(),
            css_selector: None,
            index,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_locator_candidate(mut self, xpath: impl Into<String>) -> Self {
        self.locator_candidates.push(xpath.into());
        self
    }

    pub fn with_css_selector(mut self, selector: impl Into<String>) -> Self {
        self.css_selector = Some(selector.into());
        self
    }

    /// Non-empty attribute value by descriptor key
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// First token of the class list
    pub fn first_class(&self) -> Option<&str> {
        self.attr("class").and_then(|c| c.split_whitespace().next())
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Short human-readable form used in debug logs, e.g. `<button id='go' class='btn...'>`
    pub fn summary(&self) -> String {
        let mut out = format!("<{}", self.tag);
        if let Some(id) = self.attr("id") {
            out.push_str(&format!(" id='{}'", id));
        }
        if let Some(class) = self.first_class() {
            out.push_str(&format!(" class='{}...'", class));
        }
        for key in ["name", "type", "placeholder"] {
            if let Some(value) = self.attr(key) {
                out.push_str(&format!(" {}='{}'", key, value));
            }
        }
        out.push('>');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_attributes_are_absent() {
        let element = ElementDescriptor::new("input", Category::Input, 1)
            .with_attribute("id", "  ")
            .with_attribute("name", "q");
        assert_eq!(element.attr("id"), None);
        assert_eq!(element.attr("name"), Some("q"));
        assert_eq!(element.attr("title"), None);
    }

    #[test]
    fn test_first_class() {
        let element = ElementDescriptor::new("a", Category::Button, 2)
            .with_attribute("class", "btn btn-primary  wide");
        assert_eq!(element.first_class(), Some("btn"));
    }

    #[test]
    fn test_summary() {
        let element = ElementDescriptor::new("button", Category::Button, 1)
            .with_attribute("id", "go")
            .with_attribute("class", "btn primary")
            .with_attribute("type", "submit");
        assert_eq!(element.summary(), "<button id='go' class='btn...' type='submit'>");
    }

    #[test]
    fn test_method_prefixes() {
        assert_eq!(Category::Button.method_prefix(), "click");
        assert_eq!(Category::Input.method_prefix(), "enter");
        assert_eq!(Category::CheckboxRadio.method_prefix(), "select");
        assert_eq!(Category::Select.method_prefix(), "select");
        assert!(!Category::Other.is_emittable());
    }
}
