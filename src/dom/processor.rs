use crate::codegen::escape::{css_escape, xpath_literal};
use crate::core::BrowserTrait;
use crate::dom::classifier::{classify, resolve_category};
use crate::dom::element::{Category, ElementDescriptor, DESCRIPTOR_ATTRIBUTES};
use crate::dom::text::{normalize_whitespace, recover_text};
use crate::errors::Result;
use tracing::debug;

/// Text longer than this is not used to build text-matching XPaths.
pub const MAX_LOCATOR_TEXT_LEN: usize = 50;

/// Reads discovered elements into `ElementDescriptor`s.
pub struct DomProcessor;

impl DomProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Snapshot one element. `requested` is the category of a buttons-only or
    /// inputs-only run, used for elements the classifier cannot place.
    ///
    /// A vanished element surfaces as `GeneratorError::StaleElement`.
    pub async fn extract<B: BrowserTrait>(
        &self,
        browser: &B,
        handle: &B::ElementHandle,
        index: usize,
        requested: Option<Category>,
    ) -> Result<ElementDescriptor> {
        let tag = browser.tag_name(handle).await?;

        let mut descriptor = ElementDescriptor::new(tag, Category::Other, index);
        for (key, attribute) in DESCRIPTOR_ATTRIBUTES {
            if let Some(value) = browser.get_attribute(handle, attribute).await? {
                descriptor = descriptor.with_attribute(*key, value);
            }
        }

        let classified = classify(&descriptor.tag, effective_input_type(&descriptor));
        descriptor.category = resolve_category(classified, requested);

        descriptor.text = browser.get_text(handle).await?.trim().to_string();
        if descriptor.text.is_empty() {
            if let Some(recovered) = recover_text(&descriptor) {
                debug!("Element {}: label recovered from attributes: {}", index, recovered);
                descriptor.text = recovered;
            }
        }

        descriptor.geometry = browser.geometry(handle).await?;
        descriptor.visible = browser.is_displayed(handle).await?;
        descriptor.enabled = browser.is_enabled(handle).await?;

        self.precompute_locators(&mut descriptor);
        Ok(descriptor)
    }

    /// Fill `locator_candidates` and `css_selector` from id, name and text.
    pub fn precompute_locators(&self, descriptor: &mut ElementDescriptor) {
        let mut candidates = Vec::new();

        if let Some(id) = descriptor.attr("id") {
            candidates.push(format!("//*[@id={}]", xpath_literal(id)));
        }
        if let Some(name) = descriptor.attr("name") {
            candidates.push(format!("//*[@name={}]", xpath_literal(name)));
        }
        let text = normalize_whitespace(&descriptor.text);
        if !text.is_empty() && text.chars().count() < MAX_LOCATOR_TEXT_LEN {
            candidates.push(format!("//*[normalize-space(.)={}]", xpath_literal(&text)));
        }

        descriptor.css_selector = if let Some(id) = descriptor.attr("id") {
            Some(format!("#{}", css_escape(id.trim())))
        } else {
            descriptor
                .first_class()
                .map(|class| format!(".{}", css_escape(class)))
        };

        descriptor.locator_candidates = candidates;
    }
}

/// An `input` without a usable `type` attribute renders as a text field.
fn effective_input_type(descriptor: &ElementDescriptor) -> Option<&str> {
    match descriptor.attr("type").map(str::trim) {
        Some(input_type) if !input_type.is_empty() => Some(input_type),
        _ if descriptor.tag.eq_ignore_ascii_case("input") => Some("text"),
        _ => None,
    }
}

impl Default for DomProcessor {
    fn default() -> Self {
        Self::new()
    }
}
