use crate::dom::element::{Category, ElementDescriptor};

/// Strip line breaks and collapse whitespace runs to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Label for an element whose rendered text is empty.
///
/// Order: `value` (never for inputs, whose value is user data), `placeholder`,
/// `aria-label`, `title`, then the last path segment of `href`.
pub fn recover_text(element: &ElementDescriptor) -> Option<String> {
    if element.category != Category::Input {
        if let Some(value) = element.attr("value") {
            return Some(value.trim().to_string());
        }
    }

    ["placeholder", "aria_label", "title"]
        .iter()
        .find_map(|key| element.attr(key))
        .map(|s| s.trim().to_string())
        .or_else(|| element.attr("href").and_then(href_label))
}

/// `https://shop.example/my-cart?x=1` → `my cart`
pub fn href_label(href: &str) -> Option<String> {
    let href: String = href.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let segment = href.rsplit('/').next().unwrap_or("");
    let segment = segment.split('?').next().unwrap_or("");
    let label = segment.replace(['-', '_'], " ");
    let label = label.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> ElementDescriptor {
        ElementDescriptor::new("button", Category::Button, 1)
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Sign\r\n   in  now "), "Sign in now");
        assert_eq!(normalize_whitespace("\n\t"), "");
    }

    #[test]
    fn test_value_first_for_buttons() {
        let element = button()
            .with_attribute("value", "Send")
            .with_attribute("placeholder", "ignored")
            .with_attribute("title", "ignored too");
        assert_eq!(recover_text(&element), Some("Send".to_string()));
    }

    #[test]
    fn test_input_value_is_never_a_label() {
        let element = ElementDescriptor::new("input", Category::Input, 1)
            .with_attribute("value", "alice@example.com")
            .with_attribute("placeholder", "Email");
        assert_eq!(recover_text(&element), Some("Email".to_string()));
    }

    #[test]
    fn test_fallback_chain_order() {
        let element = button()
            .with_attribute("aria_label", "Close dialog")
            .with_attribute("title", "Close");
        assert_eq!(recover_text(&element), Some("Close dialog".to_string()));

        let element = button().with_attribute("title", "Close");
        assert_eq!(recover_text(&element), Some("Close".to_string()));
    }

    #[test]
    fn test_href_segment() {
        let element = ElementDescriptor::new("a", Category::Button, 3)
            .with_attribute("href", "https://shop.example/account/my-order_history?page=2");
        assert_eq!(recover_text(&element), Some("my order history".to_string()));
    }

    #[test]
    fn test_href_with_trailing_slash_has_no_label() {
        assert_eq!(href_label("https://example.com/"), None);
        assert_eq!(href_label("https://exa\nmple.com/log\r\nin"), Some("login".to_string()));
    }

    #[test]
    fn test_nothing_to_recover() {
        assert_eq!(recover_text(&button()), None);
    }
}
