use crate::core::{BrowserTrait, ElementScope};
use crate::errors::{GeneratorError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

pub const BUTTON_SELECTORS: &[&str] = &[
    "button",
    "input[type='button'], input[type='submit']",
    "[role='button']",
    "a[class*='btn'], div[class*='btn'], span[class*='btn'], \
     a[href*='login'], a[href*='signin'], a[href*='signup'], a[href*='register'], \
     a[href*='mypage'], a[href*='cart'], a[href*='search'], a[href*='customer'], \
     header a, .header a, #header a, footer a, .footer a, #footer a",
];

pub const INPUT_SELECTORS: &[&str] = &[
    "input[type='text'], input[type='password'], input[type='email'], input[type='number'], \
     input[type='tel'], input[type='search'], input[type='url'], input:not([type])",
    "textarea",
    "[contenteditable='true']",
    "[role='textbox'], [class*='input'], [class*='field'], [class*='text-box']",
    "form input",
    "form[action*='login'] input, form[action*='signin'] input, \
     form[action*='register'] input, form[action*='signup'] input",
    "div[class*='login'] input, div[class*='signin'] input, div[id*='login'] input",
];

pub const CHECKBOX_RADIO_SELECTORS: &[&str] = &["input[type='checkbox'], input[type='radio']"];

pub const SELECT_SELECTORS: &[&str] = &["select"];

/// Selector groups queried for a scope, in query order.
pub fn selector_groups(scope: ElementScope) -> Vec<&'static str> {
    match scope {
        ElementScope::ButtonsOnly => BUTTON_SELECTORS.to_vec(),
        ElementScope::InputsOnly => INPUT_SELECTORS.to_vec(),
        ElementScope::All | ElementScope::TextOnly => BUTTON_SELECTORS
            .iter()
            .chain(INPUT_SELECTORS)
            .chain(CHECKBOX_RADIO_SELECTORS)
            .chain(SELECT_SELECTORS)
            .copied()
            .collect(),
    }
}

/// Query every selector group of `scope` and return each element once, in
/// the order it was first found.
///
/// A selector the driver rejects is logged and skipped.
pub async fn discover<B: BrowserTrait>(
    browser: &B,
    scope: ElementScope,
) -> Result<Vec<B::ElementHandle>> {
    let mut seen = HashSet::new();
    let mut discovered = Vec::new();

    for selector in selector_groups(scope) {
        let handles = match browser.find_elements(selector).await {
            Ok(handles) => handles,
            Err(e) if e.is_element_scoped() || matches!(e, GeneratorError::InvalidSelector(_)) => {
                warn!("Skipping selector group {:?}: {}", selector, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let before = discovered.len();
        for handle in handles {
            if seen.insert(handle.clone()) {
                discovered.push(handle);
            }
        }
        debug!(
            "Selector {:?}: {} new elements",
            selector,
            discovered.len() - before
        );
    }

    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::StaticPage;

    const PAGE: &str = r#"
        <html><body>
          <header><a href="/home" id="home" class="btn">Home</a></header>
          <form action="/login">
            <input type="text" id="user">
            <input type="checkbox" id="remember">
            <select id="lang"><option>en</option></select>
            <button id="submit">Log in</button>
          </form>
        </body></html>"#;

    #[tokio::test]
    async fn test_all_scope_orders_groups_and_dedups() {
        let page = StaticPage::new(PAGE);
        let handles = discover(&page, ElementScope::All).await.unwrap();

        let mut ids = Vec::new();
        for handle in &handles {
            ids.push(page.get_attribute(handle, "id").await.unwrap().unwrap());
        }
        // The checkbox is first reached through "form input", before its own group.
        assert_eq!(ids, vec!["submit", "home", "user", "remember", "lang"]);
    }

    #[tokio::test]
    async fn test_buttons_only_scope() {
        let page = StaticPage::new(PAGE);
        let handles = discover(&page, ElementScope::ButtonsOnly).await.unwrap();
        assert_eq!(handles.len(), 2);
    }

    #[test]
    fn test_text_only_uses_all_groups() {
        assert_eq!(
            selector_groups(ElementScope::TextOnly),
            selector_groups(ElementScope::All)
        );
        assert_eq!(selector_groups(ElementScope::InputsOnly).len(), INPUT_SELECTORS.len());
    }
}
