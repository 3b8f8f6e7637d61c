use crate::codegen::escape::{css_attribute_value, python_string, xpath_literal};
use crate::dom::processor::MAX_LOCATOR_TEXT_LEN;
use crate::dom::text::normalize_whitespace;
use crate::dom::{Category, ElementDescriptor};

/// Selenium `By` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum By {
    Id,
    Name,
    XPath,
    CssSelector,
    ClassName,
}

impl By {
    pub fn as_python(&self) -> &'static str {
        match self {
            By::Id => "By.ID",
            By::Name => "By.NAME",
            By::XPath => "By.XPATH",
            By::CssSelector => "By.CSS_SELECTOR",
            By::ClassName => "By.CLASS_NAME",
        }
    }
}

/// Locator strategies, most stable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strategy {
    Id,
    Name,
    PrecomputedXPath,
    PrecomputedCss,
    TextXPath,
    AriaLabel,
    ClassName,
    Positional,
}

impl Strategy {
    /// Comment emitted above lookups that are likely to break
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Strategy::ClassName => {
                Some("# Warning: class-based locator, may change when styling changes")
            }
            Strategy::Positional => {
                Some("# Warning: position-based locator, breaks when the page structure changes")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub strategy: Strategy,
    pub by: By,
    /// Raw locator value, before Python escaping
    pub value: String,
}

impl Locator {
    fn new(strategy: Strategy, by: By, value: impl Into<String>) -> Self {
        Self {
            strategy,
            by,
            value: value.into(),
        }
    }

    pub fn warning(&self) -> Option<&'static str> {
        self.strategy.warning()
    }

    /// `(By.ID, "login")`
    pub fn tuple(&self) -> String {
        format!("({}, \"{}\")", self.by.as_python(), python_string(&self.value))
    }

    /// Explicit-wait lookup. Buttons wait until clickable, everything else
    /// until present.
    pub fn render_wait(&self, category: Category, wait_secs: u64) -> String {
        let condition = match category {
            Category::Button => "element_to_be_clickable",
            _ => "presence_of_element_located",
        };
        format!(
            "WebDriverWait(self.driver, {}).until(EC.{}({}))",
            wait_secs,
            condition,
            self.tuple()
        )
    }
}

/// Pick the most stable locator the descriptor supports.
///
/// Descriptors from `DomProcessor::extract` always carry a text candidate for
/// short text and a `.class` selector for a class, so the text XPath and
/// class-name steps only fire for descriptors built without precomputation.
pub fn select_locator(descriptor: &ElementDescriptor) -> Locator {
    if let Some(id) = descriptor.attr("id") {
        return Locator::new(Strategy::Id, By::Id, normalize_whitespace(id));
    }

    if let Some(name) = descriptor.attr("name") {
        return Locator::new(Strategy::Name, By::Name, normalize_whitespace(name));
    }

    if let Some(xpath) = descriptor.locator_candidates.first() {
        return Locator::new(Strategy::PrecomputedXPath, By::XPath, xpath.clone());
    }

    if let Some(css) = &descriptor.css_selector {
        return Locator::new(Strategy::PrecomputedCss, By::CssSelector, css.clone());
    }

    let text = normalize_whitespace(&descriptor.text);
    if !text.is_empty() && text.chars().count() < MAX_LOCATOR_TEXT_LEN {
        let tag = &descriptor.tag;
        let literal = xpath_literal(&text);
        let alternative = if descriptor.category == Category::Button {
            format!("//{}[@value={}]", tag, literal)
        } else {
            format!("//{}[normalize-space(@placeholder)={}]", tag, literal)
        };
        let xpath = format!("//{}[normalize-space(.)={}] | {}", tag, literal, alternative);
        return Locator::new(Strategy::TextXPath, By::XPath, xpath);
    }

    if let Some(aria_label) = descriptor.attr("aria_label") {
        return Locator::new(
            Strategy::AriaLabel,
            By::CssSelector,
            format!("[aria-label={}]", css_attribute_value(aria_label)),
        );
    }

    if let Some(class) = descriptor.first_class() {
        return Locator::new(Strategy::ClassName, By::ClassName, class);
    }

    Locator::new(
        Strategy::Positional,
        By::CssSelector,
        format!("{}:nth-of-type({})", descriptor.tag, descriptor.index),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> ElementDescriptor {
        ElementDescriptor::new("button", Category::Button, 3)
    }

    #[test]
    fn test_id_beats_everything() {
        let element = button()
            .with_attribute("id", "login-button")
            .with_attribute("class", "btn primary")
            .with_attribute("name", "login")
            .with_text("Log in")
            .with_css_selector(".btn");
        let locator = select_locator(&element);
        assert_eq!(locator.strategy, Strategy::Id);
        assert_eq!(
            locator.render_wait(element.category, 10),
            r#"WebDriverWait(self.driver, 10).until(EC.element_to_be_clickable((By.ID, "login-button")))"#
        );
    }

    #[test]
    fn test_inputs_wait_for_presence() {
        let element = ElementDescriptor::new("input", Category::Input, 1).with_attribute("name", "q");
        let locator = select_locator(&element);
        assert_eq!(locator.by, By::Name);
        assert_eq!(
            locator.render_wait(Category::Input, 5),
            r#"WebDriverWait(self.driver, 5).until(EC.presence_of_element_located((By.NAME, "q")))"#
        );
    }

    #[test]
    fn test_precomputed_candidates() {
        let element = button()
            .with_text("Go")
            .with_locator_candidate("//*[normalize-space(.)='Go']")
            .with_css_selector(".cta");
        assert_eq!(select_locator(&element).strategy, Strategy::PrecomputedXPath);

        let element = button().with_text("Go").with_css_selector(".cta");
        let locator = select_locator(&element);
        assert_eq!(locator.strategy, Strategy::PrecomputedCss);
        assert_eq!(locator.value, ".cta");
    }

    #[test]
    fn test_text_xpath_for_buttons_and_fields() {
        let locator = select_locator(&button().with_text("Sign\n  up"));
        assert_eq!(locator.strategy, Strategy::TextXPath);
        assert_eq!(
            locator.value,
            "//button[normalize-space(.)='Sign up'] | //button[@value='Sign up']"
        );

        let field = ElementDescriptor::new("textarea", Category::Input, 2).with_text("Comment");
        assert_eq!(
            select_locator(&field).value,
            "//textarea[normalize-space(.)='Comment'] | //textarea[normalize-space(@placeholder)='Comment']"
        );
    }

    #[test]
    fn test_quotes_are_escaped_for_python() {
        let locator = select_locator(&button().with_text(r#"Say "don't""#));
        assert_eq!(
            locator.tuple(),
            r#"(By.XPATH, "//button[normalize-space(.)=concat('Say \"don', \"'\", 't\"')] | //button[@value=concat('Say \"don', \"'\", 't\"')]")"#
        );
    }

    #[test]
    fn test_aria_label_class_and_position() {
        let element = button()
            .with_attribute("aria_label", "Close 'dialog'")
            .with_attribute("class", "icon close");
        let locator = select_locator(&element);
        assert_eq!(locator.strategy, Strategy::AriaLabel);
        assert_eq!(locator.value, r"[aria-label='Close \'dialog\'']");
        assert!(locator.warning().is_none());

        let element = button().with_attribute("class", "icon close");
        let locator = select_locator(&element);
        assert_eq!(locator.by, By::ClassName);
        assert_eq!(locator.value, "icon");
        assert!(locator.warning().is_some());

        let locator = select_locator(&button());
        assert_eq!(locator.strategy, Strategy::Positional);
        assert_eq!(locator.value, "button:nth-of-type(3)");
        assert!(locator.warning().is_some());
    }

    #[test]
    fn test_long_text_skips_text_strategy() {
        let element = button().with_text("x".repeat(MAX_LOCATOR_TEXT_LEN));
        assert_eq!(select_locator(&element).strategy, Strategy::Positional);
    }

    #[test]
    fn test_strategies_are_ordered() {
        assert!(Strategy::Id < Strategy::Name);
        assert!(Strategy::Name < Strategy::TextXPath);
        assert!(Strategy::ClassName < Strategy::Positional);
    }
}
