use crate::core::{BrowserConfig, BrowserTrait};
use crate::dom::text::normalize_whitespace;
use crate::errors::{GeneratorError, Result};
use crate::types::Geometry;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Handle to a node matched on a `StaticPage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub usize);

#[derive(Debug, Clone)]
struct StaticNode {
    tag: String,
    attributes: HashMap<String, String>,
    text: String,
    hidden: bool,
}

#[derive(Default)]
struct NodeTable {
    nodes: Vec<StaticNode>,
    by_document_order: HashMap<usize, usize>,
}

/// Offline driver over a saved HTML document.
///
/// There is no layout engine behind it: geometry is always empty and
/// screenshots are unsupported, so OCR never enriches its elements.
pub struct StaticPage {
    html: String,
    table: Mutex<NodeTable>,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            table: Mutex::new(NodeTable::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(html))
    }

    fn node(&self, handle: &NodeRef) -> Result<StaticNode> {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table
            .nodes
            .get(handle.0)
            .cloned()
            .ok_or_else(|| GeneratorError::StaleElement(format!("static node {}", handle.0)))
    }

    /// Matches keyed by their position in document order, which is stable
    /// across re-parses of the same HTML.
    fn select(&self, selector: &str) -> Result<Vec<(usize, StaticNode)>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| GeneratorError::InvalidSelector(format!("{}: {:?}", selector, e)))?;
        let document = Html::parse_document(&self.html);

        Ok(document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .enumerate()
            .filter(|(_, element_ref)| parsed.matches(element_ref))
            .map(|(order, element_ref)| (order, snapshot(&element_ref)))
            .collect())
    }
}

fn snapshot(element_ref: &ElementRef) -> StaticNode {
    let element = element_ref.value();
    let attributes: HashMap<String, String> = element
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let text = normalize_whitespace(&element_ref.text().collect::<Vec<_>>().join(" "));

    let hidden = is_hidden_element(&attributes)
        || element_ref
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| {
                let attrs: HashMap<String, String> = ancestor
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                attrs.contains_key("hidden") || hides_by_style(&attrs)
            });

    StaticNode {
        tag: element.name().to_ascii_lowercase(),
        attributes,
        text,
        hidden,
    }
}

fn is_hidden_element(attributes: &HashMap<String, String>) -> bool {
    if attributes.get("type").map(|t| t.eq_ignore_ascii_case("hidden")) == Some(true) {
        return true;
    }

    if attributes.contains_key("hidden") {
        return true;
    }

    hides_by_style(attributes)
}

fn hides_by_style(attributes: &HashMap<String, String>) -> bool {
    match attributes.get("style") {
        Some(style) => {
            let style: String = style
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            style.contains("display:none") || style.contains("visibility:hidden")
        }
        None => false,
    }
}

#[async_trait]
impl BrowserTrait for StaticPage {
    type ElementHandle = NodeRef;

    async fn launch(&mut self, _config: &BrowserConfig) -> Result<()> {
        Ok(())
    }

    async fn navigate(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<NodeRef>> {
        let matches = self.select(selector)?;

        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let mut handles = Vec::with_capacity(matches.len());
        for (order, node) in matches {
            let position = match table.by_document_order.get(&order) {
                Some(position) => *position,
                None => {
                    let position = table.nodes.len();
                    table.nodes.push(node);
                    table.by_document_order.insert(order, position);
                    position
                }
            };
            handles.push(NodeRef(position));
        }
        Ok(handles)
    }

    async fn tag_name(&self, element: &NodeRef) -> Result<String> {
        Ok(self.node(element)?.tag)
    }

    async fn get_attribute(&self, element: &NodeRef, name: &str) -> Result<Option<String>> {
        Ok(self.node(element)?.attributes.get(name).cloned())
    }

    async fn get_text(&self, element: &NodeRef) -> Result<String> {
        let node = self.node(element)?;
        // Form controls render no text of their own
        if matches!(node.tag.as_str(), "input" | "select" | "textarea") {
            return Ok(String::new());
        }
        Ok(node.text)
    }

    async fn is_displayed(&self, element: &NodeRef) -> Result<bool> {
        Ok(!self.node(element)?.hidden)
    }

    async fn is_enabled(&self, element: &NodeRef) -> Result<bool> {
        Ok(!self.node(element)?.attributes.contains_key("disabled"))
    }

    async fn geometry(&self, element: &NodeRef) -> Result<Geometry> {
        self.node(element)?;
        Ok(Geometry::default())
    }

    async fn capture_element_screenshot(&self, _element: &NodeRef) -> Result<Vec<u8>> {
        Err(GeneratorError::ScreenshotFailed(
            "static pages have no rendering surface".to_string(),
        ))
    }

    fn is_running(&self) -> bool {
        true
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <header><a href="/login" class="btn">Sign in</a></header>
          <button id="go">Go</button>
          <input type="hidden" name="csrf" value="abc">
          <div style="display: none"><button>Ghost</button></div>
          <button disabled>Later</button>
        </body></html>"#;

    #[tokio::test]
    async fn test_same_node_gets_same_handle() {
        let page = StaticPage::new(PAGE);
        let first = page.find_elements("header a").await.unwrap();
        let second = page.find_elements("a[class*='btn']").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(page.tag_name(&first[0]).await.unwrap(), "a");
    }

    #[tokio::test]
    async fn test_visibility_and_enabled_state() {
        let page = StaticPage::new(PAGE);
        let buttons = page.find_elements("button").await.unwrap();
        assert_eq!(buttons.len(), 3);

        assert!(page.is_displayed(&buttons[0]).await.unwrap());
        assert!(!page.is_displayed(&buttons[1]).await.unwrap());
        assert!(!page.is_enabled(&buttons[2]).await.unwrap());

        let hidden = page.find_elements("input").await.unwrap();
        assert!(!page.is_displayed(&hidden[0]).await.unwrap());
    }

    #[tokio::test]
    async fn test_text_and_attributes() {
        let page = StaticPage::new(PAGE);
        let links = page.find_elements("a").await.unwrap();
        assert_eq!(page.get_text(&links[0]).await.unwrap(), "Sign in");
        assert_eq!(
            page.get_attribute(&links[0], "href").await.unwrap().as_deref(),
            Some("/login")
        );
        assert_eq!(page.get_attribute(&links[0], "title").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_selector_and_unknown_handle() {
        let page = StaticPage::new(PAGE);
        assert!(matches!(
            page.find_elements("a[").await,
            Err(GeneratorError::InvalidSelector(_))
        ));
        assert!(matches!(
            page.tag_name(&NodeRef(99)).await,
            Err(GeneratorError::StaleElement(_))
        ));
    }

    #[tokio::test]
    async fn test_screenshots_are_unsupported() {
        let page = StaticPage::new(PAGE);
        let buttons = page.find_elements("#go").await.unwrap();
        assert!(page.capture_element_screenshot(&buttons[0]).await.is_err());
    }
}
