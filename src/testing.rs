use crate::browser::{NodeRef, StaticPage};
use crate::core::{BrowserConfig, BrowserTrait, Config, TextDetector};
use crate::dom::{Category, ElementDescriptor};
use crate::errors::Result;
use crate::generator::{PageObjectGenerator, RunSummary};
use crate::types::{DetectedTextRegion, Geometry};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct TestHelper;

impl TestHelper {
    /// Defaults with OCR off, for runs that must not touch the network.
    pub fn offline_config() -> Config {
        let mut config = Config::default();
        config.ocr.enabled = false;
        config
    }

    pub fn button(text: &str, index: usize) -> ElementDescriptor {
        ElementDescriptor::new("button", Category::Button, index)
            .with_text(text)
            .with_geometry(Geometry::new(0.0, 0.0, 80.0, 24.0))
    }

    pub fn text_input(placeholder: &str, index: usize) -> ElementDescriptor {
        ElementDescriptor::new("input", Category::Input, index)
            .with_attribute("type", "text")
            .with_attribute("placeholder", placeholder)
            .with_text(placeholder)
    }

    /// Run the whole pipeline over `html` as if it were served at `url`.
    pub async fn generate_from_html(html: &str, url: &str, output_dir: &Path) -> Result<RunSummary> {
        let mut config = Self::offline_config();
        config.generation.output_dir = output_dir.to_path_buf();
        PageObjectGenerator::new(config)
            .run(StaticPage::new(html), url)
            .await
    }

    pub fn count_by_category(elements: &[ElementDescriptor], category: Category) -> usize {
        elements.iter().filter(|e| e.category == category).count()
    }
}

/// Detector that returns canned regions and counts its calls.
#[derive(Clone, Default)]
pub struct FakeDetector {
    regions: Vec<DetectedTextRegion>,
    calls: Arc<AtomicUsize>,
}

impl FakeDetector {
    pub fn new(regions: Vec<DetectedTextRegion>) -> Self {
        Self {
            regions,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextDetector for FakeDetector {
    async fn detect_text(&self, _image: &[u8]) -> Vec<DetectedTextRegion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.regions.clone()
    }
}

/// `StaticPage` that pretends to render: every element has a box and
/// screenshots return fixed bytes.
pub struct ScreenshotPage {
    page: StaticPage,
    image: Vec<u8>,
}

impl ScreenshotPage {
    pub fn new(page: StaticPage, image: Vec<u8>) -> Self {
        Self { page, image }
    }
}

#[async_trait]
impl BrowserTrait for ScreenshotPage {
    type ElementHandle = NodeRef;

    async fn launch(&mut self, config: &BrowserConfig) -> Result<()> {
        self.page.launch(config).await
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.page.navigate(url).await
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<NodeRef>> {
        self.page.find_elements(selector).await
    }

    async fn tag_name(&self, element: &NodeRef) -> Result<String> {
        self.page.tag_name(element).await
    }

    async fn get_attribute(&self, element: &NodeRef, name: &str) -> Result<Option<String>> {
        self.page.get_attribute(element, name).await
    }

    async fn get_text(&self, element: &NodeRef) -> Result<String> {
        self.page.get_text(element).await
    }

    async fn is_displayed(&self, element: &NodeRef) -> Result<bool> {
        self.page.is_displayed(element).await
    }

    async fn is_enabled(&self, element: &NodeRef) -> Result<bool> {
        self.page.is_enabled(element).await
    }

    async fn geometry(&self, element: &NodeRef) -> Result<Geometry> {
        self.page.geometry(element).await?;
        Ok(Geometry::new(0.0, 0.0, 100.0, 30.0))
    }

    async fn capture_element_screenshot(&self, element: &NodeRef) -> Result<Vec<u8>> {
        self.page.tag_name(element).await?;
        Ok(self.image.clone())
    }

    fn is_running(&self) -> bool {
        self.page.is_running()
    }

    async fn close(&mut self) -> Result<()> {
        self.page.close().await
    }
}
