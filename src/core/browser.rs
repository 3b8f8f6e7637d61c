use crate::core::config::BrowserConfig;
use crate::errors::Result;
use crate::types::Geometry;
use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;

/// Browser-automation driver used by the generator.
///
/// One session is driven serially: navigate, enumerate elements, then inspect
/// them one at a time. Implementations report a vanished element as
/// `GeneratorError::StaleElement`.
#[async_trait]
pub trait BrowserTrait: Send + Sync {
    /// Opaque reference to a discovered element. Equal handles denote the same element.
    type ElementHandle: Clone + Debug + Eq + Hash + Send + Sync;

    /// Launch a new browser instance
    async fn launch(&mut self, config: &BrowserConfig) -> Result<()>;

    /// Navigate to a URL and wait for the load to finish
    async fn navigate(&self, url: &str) -> Result<()>;

    /// All elements matching a CSS selector, in document order
    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::ElementHandle>>;

    /// Lower-cased tag name
    async fn tag_name(&self, element: &Self::ElementHandle) -> Result<String>;

    async fn get_attribute(&self, element: &Self::ElementHandle, name: &str)
        -> Result<Option<String>>;

    /// Rendered text, trimmed
    async fn get_text(&self, element: &Self::ElementHandle) -> Result<String>;

    async fn is_displayed(&self, element: &Self::ElementHandle) -> Result<bool>;

    async fn is_enabled(&self, element: &Self::ElementHandle) -> Result<bool>;

    async fn geometry(&self, element: &Self::ElementHandle) -> Result<Geometry>;

    /// PNG bytes of the element's bounding box
    async fn capture_element_screenshot(&self, element: &Self::ElementHandle) -> Result<Vec<u8>>;

    /// Check if browser is still running
    fn is_running(&self) -> bool;

    /// Close the browser
    async fn close(&mut self) -> Result<()>;
}
