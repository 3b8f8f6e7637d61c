pub mod heuristic;
pub mod vision;

pub use heuristic::ButtonTextHeuristic;
pub use vision::{detector_from_config, DisabledDetector, VisionClient};

use crate::core::{BrowserTrait, OcrConfig, TextDetector};
use crate::dom::text::normalize_whitespace;
use tracing::debug;

/// Reads a button label off a screenshot of the element.
pub struct OcrLabeler {
    detector: Box<dyn TextDetector>,
    heuristic: ButtonTextHeuristic,
}

impl OcrLabeler {
    pub fn new(detector: Box<dyn TextDetector>) -> Self {
        Self {
            detector,
            heuristic: ButtonTextHeuristic::default(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(detector_from_config(config))
    }

    pub fn is_available(&self) -> bool {
        self.detector.is_available()
    }

    /// Label for `element`, or `None` when anything along the way fails or
    /// no region reads like button text.
    pub async fn label<B: BrowserTrait>(
        &self,
        browser: &B,
        element: &B::ElementHandle,
    ) -> Option<String> {
        if !self.is_available() {
            return None;
        }

        let image = match browser.capture_element_screenshot(element).await {
            Ok(image) => image,
            Err(e) => {
                debug!("No screenshot for OCR: {}", e);
                return None;
            }
        };

        let regions = self.detector.detect_text(&image).await;
        debug!("OCR found {} text regions", regions.len());

        self.heuristic
            .pick(&regions)
            .map(|region| normalize_whitespace(&region.text))
            .filter(|text| !text.is_empty())
    }
}
