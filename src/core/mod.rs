pub mod browser;
pub mod config;
pub mod ocr;

pub use browser::BrowserTrait;
pub use config::{BrowserConfig, Config, ElementScope, GenerationConfig, OcrConfig};
pub use ocr::TextDetector;
