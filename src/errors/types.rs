use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Browser not launched")]
    BrowserNotLaunched,

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element is no longer attached to the page: {0}")]
    StaleElement(String),

    #[error("JavaScript execution failed: {0}")]
    JavaScriptFailed(String),

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("OCR request failed: {0}")]
    OcrFailed(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("No interactive elements to generate a page object from")]
    NoElements,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

impl GeneratorError {
    /// Failures that only affect the element being inspected; the run continues.
    pub fn is_element_scoped(&self) -> bool {
        matches!(
            self,
            GeneratorError::StaleElement(_)
                | GeneratorError::JavaScriptFailed(_)
                | GeneratorError::ScreenshotFailed(_)
                | GeneratorError::OcrFailed(_)
        )
    }
}
