use crate::errors::{GeneratorError, Result};
use crate::types::Viewport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub ocr: OcrConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub disable_images: bool,
    pub args: Vec<String>,
    pub page_load_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub enabled: bool,
    /// JSON file holding an `api_key` or an `access_token` for the vision service.
    pub credentials_path: Option<PathBuf>,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Run OCR on buttons that already have DOM text and prefer its result.
    pub override_dom_text: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub output_dir: PathBuf,
    pub max_elements: Option<usize>,
    pub scope: ElementScope,
    /// Seconds the generated page object waits for each element.
    pub locator_wait_secs: u64,
    pub romanize: bool,
    pub debug: bool,
}

/// Which elements a run collects. The variants are mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementScope {
    #[default]
    All,
    TextOnly,
    ButtonsOnly,
    InputsOnly,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            user_agent: None,
            disable_images: true,
            args: vec![],
            page_load_timeout_secs: 60,
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            credentials_path: None,
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            request_timeout_secs: 15,
            override_dom_text: false,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            max_elements: None,
            scope: ElementScope::All,
            locator_wait_secs: 10,
            romanize: true,
            debug: false,
        }
    }
}

impl Config {
    /// Load a JSON config file. Missing sections fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.generation.debug {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.page_load_timeout_secs, 60);
        assert!(config.ocr.enabled);
        assert!(config.ocr.credentials_path.is_none());
        assert_eq!(config.generation.output_dir, PathBuf::from("output"));
        assert_eq!(config.generation.scope, ElementScope::All);
        assert_eq!(config.generation.locator_wait_secs, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "browser": {{ "headless": false }}, "generation": {{ "scope": "buttons_only" }} }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(!config.browser.headless);
        assert_eq!(config.browser.page_load_timeout_secs, 60);
        assert_eq!(config.generation.scope, ElementScope::ButtonsOnly);
        assert!(config.ocr.enabled);
    }

    #[test]
    fn test_debug_from_file_sets_log_level() {
        assert_eq!(Config::default().log_level(), "info");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "generation": {{ "debug": true }} }}"#).unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = Config::from_file(Path::new("/nonexistent/pogen.json")).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigurationError(_)));
    }
}
