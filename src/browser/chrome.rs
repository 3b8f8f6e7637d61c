use crate::core::{BrowserConfig, BrowserTrait};
use crate::errors::{GeneratorError, Result};
use crate::types::Geometry;
use crate::utils::javascript;
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde::Deserialize;
use serde_json::Value;
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Reference number stamped on an element by `find_elements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(pub u32);

#[derive(Debug, Deserialize)]
struct StampResult {
    #[serde(default)]
    refs: Vec<u32>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Headless Chrome driver
pub struct ChromeBrowser {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl ChromeBrowser {
    pub fn new() -> Self {
        Self {
            browser: None,
            tab: None,
        }
    }

    fn tab(&self) -> Result<&Arc<Tab>> {
        self.tab.as_ref().ok_or(GeneratorError::BrowserNotLaunched)
    }

    /// Evaluate a script from `utils::javascript` and decode its JSON result.
    /// A `null` result means the element is gone.
    async fn evaluate(&self, element: &ElementRef, script: &str) -> Result<Value> {
        let tab = self.tab()?;
        let result = tab
            .evaluate(script, false)
            .map_err(|e| GeneratorError::JavaScriptFailed(e.to_string()))?;

        match result.value {
            Some(Value::String(json)) => Ok(serde_json::from_str(&json)?),
            Some(Value::Null) | None => Err(GeneratorError::StaleElement(format!(
                "element ref {}",
                element.0
            ))),
            Some(other) => Err(GeneratorError::JavaScriptFailed(format!(
                "unexpected script result: {}",
                other
            ))),
        }
    }
}

impl Default for ChromeBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserTrait for ChromeBrowser {
    type ElementHandle = ElementRef;

    async fn launch(&mut self, config: &BrowserConfig) -> Result<()> {
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );

        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        if config.disable_images {
            args.push(OsStr::new("--blink-settings=imagesEnabled=false"));
        }

        for arg in &config.args {
            args.push(OsStr::new(arg));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| GeneratorError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| GeneratorError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| GeneratorError::LaunchFailed(e.to_string()))?;
        tab.set_default_timeout(Duration::from_secs(config.page_load_timeout_secs));

        debug!("Chrome launched (headless: {})", config.headless);
        self.browser = Some(browser);
        self.tab = Some(tab);
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        let tab = self.tab()?;
        tab.navigate_to(url)
            .map_err(|e| GeneratorError::NavigationFailed(e.to_string()))?;

        tab.wait_until_navigated()
            .map_err(|e| GeneratorError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementRef>> {
        let tab = self.tab()?;
        let result = tab
            .evaluate(&javascript::stamp_elements(selector), false)
            .map_err(|e| GeneratorError::JavaScriptFailed(e.to_string()))?;

        let json = match result.value {
            Some(Value::String(json)) => json,
            _ => {
                return Err(GeneratorError::JavaScriptFailed(format!(
                    "no result for selector {}",
                    selector
                )))
            }
        };

        let stamped: StampResult = serde_json::from_str(&json)?;
        if let Some(error) = stamped.error {
            return Err(GeneratorError::InvalidSelector(format!("{}: {}", selector, error)));
        }
        Ok(stamped.refs.into_iter().map(ElementRef).collect())
    }

    async fn tag_name(&self, element: &ElementRef) -> Result<String> {
        let value = self.evaluate(element, &javascript::tag_name(element.0)).await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    async fn get_attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>> {
        let value = self
            .evaluate(element, &javascript::get_attribute(element.0, name))
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    async fn get_text(&self, element: &ElementRef) -> Result<String> {
        let value = self.evaluate(element, &javascript::get_text(element.0)).await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    async fn is_displayed(&self, element: &ElementRef) -> Result<bool> {
        let value = self
            .evaluate(element, &javascript::is_displayed(element.0))
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_enabled(&self, element: &ElementRef) -> Result<bool> {
        let value = self
            .evaluate(element, &javascript::is_enabled(element.0))
            .await?;
        Ok(value.as_bool().unwrap_or(true))
    }

    async fn geometry(&self, element: &ElementRef) -> Result<Geometry> {
        let value = self.evaluate(element, &javascript::geometry(element.0)).await?;
        let rect: Rect = serde_json::from_value(value)?;
        Ok(Geometry::new(rect.x, rect.y, rect.width, rect.height))
    }

    async fn capture_element_screenshot(&self, element: &ElementRef) -> Result<Vec<u8>> {
        let value = self
            .evaluate(element, &javascript::scroll_into_view(element.0))
            .await?;
        let rect: Rect = serde_json::from_value(value)?;
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(GeneratorError::ScreenshotFailed(format!(
                "element ref {} has an empty bounding box",
                element.0
            )));
        }

        let clip = Page::Viewport {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            scale: 1.0,
        };

        let screenshot = self
            .tab()?
            .capture_screenshot(
                Page::CaptureScreenshotFormatOption::Png,
                None,
                Some(clip),
                true,
            )
            .map_err(|e| GeneratorError::ScreenshotFailed(e.to_string()))?;

        Ok(screenshot)
    }

    fn is_running(&self) -> bool {
        self.browser.is_some()
    }

    async fn close(&mut self) -> Result<()> {
        self.tab = None;
        self.browser = None;
        Ok(())
    }
}
