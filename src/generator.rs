use crate::browser::{discover, BrowserSession};
use crate::codegen::page::clean_url;
use crate::codegen::{render_file, NameRegistry, PageObjectSpec, Sanitizer};
use crate::core::{BrowserTrait, Config, ElementScope};
use crate::dom::{Category, DomProcessor, ElementDescriptor};
use crate::errors::{GeneratorError, Result};
use crate::ocr::OcrLabeler;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Counters for one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub url: String,
    pub discovered: usize,
    pub processed: usize,
    pub skipped_hidden: usize,
    pub skipped_stale: usize,
    pub skipped_no_text: usize,
    pub skipped_other: usize,
    pub failed: usize,
    pub ocr_relabelled: usize,
    pub methods: usize,
    pub output_path: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    fn new(url: &str) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            url: url.to_string(),
            discovered: 0,
            processed: 0,
            skipped_hidden: 0,
            skipped_stale: 0,
            skipped_no_text: 0,
            skipped_other: 0,
            failed: 0,
            ocr_relabelled: 0,
            methods: 0,
            output_path: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_hidden + self.skipped_stale + self.skipped_no_text + self.skipped_other
    }
}

/// Drives one run: navigate, discover, extract, enrich, render, write.
pub struct PageObjectGenerator {
    config: Config,
    processor: DomProcessor,
    labeler: OcrLabeler,
}

impl PageObjectGenerator {
    pub fn new(config: Config) -> Self {
        let labeler = OcrLabeler::from_config(&config.ocr);
        Self::with_labeler(config, labeler)
    }

    pub fn with_labeler(config: Config, labeler: OcrLabeler) -> Self {
        Self {
            config,
            processor: DomProcessor::new(),
            labeler,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Launch `browser`, generate, and close it again whatever the outcome.
    pub async fn run<B: BrowserTrait>(&self, browser: B, url: &str) -> Result<RunSummary> {
        let session = BrowserSession::open(browser, &self.config.browser).await?;
        info!("Session {} started for {}", session.session_id(), url);

        let result = self.generate(session.browser(), url).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser: {}", e);
        }
        result
    }

    /// Generate against an already launched browser.
    pub async fn generate<B: BrowserTrait>(&self, browser: &B, url: &str) -> Result<RunSummary> {
        let url = clean_url(url);
        url::Url::parse(&url).map_err(|e| GeneratorError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let mut summary = RunSummary::new(&url);
        let elements = self.collect(browser, &url, &mut summary).await?;

        let spec = self.build_spec(&url, &elements)?;
        summary.methods = spec.methods.len();

        let path = self.write(&spec, Utc::now())?;
        info!("Wrote {} methods to {}", summary.methods, path.display());

        summary.output_path = Some(path);
        summary.finished_at = Some(Utc::now());
        info!(
            "Run {}: {} discovered, {} processed, {} skipped, {} failed, {} relabelled by OCR",
            summary.run_id,
            summary.discovered,
            summary.processed,
            summary.skipped(),
            summary.failed,
            summary.ocr_relabelled
        );
        Ok(summary)
    }

    /// Navigate and turn every discovered element into an enriched
    /// descriptor. Elements that fail are counted and left out.
    pub async fn collect<B: BrowserTrait>(
        &self,
        browser: &B,
        url: &str,
        summary: &mut RunSummary,
    ) -> Result<Vec<ElementDescriptor>> {
        browser.navigate(url).await?;

        let scope = self.config.generation.scope;
        let mut handles = discover(browser, scope).await?;
        summary.discovered = handles.len();
        if let Some(max) = self.config.generation.max_elements {
            handles.truncate(max);
        }
        info!("Processing {} of {} discovered elements", handles.len(), summary.discovered);

        let requested = match scope {
            ElementScope::ButtonsOnly => Some(Category::Button),
            ElementScope::InputsOnly => Some(Category::Input),
            ElementScope::All | ElementScope::TextOnly => None,
        };

        let total = handles.len();
        let mut elements = Vec::with_capacity(total);
        for (i, handle) in handles.iter().enumerate() {
            let index = i + 1;
            let mut descriptor = match self.processor.extract(browser, handle, index, requested).await {
                Ok(descriptor) => descriptor,
                Err(GeneratorError::StaleElement(reason)) => {
                    debug!("[{}/{}] stale, skipped: {}", index, total, reason);
                    summary.skipped_stale += 1;
                    continue;
                }
                Err(e) => {
                    warn!("[{}/{}] failed: {}", index, total, e);
                    summary.failed += 1;
                    continue;
                }
            };

            if !descriptor.visible {
                debug!("[{}/{}] not displayed: {}", index, total, descriptor.summary());
                summary.skipped_hidden += 1;
                continue;
            }

            if self.wants_ocr(&descriptor) {
                if let Some(label) = self.labeler.label(browser, handle).await {
                    info!("[{}/{}] OCR label '{}' for {}", index, total, label, descriptor.summary());
                    descriptor.text = label;
                    self.processor.precompute_locators(&mut descriptor);
                    summary.ocr_relabelled += 1;
                }
            }

            if scope == ElementScope::TextOnly && !descriptor.has_text() {
                debug!("[{}/{}] no text, skipped: {}", index, total, descriptor.summary());
                summary.skipped_no_text += 1;
                continue;
            }

            if !descriptor.category.is_emittable() {
                debug!("[{}/{}] unclassified, skipped: {}", index, total, descriptor.summary());
                summary.skipped_other += 1;
                continue;
            }

            info!(
                "[{}/{}] {} '{}' {}",
                index,
                total,
                descriptor.category,
                descriptor.text,
                descriptor.summary()
            );
            summary.processed += 1;
            elements.push(descriptor);
        }

        Ok(elements)
    }

    fn wants_ocr(&self, descriptor: &ElementDescriptor) -> bool {
        self.config.ocr.enabled
            && descriptor.category == Category::Button
            && self.labeler.is_available()
            && (!descriptor.has_text() || self.config.ocr.override_dom_text)
    }

    pub fn build_spec(&self, url: &str, elements: &[ElementDescriptor]) -> Result<PageObjectSpec> {
        let sanitizer = Sanitizer::new(self.config.generation.romanize)?;
        PageObjectSpec::build(url, elements, NameRegistry::new(sanitizer))
    }

    /// Render `spec` into the output directory and return the file path.
    pub fn write(&self, spec: &PageObjectSpec, generated_at: DateTime<Utc>) -> Result<PathBuf> {
        let dir = &self.config.generation.output_dir;
        std::fs::create_dir_all(dir)?;

        let path = dir.join(spec.file_name());
        let source = render_file(spec, self.config.generation.locator_wait_secs, generated_at);
        std::fs::write(&path, source)?;
        Ok(path)
    }
}
