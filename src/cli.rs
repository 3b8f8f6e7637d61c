use crate::core::{Config, ElementScope};
use crate::errors::Result;
use crate::ocr::vision::CREDENTIALS_ENV;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "page-object-gen",
    version,
    about = "Generate a Selenium page object from the interactive elements of a web page"
)]
#[command(group(
    ArgGroup::new("scope")
        .args(["text_only", "buttons_only", "inputs_only"])
        .multiple(false)
))]
pub struct Cli {
    /// Page to analyze
    #[arg(long)]
    pub url: String,

    /// Output directory [default: output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip OCR for buttons without text
    #[arg(long)]
    pub no_ocr: bool,

    /// Process at most this many discovered elements
    #[arg(long)]
    pub max_elements: Option<usize>,

    /// Page load timeout in seconds [default: 60]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only keep elements that have a text label
    #[arg(long)]
    pub text_only: bool,

    /// Only collect buttons
    #[arg(long)]
    pub buttons_only: bool,

    /// Only collect text inputs
    #[arg(long)]
    pub inputs_only: bool,

    /// Read the page from a saved HTML file instead of launching Chrome
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Vision API credentials JSON (`api_key` or `access_token`)
    #[arg(long, env = CREDENTIALS_ENV)]
    pub credentials: Option<PathBuf>,

    /// Let OCR replace DOM text on buttons too
    #[arg(long)]
    pub ocr_override: bool,

    /// JSON config file; flags given on the command line win
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn scope(&self) -> Option<ElementScope> {
        if self.text_only {
            Some(ElementScope::TextOnly)
        } else if self.buttons_only {
            Some(ElementScope::ButtonsOnly)
        } else if self.inputs_only {
            Some(ElementScope::InputsOnly)
        } else {
            None
        }
    }

    /// Config file (or defaults) with the flags applied on top.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(output) = &self.output {
            config.generation.output_dir = output.clone();
        }
        if self.no_ocr {
            config.ocr.enabled = false;
        }
        if let Some(max) = self.max_elements {
            config.generation.max_elements = Some(max);
        }
        if let Some(timeout) = self.timeout {
            config.browser.page_load_timeout_secs = timeout;
        }
        if self.debug {
            config.generation.debug = true;
        }
        if let Some(scope) = self.scope() {
            config.generation.scope = scope;
        }
        if self.headful {
            config.browser.headless = false;
        }
        if let Some(credentials) = &self.credentials {
            config.ocr.credentials_path = Some(credentials.clone());
        }
        if self.ocr_override {
            config.ocr.override_dom_text = true;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("page-object-gen").chain(args.iter().copied()))
    }

    #[test]
    fn test_url_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--url", "https://example.com"]).unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.generation.output_dir, PathBuf::from("output"));
        assert_eq!(config.browser.page_load_timeout_secs, 60);
        assert_eq!(config.generation.scope, ElementScope::All);
        assert!(config.browser.headless);
        assert!(config.ocr.enabled);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "--url",
            "https://example.com",
            "-o",
            "out",
            "--no-ocr",
            "--max-elements",
            "5",
            "--timeout",
            "30",
            "--buttons-only",
            "--headful",
            "--ocr-override",
        ])
        .unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.generation.output_dir, PathBuf::from("out"));
        assert!(!config.ocr.enabled);
        assert!(config.ocr.override_dom_text);
        assert_eq!(config.generation.max_elements, Some(5));
        assert_eq!(config.browser.page_load_timeout_secs, 30);
        assert_eq!(config.generation.scope, ElementScope::ButtonsOnly);
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_debug_flag_raises_log_level() {
        let quiet = parse(&["--url", "https://a.b"]).unwrap().to_config().unwrap();
        assert_eq!(quiet.log_level(), "info");

        let verbose = parse(&["--url", "https://a.b", "--debug"]).unwrap().to_config().unwrap();
        assert_eq!(verbose.log_level(), "debug");
    }

    #[test]
    fn test_scope_flags_are_exclusive() {
        assert!(parse(&["--url", "https://a.b", "--text-only", "--inputs-only"]).is_err());
        assert!(parse(&["--url", "https://a.b", "--buttons-only", "--inputs-only"]).is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"generation": {{"output_dir": "from-file", "scope": "inputs_only"}}, "browser": {{"page_load_timeout_secs": 90}}}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["--url", "https://a.b", "--config", path, "--timeout", "15"]).unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.generation.output_dir, PathBuf::from("from-file"));
        assert_eq!(config.generation.scope, ElementScope::InputsOnly);
        assert_eq!(config.browser.page_load_timeout_secs, 15);
    }
}
