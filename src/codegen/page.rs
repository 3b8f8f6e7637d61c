use crate::codegen::escape::python_string;
use crate::codegen::methods::{build_method, Action, GeneratedMethod, INDENT};
use crate::codegen::naming::NameRegistry;
use crate::dom::ElementDescriptor;
use crate::errors::{GeneratorError, Result};
use chrono::{DateTime, Utc};

/// Host fragment used when the URL has no host.
pub const DEFAULT_HOST: &str = "page";

/// The page object for one run.
#[derive(Debug, Clone)]
pub struct PageObjectSpec {
    pub class_name: String,
    /// Host with non-alphanumerics replaced, as used in the file name
    pub host: String,
    /// Target URL with line breaks removed
    pub url: String,
    pub methods: Vec<GeneratedMethod>,
}

pub fn clean_url(url: &str) -> String {
    url.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// `https://www.my-shop.com/login` → `www_my_shop_com`
pub fn sanitized_host(url: &str) -> String {
    let host = url::Url::parse(&clean_url(url))
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.to_string()))
        .filter(|h| !h.is_empty());

    match host {
        Some(host) => {
            let mut sanitized: String = host
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
                sanitized.insert(0, 'n');
            }
            sanitized
        }
        None => DEFAULT_HOST.to_string(),
    }
}

impl PageObjectSpec {
    /// Methods for every emittable element, in the given order.
    /// `NoElements` when nothing is emittable.
    pub fn build(url: &str, elements: &[ElementDescriptor], mut registry: NameRegistry) -> Result<Self> {
        let methods: Vec<GeneratedMethod> = elements
            .iter()
            .filter_map(|element| build_method(element, &mut registry))
            .collect();

        if methods.is_empty() {
            return Err(GeneratorError::NoElements);
        }

        let host = sanitized_host(url);
        Ok(Self {
            class_name: format!("{}_Page", host),
            host,
            url: clean_url(url),
            methods,
        })
    }

    pub fn file_name(&self) -> String {
        format!("{}_page.py", self.host)
    }

    pub fn needs_select(&self) -> bool {
        self.methods
            .iter()
            .any(|method| method.action == Action::SelectOption)
    }

    /// The class definition alone.
    pub fn render_class(&self, wait_secs: u64) -> String {
        let i1 = INDENT;
        let i2 = INDENT.repeat(2);
        let i3 = INDENT.repeat(3);
        let url = python_string(&self.url);

        let mut blocks = vec![[
            format!("class {}:", self.class_name),
            format!("{}\"\"\"Page object for {}\"\"\"", i1, url),
            String::new(),
            format!("{}def __init__(self, driver):", i1),
            format!("{}\"\"\"", i2),
            format!("{}Args:", i2),
            format!("{}driver: Selenium WebDriver instance", i3),
            format!("{}\"\"\"", i2),
            format!("{}self.driver = driver", i2),
            format!("{}self.url = \"{}\"", i2, url),
            String::new(),
            format!("{}def navigate(self):", i1),
            format!("{}\"\"\"Open the page.\"\"\"", i2),
            format!("{}self.driver.get(self.url)", i2),
            format!("{}return self", i2),
        ]
        .join("\n")];

        blocks.extend(self.methods.iter().map(|method| method.render(wait_secs)));
        let mut class = blocks.join("\n\n");
        class.push('\n');
        class
    }
}

/// Complete Python module: header, imports, class.
pub fn render_file(spec: &PageObjectSpec, wait_secs: u64, generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!(
            "# Generated by page-object-gen {} on {}",
            env!("CARGO_PKG_VERSION"),
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("# Source: {}", spec.url),
        String::new(),
        "from selenium.webdriver.common.by import By".to_string(),
        "from selenium.webdriver.support import expected_conditions as EC".to_string(),
        "from selenium.webdriver.support.ui import WebDriverWait".to_string(),
    ];
    if spec.needs_select() {
        lines.push("from selenium.webdriver.support.ui import Select".to_string());
    }
    lines.push(String::new());
    lines.push(String::new());

    let mut file = lines.join("\n");
    file.push_str(&spec.render_class(wait_secs));
    file
}
