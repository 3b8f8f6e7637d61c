pub mod browser;
pub mod cli;
pub mod codegen;
pub mod core;
pub mod dom;
pub mod errors;
pub mod generator;
pub mod ocr;
pub mod testing;
pub mod types;
pub mod utils;

pub use browser::{BrowserSession, StaticPage};
pub use codegen::PageObjectSpec;
pub use crate::core::{BrowserConfig, BrowserTrait, Config, ElementScope};
pub use dom::{Category, DomProcessor, ElementDescriptor};
pub use errors::{GeneratorError, Result};
pub use generator::{PageObjectGenerator, RunSummary};
pub use types::*;
