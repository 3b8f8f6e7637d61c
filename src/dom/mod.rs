pub mod classifier;
pub mod element;
pub mod processor;
pub mod text;

pub use classifier::{classify, resolve_category};
pub use element::{Category, ElementDescriptor};
pub use processor::DomProcessor;
pub use text::{normalize_whitespace, recover_text};
