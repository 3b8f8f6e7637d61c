pub mod escape;
pub mod locator;
pub mod methods;
pub mod naming;
pub mod page;
pub mod romanize;
pub mod sanitizer;

pub use locator::{select_locator, By, Locator, Strategy};
pub use methods::{build_method, Action, GeneratedMethod};
pub use naming::{allocate, NameRegistry};
pub use page::{render_file, PageObjectSpec};
pub use sanitizer::Sanitizer;
