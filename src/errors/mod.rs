pub mod types;

pub use types::{GeneratorError, Result};
