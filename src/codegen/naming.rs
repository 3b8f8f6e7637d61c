use crate::codegen::sanitizer::Sanitizer;
use crate::dom::{Category, ElementDescriptor};
use std::collections::HashSet;

pub const MAX_METHOD_NAME_LEN: usize = 50;

/// Method names handed out during one rendering pass.
pub struct NameRegistry {
    used: HashSet<String>,
    sanitizer: Sanitizer,
}

impl NameRegistry {
    pub fn new(sanitizer: Sanitizer) -> Self {
        Self {
            used: HashSet::new(),
            sanitizer,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Reserve an exact name. Returns false if it was taken.
    pub fn register(&mut self, name: impl Into<String>) -> bool {
        self.used.insert(name.into())
    }
}

/// Label the method name is derived from. Inputs prefer what describes the
/// expected value; everything else prefers what the user reads.
pub fn name_base(descriptor: &ElementDescriptor) -> String {
    let keys: &[&str] = if descriptor.category == Category::Input {
        &["placeholder", "name", "id", "aria_label"]
    } else {
        &["aria_label", "title", "id", "name"]
    };

    let from_attributes = || keys.iter().find_map(|key| descriptor.attr(key));
    let text = Some(descriptor.text.as_str()).filter(|t| !t.trim().is_empty());

    let base = if descriptor.category == Category::Input {
        from_attributes().or(text)
    } else {
        text.or_else(from_attributes)
    };

    match base {
        Some(base) => base.to_string(),
        None => format!("{}{}", descriptor.tag, descriptor.index),
    }
}

/// `{prefix}_{fragment}`, cut to `MAX_METHOD_NAME_LEN` characters, then
/// suffixed `_1`, `_2`, ... until unused. The result is registered.
pub fn allocate(descriptor: &ElementDescriptor, prefix: &str, registry: &mut NameRegistry) -> String {
    let fragment = registry.sanitizer().sanitize(&name_base(descriptor));
    let name: String = format!("{}_{}", prefix, fragment)
        .chars()
        .take(MAX_METHOD_NAME_LEN)
        .collect();

    let mut candidate = name.clone();
    let mut counter = 1;
    while registry.contains(&candidate) {
        candidate = format!("{}_{}", name, counter);
        counter += 1;
    }

    registry.register(candidate.clone());
    candidate
}
