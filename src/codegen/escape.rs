//! Quoting for values embedded in generated locators.
//!
//! Generated Python puts every locator inside a double-quoted string literal,
//! so XPath and CSS values are quoted first and then Python-escaped.

use crate::dom::text::normalize_whitespace;

/// Body of a double-quoted Python string literal (without the quotes).
pub fn python_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// XPath 1.0 string literal, whitespace-normalized. Uses `concat()` when the
/// value holds both quote kinds.
pub fn xpath_literal(value: &str) -> String {
    let value = normalize_whitespace(value);
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// Single-quoted CSS attribute value, whitespace-normalized.
pub fn css_attribute_value(value: &str) -> String {
    let value = normalize_whitespace(value);
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Escape an identifier for use after `#` or `.` in a CSS selector.
pub fn css_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "\\ ".to_string(),
            '.' => "\\.".to_string(),
            '#' => "\\#".to_string(),
            ':' => "\\:".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '(' => "\\(".to_string(),
            ')' => "\\)".to_string(),
            '/' => "\\/".to_string(),
            '\'' => "\\'".to_string(),
            '"' => "\\\"".to_string(),
            '\n' | '\r' => String::new(),
            _ => c.to_string(),
        })
        .collect()
}
