use crate::dom::element::Category;

const TEXT_INPUT_TYPES: &[&str] = &["text", "password", "email", "tel", "number", "url", "search"];
const TOGGLE_INPUT_TYPES: &[&str] = &["checkbox", "radio"];
const BUTTON_INPUT_TYPES: &[&str] = &["button", "submit", "reset"];

/// Category of an element from its tag and, for `input`, its `type` attribute.
pub fn classify(tag: &str, input_type: Option<&str>) -> Category {
    let tag = tag.to_ascii_lowercase();
    match tag.as_str() {
        "input" => {
            let input_type = input_type.map(str::to_ascii_lowercase).unwrap_or_default();
            if TEXT_INPUT_TYPES.contains(&input_type.as_str()) {
                Category::Input
            } else if TOGGLE_INPUT_TYPES.contains(&input_type.as_str()) {
                Category::CheckboxRadio
            } else if BUTTON_INPUT_TYPES.contains(&input_type.as_str()) {
                Category::Button
            } else {
                Category::Other
            }
        }
        "button" | "a" => Category::Button,
        "textarea" => Category::Input,
        "select" => Category::Select,
        _ => Category::Other,
    }
}

/// Category used for emission. An element the classifier cannot place is
/// promoted to the category a buttons-only/inputs-only filter asked for.
pub fn resolve_category(classified: Category, requested: Option<Category>) -> Category {
    match (classified, requested) {
        (Category::Other, Some(requested)) => requested,
        (classified, _) => classified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_table() {
        let table: &[(&str, Option<&str>, Category)] = &[
            ("input", Some("text"), Category::Input),
            ("input", Some("password"), Category::Input),
            ("input", Some("email"), Category::Input),
            ("input", Some("tel"), Category::Input),
            ("input", Some("number"), Category::Input),
            ("input", Some("url"), Category::Input),
            ("input", Some("search"), Category::Input),
            ("input", Some("checkbox"), Category::CheckboxRadio),
            ("input", Some("radio"), Category::CheckboxRadio),
            ("input", Some("button"), Category::Button),
            ("input", Some("submit"), Category::Button),
            ("input", Some("reset"), Category::Button),
            ("input", Some("file"), Category::Other),
            ("input", Some("hidden"), Category::Other),
            ("input", None, Category::Other),
            ("button", None, Category::Button),
            ("button", Some("submit"), Category::Button),
            ("textarea", None, Category::Input),
            ("select", None, Category::Select),
            ("a", None, Category::Button),
            ("div", None, Category::Other),
            ("span", Some("text"), Category::Other),
        ];

        for (tag, input_type, expected) in table {
            assert_eq!(
                classify(tag, *input_type),
                *expected,
                "classify({:?}, {:?})",
                tag,
                input_type
            );
        }
    }

    #[test]
    fn test_classifier_is_deterministic_and_case_insensitive() {
        for _ in 0..3 {
            assert_eq!(classify("INPUT", Some("Checkbox")), Category::CheckboxRadio);
            assert_eq!(classify("Button", None), Category::Button);
        }
    }

    #[test]
    fn test_resolve_category_promotes_only_other() {
        assert_eq!(
            resolve_category(Category::Other, Some(Category::Button)),
            Category::Button
        );
        assert_eq!(
            resolve_category(Category::CheckboxRadio, Some(Category::Input)),
            Category::CheckboxRadio
        );
        assert_eq!(resolve_category(Category::Other, None), Category::Other);
    }
}
