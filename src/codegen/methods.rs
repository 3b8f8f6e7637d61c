use crate::codegen::escape::python_string;
use crate::codegen::locator::{select_locator, Locator};
use crate::codegen::naming::{allocate, NameRegistry};
use crate::dom::text::normalize_whitespace;
use crate::dom::{Category, ElementDescriptor};

pub const INDENT: &str = "    ";

/// UI action a generated method performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Click,
    EnterText,
    SetChecked,
    SelectOption,
}

impl Action {
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::Button => Some(Action::Click),
            Category::Input => Some(Action::EnterText),
            Category::CheckboxRadio => Some(Action::SetChecked),
            Category::Select => Some(Action::SelectOption),
            Category::Other => None,
        }
    }

    /// Python parameter list after `self`
    pub fn parameters(&self) -> &'static str {
        match self {
            Action::Click => "",
            Action::EnterText => ", text",
            Action::SetChecked => ", check=True",
            Action::SelectOption => ", option_text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMethod {
    pub name: String,
    pub category: Category,
    pub action: Action,
    pub locator: Locator,
    /// Whitespace-collapsed label used in the docstring
    pub description: String,
}

/// Docstring label, falling back to a generic noun.
pub fn describe(descriptor: &ElementDescriptor) -> String {
    let text = Some(descriptor.text.as_str()).filter(|t| !t.trim().is_empty());
    let attr = |key: &str| descriptor.attr(key);

    let label = match descriptor.category {
        Category::Button => text
            .or_else(|| attr("aria_label"))
            .or_else(|| attr("title"))
            .or_else(|| attr("id"))
            .unwrap_or("button"),
        Category::Input => attr("placeholder")
            .or_else(|| attr("name"))
            .or_else(|| attr("id"))
            .or(text)
            .or_else(|| attr("aria_label"))
            .unwrap_or("value"),
        Category::CheckboxRadio | Category::Select | Category::Other => {
            let generic = if descriptor.category == Category::Select {
                "dropdown"
            } else {
                "option"
            };
            text.or_else(|| attr("name"))
                .or_else(|| attr("id"))
                .or_else(|| attr("aria_label"))
                .unwrap_or(generic)
        }
    };

    normalize_whitespace(label)
}

/// Method for one descriptor; `None` for elements outside the four
/// emittable categories.
pub fn build_method(descriptor: &ElementDescriptor, registry: &mut NameRegistry) -> Option<GeneratedMethod> {
    let action = Action::for_category(descriptor.category)?;
    let name = allocate(descriptor, descriptor.category.method_prefix(), registry);

    Some(GeneratedMethod {
        name,
        category: descriptor.category,
        action,
        locator: select_locator(descriptor),
        description: describe(descriptor),
    })
}

impl GeneratedMethod {
    /// Python source of the method, indented for a class body, without a
    /// trailing blank line.
    pub fn render(&self, wait_secs: u64) -> String {
        let i1 = INDENT;
        let i2 = INDENT.repeat(2);
        let i3 = INDENT.repeat(3);
        let description = python_string(&self.description);

        let mut lines = vec![format!("{}def {}(self{}):", i1, self.name, self.action.parameters())];

        match self.action {
            Action::Click => {
                lines.push(format!("{}\"\"\"Click the '{}' button.\"\"\"", i2, description));
            }
            Action::EnterText => {
                lines.push(format!("{}\"\"\"", i2));
                lines.push(format!("{}Enter text into the '{}' field.", i2, description));
                lines.push(String::new());
                lines.push(format!("{}Args:", i2));
                lines.push(format!("{}text: text to type", i3));
                lines.push(format!("{}\"\"\"", i2));
            }
            Action::SetChecked => {
                lines.push(format!("{}\"\"\"", i2));
                lines.push(format!("{}Set the '{}' checkbox or radio button.", i2, description));
                lines.push(String::new());
                lines.push(format!("{}Args:", i2));
                lines.push(format!("{}check: True to check, False to uncheck", i3));
                lines.push(format!("{}\"\"\"", i2));
            }
            Action::SelectOption => {
                lines.push(format!("{}\"\"\"", i2));
                lines.push(format!("{}Choose an option in the '{}' dropdown.", i2, description));
                lines.push(String::new());
                lines.push(format!("{}Args:", i2));
                lines.push(format!("{}option_text: visible text of the option", i3));
                lines.push(format!("{}\"\"\"", i2));
            }
        }

        if let Some(warning) = self.locator.warning() {
            lines.push(format!("{}{}", i2, warning));
        }
        lines.push(format!(
            "{}element = {}",
            i2,
            self.locator.render_wait(self.category, wait_secs)
        ));

        match self.action {
            Action::Click => {
                lines.push(format!("{}element.click()", i2));
            }
            Action::EnterText => {
                lines.push(format!("{}element.clear()", i2));
                lines.push(format!("{}element.send_keys(text)", i2));
            }
            Action::SetChecked => {
                lines.push(format!("{}is_checked = element.is_selected()", i2));
                lines.push(format!("{}if is_checked != check:", i2));
                lines.push(format!("{}element.click()", i3));
            }
            Action::SelectOption => {
                lines.push(format!("{}Select(element).select_by_visible_text(option_text)", i2));
            }
        }
        lines.push(format!("{}return self", i2));

        lines.join("\n")
    }
}
