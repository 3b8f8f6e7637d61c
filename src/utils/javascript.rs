//! Scripts evaluated by the Chrome driver.
//!
//! Every script returns a JSON string (or `null` when the referenced element
//! is gone) so results survive the CDP round trip without object previews.

/// Attribute stamped on every discovered element.
pub const REF_ATTRIBUTE: &str = "data-pogen-ref";

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Stamp all matches of `selector` with a reference number (reusing existing
/// stamps) and return the numbers in document order.
pub fn stamp_elements(selector: &str) -> String {
    format!(
        r#"
        (function() {{
            let nodes;
            try {{
                nodes = document.querySelectorAll({selector});
            }} catch (e) {{
                return JSON.stringify({{ error: String(e.message || e) }});
            }}
            let next = window.__pogenNextRef || 1;
            const refs = [];
            for (const node of nodes) {{
                let stamp = node.getAttribute('{attr}');
                if (!stamp) {{
                    stamp = String(next++);
                    node.setAttribute('{attr}', stamp);
                }}
                refs.push(Number(stamp));
            }}
            window.__pogenNextRef = next;
            return JSON.stringify({{ refs: refs }});
        }})()
        "#,
        selector = js_string(selector),
        attr = REF_ATTRIBUTE,
    )
}

/// Run `body` with `el` bound to the stamped element. `body` must evaluate to
/// a JSON-serializable value.
pub fn on_element(reference: u32, body: &str) -> String {
    format!(
        r#"
        (function() {{
            const el = document.querySelector('[{attr}="{reference}"]');
            if (!el) return null;
            return JSON.stringify({body});
        }})()
        "#,
        attr = REF_ATTRIBUTE,
        reference = reference,
        body = body,
    )
}

pub fn tag_name(reference: u32) -> String {
    on_element(reference, "el.tagName.toLowerCase()")
}

/// Markup attribute, not the live property: an unchecked checkbox would
/// otherwise report `value` as "on".
pub fn get_attribute(reference: u32, name: &str) -> String {
    on_element(reference, &format!("el.getAttribute({})", js_string(name)))
}

pub fn get_text(reference: u32) -> String {
    on_element(reference, "(el.innerText || '').trim()")
}

pub fn is_displayed(reference: u32) -> String {
    on_element(
        reference,
        r#"(function() {
            const style = window.getComputedStyle(el);
            const rect = el.getBoundingClientRect();
            return style.display !== 'none'
                && style.visibility !== 'hidden'
                && rect.width > 0 && rect.height > 0;
        })()"#,
    )
}

pub fn is_enabled(reference: u32) -> String {
    on_element(reference, "!el.disabled")
}

/// Document-relative bounding box.
pub fn geometry(reference: u32) -> String {
    on_element(
        reference,
        r#"(function() {
            const rect = el.getBoundingClientRect();
            return {
                x: rect.left + window.scrollX,
                y: rect.top + window.scrollY,
                width: rect.width,
                height: rect.height
            };
        })()"#,
    )
}

/// Scroll the element to the viewport centre and return its document-relative box.
pub fn scroll_into_view(reference: u32) -> String {
    on_element(
        reference,
        r#"(function() {
            el.scrollIntoView({ block: 'center', inline: 'center' });
            const rect = el.getBoundingClientRect();
            return {
                x: rect.left + window.scrollX,
                y: rect.top + window.scrollY,
                width: rect.width,
                height: rect.height
            };
        })()"#,
    )
}
