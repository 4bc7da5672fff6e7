//! Page script generation.

use std::fmt::Write;

use sf_model::{Component, ComponentKind, preorder};

use crate::escape::EscapeMode;

/// Page-independent script: lifecycle hooks and required-field validation
/// for every form on the page.
pub const RUNTIME: &str = r"// SiteForge generated JavaScript
document.addEventListener('DOMContentLoaded', function() {
    initializeComponents();
    setupResponsive();
    setupFormValidation();
});

function initializeComponents() {
}

function setupResponsive() {
    window.addEventListener('resize', function() {
    });
}

function setupFormValidation() {
    const forms = document.querySelectorAll('form');
    forms.forEach(function(form) {
        form.addEventListener('submit', function(e) {
            if (!validateForm(this)) {
                e.preventDefault();
            }
        });
    });
}

function validateForm(form) {
    const requiredFields = form.querySelectorAll('[required]');
    let isValid = true;
    requiredFields.forEach(function(field) {
        if (!field.value.trim()) {
            field.classList.add('error');
            isValid = false;
        } else {
            field.classList.remove('error');
        }
    });
    return isValid;
}
";

/// Full page script: [`RUNTIME`] followed by per-component wiring in
/// pre-order.
pub fn script(components: &[Component], escape: EscapeMode) -> String {
    let mut js = String::with_capacity(RUNTIME.len() + components.len() * 64);
    js.push_str(RUNTIME);
    for component in preorder(components) {
        component_script(component, escape, &mut js);
    }
    js
}

/// Write the wiring fragment for one component, if its kind has one.
pub fn component_script(component: &Component, escape: EscapeMode, out: &mut String) {
    let id = escape.js_string(&component.id);
    match component.kind {
        ComponentKind::Button => {
            let Some(handler) = component.props.text("onClick") else {
                return;
            };
            if !escape.allows_inline_script() {
                tracing::warn!(id = %component.id, "Dropping click listener in escaped mode");
                return;
            }
            let _ = write!(
                out,
                "\ndocument.getElementById('{id}').addEventListener('click', function() {{\n    {handler}\n}});\n"
            );
        }
        ComponentKind::Form => {
            let _ = write!(
                out,
                "\ndocument.getElementById('{id}').addEventListener('submit', function(e) {{\n    \
                 e.preventDefault();\n    \
                 const formData = new FormData(this);\n    \
                 console.log('Form submitted:', Object.fromEntries(formData));\n}});\n"
            );
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_tree_is_runtime_only() {
        assert_eq!(script(&[], EscapeMode::Verbatim), RUNTIME);
    }

    #[test]
    fn test_button_with_handler() {
        let mut out = String::new();
        component_script(
            &Component::new("go", "button").with_prop("onClick", "alert('hi')"),
            EscapeMode::Verbatim,
            &mut out,
        );
        assert_eq!(
            out,
            "\ndocument.getElementById('go').addEventListener('click', function() {\n    alert('hi')\n});\n"
        );
    }

    #[test]
    fn test_button_without_handler_has_no_fragment() {
        let mut out = String::new();
        component_script(&Component::new("b", "button"), EscapeMode::Verbatim, &mut out);
        component_script(
            &Component::new("b", "button").with_prop("onClick", ""),
            EscapeMode::Verbatim,
            &mut out,
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_form_submit_fragment() {
        let mut out = String::new();
        component_script(&Component::new("contact", "form"), EscapeMode::Verbatim, &mut out);
        assert!(out.contains("document.getElementById('contact').addEventListener('submit'"));
        assert!(out.contains("e.preventDefault();"));
        assert!(out.contains("console.log('Form submitted:', Object.fromEntries(formData));"));
    }

    #[test]
    fn test_other_kinds_have_no_fragment() {
        let mut out = String::new();
        for kind in ["text", "heading", "image", "container", "navigation", "widget"] {
            component_script(&Component::new("x", kind), EscapeMode::Verbatim, &mut out);
        }
        assert_eq!(out, "");
    }

    #[test]
    fn test_fragments_follow_preorder() {
        let roots = vec![
            Component::new("outer", "section")
                .with_child(Component::new("f1", "form"))
                .with_child(Component::new("b1", "button").with_prop("onClick", "one()")),
            Component::new("f2", "form"),
        ];
        let js = script(&roots, EscapeMode::Verbatim);
        let f1 = js.find("getElementById('f1')").unwrap();
        let b1 = js.find("getElementById('b1')").unwrap();
        let f2 = js.find("getElementById('f2')").unwrap();
        assert!(js.starts_with(RUNTIME));
        assert!(f1 < b1 && b1 < f2);
    }

    #[test]
    fn test_form_children_are_not_wired() {
        let roots = vec![
            Component::new("f", "form")
                .with_child(Component::new("email", "input"))
                .with_child(Component::new("inner", "button").with_prop("onClick", "go()"))
                .with_child(Component::new("nested", "form")),
        ];
        let js = script(&roots, EscapeMode::Verbatim);
        assert!(js.contains("getElementById('f')"));
        assert!(!js.contains("getElementById('inner')"));
        assert!(!js.contains("getElementById('nested')"));
    }

    #[test]
    fn test_escaped_mode_drops_click_listener() {
        let mut out = String::new();
        component_script(
            &Component::new("b", "button").with_prop("onClick", "steal()"),
            EscapeMode::Escaped,
            &mut out,
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_escaped_mode_quotes_ids() {
        let mut out = String::new();
        component_script(&Component::new("a'b", "form"), EscapeMode::Escaped, &mut out);
        assert!(out.contains(r"getElementById('a\'b')"));
    }
}
