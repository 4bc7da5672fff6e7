//! Component styles to CSS.
//!
//! Every component gets one rule selecting `#<id>`. Style values are not
//! validated; whatever the editor stored ends up in the stylesheet, with `<`
//! escaped in escaped mode.

use std::fmt::Write;

use sf_model::{Component, display_value, is_truthy, preorder};

use crate::escape::EscapeMode;

/// Viewport width below which the mobile overrides apply.
pub const MOBILE_BREAKPOINT: &str = "768px";

/// Font size used on narrow viewports when a text component sets none.
const MOBILE_FONT_SIZE: &str = "14px";

/// Page-independent stylesheet prelude.
pub const PRELUDE: &str = r"* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: #333;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 20px;
}

.responsive-grid {
    display: grid;
    gap: 20px;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
}

@media (max-width: 768px) {
    .container {
        padding: 0 15px;
    }

    .responsive-grid {
        grid-template-columns: 1fr;
    }
}
";

/// Full stylesheet for a component tree: prelude followed by one rule per
/// component in pre-order.
pub fn stylesheet(components: &[Component], escape: EscapeMode) -> String {
    let mut css = String::with_capacity(PRELUDE.len() + components.len() * 128);
    css.push_str(PRELUDE);
    for component in preorder(components) {
        css.push('\n');
        component_rule(component, escape, &mut css);
    }
    css
}

/// Write the rule block (and mobile override, if any) for one component.
pub fn component_rule(component: &Component, escape: EscapeMode, out: &mut String) {
    let id = escape.css(&component.id);
    let _ = writeln!(out, "#{id} {{");

    match component.position {
        Some(pos) => {
            out.push_str("    position: absolute;\n");
            let _ = writeln!(out, "    left: {}px;", pos.x);
            let _ = writeln!(out, "    top: {}px;", pos.y);
        }
        None => out.push_str("    position: relative;\n"),
    }

    if let Some(size) = component.size {
        let _ = writeln!(out, "    width: {}px;", size.width);
        let _ = writeln!(out, "    height: {}px;", size.height);
    }

    for (property, value) in &component.styles {
        let _ = writeln!(
            out,
            "    {}: {};",
            escape.css(&kebab_case(property)),
            escape.css(&display_value(value))
        );
    }

    out.push_str("}\n");

    if component.kind.is_typographic() {
        let font_size = match component.styles.get("fontSize").filter(|v| is_truthy(v)) {
            Some(value) => format!("calc({} * 0.8)", escape.css(&display_value(value))),
            None => MOBILE_FONT_SIZE.to_owned(),
        };
        let _ = write!(
            out,
            "@media (max-width: {MOBILE_BREAKPOINT}) {{\n    #{id} {{\n        font-size: {font_size};\n    }}\n}}\n"
        );
    }
}

/// Convert a camelCase style name to its CSS property name.
///
/// Every ASCII capital starts a new dash-separated word, so a leading capital
/// yields a vendor prefix (`WebkitTransition` → `-webkit-transition`).
pub fn kebab_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
        }
        result.extend(c.to_lowercase());
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(kebab_case("color"), "color");
        assert_eq!(kebab_case("WebkitTransition"), "-webkit-transition");
        assert_eq!(kebab_case("zIndex2"), "z-index2");
    }

    #[test]
    fn test_rule_without_placement_is_relative() {
        let mut out = String::new();
        component_rule(&Component::new("box", "container"), EscapeMode::Verbatim, &mut out);
        assert_eq!(out, "#box {\n    position: relative;\n}\n");
    }

    #[test]
    fn test_rule_with_position_size_and_styles() {
        let component = Component::new("hero", "image")
            .at(10.0, 20.5)
            .sized(300.0, 150.0)
            .with_style("backgroundColor", "#fff")
            .with_style("zIndex", 3);
        let mut out = String::new();
        component_rule(&component, EscapeMode::Verbatim, &mut out);
        assert_eq!(
            out,
            "#hero {\n    position: absolute;\n    left: 10px;\n    top: 20.5px;\n    \
             width: 300px;\n    height: 150px;\n    background-color: #fff;\n    z-index: 3;\n}\n"
        );
    }

    #[test]
    fn test_styles_keep_insertion_order() {
        let component = Component::new("x", "container")
            .with_style("zIndex", 1)
            .with_style("color", "red")
            .with_style("margin", "0");
        let mut out = String::new();
        component_rule(&component, EscapeMode::Verbatim, &mut out);
        let z = out.find("z-index").unwrap();
        let color = out.find("color: red").unwrap();
        let margin = out.find("margin: 0").unwrap();
        assert!(z < color && color < margin);
    }

    #[test]
    fn test_text_gets_default_mobile_font_size() {
        let mut out = String::new();
        component_rule(&Component::new("t", "text"), EscapeMode::Verbatim, &mut out);
        assert!(out.contains("@media (max-width: 768px) {\n    #t {\n        font-size: 14px;\n    }\n}\n"));
    }

    #[test]
    fn test_heading_scales_explicit_font_size() {
        let mut out = String::new();
        component_rule(
            &Component::new("h", "heading").with_style("fontSize", "32px"),
            EscapeMode::Verbatim,
            &mut out,
        );
        assert!(out.contains("font-size: 32px;"));
        assert!(out.contains("font-size: calc(32px * 0.8);"));
    }

    #[test]
    fn test_non_text_has_no_media_rule() {
        let mut out = String::new();
        component_rule(&Component::new("b", "button"), EscapeMode::Verbatim, &mut out);
        assert!(!out.contains("@media"));
    }

    #[test]
    fn test_malformed_values_pass_through() {
        let mut out = String::new();
        component_rule(
            &Component::new("x", "container").with_style("width", "not a length;;"),
            EscapeMode::Verbatim,
            &mut out,
        );
        assert!(out.contains("width: not a length;;;"));
    }

    #[test]
    fn test_stylesheet_starts_with_prelude_and_walks_tree() {
        let roots = vec![
            Component::new("outer", "section").with_child(Component::new("inner", "text")),
            Component::new("last", "button"),
        ];
        let css = stylesheet(&roots, EscapeMode::Verbatim);
        assert!(css.starts_with(PRELUDE));
        let outer = css.find("#outer {").unwrap();
        let inner = css.find("#inner {").unwrap();
        let last = css.find("#last {").unwrap();
        assert!(outer < inner && inner < last);
    }

    #[test]
    fn test_stylesheet_has_no_rules_for_form_children() {
        let roots = vec![
            Component::new("f", "form")
                .with_child(Component::new("email", "input"))
                .with_child(Component::new("inner", "button")),
        ];
        let css = stylesheet(&roots, EscapeMode::Verbatim);
        assert!(css.contains("#f {"));
        assert!(!css.contains("#email"));
        assert!(!css.contains("#inner"));
    }

    #[test]
    fn test_escaped_mode_cannot_close_style_element() {
        let component = Component::new("x<y", "text")
            .with_style("color", "red}</style><script>alert(1)</script><style>")
            .with_style("fontSize", "<?php system('id'); ?>");
        let mut out = String::new();
        component_rule(&component, EscapeMode::Escaped, &mut out);
        assert!(!out.contains('<'));
        assert!(out.starts_with(r"#x\3c y {"));
        assert!(out.contains(r"color: red}\3c /style>\3c script>"));

        let mut verbatim = String::new();
        component_rule(&component, EscapeMode::Verbatim, &mut verbatim);
        assert!(verbatim.contains("</style><script>"));
    }

    #[test]
    fn test_stylesheet_of_empty_tree_is_prelude() {
        assert_eq!(stylesheet(&[], EscapeMode::Verbatim), PRELUDE);
    }
}
