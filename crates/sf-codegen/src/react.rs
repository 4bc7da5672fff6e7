//! React page stubs.
//!
//! The React backend does not reproduce the full page. It writes a function
//! component with a simplified JSX shape per component so the exported
//! project has a starting point for each page.

use std::fmt::Write;

use sf_model::{Component, ComponentKind, Page};

use crate::escape::EscapeMode;
use crate::markup::heading_level;

/// Fallback component name for pages without a usable name.
const DEFAULT_NAME: &str = "Index";

/// Identifier used for a page's component and its export file name.
///
/// Whitespace and any character that cannot appear in a JavaScript
/// identifier are removed.
pub fn component_name(page: &Page) -> String {
    let source = if page.name.trim().is_empty() {
        &page.title
    } else {
        &page.name
    };
    let name: String = source
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    match name.chars().next() {
        None => DEFAULT_NAME.to_owned(),
        Some(c) if c.is_ascii_digit() => format!("Page{name}"),
        Some(_) => name,
    }
}

/// Render a page as a TSX module exporting `<Name>Page`.
pub fn page_module(page: &Page, escape: EscapeMode) -> String {
    let name = component_name(page);
    let class = page.name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
    let class = if class.is_empty() { "index" } else { class.as_str() };

    let body = page
        .components
        .iter()
        .map(|c| jsx(c, escape))
        .collect::<Vec<_>>()
        .join("\n      ");

    let mut out = String::with_capacity(256 + body.len());
    out.push_str("import React from 'react';\n\n");
    let _ = writeln!(out, "const {name}Page: React.FC = () => {{");
    out.push_str("  return (\n");
    let _ = writeln!(out, r#"    <div className="{}-page">"#, escape.html(class));
    let _ = writeln!(out, "      <h1>{}</h1>", escape.html(&page.title));
    out.push_str("      {/* Generated components */}\n");
    if !body.is_empty() {
        let _ = writeln!(out, "      {body}");
    }
    out.push_str("    </div>\n  );\n};\n\n");
    let _ = writeln!(out, "export default {name}Page;");
    out
}

/// Simplified JSX for one component.
pub fn jsx(component: &Component, escape: EscapeMode) -> String {
    let p = &component.props;
    let text = |key: &str, default: &'static str| escape.html(&p.text_or(key, default)).into_owned();

    match &component.kind {
        ComponentKind::Text => format!("<p>{}</p>", text("content", "")),
        ComponentKind::Heading => {
            let level = heading_level(p);
            format!("<h{level}>{}</h{level}>", text("content", ""))
        }
        ComponentKind::Image => format!(r#"<img src="{}" alt="{}" />"#, text("src", ""), text("alt", "")),
        ComponentKind::Button => {
            let label = text("text", "Button");
            match p.text("onClick") {
                Some(code) if escape.allows_inline_script() => {
                    format!("<button onClick={{() => {{ {code} }}}}>{label}</button>")
                }
                _ => format!("<button>{label}</button>"),
            }
        }
        ComponentKind::Container
        | ComponentKind::Section
        | ComponentKind::Header
        | ComponentKind::Footer => {
            let tag = match component.kind {
                ComponentKind::Section => "section",
                ComponentKind::Header => "header",
                ComponentKind::Footer => "footer",
                _ => "div",
            };
            let children = component
                .children
                .iter()
                .map(|c| jsx(c, escape))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<{tag}>{children}</{tag}>")
        }
        other => format!("<div>{{/* {} component */}}</div>", comment_safe(other.as_str())),
    }
}

/// Keep a type tag from closing the JSX comment it is written into.
fn comment_safe(tag: &str) -> String {
    tag.replace("*/", "* /")
}
