//! Code generation for SiteForge pages.
//!
//! Turns a page's component tree into a complete document: a stylesheet from
//! component placement and styles, HTML markup from per-kind rules, and the
//! script that wires up buttons and forms.
//!
//! # Example
//!
//! ```
//! use sf_codegen::{Variant, compile};
//! use sf_model::{Component, Page, Project};
//!
//! let page = Page::new("/", "Home")
//!     .with_component(Component::new("h1", "heading").with_prop("content", "Hi"));
//! let html = compile(&page, &Project::default(), Variant::Html);
//!
//! assert!(html.contains("<title>Home</title>"));
//! assert!(html.contains(r#"<h1 id="h1" class="heading-component">Hi</h1>"#));
//! ```
//!
//! # Escaping
//!
//! By default user content is interpolated verbatim so generated sites stay
//! byte-identical to earlier output. Content can therefore inject markup and
//! script. [`EscapeMode::Escaped`] HTML-escapes every interpolation and drops
//! inline click handlers.
//!
//! Compilation never fails. Missing props fall back to per-kind defaults,
//! unknown component kinds render as a generic `<div>`, and style values are
//! passed through unchecked.

pub mod behavior;
mod compiler;
mod escape;
pub mod markup;
pub mod react;
pub mod style;

pub use compiler::{
    CompileOptions, DEFAULT_LANG, DocumentBackend, HeadMeta, HtmlDocument, PageCompiler,
    PageParts, ParseVariantError, PhpDocument, Variant, compile,
};
pub use escape::{EscapeMode, escape_css, escape_html, escape_js_string, php_string};
pub use markup::MarkupEmitter;
