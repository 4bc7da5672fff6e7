//! Component tree to HTML.
//!
//! One fixed rule per component kind. Missing props never fail: each rule
//! has a default for every value it reads, so half-configured components
//! render as placeholders.

use std::borrow::Cow;
use std::fmt::Write;

use serde_json::Value;
use sf_model::{Component, ComponentKind, Props, display_value, is_truthy};

use crate::escape::EscapeMode;

/// Renders component trees to HTML fragments.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkupEmitter {
    escape: EscapeMode,
}

impl MarkupEmitter {
    /// Create an emitter with the given escaping policy.
    #[must_use]
    pub fn new(escape: EscapeMode) -> Self {
        Self { escape }
    }

    /// Render sibling components, one fragment per line, in tree order.
    pub fn render(&self, components: &[Component]) -> String {
        let mut out = String::with_capacity(components.len() * 96);
        self.render_siblings(components, &mut out);
        out
    }

    /// Render a single component and its rendered descendants.
    pub fn render_component(&self, component: &Component, out: &mut String) {
        let id = self.esc(&component.id);
        let p = &component.props;

        match &component.kind {
            ComponentKind::Text => {
                let _ = write!(
                    out,
                    r#"<p id="{id}" class="text-component">{}</p>"#,
                    self.esc(&p.text_or("content", ""))
                );
            }
            ComponentKind::Heading => {
                let level = heading_level(p);
                let _ = write!(
                    out,
                    r#"<h{level} id="{id}" class="heading-component">{}</h{level}>"#,
                    self.esc(&p.text_or("content", ""))
                );
            }
            ComponentKind::Image => {
                let _ = write!(
                    out,
                    r#"<img id="{id}" src="{}" alt="{}" class="image-component">"#,
                    self.esc(&p.text_or("src", "")),
                    self.esc(&p.text_or("alt", ""))
                );
            }
            ComponentKind::Button => self.button(component, &id, out),
            ComponentKind::Container
            | ComponentKind::Section
            | ComponentKind::Header
            | ComponentKind::Footer => {
                let tag = wrapper_tag(&component.kind);
                let _ = write!(
                    out,
                    r#"<{tag} id="{id}" class="{}-component">"#,
                    component.kind
                );
                self.render_siblings(&component.children, out);
                let _ = write!(out, "</{tag}>");
            }
            ComponentKind::Form => self.form(component, &id, out),
            ComponentKind::Input | ComponentKind::Textarea | ComponentKind::Select => {
                self.control(component, true, out);
            }
            ComponentKind::Navigation => {
                let _ = write!(out, r#"<nav id="{id}" class="navigation-component"><ul>"#);
                self.links(p.list("items"), out);
                out.push_str("</ul></nav>");
            }
            ComponentKind::Breadcrumb => {
                let _ = write!(out, r#"<nav id="{id}" class="breadcrumb-component"><ol>"#);
                self.links(p.list("items"), out);
                out.push_str("</ol></nav>");
            }
            ComponentKind::Video => {
                let controls = if p.flag_or("controls", true) {
                    " controls"
                } else {
                    ""
                };
                let _ = write!(
                    out,
                    r#"<video id="{id}" class="video-component" src="{}"{controls}></video>"#,
                    self.esc(&p.text_or("src", ""))
                );
            }
            ComponentKind::Gallery => {
                let _ = write!(
                    out,
                    r#"<div id="{id}" class="gallery-component responsive-grid">"#
                );
                for image in p.list("images") {
                    let (src, alt) = match image {
                        Value::Object(_) => (item_text(image, "src"), item_text(image, "alt")),
                        other => (value_text(other), Cow::Borrowed("")),
                    };
                    let _ = write!(
                        out,
                        r#"<img src="{}" alt="{}">"#,
                        self.esc(&src),
                        self.esc(&alt)
                    );
                }
                out.push_str("</div>");
            }
            ComponentKind::Map => {
                let lat = p.number("lat").unwrap_or(0.0);
                let lng = p.number("lng").unwrap_or(0.0);
                let zoom = p.number("zoom").unwrap_or(12.0);
                let _ = write!(
                    out,
                    r#"<div id="{id}" class="map-component" data-lat="{lat}" data-lng="{lng}" data-zoom="{zoom}"></div>"#
                );
            }
            ComponentKind::Testimonial => {
                let stars = "★".repeat(rating(p));
                let _ = write!(
                    out,
                    r#"<blockquote id="{id}" class="testimonial-component"><p>{}</p><cite>{}</cite><span class="rating">{stars}</span></blockquote>"#,
                    self.esc(&p.text_or("text", "")),
                    self.esc(&p.text_or("author", ""))
                );
            }
            ComponentKind::Pricing => {
                let _ = write!(
                    out,
                    r#"<div id="{id}" class="pricing-component"><h3>{}</h3><p class="price">{}</p><ul>"#,
                    self.esc(&p.text_or("title", "")),
                    self.esc(&p.text_or("price", ""))
                );
                for feature in p.list("features") {
                    let _ = write!(out, "<li>{}</li>", self.esc(&value_text(feature)));
                }
                out.push_str("</ul></div>");
            }
            ComponentKind::Team => {
                let name = p.text_or("name", "");
                let _ = write!(
                    out,
                    r#"<div id="{id}" class="team-component"><img src="{}" alt="{}"><h4>{}</h4><p>{}</p></div>"#,
                    self.esc(&p.text_or("image", "")),
                    self.esc(&name),
                    self.esc(&name),
                    self.esc(&p.text_or("role", ""))
                );
            }
            ComponentKind::Stats => {
                let _ = write!(out, r#"<div id="{id}" class="stats-component">"#);
                for stat in p.list("stats") {
                    let _ = write!(
                        out,
                        r#"<div class="stat"><strong>{}</strong><span>{}</span></div>"#,
                        self.esc(&item_text(stat, "value")),
                        self.esc(&item_text(stat, "label"))
                    );
                }
                out.push_str("</div>");
            }
            ComponentKind::Calendar => {
                let _ = write!(
                    out,
                    r#"<div id="{id}" class="calendar-component" data-view="{}"></div>"#,
                    self.esc(&p.text_or("view", "month"))
                );
            }
            ComponentKind::Unknown(tag) => {
                let _ = write!(
                    out,
                    r#"<div id="{id}" class="{}-component">{}</div>"#,
                    self.esc(tag),
                    self.esc(&p.text_or("content", ""))
                );
            }
        }
    }

    fn render_siblings(&self, components: &[Component], out: &mut String) {
        for (i, component) in components.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.render_component(component, out);
        }
    }

    fn button(&self, component: &Component, id: &str, out: &mut String) {
        let p = &component.props;
        let text = p.text_or("text", "Button");
        if self.escape.allows_inline_script() {
            let _ = write!(
                out,
                r#"<button id="{id}" class="button-component" onclick="{}">{text}</button>"#,
                p.text_or("onClick", "")
            );
        } else {
            if p.flag("onClick") {
                tracing::warn!(id = %component.id, "Dropping inline click handler in escaped mode");
            }
            let _ = write!(
                out,
                r#"<button id="{id}" class="button-component">{}</button>"#,
                self.esc(&text)
            );
        }
    }

    fn form(&self, component: &Component, id: &str, out: &mut String) {
        let p = &component.props;
        let _ = write!(
            out,
            r#"<form id="{id}" class="form-component" action="{}" method="{}">"#,
            self.esc(&p.text_or("action", "#")),
            self.esc(&p.text_or("method", "POST"))
        );
        for child in &component.children {
            self.control(child, false, out);
        }
        let _ = write!(
            out,
            r#"<button type="submit">{}</button></form>"#,
            self.esc(&p.text_or("submitText", "Submit"))
        );
    }

    /// Write a form control. `anchored` controls carry their own id and
    /// class; controls inside a form do not. Non-control kinds write nothing.
    fn control(&self, field: &Component, anchored: bool, out: &mut String) {
        let p = &field.props;
        let tag = match field.kind {
            ComponentKind::Input => "input",
            ComponentKind::Textarea => "textarea",
            ComponentKind::Select => "select",
            _ => return,
        };

        let _ = write!(out, "<{tag}");
        if anchored {
            let _ = write!(out, r#" id="{}" class="{tag}-component""#, self.esc(&field.id));
        }
        if field.kind == ComponentKind::Input {
            let _ = write!(out, r#" type="{}""#, self.esc(&p.text_or("type", "text")));
        }
        let _ = write!(out, r#" name="{}""#, self.esc(&p.text_or("name", "")));
        if field.kind != ComponentKind::Select {
            let _ = write!(
                out,
                r#" placeholder="{}""#,
                self.esc(&p.text_or("placeholder", ""))
            );
        }
        if p.flag("required") {
            out.push_str(" required");
        }
        out.push('>');

        match field.kind {
            ComponentKind::Textarea => out.push_str("</textarea>"),
            ComponentKind::Select => {
                for option in p.list("options") {
                    let (value, label) = match option {
                        Value::Object(_) => (field_or_empty(option, "value"), field_or_empty(option, "label")),
                        other => (value_text(other), value_text(other)),
                    };
                    let _ = write!(
                        out,
                        r#"<option value="{}">{}</option>"#,
                        self.esc(&value),
                        self.esc(&label)
                    );
                }
                out.push_str("</select>");
            }
            _ => {}
        }
    }

    /// Write `<li><a>` entries for navigation-style item lists.
    fn links(&self, items: &[Value], out: &mut String) {
        for item in items {
            let href = match item.get("href").filter(|v| is_truthy(v)) {
                Some(v) => display_value(v),
                None => Cow::Borrowed("#"),
            };
            let _ = write!(
                out,
                r#"<li><a href="{}">{}</a></li>"#,
                self.esc(&href),
                self.esc(&item_text(item, "label"))
            );
        }
    }

    fn esc<'a>(&self, s: &'a str) -> Cow<'a, str> {
        self.escape.html(s)
    }
}

/// Heading level from props, clamped to the six HTML heading levels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn heading_level(props: &Props) -> u8 {
    props
        .number("level")
        .filter(|level| level.is_finite())
        .map_or(1, |level| level.round().clamp(1.0, 6.0) as u8)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rating(props: &Props) -> usize {
    props
        .number("rating")
        .filter(|r| r.is_finite())
        .map_or(0, |r| r.round().clamp(0.0, 5.0) as usize)
}

fn wrapper_tag(kind: &ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Section => "section",
        ComponentKind::Header => "header",
        ComponentKind::Footer => "footer",
        _ => "div",
    }
}

/// Truthy field of an object item as text; empty when missing.
fn item_text<'v>(item: &'v Value, key: &str) -> Cow<'v, str> {
    item.get(key)
        .filter(|v| is_truthy(v))
        .map_or(Cow::Borrowed(""), display_value)
}

/// Like [`item_text`] but keeps falsy scalars such as `0` as their text.
fn field_or_empty<'v>(item: &'v Value, key: &str) -> Cow<'v, str> {
    match item.get(key) {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(v) => display_value(v),
    }
}

fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        other => display_value(other),
    }
}
