//! Component tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Styles;
use crate::props::Props;

/// Component type tag.
///
/// The set is closed; any other tag deserializes to [`ComponentKind::Unknown`]
/// and keeps its original spelling.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Text,
    Heading,
    Image,
    Button,
    Container,
    Section,
    Header,
    Footer,
    Form,
    Input,
    Textarea,
    Select,
    Navigation,
    Breadcrumb,
    Video,
    Gallery,
    Map,
    Testimonial,
    Pricing,
    Team,
    Stats,
    Calendar,
    Unknown(String),
}

impl ComponentKind {
    /// Every known kind, in palette order.
    pub const KNOWN: [Self; 22] = [
        Self::Text,
        Self::Heading,
        Self::Image,
        Self::Button,
        Self::Container,
        Self::Section,
        Self::Header,
        Self::Footer,
        Self::Form,
        Self::Input,
        Self::Textarea,
        Self::Select,
        Self::Navigation,
        Self::Breadcrumb,
        Self::Video,
        Self::Gallery,
        Self::Map,
        Self::Testimonial,
        Self::Pricing,
        Self::Team,
        Self::Stats,
        Self::Calendar,
    ];

    /// The type tag as written in the editor document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::Button => "button",
            Self::Container => "container",
            Self::Section => "section",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Form => "form",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Navigation => "navigation",
            Self::Breadcrumb => "breadcrumb",
            Self::Video => "video",
            Self::Gallery => "gallery",
            Self::Map => "map",
            Self::Testimonial => "testimonial",
            Self::Pricing => "pricing",
            Self::Team => "team",
            Self::Stats => "stats",
            Self::Calendar => "calendar",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether children of this kind are rendered.
    ///
    /// Leaf kinds ignore their `children` entirely.
    pub fn accepts_children(&self) -> bool {
        matches!(
            self,
            Self::Container | Self::Section | Self::Header | Self::Footer | Self::Form
        )
    }

    /// Whether the kind is a field a form renders inline.
    pub fn is_form_control(&self) -> bool {
        matches!(self, Self::Input | Self::Textarea | Self::Select)
    }

    /// Whether the kind scales its font size on narrow viewports.
    pub fn is_typographic(&self) -> bool {
        matches!(self, Self::Text | Self::Heading)
    }
}

impl From<String> for ComponentKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => Self::Text,
            "heading" => Self::Heading,
            "image" => Self::Image,
            "button" => Self::Button,
            "container" => Self::Container,
            "section" => Self::Section,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "form" => Self::Form,
            "input" => Self::Input,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "navigation" => Self::Navigation,
            "breadcrumb" => Self::Breadcrumb,
            "video" => Self::Video,
            "gallery" => Self::Gallery,
            "map" => Self::Map,
            "testimonial" => Self::Testimonial,
            "pricing" => Self::Pricing,
            "team" => Self::Team,
            "stats" => Self::Stats,
            "calendar" => Self::Calendar,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<&str> for ComponentKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Unknown(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Absolute canvas offset in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Component dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A node of a page's render tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique id within the page; used as the DOM anchor.
    pub id: String,
    /// Type tag selecting the emission rule.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Editor label. Not used in generated output.
    #[serde(default)]
    pub name: String,
    /// Type-specific properties.
    #[serde(default)]
    pub props: Props,
    /// Ordered children, rendered only for container-like kinds.
    #[serde(default)]
    pub children: Vec<Component>,
    /// Style declarations keyed by camelCase property name.
    #[serde(default)]
    pub styles: Styles,
    /// Absolute canvas placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Pixel dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl Component {
    /// Create a component with no props, children, styles or placement.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<ComponentKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: String::new(),
            props: Props::new(),
            children: Vec::new(),
            styles: Styles::new(),
            position: None,
            size: None,
        }
    }

    /// Set a property.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props = self.props.with(key, value);
        self
    }

    /// Set a style declaration.
    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.styles.insert(key.into(), value.into());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Place the component at an absolute offset.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    /// Give the component fixed dimensions.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size { width, height });
        self
    }

    /// Children rendered with their own `id` anchor.
    ///
    /// Empty for leaf kinds. Also empty for forms: their fields render
    /// inline without an id and any other child is dropped.
    pub fn anchored_children(&self) -> &[Component] {
        match self.kind {
            ComponentKind::Form => &[],
            ref kind if kind.accepts_children() => &self.children,
            _ => &[],
        }
    }
}

/// Pre-order, depth-first traversal of the components that carry an `id`
/// in the generated markup.
///
/// Children of leaf kinds and of forms are skipped, so every visited id can
/// be selected in CSS and looked up from scripts.
pub fn preorder(roots: &[Component]) -> Preorder<'_> {
    Preorder {
        stack: roots.iter().rev().collect(),
    }
}

/// Iterator returned by [`preorder`].
pub struct Preorder<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.anchored_children().iter().rev());
        Some(node)
    }
}
