//! Pages and their SEO metadata.

use serde::{Deserialize, Serialize};

use crate::component::Component;

/// SEO fields rendered into the document head.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

/// One routable document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    /// Route path without extension (e.g. "/about").
    pub path: String,
    pub title: String,
    /// Freeform body kept by the editor. Not used by code generation.
    pub content: String,
    /// Root components in paint order.
    pub components: Vec<Component>,
    /// Raw CSS appended after generated styles.
    pub styles: String,
    /// Raw JavaScript appended after generated scripts.
    pub scripts: String,
    pub meta: PageMeta,
    pub created_at: String,
    pub updated_at: String,
}

impl Page {
    /// Create an empty page with the given route and title.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a root component.
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }
}
