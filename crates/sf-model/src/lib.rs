//! Component tree, page and project model for SiteForge.
//!
//! These are the values the editor produces and the code generator consumes.
//! All types deserialize from the editor's camelCase JSON shape:
//!
//! ```
//! use sf_model::{ComponentKind, Page};
//!
//! let page: Page = serde_json::from_str(r#"{
//!     "title": "Home",
//!     "components": [
//!         {"id": "h1", "type": "heading", "props": {"content": "Hi", "level": 2}}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(page.components[0].kind, ComponentKind::Heading);
//! assert_eq!(page.components[0].props.text_or("content", ""), "Hi");
//! ```
//!
//! # Tree invariants
//!
//! Component ids are unique within a page and children are owned exclusively
//! by their parent. Producers uphold this; code generation does not check it.
//! Callers that receive trees from untrusted sources can validate them with
//! [`ComponentTree::new`] or assemble them from flat records with [`assemble`].

mod component;
mod page;
mod project;
mod props;
mod tree;
mod validation;

pub use component::{Component, ComponentKind, Position, Preorder, Size, preorder};
pub use page::{Page, PageMeta};
pub use project::{
    DeploymentProvider, DeploymentSettings, Project, ProjectSettings, ProjectStatus, ProjectType,
    SeoSettings,
};
pub use props::{Props, display_value, is_truthy};
pub use tree::{ComponentRecord, ComponentTree, TreeError, assemble};
pub use validation::{
    ValidationError, validate_page, validate_page_path, validate_project, validate_project_name,
};

/// Ordered style mapping (property name → value), iteration order preserved.
pub type Styles = serde_json::Map<String, serde_json::Value>;
