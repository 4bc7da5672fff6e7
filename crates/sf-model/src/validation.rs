//! Editor-side validation rules for projects and pages.
//!
//! Code generation never calls these. They exist for callers that want to
//! reject bad input before compiling it.

use std::sync::LazyLock;

use regex::Regex;

use crate::page::Page;
use crate::project::Project;
use crate::tree::{ComponentTree, TreeError};

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_]+$").unwrap());

static PAGE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[a-zA-Z0-9\-_/]*$").unwrap());

const PROJECT_NAME_MIN: usize = 3;
const PROJECT_NAME_MAX: usize = 50;

/// Validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("project name is required")]
    ProjectNameEmpty,
    #[error("project name must be between 3 and 50 characters")]
    ProjectNameLength,
    #[error("project name may only contain letters, digits, spaces, dashes and underscores")]
    ProjectNameChars,
    #[error("page path is required")]
    PagePathEmpty,
    #[error("page path must start with /: {0}")]
    PagePathRelative(String),
    #[error("page path contains invalid characters: {0}")]
    PagePathChars(String),
    #[error("page {page}: {source}")]
    Tree {
        page: String,
        #[source]
        source: TreeError,
    },
}

/// Check a project name.
pub fn validate_project_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::ProjectNameEmpty);
    }
    let len = name.chars().count();
    if !(PROJECT_NAME_MIN..=PROJECT_NAME_MAX).contains(&len) {
        return Err(ValidationError::ProjectNameLength);
    }
    if !PROJECT_NAME_RE.is_match(name) {
        return Err(ValidationError::ProjectNameChars);
    }
    Ok(())
}

/// Check a page route path.
pub fn validate_page_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::PagePathEmpty);
    }
    if !path.starts_with('/') {
        return Err(ValidationError::PagePathRelative(path.to_owned()));
    }
    if !PAGE_PATH_RE.is_match(path) {
        return Err(ValidationError::PagePathChars(path.to_owned()));
    }
    Ok(())
}

/// Check a page's route and component tree.
pub fn validate_page(page: &Page) -> Result<(), ValidationError> {
    validate_page_path(&page.path)?;
    ComponentTree::new(&page.components).map_err(|source| ValidationError::Tree {
        page: page_label(page).to_owned(),
        source,
    })?;
    Ok(())
}

/// Check a project and every page, collecting all failures.
pub fn validate_project(project: &Project) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(err) = validate_project_name(&project.name) {
        errors.push(err);
    }
    errors.extend(project.pages.iter().filter_map(|p| validate_page(p).err()));
    errors
}

fn page_label(page: &Page) -> &str {
    if page.id.is_empty() { &page.path } else { &page.id }
}
