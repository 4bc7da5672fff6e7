//! Projects: named page collections with output and deployment settings.

use serde::{Deserialize, Serialize};

use crate::page::Page;

/// Output backend of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Html,
    React,
    Php,
    Nodejs,
}

/// Editorial status of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

/// Project-wide SEO defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoSettings {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Hosting protocol for deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentProvider {
    #[default]
    Cpanel,
    Ftp,
    Sftp,
}

/// Deployment target. Carried for the deployment layer; unused by code generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentSettings {
    pub provider: DeploymentProvider,
    pub host: String,
    pub username: String,
    pub password: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
}

/// Project settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub ssl: bool,
    pub compression: bool,
    pub cache: bool,
    pub analytics: bool,
    pub seo: SeoSettings,
    pub deployment: DeploymentSettings,
}

/// A named collection of pages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub pages: Vec<Page>,
    pub created_at: String,
    pub updated_at: String,
    pub settings: ProjectSettings,
}

impl Project {
    /// Create an empty project of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            name: name.into(),
            project_type,
            ..Self::default()
        }
    }

    /// Find a page by id, falling back to its route path.
    pub fn find_page(&self, key: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|p| p.id == key)
            .or_else(|| self.pages.iter().find(|p| p.path == key))
    }
}
