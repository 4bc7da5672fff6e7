//! Project export for SiteForge.
//!
//! [`export`] compiles every page of a project with the backend selected by
//! the project type and adds the fixed scaffold files (`package.json`,
//! `vite.config.ts`, `tsconfig.json`, `README.md`). The result is an ordered
//! map from relative path to file content; [`write_files`] puts it on disk.

mod exporter;
pub mod scaffold;
mod writer;

pub use exporter::{FileMap, ProjectExporter, export, page_file};
pub use writer::{ExportError, write_files};
