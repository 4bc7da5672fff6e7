//! CLI error types.

use std::path::PathBuf;

use sf_config::ConfigError;
use sf_export::ExportError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file {}: {source}", path.display())]
    Project {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("{0}")]
    Validation(String),
}
