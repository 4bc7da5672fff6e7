//! CLI command implementations.

pub(crate) mod compile;
pub(crate) mod export;
pub(crate) mod validate;

use std::path::{Path, PathBuf};

use clap::Args;
use sf_codegen::{CompileOptions, EscapeMode};
use sf_config::{CliSettings, Config};
use sf_model::Project;

use crate::error::CliError;

pub(crate) use compile::CompileArgs;
pub(crate) use export::ExportArgs;
pub(crate) use validate::ValidateArgs;

/// Options shared by commands that generate output.
#[derive(Args)]
pub(crate) struct GenerateOptions {
    /// Path to configuration file (default: auto-discover siteforge.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document language for `<html lang>` (overrides config).
    #[arg(long)]
    lang: Option<String>,

    /// HTML-escape user content and drop inline click handlers.
    #[arg(long)]
    escape: bool,

    /// Interpolate user content verbatim (overrides `escape = true` in config).
    #[arg(long, conflicts_with = "escape")]
    no_escape: bool,
}

impl GenerateOptions {
    /// Load configuration with these options applied on top.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            lang: self.lang.clone(),
            escape: self.escape_override(),
            output_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Escaping requested on the command line, if any.
    fn escape_override(&self) -> Option<bool> {
        self.no_escape
            .then_some(false)
            .or(self.escape.then_some(true))
    }
}

/// Compile options described by a loaded configuration.
pub(crate) fn compile_options(config: &Config) -> CompileOptions {
    let escape = if config.output.escape {
        EscapeMode::Escaped
    } else {
        EscapeMode::Verbatim
    };
    CompileOptions::default()
        .with_lang(config.output.lang.clone())
        .with_escape(escape)
}

/// Read a project document saved by the editor.
pub(crate) fn load_project(path: &Path) -> Result<Project, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Project {
        path: path.to_path_buf(),
        source,
    })
}
