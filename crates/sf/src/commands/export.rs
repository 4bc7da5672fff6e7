//! `siteforge export` command implementation.

use std::path::PathBuf;

use clap::Args;
use sf_codegen::{PageCompiler, Variant};
use sf_export::{ProjectExporter, write_files};

use super::{GenerateOptions, compile_options, load_project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Project document (JSON) saved by the editor.
    project: PathBuf,

    /// Output directory (overrides config, default: dist/ next to the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    options: GenerateOptions,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project or configuration cannot be loaded or
    /// a file cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.options.load_config(self.output_dir.clone())?;
        let project = load_project(&self.project)?;
        let output_dir = &config.export_resolved.output_dir;

        output.info(&format!(
            "Exporting {} ({} pages, {})",
            project.name,
            project.pages.len(),
            Variant::for_project(&project)
        ));
        output.info(&format!("Output: {}", output_dir.display()));
        if project.pages.is_empty() {
            output.warning("Project has no pages; writing scaffold files only");
        }

        let exporter = ProjectExporter::new(PageCompiler::new(compile_options(&config)));
        let files = exporter.export(&project);
        let written = write_files(output_dir, &files)?;

        output.success(&format!(
            "Exported {written} files to {}",
            output_dir.display()
        ));
        Ok(())
    }
}
