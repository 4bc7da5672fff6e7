//! `siteforge compile` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use sf_codegen::{PageCompiler, Variant};

use super::{GenerateOptions, compile_options, load_project};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the compile command.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Project document (JSON) saved by the editor.
    project: PathBuf,

    /// Page to compile, by id or route path.
    #[arg(short, long)]
    page: String,

    /// Output backend: html, php or react (default: from project type).
    #[arg(long)]
    variant: Option<Variant>,

    /// Write the document to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    options: GenerateOptions,
}

impl CompileArgs {
    /// Execute the compile command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project or configuration cannot be loaded,
    /// the page does not exist, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.options.load_config(None)?;
        let project = load_project(&self.project)?;
        let page = project
            .find_page(&self.page)
            .ok_or_else(|| CliError::PageNotFound(self.page.clone()))?;

        let variant = self.variant.unwrap_or_else(|| Variant::for_project(&project));
        let compiler = PageCompiler::new(compile_options(&config));
        let document = compiler.compile(page, &project, variant);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &document)?;
                output.success(&format!(
                    "Compiled {} ({variant}) to {}",
                    page.path,
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
