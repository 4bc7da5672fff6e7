//! `siteforge validate` command implementation.

use std::path::PathBuf;

use clap::Args;
use sf_model::{ComponentTree, Project, validate_project};

use super::load_project;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// Project document (JSON) saved by the editor.
    project: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be loaded or has problems.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let project = load_project(&self.project)?;
        let problems = validate_project(&project);
        let components = report_unrendered(&project, &output);

        if problems.is_empty() {
            output.success(&format!(
                "{} is valid ({} pages, {components} components)",
                self.project.display(),
                project.pages.len()
            ));
            return Ok(());
        }

        output.error(&format!("{}:", self.project.display()));
        for problem in &problems {
            output.detail(&problem.to_string());
        }
        Err(CliError::Validation(format!(
            "{} problem(s) found",
            problems.len()
        )))
    }
}

/// Warn about components that are saved but never emitted. Returns the
/// number of components indexed across all pages.
fn report_unrendered(project: &Project, output: &Output) -> usize {
    let mut total = 0;
    for page in &project.pages {
        let Ok(tree) = ComponentTree::new(&page.components) else {
            continue;
        };
        total += tree.len();
        for (parent, child) in tree.unrendered() {
            output.warning(&format!(
                "{}: {} '{}' inside {} '{}' is not rendered",
                page.path,
                child.kind.as_str(),
                child.id,
                parent.kind.as_str(),
                parent.id
            ));
        }
    }
    total
}
