//! Whole-project export.

use std::collections::BTreeMap;

use rayon::prelude::*;
use sf_codegen::{PageCompiler, Variant, react};
use sf_model::{Page, Project};

/// Exported files keyed by relative path.
pub type FileMap = BTreeMap<String, String>;

/// Compiles every page of a project and adds the scaffold files.
#[derive(Clone, Debug, Default)]
pub struct ProjectExporter {
    compiler: PageCompiler,
}

impl ProjectExporter {
    /// Create an exporter that compiles pages with `compiler`.
    #[must_use]
    pub fn new(compiler: PageCompiler) -> Self {
        Self { compiler }
    }

    /// Export `project` to a path → content map.
    ///
    /// Pages are compiled in parallel; the result does not depend on
    /// scheduling. When two pages map to the same file the later page in
    /// project order wins.
    pub fn export(&self, project: &Project) -> FileMap {
        let variant = Variant::for_project(project);
        tracing::debug!(
            project = %project.name,
            %variant,
            pages = project.pages.len(),
            "Exporting project"
        );

        let pages: Vec<(String, String)> = project
            .pages
            .par_iter()
            .map(|page| {
                (
                    page_file(page, variant),
                    self.compiler.compile(page, project, variant),
                )
            })
            .collect();

        let mut files = FileMap::new();
        for (path, content) in crate::scaffold::files(project) {
            files.insert(path.to_owned(), content);
        }
        for (path, content) in pages {
            if files.insert(path.clone(), content).is_some() {
                tracing::warn!(%path, "Export path used more than once, keeping the last page");
            }
        }
        files
    }
}

/// Export with default compile options.
pub fn export(project: &Project) -> FileMap {
    ProjectExporter::default().export(project)
}

/// Relative output path of a page for the given backend.
///
/// Leading and trailing slashes are stripped from the route; the root route
/// becomes `index`.
pub fn page_file(page: &Page, variant: Variant) -> String {
    match variant {
        Variant::React => format!("src/pages/{}.tsx", react::component_name(page)),
        Variant::Php => format!("{}.php", route_stem(&page.path)),
        Variant::Html => format!("{}.html", route_stem(&page.path)),
    }
}

fn route_stem(path: &str) -> &str {
    match path.trim_matches('/') {
        "" => "index",
        stem => stem,
    }
}
