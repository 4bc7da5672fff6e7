//! Writing an export map to disk.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::exporter::FileMap;

/// Error returned when writing exported files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("refusing to write outside the output directory: {0}")]
    UnsafePath(String),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write every file of `files` below `dir`, creating directories as needed.
///
/// All paths are checked before anything is written, so a map containing an
/// absolute path or a `..` component leaves the directory untouched.
/// Returns the number of files written.
pub fn write_files(dir: &Path, files: &FileMap) -> Result<usize, ExportError> {
    let targets = files
        .iter()
        .map(|(relative, content)| resolve(dir, relative).map(|path| (path, content)))
        .collect::<Result<Vec<_>, ExportError>>()?;

    for (path, content) in &targets {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    }

    Ok(targets.len())
}

fn resolve(dir: &Path, relative: &str) -> Result<PathBuf, ExportError> {
    let path = Path::new(relative);
    let safe = !relative.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if safe {
        Ok(dir.join(path))
    } else {
        Err(ExportError::UnsafePath(relative.to_owned()))
    }
}
