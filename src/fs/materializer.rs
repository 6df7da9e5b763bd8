use crate::scaffold::{normalize_path, FileEntry};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MaterializeError {
    /// Path is empty, absolute, or climbs out of the working root
    #[error("Refusing to write unsafe path: {0:?}")]
    UnsafePath(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes file sets beneath a working root
///
/// There is no atomicity across a batch: a failure part-way leaves the files written so far.
#[derive(Debug, Clone)]
pub struct FileMaterializer {
    root: PathBuf,
}

impl FileMaterializer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a scaffold path to its location under the root
    pub fn resolve(&self, path: &str) -> Result<PathBuf, MaterializeError> {
        let relative = normalize_path(path);
        if relative.is_empty() {
            return Err(MaterializeError::UnsafePath(path.to_string()));
        }

        let mut resolved = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(MaterializeError::UnsafePath(path.to_string()))
                }
            }
        }
        if resolved == self.root {
            return Err(MaterializeError::UnsafePath(path.to_string()));
        }
        Ok(resolved)
    }

    /// Writes every entry, overwriting existing files
    ///
    /// All paths are checked before anything is written.
    pub fn write(&self, files: &[FileEntry]) -> Result<Vec<PathBuf>, MaterializeError> {
        let targets = files
            .iter()
            .map(|file| self.resolve(&file.path))
            .collect::<Result<Vec<_>, _>>()?;

        for (file, target) in files.iter().zip(&targets) {
            write_file(target, &file.content)?;
        }
        Ok(targets)
    }

    /// Writes only the entries whose target does not exist yet
    ///
    /// Returns the normalized paths that were written.
    pub fn write_missing(&self, files: &[FileEntry]) -> Result<Vec<String>, MaterializeError> {
        let mut written = Vec::new();
        for file in files {
            let target = self.resolve(&file.path)?;
            if target.exists() {
                debug!(path = %file.path, "Keeping existing file");
                continue;
            }
            write_file(&target, &file.content)?;
            written.push(normalize_path(&file.path).to_string());
        }
        Ok(written)
    }
}

fn write_file(target: &Path, content: &str) -> Result<(), MaterializeError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| MaterializeError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(target, content.as_bytes()).map_err(|source| MaterializeError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    debug!(path = %target.display(), bytes = content.len(), "Wrote file");
    Ok(())
}
