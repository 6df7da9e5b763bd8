//! Files generated right before publishing
//!
//! `.gitignore` keeps env files and tooling directories out of version control, and
//! `.env.example` documents the local variables with every value replaced by a placeholder.

use super::materializer::MaterializeError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Entries guaranteed to be present in the generated `.gitignore`
pub const GITIGNORE_ENTRIES: &[&str] = &[
    ".env",
    "*.env",
    "__pycache__/",
    "*.pyc",
    ".venv/",
    ".idea/",
    ".vscode/",
    "node_modules/",
];

const ENV_FILE: &str = ".env";
const ENV_EXAMPLE_FILE: &str = ".env.example";

/// Writes `.gitignore` under `root`
///
/// An existing file keeps its lines; missing entries are appended.
pub fn write_gitignore(root: &Path) -> Result<PathBuf, MaterializeError> {
    let path = root.join(".gitignore");
    let existing = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => return Err(MaterializeError::Io { path, source }),
    };

    let present: Vec<&str> = existing.lines().map(str::trim).collect();
    let mut contents = existing.clone();
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    for entry in GITIGNORE_ENTRIES {
        if !present.contains(entry) {
            contents.push_str(entry);
            contents.push('\n');
        }
    }

    fs::write(&path, contents).map_err(|source| MaterializeError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "Wrote .gitignore");
    Ok(path)
}

/// Masks every `KEY=value` line as `KEY=YOUR_KEY_HERE`
///
/// Comments and blank lines are kept (trimmed).
pub fn redact_env(contents: &str) -> String {
    contents
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            match trimmed.split_once('=') {
                Some((key, _)) if !trimmed.starts_with('#') => {
                    let key = key.trim();
                    let bare = key.strip_prefix("export ").unwrap_or(key).trim();
                    format!("{}=YOUR_{}_HERE", key, bare)
                }
                _ => trimmed.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes `.env.example` from `.env` when the latter exists
pub fn write_env_example(root: &Path) -> Result<Option<PathBuf>, MaterializeError> {
    let env_path = root.join(ENV_FILE);
    let contents = match fs::read_to_string(&env_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(MaterializeError::Io {
                path: env_path,
                source,
            })
        }
    };

    let path = root.join(ENV_EXAMPLE_FILE);
    fs::write(&path, redact_env(&contents)).map_err(|source| MaterializeError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Wrote redacted environment example");
    Ok(Some(path))
}
