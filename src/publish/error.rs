use crate::http::HttpError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// Repository creation failed for a reason other than missing permission
    #[error("Failed to create repository {name}: {source}")]
    CreateRepo {
        name: String,
        #[source]
        source: HttpError,
    },

    /// A single file upload failed; files before it are already pushed
    #[error("Failed to upload {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: HttpError,
    },

    #[error("Failed to walk {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid API URL {0}")]
    InvalidUrl(String),
}
