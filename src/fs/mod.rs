//! Local working-tree operations
//!
//! [`FileMaterializer`] writes scaffold files under the working root; the [`safety`] helpers
//! generate the exclusion file and the redacted variables example before publishing.

mod materializer;
pub mod safety;

pub use materializer::{FileMaterializer, MaterializeError};
pub use safety::{redact_env, write_env_example, write_gitignore, GITIGNORE_ENTRIES};
