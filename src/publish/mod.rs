//! Publishing the working tree to a remote repository
//!
//! [`PublishPlan`] classifies every file under the root (sensitive name, undecodable text,
//! secret match, or publishable); [`GitHubPublisher`] creates the repository and uploads the
//! publishable files one commit at a time.

mod error;
mod github;
mod plan;

pub use error::PublishError;
pub use github::{GitHubPublisher, PushReport, RepoOutcome};
pub use plan::{
    guess_is_binary, is_sensitive_name, PlannedFile, PublishPlan, SkipReason, EXCLUDED_DIRS,
};
