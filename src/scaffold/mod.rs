//! Scaffold planning
//!
//! Turns a free-form project description into a [`ScaffoldResult`] by prompting a
//! [`CompletionClient`](crate::llm::CompletionClient), parsing the reply and, when the reply is
//! malformed, re-prompting exactly once with a stricter instruction.

pub mod fallback;
mod planner;
pub mod prompt;
mod response;
mod types;

pub use fallback::minimal_scaffold;
pub use planner::{PlanError, ScaffoldPlanner};
pub use response::{extract_json_from_response, parse_scaffold, strip_code_fences, PlanParseError};
pub use types::{normalize_path, FileEntry, ScaffoldResult};
