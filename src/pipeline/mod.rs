//! End-to-end orchestration: plan, materialize, publish, deploy

mod error;
mod orchestrator;
mod summary;

pub use error::PipelineError;
pub use orchestrator::{Pipeline, PlanOutcome, PublishOutcome};
pub use summary::RunSummary;
