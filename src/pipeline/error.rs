use crate::config::ConfigError;
use crate::deploy::DeployError;
use crate::fs::MaterializeError;
use crate::publish::PublishError;
use crate::scaffold::PlanError;
use thiserror::Error;

/// A fatal error from any stage; the run stops at the first one
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

impl PipelineError {
    /// Short stage name for logs
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "config",
            PipelineError::Plan(_) => "plan",
            PipelineError::Materialize(_) => "materialize",
            PipelineError::Publish(_) => "publish",
            PipelineError::Deploy(_) => "deploy",
        }
    }
}
