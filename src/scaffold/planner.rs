use super::prompt::{build_plan_prompt, build_repair_prompt};
use super::response::{parse_scaffold, PlanParseError};
use super::types::ScaffoldResult;
use crate::llm::{CompletionClient, ProviderError};
use crate::progress::{ProgressEvent, ProgressHandler};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Both the first reply and the repair reply were unparseable
    #[error(transparent)]
    Parse(#[from] PlanParseError),
}

/// Drives a completion client to produce a scaffold
pub struct ScaffoldPlanner<'a> {
    client: &'a dyn CompletionClient,
    progress: Option<&'a dyn ProgressHandler>,
}

impl<'a> ScaffoldPlanner<'a> {
    pub fn new(client: &'a dyn CompletionClient) -> Self {
        Self {
            client,
            progress: None,
        }
    }

    pub fn with_progress(mut self, handler: &'a dyn ProgressHandler) -> Self {
        self.progress = Some(handler);
        self
    }

    /// Asks the model for `{plan, files}` implementing `spec`
    ///
    /// An unparseable first reply triggers exactly one repair prompt; if that reply is also
    /// unparseable the error is returned rather than an empty scaffold. A parseable reply with
    /// no files is a valid result.
    pub fn plan(&self, spec: &str) -> Result<ScaffoldResult, PlanError> {
        info!(client = self.client.name(), "Requesting scaffold plan");

        let reply = self.client.complete(&build_plan_prompt(spec))?;
        match parse_scaffold(&reply) {
            Ok(result) => {
                info!(files = result.files.len(), "Scaffold plan parsed");
                Ok(result)
            }
            Err(first) => {
                warn!(error = %first, "Scaffold reply was not valid JSON, retrying with strict prompt");
                if let Some(handler) = self.progress {
                    handler.on_progress(&ProgressEvent::RepairRequested {
                        error: first.to_string(),
                    });
                }
                let repaired = self.client.complete(&build_repair_prompt(spec))?;
                let result = parse_scaffold(&repaired)?;
                info!(files = result.files.len(), "Scaffold plan parsed after repair");
                Ok(result)
            }
        }
    }
}
