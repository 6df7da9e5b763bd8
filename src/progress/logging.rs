//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::PlanningStarted { project } => {
                info!(project = %project, "Starting plan");
            }
            ProgressEvent::RepairRequested { error } => {
                warn!(error = %error, "Plan reply unparseable, sending repair prompt");
            }
            ProgressEvent::PlanReady { files, elapsed } => {
                info!(
                    files,
                    elapsed_ms = elapsed.as_millis(),
                    "Plan received"
                );
            }
            ProgressEvent::FilesWritten { count } => {
                info!(count, "Files written");
            }
            ProgressEvent::FallbackScaffold { written } => {
                warn!(written, "No files returned, using fallback scaffold");
            }
            ProgressEvent::PublishStarted { repo } => {
                info!(repo = %repo, "Publishing");
            }
            ProgressEvent::RepoAssumed { url } => {
                warn!(url = %url, "Repository URL assumed");
            }
            ProgressEvent::FileSkipped { path, reason } => {
                debug!(path = %path, reason = %reason, "File skipped");
            }
            ProgressEvent::PushComplete { uploaded, skipped } => {
                info!(uploaded, skipped, "Push complete");
            }
            ProgressEvent::RepoReady { url } => {
                info!(url = %url, "Repository ready");
            }
            ProgressEvent::DeployStarted { deploy_id } => {
                info!(deploy_id = %deploy_id, "Deploy started");
            }
            ProgressEvent::DeploySkipped { reason } => {
                info!(reason = %reason, "Deploy skipped");
            }
            ProgressEvent::DeployFinished { outcome, elapsed } => {
                info!(
                    outcome = %outcome,
                    elapsed_secs = elapsed.as_secs(),
                    "Deploy finished"
                );
            }
            ProgressEvent::Completed { total_time } => {
                info!(total_time_ms = total_time.as_millis(), "Run complete");
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Run failed");
            }
        }
    }
}
