use super::clock::{Clock, Deadline, SystemClock};
use super::status::{DeployOutcome, DeployStatus, StatusReport};
use crate::config::LaunchpadConfig;
use crate::http::{HttpError, HttpRequest, HttpTransport};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The trigger call succeeded but returned no deploy identifier
    #[error("deploy trigger returned no id: {body}")]
    MissingId { body: String },
}

/// Blueprint deploy client
pub struct RenderDeployer {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    api_url: String,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
}

impl RenderDeployer {
    /// Builds a deployer when a deploy key is configured
    pub fn from_config(
        config: &LaunchpadConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Option<Self> {
        let api_key = config.render_api_key.clone()?;
        Some(
            Self::new(transport, api_key, config.render_api_url.clone())
                .with_poll_interval(config.poll_interval()),
        )
    }

    pub fn new(transport: Arc<dyn HttpTransport>, api_key: String, api_url: String) -> Self {
        Self {
            transport,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            clock: Arc::new(SystemClock::new()),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn request(&self, request: HttpRequest) -> HttpRequest {
        request
            .bearer(&self.api_key)
            .header("Accept", "application/json")
    }

    fn deploys_url(&self) -> String {
        format!("{}/v1/blueprint-deploys", self.api_url)
    }

    /// Starts a deploy of `branch` from the repository `owner/repo`, returning its id
    pub fn trigger(&self, owner: &str, repo: &str, branch: &str) -> Result<String, DeployError> {
        let url = self.deploys_url();
        let request = self.request(HttpRequest::post(&url)).json(json!({
            "repo": format!("https://github.com/{}/{}", owner, repo),
            "branch": branch,
            "clearCache": true,
        }));

        let response = self.transport.send_checked(&request)?;
        let id = response
            .json_body(&url)
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_string));

        match id {
            Some(id) if !id.is_empty() => {
                info!(deploy_id = %id, repo, branch, "Deploy triggered");
                Ok(id)
            }
            _ => Err(DeployError::MissingId {
                body: response.body,
            }),
        }
    }

    /// Polls `deploy_id` until it is live, failed, or `timeout` has passed
    ///
    /// Transport errors abort polling; a failed or timed-out deploy is an outcome.
    pub fn poll(&self, deploy_id: &str, timeout: Duration) -> Result<DeployOutcome, DeployError> {
        let url = format!("{}/{}", self.deploys_url(), deploy_id);
        let clock = self.clock.as_ref();
        let deadline = Deadline::after(clock, timeout);

        while !deadline.is_expired(clock) {
            let response = self
                .transport
                .send_checked(&self.request(HttpRequest::get(&url)))?;
            let report = StatusReport::from_json(&response.json_body(&url)?);
            debug!(
                deploy_id,
                status = %report.raw_status,
                elapsed_secs = deadline.elapsed(clock).as_secs(),
                "Deploy status"
            );

            match report.status {
                DeployStatus::Live => {
                    info!(deploy_id, urls = report.service_urls.len(), "Deploy is live");
                    return Ok(DeployOutcome::Live {
                        urls: report.service_urls,
                    });
                }
                DeployStatus::Failed => {
                    warn!(deploy_id, status = %report.raw_status, "Deploy failed");
                    return Ok(DeployOutcome::Failed {
                        status: report.raw_status,
                    });
                }
                DeployStatus::Pending => deadline.wait(clock, self.poll_interval),
            }
        }

        warn!(deploy_id, timeout_secs = timeout.as_secs(), "Timed out waiting for deploy");
        Ok(DeployOutcome::TimedOut)
    }
}
